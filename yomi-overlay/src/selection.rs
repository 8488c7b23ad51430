//! Multi-box selection kept in reading order.

use crate::regions::TextBox;

/// Selected box indices, sorted top-to-bottom then left-to-right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    order: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `index` if absent, remove it if present. Returns true when the
    /// box ends up selected. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize, boxes: &[TextBox]) -> bool {
        if index >= boxes.len() {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|i| *i == index) {
            self.order.remove(pos);
            return false;
        }
        self.order.push(index);
        // Stable: boxes on the same spot keep selection order.
        self.order.sort_by(|a, b| {
            let (at, al) = boxes[*a].reading_key();
            let (bt, bl) = boxes[*b].reading_key();
            at.total_cmp(&bt).then(al.total_cmp(&bl))
        });
        true
    }

    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// 1-based ordinal shown on a selected box.
    pub fn badge(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|i| *i == index).map(|pos| pos + 1)
    }

    /// Selected text joined in reading order.
    pub fn sentence(&self, boxes: &[TextBox]) -> String {
        self.order
            .iter()
            .filter_map(|i| boxes.get(*i))
            .map(|b| b.text.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}
