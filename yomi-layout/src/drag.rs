//! Panel drag tracking.
//!
//! A drag starts only from the handle strip at the top of a panel. The panel
//! keeps the grab offset for the whole gesture so it does not jump under the
//! pointer.

use crate::primitives::{Point, Rect};
use crate::session::PanelKind;

/// An in-progress drag of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDrag {
    pub panel: PanelKind,
    start_pointer: Point,
    start_origin: Point,
}

impl PanelDrag {
    /// Begin a drag if `pointer` is on the handle strip of `panel_rect`.
    pub fn begin(
        panel: PanelKind,
        panel_rect: Rect,
        pointer: Point,
        handle_height: f32,
    ) -> Option<Self> {
        if panel_rect.contains(pointer) && pointer.y < panel_rect.y + handle_height {
            Some(Self {
                panel,
                start_pointer: pointer,
                start_origin: panel_rect.origin(),
            })
        } else {
            None
        }
    }

    /// Panel origin for the current pointer position.
    pub fn origin_at(&self, pointer: Point) -> Point {
        self.start_origin + (pointer - self.start_pointer)
    }
}
