//! Natural-width policy for the two panels.
//!
//! The host applies these widths before measuring a panel, so the solvers
//! always see a size that already respects them.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSizing {
    pub primary_min_width: f32,
    /// Primary width as a multiple of the anchor width.
    pub primary_anchor_factor: f32,
    /// Primary width cap as a fraction of the overlay width.
    pub primary_max_fraction: f32,
    pub secondary_min_width: f32,
    pub secondary_max_width: f32,
    pub secondary_base_width: f32,
    /// Extra secondary width per kanji chip.
    pub secondary_per_kanji: f32,
}

impl Default for PanelSizing {
    fn default() -> Self {
        Self {
            primary_min_width: 420.0,
            primary_anchor_factor: 1.1,
            primary_max_fraction: 0.92,
            secondary_min_width: 260.0,
            secondary_max_width: 560.0,
            secondary_base_width: 80.0,
            secondary_per_kanji: 56.0,
        }
    }
}

impl PanelSizing {
    /// Width for the primary panel: a little wider than the anchor, never
    /// narrower than the minimum, never wider than the overlay cap.
    ///
    /// The cap wins over the minimum on narrow screens.
    pub fn primary_width(&self, anchor_width: f32, overlay_width: f32) -> f32 {
        let wanted = (anchor_width.max(0.0) * self.primary_anchor_factor).round();
        let cap = (overlay_width.max(0.0) * self.primary_max_fraction).round();
        wanted.max(self.primary_min_width).min(cap)
    }

    /// Minimum width for the secondary panel given how many kanji chips it shows.
    pub fn secondary_min_width(&self, kanji_count: usize) -> f32 {
        let wanted = self.secondary_base_width + kanji_count as f32 * self.secondary_per_kanji;
        wanted
            .min(self.secondary_max_width)
            .max(self.secondary_min_width)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("sizing.primary_min_width", self.primary_min_width),
            ("sizing.primary_anchor_factor", self.primary_anchor_factor),
            ("sizing.primary_max_fraction", self.primary_max_fraction),
            ("sizing.secondary_min_width", self.secondary_min_width),
            ("sizing.secondary_max_width", self.secondary_max_width),
            ("sizing.secondary_base_width", self.secondary_base_width),
            ("sizing.secondary_per_kanji", self.secondary_per_kanji),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_width_floor() {
        let sizing = PanelSizing::default();
        assert_eq!(sizing.primary_width(120.0, 1200.0), 420.0);
    }

    #[test]
    fn primary_width_follows_wide_anchor() {
        let sizing = PanelSizing::default();
        assert_eq!(sizing.primary_width(600.0, 1200.0), 660.0);
    }

    #[test]
    fn primary_width_capped_by_overlay() {
        let sizing = PanelSizing::default();
        // 0.92 * 400 = 368, below the 420 floor: the cap wins.
        assert_eq!(sizing.primary_width(100.0, 400.0), 368.0);
    }

    #[test]
    fn secondary_width_scales_with_kanji() {
        let sizing = PanelSizing::default();
        assert_eq!(sizing.secondary_min_width(0), 260.0);
        assert_eq!(sizing.secondary_min_width(4), 304.0);
        assert_eq!(sizing.secondary_min_width(20), 560.0);
    }
}
