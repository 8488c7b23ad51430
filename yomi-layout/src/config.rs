//! Layout configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sizing::PanelSizing;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {value}")]
    Invalid { field: &'static str, value: f32 },

    #[error("snap_margin {snap} is smaller than edge_margin {edge}")]
    SnapInsideEdge { snap: f32, edge: f32 },

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which rectangle the primary panel is anchored to when several boxes are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStrategy {
    /// Bounding box of every selected element.
    #[default]
    Union,
    /// The first selected element only.
    First,
}

/// How the secondary panel attaches to its reference rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryAttach {
    /// Left-aligned below, flipping above when the bottom overflows.
    #[default]
    Below,
    /// Off the bottom-right corner, pulled back inside the reference when the
    /// right edge overflows.
    Diagonal,
}

/// The rectangle the secondary panel is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryAnchor {
    #[default]
    PrimaryPanel,
    Token,
}

/// Spacing pair handed to the solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Distance between an anchor and its panel.
    pub gap: f32,
    /// Distance kept between a panel and the viewport edge.
    pub margin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub gap: f32,
    pub edge_margin: f32,
    /// Inset used by snap enablement, so the direction controls stay reachable.
    /// Never smaller than `edge_margin`.
    pub snap_margin: f32,
    /// Height of the strip at the top of a panel that starts a drag.
    pub drag_handle_height: f32,
    pub anchor: AnchorStrategy,
    pub secondary_attach: SecondaryAttach,
    pub secondary_anchor: SecondaryAnchor,
    pub sizing: PanelSizing,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 8.0,
            edge_margin: 8.0,
            snap_margin: 8.0,
            drag_handle_height: 24.0,
            anchor: AnchorStrategy::default(),
            secondary_attach: SecondaryAttach::default(),
            secondary_anchor: SecondaryAnchor::default(),
            sizing: PanelSizing::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject spacing values the solvers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gap", self.gap),
            ("edge_margin", self.edge_margin),
            ("snap_margin", self.snap_margin),
            ("drag_handle_height", self.drag_handle_height),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if self.snap_margin < self.edge_margin {
            return Err(ConfigError::SnapInsideEdge {
                snap: self.snap_margin,
                edge: self.edge_margin,
            });
        }
        self.sizing.validate()
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            gap: self.gap,
            margin: self.edge_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_popup_spacing() {
        let config = LayoutConfig::default();
        assert_eq!(config.spacing(), Spacing { gap: 8.0, margin: 8.0 });
        assert_eq!(config.anchor, AnchorStrategy::Union);
        assert_eq!(config.secondary_attach, SecondaryAttach::Below);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json_str(r#"{"gap": 12, "anchor": "first"}"#).unwrap();
        assert_eq!(config.gap, 12.0);
        assert_eq!(config.edge_margin, 8.0);
        assert_eq!(config.anchor, AnchorStrategy::First);
    }

    #[test]
    fn negative_gap_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"gap": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gap", .. }));
    }

    #[test]
    fn snap_margin_inside_edge_margin_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"edge_margin": 8, "snap_margin": 0}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SnapInsideEdge { snap, edge } if snap == 0.0 && edge == 8.0
        ));

        let wider = LayoutConfig::from_json_str(r#"{"edge_margin": 4}"#).unwrap();
        assert_eq!(wider.snap_margin, 8.0);
    }

    #[test]
    fn malformed_json_rejected() {
        let err = LayoutConfig::from_json_str("{gap").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
