//! Overlay configuration.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use yomi_layout::{ConfigError, LayoutConfig};

use crate::error::OverlayError;
use crate::quota::DEFAULT_MONTHLY_LIMIT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub layout: LayoutConfig,
    /// OCR calls allowed per calendar month.
    pub monthly_quota: u32,
    /// Entries kept per content cache (furigana, translation).
    pub cache_capacity: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            monthly_quota: DEFAULT_MONTHLY_LIMIT,
            cache_capacity: 256,
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(json: &str) -> Result<Self, OverlayError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading overlay config {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("parsing overlay config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), OverlayError> {
        self.layout.validate()?;
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_capacity",
                value: 0.0,
            }
            .into());
        }
        Ok(())
    }
}
