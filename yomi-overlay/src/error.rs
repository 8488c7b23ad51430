//! Overlay error types.

use thiserror::Error;
use yomi_api::ProviderError;
use yomi_layout::ConfigError;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("monthly OCR quota exhausted ({used}/{limit})")]
    QuotaExhausted { used: u32, limit: u32 },

    #[error("no text regions found")]
    NoRegions,

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
