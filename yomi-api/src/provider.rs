//! Provider traits for the remote services.

use thiserror::Error;

use crate::{FuriganaResult, OcrRegion, Translation};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Text detection for an uploaded screenshot.
#[async_trait::async_trait]
pub trait OcrProvider: Send + Sync {
    /// Regions for the image stored under `image_id`, in image-pixel coordinates.
    async fn recognize(&self, image_id: &str) -> Result<Vec<OcrRegion>, ProviderError>;
}

/// Morphological analysis with readings.
#[async_trait::async_trait]
pub trait FuriganaProvider: Send + Sync {
    async fn furigana(&self, text: &str) -> Result<FuriganaResult, ProviderError>;
}

/// Japanese to Korean translation.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<Translation, ProviderError>;
}
