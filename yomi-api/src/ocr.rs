//! OCR wire types.

use serde::{Deserialize, Serialize};

/// One detected text region, in image-pixel coordinates.
///
/// `polygon` is normally four corners clockwise from the top-left.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OcrRegion {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub polygon: Vec<[f32; 2]>,
}

/// Body returned by the OCR worker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub annos: Vec<OcrRegion>,
}
