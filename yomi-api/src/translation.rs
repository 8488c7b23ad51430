//! Translation service wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient::first_text;

const TEXT_KEYS: &[&str] = &["text", "result", "translation"];

/// Request body for the translation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub src: String,
    pub tgt: String,
    pub text: String,
}

impl TranslationRequest {
    /// Japanese to Korean, the only pair the overlay asks for.
    pub fn ja_ko(text: impl Into<String>) -> Self {
        Self {
            src: "ja".into(),
            tgt: "ko".into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Translation {
    /// `None` when the service answered without any text.
    pub text: Option<String>,
}

impl From<Value> for Translation {
    fn from(value: Value) -> Self {
        Self {
            text: first_text(&value, TEXT_KEYS),
        }
    }
}
