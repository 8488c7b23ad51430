//! Furigana service response.
//!
//! The morphological analyzer behind the furigana endpoint has shipped
//! several response shapes; all of them decode into `FuriganaResult`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient::{first_array, first_text};

const TOKEN_LISTS: &[&str] = &["tokens", "result", "morphs", "morphemes"];
const SURFACE_KEYS: &[&str] = &["surface", "text", "form", "word"];
const LEMMA_KEYS: &[&str] = &["lemma", "base", "dictionary", "normalized"];
const READING_KEYS: &[&str] = &["reading", "read"];

/// One morpheme as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuriganaToken {
    pub surface: String,
    /// Dictionary form; the surface when the service gives none.
    pub lemma: String,
    /// Reading as reported, usually katakana. Empty when unknown.
    pub reading: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct FuriganaResult {
    pub tokens: Vec<FuriganaToken>,
}

impl From<Value> for FuriganaResult {
    fn from(value: Value) -> Self {
        let tokens = first_array(&value, TOKEN_LISTS)
            .map(|list| list.iter().filter_map(token_from_value).collect())
            .unwrap_or_default();
        Self { tokens }
    }
}

fn token_from_value(value: &Value) -> Option<FuriganaToken> {
    let surface = first_text(value, SURFACE_KEYS)?;
    let lemma = first_text(value, LEMMA_KEYS).unwrap_or_else(|| surface.clone());
    let reading = first_text(value, READING_KEYS).unwrap_or_default();
    Some(FuriganaToken {
        surface,
        lemma,
        reading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sudachi_shape() {
        let body = r#"{"tokens":[
            {"surface":"食べ","lemma":"食べる","reading":"タベ"},
            {"surface":"た","reading":"タ"}
        ]}"#;
        let result: FuriganaResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[0].lemma, "食べる");
        assert_eq!(result.tokens[1].lemma, "た");
    }

    #[test]
    fn decodes_alternate_field_names() {
        let body = r#"{"morphemes":[{"form":"猫","base":"猫","read":"ネコ"}]}"#;
        let result: FuriganaResult = serde_json::from_str(body).unwrap();
        assert_eq!(
            result.tokens,
            vec![FuriganaToken {
                surface: "猫".into(),
                lemma: "猫".into(),
                reading: "ネコ".into(),
            }]
        );
    }

    #[test]
    fn drops_tokens_without_surface() {
        let body = r#"{"result":[{"surface":""},{"word":"が"}]}"#;
        let result: FuriganaResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].surface, "が");
    }

    #[test]
    fn unknown_shape_is_empty() {
        let result: FuriganaResult = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(result.tokens.is_empty());
    }
}
