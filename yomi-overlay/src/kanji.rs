//! Kanji gloss lookup.
//!
//! Two sources feed the index: a study deck (glosses with optional
//! explanations) and a general kanji table. The deck wins when both know a
//! character. Both files have drifted between several JSON shapes, so parsing
//! goes through `serde_json::Value` and accepts all of them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use yomi_api::first_text;

use crate::error::OverlayError;
use crate::links;

const RECORD_KANJI: &[&str] = &["k", "kanji", "ch", "key"];
const RECORD_GLOSS: &[&str] = &["ko", "mean", "gloss", "def", "korean", "translation"];
const KEYED_GLOSS: &[&str] = &["ko", "mean", "gloss", "def"];

const DECK_KANJI: &[&str] = &["kanji", "Kanji", "k", "ch", "character"];
const DECK_GLOSS: &[&str] = &["gloss", "mean", "ko", "translation"];
const DECK_EXPLAIN: &[&str] = &["explain", "desc", "note"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlossSource {
    Deck,
    General,
}

/// One lookup hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiGloss {
    pub source: GlossSource,
    pub gloss: String,
    /// Deck entries only; `None` when empty.
    pub explain: Option<String>,
}

/// What activating a kanji chip shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanjiDetail {
    /// Deck entry with a written explanation.
    Explained {
        kanji: char,
        gloss: String,
        explain: String,
    },
    Gloss { kanji: char, gloss: String },
    /// Unknown character; open the hanja dictionary instead.
    External(String),
}

/// A kanji from a token, tagged with where its gloss comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiChip {
    pub kanji: char,
    pub source: Option<GlossSource>,
}

#[derive(Debug, Clone)]
struct DeckEntry {
    gloss: String,
    explain: String,
}

#[derive(Debug, Clone, Default)]
pub struct KanjiIndex {
    deck: HashMap<String, DeckEntry>,
    general: HashMap<String, String>,
}

impl KanjiIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from whichever sources are present. A source that fails to
    /// decode is logged and skipped.
    pub fn from_sources(general: Option<&str>, deck: Option<&str>) -> Self {
        let mut index = Self::new();
        if let Some(json) = general {
            if let Err(err) = index.load_general(json) {
                tracing::warn!(%err, "general kanji table skipped");
            }
        }
        if let Some(json) = deck {
            if let Err(err) = index.load_deck(json) {
                tracing::warn!(%err, "kanji deck skipped");
            }
        }
        index
    }

    /// Load the general table: an array of records or an object keyed by kanji.
    /// Returns the number of entries read.
    pub fn load_general(&mut self, json: &str) -> Result<usize, OverlayError> {
        let value: Value = serde_json::from_str(json)?;
        let mut count = 0;
        match &value {
            Value::Array(records) => {
                for record in records {
                    let Some(kanji) = first_text(record, RECORD_KANJI) else {
                        continue;
                    };
                    let gloss = first_text(record, RECORD_GLOSS).unwrap_or_default();
                    self.general.insert(kanji, gloss);
                    count += 1;
                }
            }
            Value::Object(map) => {
                for (kanji, entry) in map {
                    let gloss = first_text(entry, KEYED_GLOSS)
                        .or_else(|| entry.as_str().map(str::to_owned))
                        .unwrap_or_default();
                    self.general.insert(kanji.clone(), gloss);
                    count += 1;
                }
            }
            _ => {}
        }
        tracing::debug!(count, "general kanji table loaded");
        Ok(count)
    }

    /// Load a deck export: `{notes: [...]}` or a bare array of notes. Note
    /// fields may be named or positional (kanji, gloss, explanation).
    pub fn load_deck(&mut self, json: &str) -> Result<usize, OverlayError> {
        let value: Value = serde_json::from_str(json)?;
        let notes = value
            .get("notes")
            .and_then(Value::as_array)
            .or_else(|| value.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut count = 0;
        for note in notes {
            let fields = note.get("fields").unwrap_or(note);
            let Some(kanji) = deck_field(fields, DECK_KANJI, 0) else {
                continue;
            };
            let entry = DeckEntry {
                gloss: deck_field(fields, DECK_GLOSS, 1).unwrap_or_default(),
                explain: deck_field(fields, DECK_EXPLAIN, 2).unwrap_or_default(),
            };
            self.deck.insert(kanji, entry);
            count += 1;
        }
        tracing::debug!(count, "kanji deck loaded");
        Ok(count)
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty() && self.general.is_empty()
    }

    pub fn lookup(&self, kanji: char) -> Option<KanjiGloss> {
        let mut buf = [0u8; 4];
        let key: &str = kanji.encode_utf8(&mut buf);

        if let Some(entry) = self.deck.get(key) {
            return Some(KanjiGloss {
                source: GlossSource::Deck,
                gloss: entry.gloss.clone(),
                explain: (!entry.explain.is_empty()).then(|| entry.explain.clone()),
            });
        }
        self.general.get(key).map(|gloss| KanjiGloss {
            source: GlossSource::General,
            gloss: gloss.clone(),
            explain: None,
        })
    }

    pub fn chip(&self, kanji: char) -> KanjiChip {
        KanjiChip {
            kanji,
            source: self.lookup(kanji).map(|hit| hit.source),
        }
    }

    pub fn detail(&self, kanji: char) -> KanjiDetail {
        match self.lookup(kanji) {
            Some(KanjiGloss {
                source: GlossSource::Deck,
                gloss,
                explain: Some(explain),
            }) => KanjiDetail::Explained {
                kanji,
                gloss,
                explain,
            },
            Some(hit) => KanjiDetail::Gloss {
                kanji,
                gloss: hit.gloss,
            },
            None => KanjiDetail::External(links::hanja_url(&kanji.to_string())),
        }
    }
}

/// Named field first, then the positional one.
fn deck_field(fields: &Value, keys: &[&str], position: usize) -> Option<String> {
    first_text(fields, keys).or_else(|| match fields.get(position)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
