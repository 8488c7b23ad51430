//! Panel content: furigana tokens, sentence translation, token details.
//!
//! Sentence results are cached per exact text, since the same selection is
//! often reopened after an edit is undone or the panel is closed.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use yomi_api::{
    FuriganaProvider, FuriganaResult, FuriganaToken, ProviderError, Translation, Translator,
};

use crate::kanji::{KanjiChip, KanjiIndex};
use crate::links;
use crate::text::{has_kanji, kanji_chars, kata_to_hira};

/// Shown when the translator answered without text.
pub const NO_TRANSLATION: &str = "(번역 없음)";
/// Shown when loading the sentence failed.
pub const TRANSLATION_FAILED: &str = "(번역 실패)";

/// One token of the furigana line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubyToken {
    pub surface: String,
    pub lemma: String,
    /// Hiragana reading, possibly empty.
    pub reading: String,
    /// Ruby text to draw above the surface, only for surfaces with kanji.
    pub ruby: Option<String>,
}

impl From<FuriganaToken> for RubyToken {
    fn from(token: FuriganaToken) -> Self {
        let reading = kata_to_hira(&token.reading);
        let ruby = (has_kanji(&token.surface) && !reading.is_empty()).then(|| reading.clone());
        Self {
            surface: token.surface,
            lemma: token.lemma,
            reading,
            ruby,
        }
    }
}

/// Everything the primary panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceContent {
    pub text: String,
    pub tokens: Vec<RubyToken>,
    pub translation: String,
}

impl SentenceContent {
    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
            translation: TRANSLATION_FAILED.to_owned(),
        }
    }
}

/// Everything the secondary panel shows for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetail {
    pub surface: String,
    pub reading: String,
    pub lemma: String,
    /// Dictionary link for the header.
    pub href: String,
    pub translation: Option<String>,
    pub kanji: Vec<KanjiChip>,
}

pub struct ContentLoader {
    furigana: Box<dyn FuriganaProvider>,
    translator: Box<dyn Translator>,
    furigana_cache: LruCache<String, FuriganaResult>,
    translation_cache: LruCache<String, Translation>,
}

impl ContentLoader {
    pub fn new(
        furigana: Box<dyn FuriganaProvider>,
        translator: Box<dyn Translator>,
        cache_capacity: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            furigana,
            translator,
            furigana_cache: LruCache::new(capacity),
            translation_cache: LruCache::new(capacity),
        }
    }

    /// Furigana and translation for a sentence, fetched concurrently on a miss.
    pub async fn load_sentence(&mut self, text: &str) -> Result<SentenceContent, ProviderError> {
        let cached_furigana = self.furigana_cache.get(text).cloned();
        let cached_translation = self.translation_cache.get(text).cloned();

        let furigana = &self.furigana;
        let translator = &self.translator;
        let (furigana, translation) = tokio::join!(
            async {
                match cached_furigana {
                    Some(hit) => Ok(hit),
                    None => furigana.furigana(text).await,
                }
            },
            async {
                match cached_translation {
                    Some(hit) => Ok(hit),
                    None => translator.translate(text).await,
                }
            },
        );

        // Keep whichever half succeeded.
        if let Ok(result) = &furigana {
            self.furigana_cache.put(text.to_owned(), result.clone());
        }
        if let Ok(result) = &translation {
            self.translation_cache.put(text.to_owned(), result.clone());
        }
        let (furigana, translation) = (furigana?, translation?);

        Ok(SentenceContent {
            text: text.to_owned(),
            tokens: furigana.tokens.into_iter().map(RubyToken::from).collect(),
            translation: translation
                .text
                .unwrap_or_else(|| NO_TRANSLATION.to_owned()),
        })
    }

    /// Detail for an activated token. A failed token translation leaves
    /// `translation` empty instead of failing the panel.
    pub async fn load_token(&mut self, token: &RubyToken, kanji: &KanjiIndex) -> TokenDetail {
        let term = if token.lemma.is_empty() {
            &token.surface
        } else {
            &token.lemma
        };

        let translation = match self.translation_cache.get(term.as_str()).cloned() {
            Some(hit) => hit.text,
            None => match self.translator.translate(term).await {
                Ok(result) => {
                    self.translation_cache.put(term.clone(), result.clone());
                    result.text
                }
                Err(err) => {
                    tracing::debug!(%err, term = %term, "token translation failed");
                    None
                }
            },
        };

        TokenDetail {
            surface: token.surface.clone(),
            reading: token.reading.clone(),
            lemma: token.lemma.clone(),
            href: links::token_url(&token.surface, &token.lemma),
            translation,
            kanji: kanji_chars(&token.surface)
                .into_iter()
                .map(|ch| kanji.chip(ch))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(surface: &str, lemma: &str, reading: &str) -> FuriganaToken {
        FuriganaToken {
            surface: surface.into(),
            lemma: lemma.into(),
            reading: reading.into(),
        }
    }

    #[test]
    fn ruby_only_over_kanji() {
        let kanji = RubyToken::from(token("天気", "天気", "テンキ"));
        assert_eq!(kanji.reading, "てんき");
        assert_eq!(kanji.ruby.as_deref(), Some("てんき"));

        let kana = RubyToken::from(token("いい", "いい", "イイ"));
        assert_eq!(kana.reading, "いい");
        assert_eq!(kana.ruby, None);
    }

    #[test]
    fn kanji_without_reading_has_no_ruby() {
        let t = RubyToken::from(token("猫", "猫", ""));
        assert_eq!(t.ruby, None);
    }

    #[test]
    fn failed_content_placeholder() {
        let content = SentenceContent::failed("今日は");
        assert_eq!(content.translation, TRANSLATION_FAILED);
        assert!(content.tokens.is_empty());
    }
}
