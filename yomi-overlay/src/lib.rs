//! Yomi Overlay: tap-to-read state for Japanese screenshots.
//!
//! OCR regions become selectable boxes over the screenshot. Selecting boxes
//! opens a primary panel with the sentence, its furigana and a translation;
//! tapping a token opens a secondary panel with the word and its kanji.
//! Panel positions come from `yomi_layout`.

pub mod config;
pub mod content;
pub mod error;
pub mod kanji;
pub mod links;
pub mod overlay;
pub mod quota;
pub mod regions;
pub mod selection;
pub mod text;

pub use config::OverlayConfig;
pub use content::{
    ContentLoader, NO_TRANSLATION, RubyToken, SentenceContent, TRANSLATION_FAILED, TokenDetail,
};
pub use error::OverlayError;
pub use kanji::{GlossSource, KanjiChip, KanjiDetail, KanjiGloss, KanjiIndex};
pub use overlay::{ActiveToken, Overlay, OverlayElement};
pub use quota::{MemoryQuotaStore, QuotaLedger, QuotaStore, QuotaTicket};
pub use regions::{DisplayScale, TextBox};
pub use selection::Selection;
