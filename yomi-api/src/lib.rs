//! Yomi API - Boundary types for the collaborators behind the overlay.
//!
//! OCR, furigana and translation services are reached over the network by
//! the host. This crate fixes their wire shapes and the async traits the
//! overlay calls them through.

mod furigana;
mod lenient;
mod ocr;
mod provider;
mod translation;

pub use furigana::*;
pub use lenient::{first_array, first_text};
pub use ocr::*;
pub use provider::*;
pub use translation::*;
