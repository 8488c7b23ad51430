//! The overlay controller.
//!
//! `Overlay` holds everything the screen reader tracks between events: the
//! text boxes of the current screenshot, the selection, the sentence and its
//! loaded content, and the activated token. Positioning is delegated to a
//! `LayoutSession`; the host supplies a `Surface` over its own elements.

use yomi_api::OcrProvider;
use yomi_layout::{
    AnchorStrategy, Direction, LayoutAction, LayoutSession, PanelKind, Point, Rect, Relayout, Size,
    SnapAvailability, Surface,
};

use crate::config::OverlayConfig;
use crate::content::{ContentLoader, SentenceContent, TokenDetail};
use crate::error::OverlayError;
use crate::kanji::{KanjiDetail, KanjiIndex};
use crate::quota::{QuotaLedger, QuotaStore};
use crate::regions::{DisplayScale, TextBox, boxes_from_regions};
use crate::selection::Selection;

/// Host elements the layout engine measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayElement {
    /// Text box by index into `Overlay::boxes`.
    Box(usize),
    /// Token by index into the primary panel's token line.
    Token(usize),
}

/// The activated token and its loaded detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveToken {
    pub index: usize,
    pub detail: TokenDetail,
}

pub struct Overlay {
    config: OverlayConfig,
    kanji: KanjiIndex,
    /// Displayed screenshot size; boxes live in this coordinate space.
    overlay_size: Size,
    boxes: Vec<TextBox>,
    selection: Selection,
    sentence: String,
    content: Option<SentenceContent>,
    token: Option<ActiveToken>,
    layout: LayoutSession<OverlayElement>,
}

impl Overlay {
    pub fn new(config: OverlayConfig, kanji: KanjiIndex) -> Self {
        let layout = LayoutSession::new(config.layout.clone());
        Self {
            config,
            kanji,
            overlay_size: Size::ZERO,
            boxes: Vec::new(),
            selection: Selection::new(),
            sentence: String::new(),
            content: None,
            token: None,
            layout,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn boxes(&self) -> &[TextBox] {
        &self.boxes
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Ordinal badge for a box, if selected.
    pub fn badge(&self, index: usize) -> Option<usize> {
        self.selection.badge(index)
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn content(&self) -> Option<&SentenceContent> {
        self.content.as_ref()
    }

    pub fn token(&self) -> Option<&ActiveToken> {
        self.token.as_ref()
    }

    pub fn layout(&self) -> &LayoutSession<OverlayElement> {
        &self.layout
    }

    pub fn is_visible(&self, panel: PanelKind) -> bool {
        self.layout.is_visible(panel)
    }

    /// Width the host should give the primary panel before it is measured.
    pub fn primary_width(&self) -> Option<f32> {
        if self.selection.is_empty() {
            return None;
        }
        let mut rects = self
            .selection
            .indices()
            .iter()
            .filter_map(|i| self.boxes.get(*i))
            .map(|b| b.rect);
        let anchor = match self.config.layout.anchor {
            AnchorStrategy::First => rects.next(),
            AnchorStrategy::Union => Rect::union_all(rects),
        }?;
        Some(
            self.config
                .layout
                .sizing
                .primary_width(anchor.width, self.overlay_size.width),
        )
    }

    /// Minimum width for the secondary panel of the active token.
    pub fn secondary_min_width(&self) -> Option<f32> {
        self.token.as_ref().map(|token| {
            self.config
                .layout
                .sizing
                .secondary_min_width(token.detail.kanji.len())
        })
    }

    // =====================================================================
    // Screen
    // =====================================================================

    /// Run OCR for a screenshot and replace the boxes. `displayed` is the
    /// rendered image size and `natural` its pixel size.
    ///
    /// One quota unit is taken per call and handed back if OCR fails.
    pub async fn load_screen<S, Q>(
        &mut self,
        surface: &mut S,
        image_id: &str,
        ocr: &dyn OcrProvider,
        ledger: &mut QuotaLedger<Q>,
        displayed: Size,
        natural: Size,
    ) -> Result<usize, OverlayError>
    where
        S: Surface<Element = OverlayElement>,
        Q: QuotaStore,
    {
        let image_id = image_id.trim();
        if image_id.is_empty() {
            return Err(OverlayError::BadRequest("image id required".into()));
        }

        let ticket = ledger.try_consume()?;
        let regions = match ocr.recognize(image_id).await {
            Ok(regions) => regions,
            Err(err) => {
                tracing::warn!(%err, image_id, "OCR failed");
                ledger.rollback(ticket);
                return Err(err.into());
            }
        };
        let boxes = boxes_from_regions(&regions, DisplayScale::new(displayed, natural), displayed);
        if boxes.is_empty() {
            return Err(OverlayError::NoRegions);
        }

        self.close(surface);
        self.overlay_size = displayed;
        self.boxes = boxes;
        tracing::info!(image_id, boxes = self.boxes.len(), "screen loaded");
        Ok(self.boxes.len())
    }

    /// Select or deselect a box. The primary panel follows the selection and
    /// closes with it.
    pub fn toggle_box<S>(&mut self, surface: &mut S, index: usize) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        if index >= self.boxes.len() {
            tracing::debug!(index, "toggle for unknown box, ignored");
            return Relayout::default();
        }

        self.selection.toggle(index, &self.boxes);
        if self.selection.is_empty() {
            self.close(surface);
            return Relayout::default();
        }

        self.sentence = self.selection.sentence(&self.boxes);
        self.content = None;
        self.token = None;
        let anchor = self
            .selection
            .indices()
            .iter()
            .map(|i| OverlayElement::Box(*i))
            .collect();
        self.layout.apply(surface, LayoutAction::AnchorChanged(anchor))
    }

    // =====================================================================
    // Content
    // =====================================================================

    /// Load furigana and translation for the current sentence, then re-place
    /// the primary panel for its new size. Provider failures show a
    /// placeholder instead of failing.
    pub async fn populate_primary<S>(
        &mut self,
        surface: &mut S,
        loader: &mut ContentLoader,
    ) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        if !self.layout.is_visible(PanelKind::Primary) || self.sentence.is_empty() {
            return Relayout::default();
        }

        let content = match loader.load_sentence(&self.sentence).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(%err, sentence = %self.sentence, "sentence content failed");
                SentenceContent::failed(self.sentence.clone())
            }
        };
        self.content = Some(content);
        self.layout
            .apply(surface, LayoutAction::ContentChanged(PanelKind::Primary))
    }

    /// Open the secondary panel for a token of the primary panel.
    pub async fn activate_token<S>(
        &mut self,
        surface: &mut S,
        loader: &mut ContentLoader,
        index: usize,
    ) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        let Some(token) = self.content.as_ref().and_then(|c| c.tokens.get(index)) else {
            tracing::debug!(index, "activation for unknown token, ignored");
            return Relayout::default();
        };
        let detail = loader.load_token(token, &self.kanji).await;
        self.token = Some(ActiveToken { index, detail });
        self.layout
            .apply(surface, LayoutAction::SecondaryTarget(OverlayElement::Token(index)))
    }

    pub fn activate_kanji(&self, kanji: char) -> KanjiDetail {
        self.kanji.detail(kanji)
    }

    /// Replace the sentence with user-edited text. Blank edits are ignored.
    pub fn edit_sentence<S>(&mut self, surface: &mut S, text: &str) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        let text = text.trim();
        if text.is_empty() || !self.layout.is_visible(PanelKind::Primary) {
            return Relayout::default();
        }

        self.sentence = text.to_owned();
        self.content = None;
        self.click_outside(surface);
        self.layout
            .apply(surface, LayoutAction::ContentChanged(PanelKind::Primary))
    }

    // =====================================================================
    // Panels
    // =====================================================================

    /// A click outside the panels closes only the secondary one.
    pub fn click_outside<S>(&mut self, surface: &mut S)
    where
        S: Surface<Element = OverlayElement>,
    {
        self.token = None;
        self.layout.apply(surface, LayoutAction::DismissSecondary);
    }

    /// Close both panels and clear the selection.
    pub fn close<S>(&mut self, surface: &mut S)
    where
        S: Surface<Element = OverlayElement>,
    {
        self.selection.clear();
        self.sentence.clear();
        self.content = None;
        self.token = None;
        self.layout.apply(surface, LayoutAction::Close);
    }

    pub fn viewport_changed<S>(&mut self, surface: &mut S) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        self.layout.apply(surface, LayoutAction::ViewportChanged)
    }

    pub fn snap<S>(&mut self, surface: &mut S, direction: Direction) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        self.layout.apply(surface, LayoutAction::Snap(direction))
    }

    pub fn snap_availability<S>(&self, surface: &S) -> SnapAvailability
    where
        S: Surface<Element = OverlayElement>,
    {
        self.layout.snap_availability(surface)
    }

    // =====================================================================
    // Dragging
    // =====================================================================

    pub fn drag_start<S>(&mut self, surface: &mut S, panel: PanelKind, pointer: Point) -> bool
    where
        S: Surface<Element = OverlayElement>,
    {
        self.layout
            .apply(surface, LayoutAction::DragStart { panel, pointer });
        self.layout.is_dragging()
    }

    pub fn drag_move<S>(&mut self, surface: &mut S, pointer: Point) -> Relayout
    where
        S: Surface<Element = OverlayElement>,
    {
        self.layout.apply(surface, LayoutAction::DragMove(pointer))
    }

    pub fn drag_end<S>(&mut self, surface: &mut S)
    where
        S: Surface<Element = OverlayElement>,
    {
        self.layout.apply(surface, LayoutAction::DragEnd);
    }
}
