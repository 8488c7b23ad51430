//! Re-layout orchestrator.
//!
//! `LayoutSession` owns the little state the layout engine needs between
//! events: which panels are open, which elements form the anchor, which
//! token the secondary panel belongs to, and the pinned direction. Geometry
//! is never stored. Every action re-measures through the `Surface` before
//! computing, so repeated viewport events converge instead of drifting.

use std::fmt;

use crate::config::{AnchorStrategy, LayoutConfig, SecondaryAnchor};
use crate::drag::PanelDrag;
use crate::placement::{self, Direction, Placement};
use crate::primitives::{Point, Rect, Size};
use crate::secondary;
use crate::snap::{self, SnapAvailability};
use crate::viewport::Viewport;

/// The two floating panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Primary,
    Secondary,
}

/// Measurement and positioning capability supplied by the host.
///
/// Measurements are viewport-relative and must reflect any write made
/// through `move_panel` immediately.
pub trait Surface {
    type Element: Copy + Eq + fmt::Debug;

    /// Current visible area. Read fresh on every call.
    fn viewport(&self) -> Viewport;

    /// Bounding rectangle of an anchor or token element, if it is still attached.
    fn measure(&self, element: Self::Element) -> Option<Rect>;

    /// Current rectangle of a panel, if it is shown.
    fn panel_rect(&self, panel: PanelKind) -> Option<Rect>;

    /// Rendered size of a panel before positioning.
    fn natural_size(&self, panel: PanelKind) -> Size;

    fn set_panel_visible(&mut self, panel: PanelKind, visible: bool);

    /// Write a panel position in document coordinates.
    fn move_panel(&mut self, panel: PanelKind, origin: Point);
}

/// Discrete events delivered to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAction<E> {
    /// The selection changed. An empty list closes everything.
    AnchorChanged(Vec<E>),
    /// A token inside the primary panel was activated.
    SecondaryTarget(E),
    /// Resize, scroll, or visual-viewport change.
    ViewportChanged,
    /// A panel's content (and so its natural size) changed.
    ContentChanged(PanelKind),
    /// Explicit direction snap for the primary panel.
    Snap(Direction),
    DragStart { panel: PanelKind, pointer: Point },
    DragMove(Point),
    DragEnd,
    /// Click outside the secondary panel.
    DismissSecondary,
    Close,
}

/// Positions written by one action, viewport-relative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Relayout {
    pub primary: Option<Placement>,
    pub secondary: Option<Point>,
    pub dragged: Option<(PanelKind, Point)>,
}

impl Relayout {
    /// True when the action moved nothing.
    pub fn is_noop(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none() && self.dragged.is_none()
    }
}

pub struct LayoutSession<E> {
    config: LayoutConfig,
    anchor: Vec<E>,
    pinned: Option<Direction>,
    /// Side used by the last primary placement.
    direction: Option<Direction>,
    primary_visible: bool,
    secondary_target: Option<E>,
    secondary_visible: bool,
    drag: Option<PanelDrag>,
}

impl<E: Copy + Eq + fmt::Debug> LayoutSession<E> {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            anchor: Vec::new(),
            pinned: None,
            direction: None,
            primary_visible: false,
            secondary_target: None,
            secondary_visible: false,
            drag: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn anchor(&self) -> &[E] {
        &self.anchor
    }

    pub fn pinned(&self) -> Option<Direction> {
        self.pinned
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn secondary_target(&self) -> Option<E> {
        self.secondary_target
    }

    pub fn is_visible(&self, panel: PanelKind) -> bool {
        match panel {
            PanelKind::Primary => self.primary_visible,
            PanelKind::Secondary => self.secondary_visible,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // =====================================================================
    // Actions
    // =====================================================================

    /// Apply one action and write the resulting positions to `surface`.
    pub fn apply<S>(&mut self, surface: &mut S, action: LayoutAction<E>) -> Relayout
    where
        S: Surface<Element = E>,
    {
        tracing::debug!(?action, "layout action");
        let out = match action {
            LayoutAction::AnchorChanged(elements) => self.select_anchor(surface, elements),
            LayoutAction::SecondaryTarget(target) => self.open_secondary(surface, target),
            LayoutAction::ViewportChanged | LayoutAction::ContentChanged(PanelKind::Primary) => {
                self.relayout(surface)
            }
            LayoutAction::ContentChanged(PanelKind::Secondary) => Relayout {
                secondary: self.place_secondary(surface),
                ..Relayout::default()
            },
            LayoutAction::Snap(direction) => self.snap(surface, direction),
            LayoutAction::DragStart { panel, pointer } => {
                self.start_drag(surface, panel, pointer);
                Relayout::default()
            }
            LayoutAction::DragMove(pointer) => self.drag_to(surface, pointer),
            LayoutAction::DragEnd => {
                self.drag = None;
                Relayout::default()
            }
            LayoutAction::DismissSecondary => {
                self.hide_secondary(surface);
                Relayout::default()
            }
            LayoutAction::Close => {
                self.close(surface);
                Relayout::default()
            }
        };
        if out.is_noop() {
            tracing::trace!("no panel moved");
        }
        out
    }

    /// Which direction snaps would currently succeed.
    pub fn snap_availability<S>(&self, surface: &S) -> SnapAvailability
    where
        S: Surface<Element = E>,
    {
        if !self.primary_visible {
            return SnapAvailability::NONE;
        }
        let Some(anchor) = self.anchor_rect(surface) else {
            return SnapAvailability::NONE;
        };
        SnapAvailability::compute(
            anchor,
            surface.natural_size(PanelKind::Primary),
            &surface.viewport(),
            self.config.spacing(),
            self.config.snap_margin,
        )
    }

    fn select_anchor<S>(&mut self, surface: &mut S, elements: Vec<E>) -> Relayout
    where
        S: Surface<Element = E>,
    {
        if elements.is_empty() {
            self.close(surface);
            return Relayout::default();
        }

        self.anchor = elements;
        self.pinned = None;
        self.drag = None;
        self.hide_secondary(surface);
        self.primary_visible = true;
        surface.set_panel_visible(PanelKind::Primary, true);

        Relayout {
            primary: self.place_primary(surface),
            ..Relayout::default()
        }
    }

    fn open_secondary<S: Surface<Element = E>>(&mut self, surface: &mut S, target: E) -> Relayout {
        if !self.primary_visible {
            tracing::debug!(?target, "secondary target without primary panel, ignored");
            return Relayout::default();
        }

        self.secondary_target = Some(target);
        self.secondary_visible = true;
        surface.set_panel_visible(PanelKind::Secondary, true);

        Relayout {
            secondary: self.place_secondary(surface),
            ..Relayout::default()
        }
    }

    fn relayout<S: Surface<Element = E>>(&mut self, surface: &mut S) -> Relayout {
        // Primary first: the secondary measures the primary's new position.
        let primary = if self.primary_visible {
            self.place_primary(surface)
        } else {
            None
        };
        let secondary = if self.secondary_visible {
            self.place_secondary(surface)
        } else {
            None
        };
        Relayout {
            primary,
            secondary,
            dragged: None,
        }
    }

    fn snap<S: Surface<Element = E>>(&mut self, surface: &mut S, direction: Direction) -> Relayout {
        if !self.primary_visible {
            tracing::debug!(?direction, "snap without primary panel, ignored");
            return Relayout::default();
        }
        let Some(anchor) = self.anchor_rect(surface) else {
            return Relayout::default();
        };

        let available = snap::can_place(
            direction,
            anchor,
            surface.natural_size(PanelKind::Primary),
            &surface.viewport(),
            self.config.spacing(),
            self.config.snap_margin,
        );
        if !available {
            tracing::debug!(?direction, "snap direction unavailable, ignored");
            return Relayout::default();
        }

        self.pinned = Some(direction);
        self.relayout(surface)
    }

    fn start_drag<S>(&mut self, surface: &S, panel: PanelKind, pointer: Point)
    where
        S: Surface<Element = E>,
    {
        if !self.is_visible(panel) {
            return;
        }
        let Some(rect) = surface.panel_rect(panel) else {
            return;
        };
        self.drag = PanelDrag::begin(panel, rect, pointer, self.config.drag_handle_height);
    }

    fn drag_to<S: Surface<Element = E>>(&mut self, surface: &mut S, pointer: Point) -> Relayout {
        let Some(drag) = self.drag else {
            return Relayout::default();
        };
        let origin = drag.origin_at(pointer);
        let viewport = surface.viewport();
        surface.move_panel(drag.panel, viewport.to_document(origin));
        Relayout {
            dragged: Some((drag.panel, origin)),
            ..Relayout::default()
        }
    }

    fn hide_secondary<S: Surface<Element = E>>(&mut self, surface: &mut S) {
        if self.secondary_visible {
            surface.set_panel_visible(PanelKind::Secondary, false);
        }
        self.secondary_visible = false;
        self.secondary_target = None;
        if matches!(self.drag, Some(drag) if drag.panel == PanelKind::Secondary) {
            self.drag = None;
        }
    }

    fn close<S: Surface<Element = E>>(&mut self, surface: &mut S) {
        self.hide_secondary(surface);
        if self.primary_visible {
            surface.set_panel_visible(PanelKind::Primary, false);
        }
        self.primary_visible = false;
        self.anchor.clear();
        self.pinned = None;
        self.direction = None;
        self.drag = None;
    }

    // =====================================================================
    // Measurement + placement
    // =====================================================================

    fn anchor_rect<S: Surface<Element = E>>(&self, surface: &S) -> Option<Rect> {
        let mut rects = self.anchor.iter().filter_map(|element| surface.measure(*element));
        match self.config.anchor {
            AnchorStrategy::First => rects.next(),
            AnchorStrategy::Union => Rect::union_all(rects),
        }
    }

    fn place_primary<S: Surface<Element = E>>(&mut self, surface: &mut S) -> Option<Placement> {
        let Some(anchor) = self.anchor_rect(surface) else {
            tracing::debug!(anchor = ?self.anchor, "anchor not measurable, primary left in place");
            return None;
        };
        let viewport = surface.viewport();
        let panel = surface.natural_size(PanelKind::Primary);
        let placement =
            placement::place_primary(anchor, panel, &viewport, self.config.spacing(), self.pinned);

        surface.move_panel(PanelKind::Primary, viewport.to_document(placement.origin));
        self.direction = Some(placement.direction);
        Some(placement)
    }

    fn place_secondary<S: Surface<Element = E>>(&mut self, surface: &mut S) -> Option<Point> {
        let target = self.secondary_target?;
        let reference = match self.config.secondary_anchor {
            SecondaryAnchor::PrimaryPanel => surface.panel_rect(PanelKind::Primary),
            SecondaryAnchor::Token => surface.measure(target),
        }?;
        let viewport = surface.viewport();
        let panel = surface.natural_size(PanelKind::Secondary);
        let origin = secondary::place_secondary(
            reference,
            panel,
            &viewport,
            self.config.spacing(),
            self.config.secondary_attach,
        );

        surface.move_panel(PanelKind::Secondary, viewport.to_document(origin));
        Some(origin)
    }
}
