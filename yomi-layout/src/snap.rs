//! Direction-snap enablement.
//!
//! A direction control is enabled only when snapping there would leave the
//! panel fully on screen. Availability is a function of current geometry, so
//! it is recomputed on demand rather than tracked.

use crate::config::Spacing;
use crate::placement::{Direction, side_origin};
use crate::primitives::{Rect, Size, clamp_span};
use crate::viewport::Viewport;

/// Check whether the primary panel can be shown on `direction` of `anchor`.
///
/// The hypothetical position is computed without flipping: the main axis
/// stays where the side puts it, the cross axis is clamped the way the
/// solver would clamp it. The result must lie inside the viewport shrunk by
/// `snap_margin`, or by the edge margin when that is larger, so an approved
/// vertical side is one `place_primary` keeps.
pub fn can_place(
    direction: Direction,
    anchor: Rect,
    panel: Size,
    viewport: &Viewport,
    spacing: Spacing,
    snap_margin: f32,
) -> bool {
    let anchor = anchor.normalized();
    let panel = panel.normalized();
    let bounds = viewport.bounds();
    let inner = bounds.inset(spacing.margin);

    let mut origin = side_origin(direction, anchor, panel, spacing.gap);
    if direction.is_vertical() {
        origin.x = clamp_span(origin.x, panel.width, inner.x, inner.right());
    } else {
        origin.y = clamp_span(origin.y, panel.height, inner.y, inner.bottom());
    }

    bounds
        .inset(snap_margin.max(spacing.margin))
        .contains_rect(&Rect::from_origin_size(origin, panel))
}

/// Which direction controls are usable right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapAvailability {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl SnapAvailability {
    pub const NONE: Self = Self {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };

    pub fn compute(
        anchor: Rect,
        panel: Size,
        viewport: &Viewport,
        spacing: Spacing,
        snap_margin: f32,
    ) -> Self {
        let check = |direction| can_place(direction, anchor, panel, viewport, spacing, snap_margin);
        Self {
            top: check(Direction::Top),
            bottom: check(Direction::Bottom),
            left: check(Direction::Left),
            right: check(Direction::Right),
        }
    }

    pub fn is_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.is_enabled(*d))
    }
}
