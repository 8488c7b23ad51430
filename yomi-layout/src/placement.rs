//! Primary panel placement.
//!
//! Places a panel on one side of an anchor rectangle. Vertical sides are
//! chosen by available space and may flip; horizontal sides only happen when
//! the user pins them and are never flipped away.

use serde::{Deserialize, Serialize};

use crate::config::Spacing;
use crate::primitives::{Point, Rect, Size, clamp_span};
use crate::viewport::Viewport;

/// Side of the anchor a panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }
}

/// Result of a primary placement, in viewport-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Point,
    /// The side actually used.
    pub direction: Direction,
}

impl Placement {
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}

/// Unclamped origin for a panel on `direction` of `anchor`.
///
/// Vertical sides center the panel horizontally on the anchor; horizontal
/// sides center it vertically.
pub(crate) fn side_origin(direction: Direction, anchor: Rect, panel: Size, gap: f32) -> Point {
    let centered_x = anchor.x + (anchor.width - panel.width) / 2.0;
    let centered_y = anchor.y + (anchor.height - panel.height) / 2.0;
    match direction {
        Direction::Top => Point::new(centered_x, anchor.y - panel.height - gap),
        Direction::Bottom => Point::new(centered_x, anchor.bottom() + gap),
        Direction::Left => Point::new(anchor.x - panel.width - gap, centered_y),
        Direction::Right => Point::new(anchor.right() + gap, centered_y),
    }
}

/// Whether a vertical placement keeps its outer edge inside `inner`.
fn fits_vertically(
    direction: Direction,
    anchor: Rect,
    panel: Size,
    inner: Rect,
    gap: f32,
) -> bool {
    let y = side_origin(direction, anchor, panel, gap).y;
    match direction {
        Direction::Top => y >= inner.y,
        Direction::Bottom => y + panel.height <= inner.bottom(),
        Direction::Left | Direction::Right => true,
    }
}

/// Place the primary panel relative to `anchor`.
///
/// Without a pin the side with more room (top vs bottom, strict comparison)
/// is preferred. A preferred or pinned vertical side whose outer edge crosses
/// the margin flips to the opposite side, even if that one overflows too. A
/// pinned left/right is honored as-is and only translated into the viewport.
///
/// Never fails: oversized panels get a position that overflows the viewport.
pub fn place_primary(
    anchor: Rect,
    panel: Size,
    viewport: &Viewport,
    spacing: Spacing,
    pinned: Option<Direction>,
) -> Placement {
    let anchor = anchor.normalized();
    let panel = panel.normalized();
    let bounds = viewport.bounds();

    if let Some(side @ (Direction::Left | Direction::Right)) = pinned {
        let raw = Rect::from_origin_size(side_origin(side, anchor, panel, spacing.gap), panel);
        let placed = raw.clamp_into(bounds, spacing.margin);
        tracing::trace!(?side, x = placed.x, y = placed.y, "pinned horizontal placement");
        return Placement {
            origin: placed.origin(),
            direction: side,
        };
    }

    let inner = bounds.inset(spacing.margin);
    let preferred = pinned.unwrap_or_else(|| {
        let top_space = anchor.y - bounds.y;
        let bottom_space = bounds.bottom() - anchor.bottom();
        if top_space > bottom_space {
            Direction::Top
        } else {
            Direction::Bottom
        }
    });

    let direction = if fits_vertically(preferred, anchor, panel, inner, spacing.gap) {
        preferred
    } else {
        tracing::trace!(?preferred, "preferred side overflows, flipping");
        preferred.opposite()
    };

    let raw = side_origin(direction, anchor, panel, spacing.gap);
    let x = clamp_span(raw.x, panel.width, inner.x, inner.right());
    tracing::trace!(?direction, x, y = raw.y, "vertical placement");

    Placement {
        origin: Point::new(x, raw.y),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::from_bounds(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    fn spacing() -> Spacing {
        Spacing { gap: 8.0, margin: 8.0 }
    }

    const PANEL: Size = Size::new(300.0, 250.0);

    fn place(anchor: Rect, panel: Size, pinned: Option<Direction>) -> Placement {
        place_primary(anchor, panel, &viewport(), spacing(), pinned)
    }

    // =========================================================================
    // Automatic side selection
    // =========================================================================

    #[test]
    fn anchor_near_bottom_goes_on_top() {
        let anchor = Rect::new(100.0, 500.0, 200.0, 30.0);
        let placement = place(anchor, PANEL, None);
        assert_eq!(placement.direction, Direction::Top);
        assert_eq!(placement.origin, Point::new(50.0, 242.0));
    }

    #[test]
    fn anchor_near_top_goes_below() {
        let anchor = Rect::new(100.0, 10.0, 200.0, 30.0);
        let placement = place(anchor, PANEL, None);
        assert_eq!(placement.direction, Direction::Bottom);
        assert_eq!(placement.origin, Point::new(50.0, 48.0));
    }

    #[test]
    fn overflowing_side_flips_even_when_opposite_overflows() {
        // Bottom is preferred (290 vs 280) but ends at 718; top starts at -128.
        let anchor = Rect::new(100.0, 280.0, 200.0, 30.0);
        let placement = place(anchor, Size::new(300.0, 400.0), None);
        assert_eq!(placement.direction, Direction::Top);
        assert_eq!(placement.origin, Point::new(50.0, -128.0));
    }

    #[test]
    fn equal_space_prefers_bottom() {
        let anchor = Rect::new(100.0, 285.0, 200.0, 30.0);
        let placement = place(anchor, Size::new(100.0, 100.0), None);
        assert_eq!(placement.direction, Direction::Bottom);
    }

    #[test]
    fn horizontal_center_clamps_to_edges() {
        let left_edge = Rect::new(0.0, 10.0, 40.0, 30.0);
        let placement = place(left_edge, PANEL, None);
        assert_eq!(placement.origin.x, 8.0);

        let right_edge = Rect::new(780.0, 10.0, 20.0, 30.0);
        let placement = place(right_edge, PANEL, None);
        assert_eq!(placement.origin.x, 492.0);
    }

    #[test]
    fn result_is_contained_when_a_side_fits() {
        let vp = viewport();
        let inner = vp.bounds().inset(8.0);
        for top in [10.0, 120.0, 280.0, 400.0, 560.0] {
            let anchor = Rect::new(250.0, top, 120.0, 30.0);
            let placement = place_primary(anchor, Size::new(200.0, 150.0), &vp, spacing(), None);
            let rect = placement.rect(Size::new(200.0, 150.0));
            assert!(inner.contains_rect(&rect), "top={top}: {rect:?}");
        }
    }

    // =========================================================================
    // Pinned directions
    // =========================================================================

    #[test]
    fn pinned_top_flips_when_it_no_longer_fits() {
        let anchor = Rect::new(100.0, 50.0, 200.0, 30.0);
        let placement = place(anchor, PANEL, Some(Direction::Top));
        assert_eq!(placement.direction, Direction::Bottom);
        assert_eq!(placement.origin.y, 88.0);
    }

    #[test]
    fn pinned_bottom_is_kept_when_it_fits() {
        let anchor = Rect::new(100.0, 300.0, 200.0, 30.0);
        let placement = place(anchor, Size::new(300.0, 100.0), Some(Direction::Bottom));
        assert_eq!(placement.direction, Direction::Bottom);
        assert_eq!(placement.origin.y, 338.0);
    }

    #[test]
    fn pinned_right_centers_vertically() {
        let anchor = Rect::new(100.0, 200.0, 100.0, 50.0);
        let placement = place(anchor, Size::new(200.0, 150.0), Some(Direction::Right));
        assert_eq!(placement.direction, Direction::Right);
        assert_eq!(placement.origin, Point::new(208.0, 150.0));
    }

    #[test]
    fn pinned_left_never_flips_even_without_room() {
        let anchor = Rect::new(20.0, 200.0, 100.0, 50.0);
        let size = Size::new(200.0, 150.0);
        let first = place(anchor, size, Some(Direction::Left));
        let second = place(anchor, size, Some(Direction::Left));
        assert_eq!(first.direction, Direction::Left);
        assert_eq!(first, second);
        // Translated into the viewport, overlapping the anchor instead of moving sides.
        assert_eq!(first.origin.x, 8.0);
    }

    // =========================================================================
    // Degenerate input
    // =========================================================================

    #[test]
    fn oversized_panel_still_gets_a_position() {
        let anchor = Rect::new(100.0, 300.0, 50.0, 20.0);
        let placement = place(anchor, Size::new(1000.0, 900.0), None);
        assert!(placement.origin.x.is_finite());
        assert!(placement.origin.y.is_finite());
        assert_eq!(placement.origin.x, -100.0);
    }

    #[test]
    fn zero_size_anchor_acts_as_point() {
        let anchor = Rect::new(400.0, 100.0, -10.0, 0.0);
        let placement = place(anchor, Size::new(100.0, 50.0), None);
        assert_eq!(placement.direction, Direction::Bottom);
        assert_eq!(placement.origin, Point::new(350.0, 108.0));
    }

    #[test]
    fn placement_is_idempotent() {
        let anchor = Rect::new(123.5, 321.25, 77.0, 18.0);
        let a = place(anchor, PANEL, None);
        let b = place(anchor, PANEL, None);
        assert_eq!(a.origin.x.to_bits(), b.origin.x.to_bits());
        assert_eq!(a.origin.y.to_bits(), b.origin.y.to_bits());
        assert_eq!(a.direction, b.direction);
    }

    #[test]
    fn viewport_offset_shifts_bounds() {
        // Keyboard-adjusted viewport starting 100px down.
        let vp = Viewport::from_bounds(Rect::new(0.0, 100.0, 800.0, 300.0));
        let anchor = Rect::new(100.0, 150.0, 200.0, 30.0);
        let placement = place_primary(anchor, Size::new(300.0, 100.0), &vp, spacing(), None);
        // top space 50, bottom space 220
        assert_eq!(placement.direction, Direction::Bottom);
        assert_eq!(placement.origin.y, 188.0);
    }
}
