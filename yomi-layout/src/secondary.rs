//! Secondary panel placement.
//!
//! The secondary panel hangs off another panel rather than page content, so it
//! gets a fixed preference order (below, then above) and no pinning.

use crate::config::{SecondaryAttach, Spacing};
use crate::primitives::{Point, Rect, Size, clamp_span};
use crate::viewport::Viewport;

/// Place the secondary panel against `reference` (normally the primary panel).
///
/// The horizontal axis is clamped independently of the vertical choice. When
/// neither below nor above fits, the panel is clamped to the nearest edge and
/// allowed to overlap or overflow.
pub fn place_secondary(
    reference: Rect,
    panel: Size,
    viewport: &Viewport,
    spacing: Spacing,
    attach: SecondaryAttach,
) -> Point {
    let reference = reference.normalized();
    let panel = panel.normalized();
    let inner = viewport.bounds().inset(spacing.margin);

    let (x, mut y) = match attach {
        SecondaryAttach::Below => (reference.x, reference.bottom() + spacing.gap),
        SecondaryAttach::Diagonal => {
            let mut x = reference.right() + spacing.gap;
            if x + panel.width > inner.right() {
                x = reference.right() - panel.width;
            }
            (x, reference.bottom() + spacing.gap)
        }
    };

    if y + panel.height > inner.bottom() {
        tracing::trace!("secondary overflows below, moving above");
        y = reference.y - panel.height - spacing.gap;
    }

    Point::new(
        clamp_span(x, panel.width, inner.x, inner.right()),
        clamp_span(y, panel.height, inner.y, inner.bottom()),
    )
}
