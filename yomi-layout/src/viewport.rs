//! Viewport model.
//!
//! The visible area is re-derived on every layout call: scrolling, resizing
//! and on-screen keyboards all invalidate it, so nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::primitives::{Point, Rect};

/// Keyboard-aware visible area reported by the host, when it has one.
///
/// Offsets are relative to the layout viewport, which is the same space
/// element measurements are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualViewport {
    pub offset_left: f32,
    pub offset_top: f32,
    pub width: f32,
    pub height: f32,
}

/// Plain window metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowMetrics {
    pub inner_width: f32,
    pub inner_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

/// The currently visible region, plus the document scroll needed to turn
/// viewport-relative positions into document positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub offset_left: f32,
    pub offset_top: f32,
    pub width: f32,
    pub height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl Viewport {
    /// A viewport at the given bounds with no document scroll.
    pub fn from_bounds(bounds: Rect) -> Self {
        Self {
            offset_left: bounds.x,
            offset_top: bounds.y,
            width: bounds.width,
            height: bounds.height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Resolve the visible area, preferring the visual viewport.
    ///
    /// When a soft keyboard is up the visual viewport is the shorter one, and
    /// placing against it keeps panels out from under the keyboard.
    pub fn resolve(window: WindowMetrics, visual: Option<VisualViewport>) -> Self {
        let (offset_left, offset_top, width, height) = match visual {
            Some(v) => (v.offset_left, v.offset_top, v.width, v.height),
            None => (0.0, 0.0, window.inner_width, window.inner_height),
        };
        Self {
            offset_left: finite(offset_left),
            offset_top: finite(offset_top),
            width: finite(width).max(0.0),
            height: finite(height).max(0.0),
            scroll_x: finite(window.scroll_x),
            scroll_y: finite(window.scroll_y),
        }
    }

    /// The visible region as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.offset_left, self.offset_top, self.width, self.height)
    }

    /// Convert a viewport-relative position into document coordinates.
    pub fn to_document(&self, point: Point) -> Point {
        Point::new(point.x + self.scroll_x, point.y + self.scroll_y)
    }
}

fn finite(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
