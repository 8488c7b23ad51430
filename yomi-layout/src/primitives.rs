//! Core geometry types for the layout engine.
//!
//! Every rectangle handled by the engine lives in viewport-relative pixels.
//! Extents are never negative once a value has gone through `normalized()`.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite extents collapse to zero.
    #[inline]
    pub fn normalized(self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Build a rectangle from its four edges.
    #[inline]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Point containment, left/top edges inclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Check that every edge of `other` lies within this rectangle (edges inclusive).
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Compute the smallest rectangle that contains both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    /// Bounding box of a set of rectangles. `None` when the set is empty.
    pub fn union_all<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects
            .into_iter()
            .map(Rect::normalized)
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Overlap of two rectangles. `None` unless the overlap has area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| Rect::from_edges(left, top, right, bottom))
    }

    /// Shrink by `margin` on every side.
    ///
    /// An axis too small to give up `2 * margin` collapses to a zero-extent
    /// line through its center.
    pub fn inset(&self, margin: f32) -> Rect {
        let (x, width) = inset_span(self.x, self.width, margin);
        let (y, height) = inset_span(self.y, self.height, margin);
        Rect { x, y, width, height }
    }

    /// Clamp negative extents to zero, so a degenerate rectangle acts as a point.
    pub fn normalized(self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }

    /// Translate (never resize) this rectangle into `bounds` shrunk by `margin`.
    ///
    /// On an axis where the rectangle is larger than the available room it is
    /// centered, overflowing both edges equally.
    pub fn clamp_into(&self, bounds: Rect, margin: f32) -> Rect {
        let inner = bounds.inset(margin);
        Rect {
            x: clamp_span(self.x, self.width, inner.x, inner.right()),
            y: clamp_span(self.y, self.height, inner.y, inner.bottom()),
            ..*self
        }
    }
}

/// Position a span of `extent` starting at `start` inside `[lo, hi]`.
pub(crate) fn clamp_span(start: f32, extent: f32, lo: f32, hi: f32) -> f32 {
    let room = hi - lo;
    if extent > room {
        lo + (room - extent) / 2.0
    } else {
        start.max(lo).min(hi - extent)
    }
}

fn inset_span(start: f32, extent: f32, margin: f32) -> (f32, f32) {
    if extent >= margin * 2.0 {
        (start + margin, extent - margin * 2.0)
    } else {
        (start + extent / 2.0, 0.0)
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Point / Size tests
    // =========================================================================

    #[test]
    fn point_add_sub() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(5.0, 15.0);
        assert_eq!(a + b, Point::new(15.0, 35.0));
        assert_eq!(a - b, Point::new(5.0, 5.0));
    }

    #[test]
    fn size_normalized_drops_negative_and_nan() {
        assert_eq!(Size::new(-4.0, 10.0).normalized(), Size::new(0.0, 10.0));
        assert_eq!(Size::new(f32::NAN, f32::INFINITY).normalized(), Size::ZERO);
    }

    // =========================================================================
    // Rect tests
    // =========================================================================

    #[test]
    fn rect_from_edges() {
        let r = Rect::from_edges(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn rect_contains_rect_is_edge_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains_rect(&Rect::new(90.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains_rect(&Rect::new(-1.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn rect_union_all() {
        let rects = [
            Rect::new(100.0, 40.0, 50.0, 20.0),
            Rect::new(20.0, 80.0, 30.0, 30.0),
            Rect::new(60.0, 10.0, 10.0, 10.0),
        ];
        assert_eq!(
            Rect::union_all(rects),
            Some(Rect::new(20.0, 10.0, 130.0, 100.0))
        );
    }

    #[test]
    fn rect_union_all_empty_is_none() {
        assert_eq!(Rect::union_all(Vec::<Rect>::new()), None);
    }

    #[test]
    fn rect_union_all_treats_degenerate_as_point() {
        let rects = [Rect::new(10.0, 10.0, -5.0, -5.0), Rect::new(20.0, 20.0, 10.0, 10.0)];
        assert_eq!(
            Rect::union_all(rects),
            Some(Rect::new(10.0, 10.0, 20.0, 20.0))
        );
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert!(a.intersection(&Rect::new(200.0, 200.0, 50.0, 50.0)).is_none());
    }

    #[test]
    fn rect_intersection_needs_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.intersection(&Rect::new(100.0, 0.0, 50.0, 50.0)).is_none());
        assert!(a.intersection(&Rect::new(10.0, 10.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn rect_contains_point_half_open() {
        let r = Rect::new(100.0, 100.0, 300.0, 200.0);
        assert!(r.contains(Point::new(100.0, 100.0)));
        assert!(!r.contains(Point::new(400.0, 150.0)));
        assert!(!r.contains(Point::new(900.0, 5.0)));
    }

    #[test]
    fn rect_inset() {
        let r = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(r.inset(8.0), Rect::new(8.0, 8.0, 784.0, 584.0));
    }

    #[test]
    fn rect_inset_collapses_small_axis() {
        let r = Rect::new(0.0, 0.0, 10.0, 100.0);
        assert_eq!(r.inset(8.0), Rect::new(5.0, 8.0, 0.0, 84.0));
    }

    // =========================================================================
    // Clamp tests
    // =========================================================================

    #[test]
    fn clamp_into_keeps_fitting_rect() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let r = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(r.clamp_into(bounds, 8.0), r);
    }

    #[test]
    fn clamp_into_translates_without_resizing() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let r = Rect::new(700.0, -50.0, 200.0, 100.0);
        assert_eq!(
            r.clamp_into(bounds, 8.0),
            Rect::new(592.0, 8.0, 200.0, 100.0)
        );
    }

    #[test]
    fn clamp_into_centers_oversized_axis() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let r = Rect::new(300.0, 100.0, 1000.0, 100.0);
        let clamped = r.clamp_into(bounds, 0.0);
        assert_eq!(clamped.x, -100.0);
        assert_eq!(clamped.width, 1000.0);
        assert_eq!(clamped.y, 100.0);
    }

    #[test]
    fn clamp_span_handles_inverted_range() {
        // Margin larger than the bounds: no panic, some position comes back.
        let x = clamp_span(50.0, 10.0, 20.0, 10.0);
        assert_eq!(x, 10.0);
    }
}
