//! Axis-aligned float rectangles used for every spatial query.
//!
//! Intersection and containment are strict: rectangles that only share an
//! edge do not intersect, and a rectangle is only contained when it sits
//! strictly inside all four sides. Collision outcomes depend on this.

use bevy::math::Vec2;
use serde::Deserialize;

/// Rectangle with float coordinates, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "(f32, f32, f32, f32)")]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<(f32, f32, f32, f32)> for RectF {
    fn from((x, y, width, height): (f32, f32, f32, f32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// A rectangle with neither width nor height.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// True when the open interiors overlap on both axes.
    pub fn intersects(&self, other: &RectF) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True when `other` lies strictly inside this rectangle.
    pub fn contains(&self, other: &RectF) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.left()
            && self.right() > other.right()
            && self.top() < other.top()
            && self.bottom() > other.bottom()
    }

    /// Translates the rectangle in place.
    pub fn offset(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grows width and height without moving the top-left corner.
    pub fn inflate(&mut self, dx: f32, dy: f32) {
        self.width += dx;
        self.height += dy;
    }

    pub fn offset_by(mut self, delta: Vec2) -> Self {
        self.offset(delta.x, delta.y);
        self
    }

    pub fn inflated(mut self, dx: f32, dy: f32) -> Self {
        self.inflate(dx, dy);
        self
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expanded(self, margin: f32) -> Self {
        self.inflated(margin * 2.0, margin * 2.0)
            .offset_by(Vec2::splat(-margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_is_symmetric() {
        let cases = [
            (RectF::new(0.0, 0.0, 10.0, 10.0), RectF::new(5.0, 5.0, 10.0, 10.0)),
            (RectF::new(0.0, 0.0, 10.0, 10.0), RectF::new(20.0, 0.0, 5.0, 5.0)),
            (RectF::new(-3.0, 2.0, 4.0, 1.0), RectF::new(0.0, 2.5, 1.0, 1.0)),
            (RectF::new(0.0, 0.0, 10.0, 10.0), RectF::new(10.0, 0.0, 10.0, 10.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.intersects(&b), b.intersects(&a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&RectF::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&RectF::new(0.0, 10.0, 5.0, 5.0)));
        assert!(a.intersects(&RectF::new(9.9, 9.9, 5.0, 5.0)));
    }

    #[test]
    fn empty_rectangles_never_intersect_or_contain() {
        let empty = RectF::new(5.0, 5.0, 0.0, 0.0);
        let big = RectF::new(0.0, 0.0, 100.0, 100.0);
        assert!(!big.intersects(&empty));
        assert!(!empty.intersects(&big));
        assert!(!big.contains(&empty));
        assert!(!empty.contains(&big));
    }

    #[test]
    fn containment_is_strict() {
        let outer = RectF::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&RectF::new(1.0, 1.0, 98.0, 98.0)));
        assert!(!outer.contains(&outer));
        assert!(!outer.contains(&RectF::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!outer.contains(&RectF::new(90.0, 90.0, 10.0, 10.0)));
    }

    #[test]
    fn inflate_keeps_the_corner() {
        let mut rect = RectF::new(4.0, 6.0, 10.0, 10.0);
        rect.inflate(2.0, 2.0);
        assert_eq!(rect, RectF::new(4.0, 6.0, 12.0, 12.0));
        rect.offset(-1.0, -1.0);
        assert_eq!(rect, RectF::new(3.0, 5.0, 12.0, 12.0));
        assert_eq!(
            RectF::new(4.0, 6.0, 10.0, 10.0).expanded(1.0),
            RectF::new(3.0, 5.0, 12.0, 12.0)
        );
    }

    #[test]
    fn deserializes_from_tuple() {
        let rect: RectF = ron::from_str("(1.0, 2.0, 3.0, 4.0)").unwrap();
        assert_eq!(rect, RectF::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(rect.right(), 4.0);
        assert_eq!(rect.bottom(), 6.0);
        assert_eq!(rect.center(), Vec2::new(2.5, 4.0));
    }
}
