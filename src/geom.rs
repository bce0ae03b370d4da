//! Axis-aligned rectangles
//!
//! Every collision in both games goes through the one primitive here: a
//! closed-interval AABB overlap test on current positions and sizes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, bottom-left anchored, y growing upward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// AABB overlap test. Touching edges count as overlapping, the way
    /// widget collision behaves in the toolkit this replaces.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.bottom() <= other.top()
            && self.top() >= other.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_count() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_accessors() {
        let r = Rect::new(2.0, 3.0, 4.0, 6.0);
        assert_eq!(r.right(), 6.0);
        assert_eq!(r.top(), 9.0);
        assert_eq!(r.center(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_from_center_round_trips() {
        let r = Rect::from_center(Vec2::new(1.0, 2.0), Vec2::new(0.5, 0.5));
        assert!((r.center_x() - 1.0).abs() < 1e-6);
        assert!((r.center_y() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(r.contains(Vec2::new(0.5, 0.5)));
        assert!(r.contains(Vec2::new(1.0, 1.0)));
        assert!(!r.contains(Vec2::new(1.1, 0.5)));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.1f32..50.0, bh in 0.1f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            w in 0.1f32..50.0, h in 0.1f32..50.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.overlaps(&r));
        }
    }
}
