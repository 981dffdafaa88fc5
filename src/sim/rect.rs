//! Axis-aligned rectangle geometry
//!
//! Screen-space convention: `y` grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
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
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Half-open overlap test: rectangles that merely touch do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True if this rectangle's horizontal span lies strictly inside `other`'s
    pub fn strictly_within_x(&self, other: &Rect) -> bool {
        self.left() > other.left() && self.right() < other.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Touching edges do not count
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_strictly_within_x() {
        let pipe = Rect::new(80.0, 0.0, 80.0, 400.0);
        assert!(Rect::new(100.0, 300.0, 34.0, 24.0).strictly_within_x(&pipe));
        // Shared left edge is not strictly inside
        assert!(!Rect::new(80.0, 300.0, 34.0, 24.0).strictly_within_x(&pipe));
        assert!(!Rect::new(140.0, 300.0, 34.0, 24.0).strictly_within_x(&pipe));
    }
}
