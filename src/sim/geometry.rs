//! Axis-aligned rectangles and circles in screen space
//!
//! Screen space follows the host view: origin at the top-left corner,
//! y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle used for point collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle (left <= right, top <= bottom)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from top-left corner and size
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Point of the rectangle closest to `p` (clamped per axis)
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left, self.right),
            p.y.clamp(self.top, self.bottom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_origin_size() {
        let r = Rect::from_origin_size(10.0, 20.0, 100.0, 15.0);
        assert_eq!(r.right, 110.0);
        assert_eq!(r.bottom, 35.0);
    }

    #[test]
    fn test_nearest_point_clamps_each_axis() {
        let r = Rect::new(0.0, 0.0, 100.0, 10.0);
        // Inside stays put
        assert_eq!(r.nearest_point(Vec2::new(50.0, 5.0)), Vec2::new(50.0, 5.0));
        // Above the rect clamps only y
        assert_eq!(r.nearest_point(Vec2::new(50.0, -40.0)), Vec2::new(50.0, 0.0));
        // Off the corner clamps both
        assert_eq!(
            r.nearest_point(Vec2::new(130.0, 30.0)),
            Vec2::new(100.0, 10.0)
        );
    }
}
