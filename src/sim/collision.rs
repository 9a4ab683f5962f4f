//! Collision detection between the orbiting points and the bars
//!
//! Points are circles, bars are axis-aligned rectangles. Everything here is
//! pure: the tick decides what to do with the result.

use super::geometry::{Circle, Rect};

/// Outcome of checking both points against every bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    /// Neither point is touching or boxed in
    Clear,
    /// At least one point overlaps at least one bar (bounce)
    Touch,
    /// Neither point overlaps a bar but both are within the threshold
    /// of their nearest bar (game over)
    Trapped,
}

/// Check if a circle overlaps a rectangle
///
/// Strict: a circle exactly tangent to the rectangle does not intersect.
#[inline]
pub fn intersects(circle: &Circle, rect: &Rect) -> bool {
    let delta = circle.center - rect.nearest_point(circle.center);
    delta.length_squared() < circle.radius * circle.radius
}

/// Distance from the circle's center to the nearest point of the rectangle
///
/// Zero when the center is inside the rectangle. Only meaningful for
/// non-intersecting pairs.
#[inline]
pub fn distance_to_rect(circle: &Circle, rect: &Rect) -> f32 {
    (circle.center - rect.nearest_point(circle.center)).length()
}

/// Proximity of one point to the bars
struct PointProximity {
    touching: bool,
    /// Minimum distance over the bars it does not intersect
    nearest: f32,
}

fn proximity(circle: &Circle, bars: &[Rect]) -> PointProximity {
    let mut touching = false;
    let mut nearest = f32::INFINITY;

    for bar in bars {
        if intersects(circle, bar) {
            touching = true;
        } else {
            nearest = nearest.min(distance_to_rect(circle, bar));
        }
    }

    PointProximity { touching, nearest }
}

/// Classify the current frame
///
/// Touch wins over Trapped: a point that overlaps any bar makes the frame a
/// bounce, however close the other point is.
pub fn evaluate(
    point1: &Circle,
    point2: &Circle,
    bars: &[Rect],
    threshold: f32,
) -> CollisionResult {
    let p1 = proximity(point1, bars);
    let p2 = proximity(point2, bars);

    if p1.touching || p2.touching {
        return CollisionResult::Touch;
    }

    if p1.nearest < threshold && p2.nearest < threshold {
        return CollisionResult::Trapped;
    }

    CollisionResult::Clear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLLISION_RADIUS, GAME_OVER_THRESHOLD};
    use glam::Vec2;
    use proptest::prelude::*;

    fn dot(x: f32, y: f32) -> Circle {
        Circle::new(Vec2::new(x, y), COLLISION_RADIUS)
    }

    /// A 400x15 bar whose top edge is at `top`
    fn bar(top: f32) -> Rect {
        Rect::from_origin_size(0.0, top, 400.0, 15.0)
    }

    #[test]
    fn test_intersects_concentric() {
        let r = Rect::new(90.0, 90.0, 110.0, 110.0);
        assert!(intersects(&dot(100.0, 100.0), &r));
        assert_eq!(distance_to_rect(&dot(100.0, 100.0), &r), 0.0);
    }

    #[test]
    fn test_intersects_tangent_is_miss() {
        // Center exactly one radius below the bar's bottom edge
        let r = bar(0.0);
        let c = dot(200.0, 15.0 + COLLISION_RADIUS);
        assert!(!intersects(&c, &r));
        assert_eq!(distance_to_rect(&c, &r), COLLISION_RADIUS);
    }

    #[test]
    fn test_intersects_separated() {
        let r = bar(0.0);
        assert!(!intersects(&dot(200.0, 100.0), &r));
        assert!(!intersects(&dot(500.0, 7.0), &r));
        assert!((distance_to_rect(&dot(500.0, 7.0), &r) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_intersects_corner() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        // 6 units off the corner on each axis: sqrt(72) ~ 8.5 < 18
        assert!(intersects(&dot(16.0, 16.0), &r));
        // 15 units on each axis: sqrt(450) ~ 21.2 > 18
        assert!(!intersects(&dot(25.0, 25.0), &r));
    }

    #[test]
    fn test_evaluate_touch_beats_trapped() {
        // Point 1 overlaps a bar; point 2 sits close to another one
        let bars = [bar(100.0), bar(480.0)];
        let p1 = dot(200.0, 105.0);
        let p2 = dot(200.0, 520.0);
        assert_eq!(
            evaluate(&p1, &p2, &bars, GAME_OVER_THRESHOLD),
            CollisionResult::Touch
        );
    }

    #[test]
    fn test_evaluate_touch_second_point_only() {
        let bars = [bar(1000.0), bar(500.0)];
        let p1 = dot(200.0, 0.0);
        let p2 = dot(200.0, 500.0);
        assert_eq!(
            evaluate(&p1, &p2, &bars, GAME_OVER_THRESHOLD),
            CollisionResult::Touch
        );
    }

    #[test]
    fn test_evaluate_trapped() {
        // Each point is 25 units from a bar: clear of it, inside the threshold
        let bars = [bar(100.0), bar(600.0)];
        let p1 = dot(200.0, 140.0);
        let p2 = dot(200.0, 575.0);
        assert_eq!(
            evaluate(&p1, &p2, &bars, GAME_OVER_THRESHOLD),
            CollisionResult::Trapped
        );
    }

    #[test]
    fn test_evaluate_one_side_close_is_clear() {
        let bars = [bar(100.0)];
        let p1 = dot(200.0, 140.0);
        let p2 = dot(200.0, 800.0);
        assert_eq!(
            evaluate(&p1, &p2, &bars, GAME_OVER_THRESHOLD),
            CollisionResult::Clear
        );
    }

    #[test]
    fn test_evaluate_threshold_is_strict() {
        let bars = [bar(0.0), bar(1000.0)];
        // Exactly 90 units from the nearest edge
        let p1 = dot(200.0, 15.0 + 90.0);
        let p2 = dot(200.0, 1000.0 - 90.0);
        assert_eq!(
            evaluate(&p1, &p2, &bars, GAME_OVER_THRESHOLD),
            CollisionResult::Clear
        );
    }

    #[test]
    fn test_evaluate_no_bars() {
        assert_eq!(
            evaluate(&dot(0.0, 0.0), &dot(1.0, 1.0), &[], GAME_OVER_THRESHOLD),
            CollisionResult::Clear
        );
    }

    proptest! {
        #[test]
        fn prop_intersects_agrees_with_distance(
            cx in -200.0f32..200.0,
            cy in -200.0f32..200.0,
            radius in 1.0f32..50.0,
        ) {
            let r = Rect::new(-40.0, -10.0, 40.0, 10.0);
            let c = Circle::new(Vec2::new(cx, cy), radius);
            let d = distance_to_rect(&c, &r);
            // Stay away from the boundary where sqrt rounding could flip it
            prop_assume!((d - radius).abs() > 1e-3);
            prop_assert_eq!(intersects(&c, &r), d < radius);
        }

        #[test]
        fn prop_evaluate_touch_when_any_overlap(
            x in 0.0f32..400.0,
            other_y in 100.0f32..1000.0,
        ) {
            let bars = [bar(0.0)];
            let p1 = dot(x, 7.0);
            let p2 = dot(200.0, other_y);
            prop_assert_eq!(
                evaluate(&p1, &p2, &bars, GAME_OVER_THRESHOLD),
                CollisionResult::Touch
            );
            prop_assert_eq!(
                evaluate(&p2, &p1, &bars, GAME_OVER_THRESHOLD),
                CollisionResult::Touch
            );
        }
    }
}
