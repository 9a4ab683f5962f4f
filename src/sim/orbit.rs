//! The two orbiting points and their rotation state machine
//!
//! Two orthogonal bits of state: the rotation direction, and a lock that
//! blocks player toggles for a short cooldown after a bounce. The cooldown
//! runs on simulation time so it stops together with the simulation.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Circle;
use crate::consts::{ANGLE_STEP, INITIAL_ANGLE};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Rotation direction (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing angle
    #[default]
    Clockwise,
    /// Decreasing angle
    CounterClockwise,
}

impl Direction {
    /// +1 or -1
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Shared circular path of the two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orbit {
    pub center: Vec2,
    pub radius: f32,
    /// Angle of point 1 (radians); point 2 sits at angle + PI
    pub angle: f64,
    pub direction: Direction,
    pub rotation_speed: f64,
    /// Remaining cooldown; zero means unlocked
    lock_remaining: Duration,
    lock_duration: Duration,
    radius_factor: f32,
    collision_radius: f32,
    points: [Vec2; 2],
}

impl Orbit {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            center: Vec2::ZERO,
            radius: 0.0,
            angle: INITIAL_ANGLE,
            direction: Direction::Clockwise,
            rotation_speed: tuning.rotation_speed,
            lock_remaining: Duration::ZERO,
            lock_duration: tuning.lock_duration(),
            radius_factor: tuning.orbit_radius_factor,
            collision_radius: tuning.collision_radius,
            points: [Vec2::ZERO; 2],
        }
    }

    /// Recenter on a new viewport and re-derive the points immediately
    pub fn resize(&mut self, width: f32, height: f32) {
        self.center = Vec2::new(width / 2.0, height / 2.0);
        self.radius = self.radius_factor * width.min(height) / 2.0;
        self.update_points();
    }

    /// Advance the angle by one fixed step and count the lock down by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.angle += ANGLE_STEP * self.direction.sign() * self.rotation_speed;
        self.update_points();
        self.lock_remaining = self.lock_remaining.saturating_sub(dt);
    }

    /// Player tap: flip direction unless locked
    ///
    /// Returns whether the direction changed.
    pub fn toggle_direction(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.direction = self.direction.flipped();
        true
    }

    /// Collision bounce: always flips, and (re)arms the lock
    pub fn bounce(&mut self) {
        self.direction = self.direction.flipped();
        self.lock_remaining = self.lock_duration;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        !self.lock_remaining.is_zero()
    }

    #[cfg(test)]
    pub(crate) fn lock_remaining(&self) -> Duration {
        self.lock_remaining
    }

    /// Point positions (point 1, point 2)
    #[inline]
    pub fn points(&self) -> [Vec2; 2] {
        self.points
    }

    /// Points as collision circles
    pub fn circles(&self) -> [Circle; 2] {
        self.points.map(|p| Circle::new(p, self.collision_radius))
    }

    fn update_points(&mut self) {
        self.points = Self::points_at(self.center, self.radius, self.angle);
    }

    /// Both point positions for a given center, radius and angle
    pub fn points_at(center: Vec2, radius: f32, angle: f64) -> [Vec2; 2] {
        [
            center + polar_to_cartesian(radius, angle),
            center + polar_to_cartesian(radius, angle + std::f64::consts::PI),
        ]
    }
}
