//! Points Runner - two orbiting points dodging scrolling bars
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orbit, bars, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `presenter`: Boundary to the rendering/audio collaborator
//! - `runner`: Fixed-step game loop feeding a presenter
//! - `driver`: Threaded fixed-rate scheduler with cancellation

pub mod driver;
pub mod presenter;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use driver::{Driver, DriverHandle};
pub use presenter::{Presenter, PresenterError, RenderSnapshot};
pub use runner::GameLoop;
pub use tuning::{Tuning, TuningError};

use std::time::Duration;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum substeps per driver wakeup to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Orbit radius as a fraction of half the shorter viewport side
    pub const ORBIT_RADIUS_FACTOR: f32 = 0.9;
    /// Starting angle of point 1 (radians, straight down in screen space)
    pub const INITIAL_ANGLE: f64 = std::f64::consts::FRAC_PI_2;
    /// Angular step per tick before direction/speed scaling (one degree)
    pub const ANGLE_STEP: f64 = std::f64::consts::TAU / 360.0;
    /// Default rotation speed multiplier
    pub const ROTATION_SPEED: f64 = 4.0;

    /// Point radii - collision is a little more forgiving than what is drawn
    pub const DOT_RADIUS: f32 = 15.0;
    pub const COLLISION_RADIUS: f32 = 18.0;

    /// Bars
    pub const BAR_COUNT: usize = 4;
    pub const BAR_THICKNESS: f32 = 15.0;
    /// Downward speed (units per tick)
    pub const BAR_SPEED: f32 = 6.0;
    /// Vertical spacing between initial bars as a fraction of viewport height
    pub const BAR_STAGGER: f32 = 0.22;
    /// Bar length = width * (BASE + random * SPREAD)
    pub const BAR_LENGTH_BASE: f32 = 0.4;
    pub const BAR_LENGTH_SPREAD: f32 = 0.25;

    /// Direction lock after a bounce
    pub const LOCK_DURATION_MS: u64 = 300;
    /// Both points closer than this to a bar ends the run
    pub const GAME_OVER_THRESHOLD: f32 = 90.0;
}

/// Convert polar (r, theta) to a cartesian offset
///
/// The angle is kept in f64 since it grows without bound over a run.
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f64) -> Vec2 {
    let r = r as f64;
    Vec2::new((r * theta.cos()) as f32, (r * theta.sin()) as f32)
}

/// Whole seconds survived, as displayed to the player
#[inline]
pub fn score_seconds(elapsed: Duration) -> u64 {
    elapsed.as_secs()
}
