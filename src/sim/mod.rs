//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Stable iteration order (by bar index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod obstacles;
pub mod orbit;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, distance_to_rect, evaluate, intersects};
pub use geometry::{Circle, Rect};
pub use obstacles::{Bar, ObstacleField};
pub use orbit::{Direction, Orbit};
pub use state::{GameEvent, GamePhase, GameState, Viewport};
pub use tick::{TickInput, tick};
