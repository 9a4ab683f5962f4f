//! Boundary to the rendering/audio collaborator
//!
//! The simulation never reaches into the view. The game loop pushes frames,
//! scores and feedback cues into a [`Presenter`]; failures coming back are
//! logged and otherwise ignored.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Rect};

/// Failure reported by a presenter
#[derive(thiserror::Error, Debug)]
pub enum PresenterError {
    #[error("presenter is gone")]
    Disconnected,

    #[error("presenter backend failed: {0}")]
    Backend(String),
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Point 1 and point 2
    pub points: [Vec2; 2],
    /// Radius to draw the points with (smaller than the collision radius)
    pub dot_radius: f32,
    /// Bar rectangles in bar index order
    pub bars: Vec<Rect>,
    /// Whole seconds survived
    pub score: u64,
    /// Set on the frame the run ended; renderers hide or explode the points
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn from_state<R: Rng>(state: &GameState<R>) -> Self {
        Self {
            points: state.orbit.points(),
            dot_radius: state.tuning.dot_radius,
            bars: state.field.rects(),
            score: state.score(),
            game_over: state.is_over(),
        }
    }
}

/// Rendering/audio observer driven by the game loop
///
/// All calls happen on the simulation thread, inside a tick. They should
/// return quickly; a slow presenter slows the simulation.
pub trait Presenter {
    /// Draw a frame
    fn render(&mut self, frame: &RenderSnapshot) -> Result<(), PresenterError>;

    /// Update the score display
    fn show_score(&mut self, _score: u64) -> Result<(), PresenterError> {
        Ok(())
    }

    /// A run began (start the soundtrack)
    fn run_started(&mut self) -> Result<(), PresenterError> {
        Ok(())
    }

    /// A point bounced off a bar (short sound cue)
    fn touch_feedback(&mut self) -> Result<(), PresenterError> {
        Ok(())
    }

    /// The run ended; fired once per run
    fn game_over(&mut self, _final_score: u64) -> Result<(), PresenterError> {
        Ok(())
    }
}
