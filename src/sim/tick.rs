//! Fixed timestep simulation tick
//!
//! Advances bars and orbit, then checks collisions and applies the resulting
//! transition. The tick never blocks and never talks to the presenter; it
//! only records events for the game loop to dispatch.

use std::time::Duration;

use rand::Rng;

use super::collision::{CollisionResult, evaluate};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Reverse rotation (tap)
    pub tap: bool,
    /// New viewport size
    pub resize: Option<(f32, f32)>,
}

/// Advance the game state by one fixed timestep
///
/// Returns the collision classification when collisions were checked this
/// tick, `None` when they were skipped (not running, or direction locked).
pub fn tick<R: Rng>(
    state: &mut GameState<R>,
    input: &TickInput,
    dt: Duration,
) -> Option<CollisionResult> {
    if let Some((width, height)) = input.resize {
        state.resize(width, height);
    }

    // Game over is terminal, and nothing moves before the viewport is known
    match state.phase {
        GamePhase::GameOver | GamePhase::AwaitingViewport => return None,
        GamePhase::Running => {}
    }

    if input.tap {
        state.tap();
    }

    state.elapsed += dt;
    state.time_ticks += 1;

    state.field.tick();
    state.orbit.tick(dt);

    // A fresh bounce suppresses checks so one overlap can't flip us back
    if state.orbit.is_locked() {
        return None;
    }

    let [point1, point2] = state.orbit.circles();
    let bars = state.field.rects();
    let result = evaluate(&point1, &point2, &bars, state.tuning.game_over_threshold);

    match result {
        CollisionResult::Touch => {
            state.orbit.bounce();
            state.push_event(GameEvent::Touch);
            log::debug!(
                "Bounce at tick {}, now {:?}",
                state.time_ticks,
                state.orbit.direction
            );
        }
        CollisionResult::Trapped => state.end_run(),
        CollisionResult::Clear => {}
    }

    Some(result)
}
