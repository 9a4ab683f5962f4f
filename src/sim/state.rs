//! Game state and core simulation types

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use super::orbit::Orbit;
use crate::score_seconds;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Viewport size not known yet; ticks do nothing
    AwaitingViewport,
    /// Active gameplay
    Running,
    /// Run ended (terminal until restart)
    GameOver,
}

/// Notable things that happened during a tick, drained by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (viewport became known, or restart)
    RunStarted,
    /// A point hit a bar and bounced
    Touch,
    /// Both points got boxed in; score is whole seconds survived
    GameOver { final_score: u64 },
}

/// Viewport size in screen units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: Rng = Pcg32> {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulated time survived in this run
    pub elapsed: Duration,
    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
    pub orbit: Orbit,
    pub field: ObstacleField<R>,
    viewport: Option<Viewport>,
    events: Vec<GameEvent>,
}

impl GameState<Pcg32> {
    /// Create a new game; bar lengths come from `tuning.seed`, or a random
    /// seed when none is set
    pub fn new(tuning: Tuning) -> Self {
        let seed = tuning.seed.unwrap_or_else(rand::random);
        log::debug!("Bar RNG seed: {}", seed);
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game with an explicit random source
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        Self {
            phase: GamePhase::AwaitingViewport,
            elapsed: Duration::ZERO,
            time_ticks: 0,
            orbit: Orbit::new(&tuning),
            field: ObstacleField::new(&tuning, rng),
            viewport: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// The host view changed size
    ///
    /// Non-positive sizes are ignored. The first valid size starts the run.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            log::warn!("Ignoring invalid viewport {}x{}", width, height);
            return;
        }

        self.viewport = Some(Viewport { width, height });
        if self.phase == GamePhase::GameOver {
            return;
        }

        self.orbit.resize(width, height);
        self.field.resize(width, height);
        log::info!("Viewport {}x{}", width, height);

        if self.phase == GamePhase::AwaitingViewport {
            self.start_run();
        }
    }

    /// Player tap: reverse rotation unless locked or over
    ///
    /// Returns whether the direction changed.
    pub fn tap(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.orbit.toggle_direction()
    }

    /// Start a fresh run on the current viewport
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.time_ticks = 0;
        self.orbit = Orbit::new(&self.tuning);
        self.phase = GamePhase::AwaitingViewport;

        match self.viewport {
            Some(Viewport { width, height }) => {
                self.orbit.resize(width, height);
                self.field.resize(width, height);
                self.start_run();
            }
            None => log::info!("Restart before viewport known, waiting"),
        }
    }

    /// One-way transition to game over; later calls are ignored
    pub fn end_run(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        let final_score = self.score();
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("Game over after {} ticks, score {}", self.time_ticks, final_score);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whole seconds survived
    pub fn score(&self) -> u64 {
        score_seconds(self.elapsed)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    fn start_run(&mut self) {
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Tuning {
            seed: Some(12345),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_awaits_viewport() {
        let state = state();
        assert_eq!(state.phase, GamePhase::AwaitingViewport);
        assert!(state.viewport().is_none());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_first_resize_starts_run() {
        let mut state = state();
        state.resize(1000.0, 2000.0);
        assert!(state.is_running());
        assert_eq!(state.field.bars().len(), crate::consts::BAR_COUNT);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);

        // Later resizes rebuild geometry without restarting
        state.resize(800.0, 600.0);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.orbit.center, glam::Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_invalid_resize_ignored() {
        let mut state = state();
        state.resize(0.0, 2000.0);
        state.resize(1000.0, -5.0);
        state.resize(f32::NAN, 100.0);
        assert_eq!(state.phase, GamePhase::AwaitingViewport);
        assert!(state.viewport().is_none());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_end_run_is_idempotent() {
        let mut state = state();
        state.resize(1000.0, 2000.0);
        state.drain_events();
        state.elapsed = Duration::from_millis(7250);

        state.end_run();
        state.end_run();
        assert!(state.is_over());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { final_score: 7 }]
        );
        assert!(!state.tap());
    }

    #[test]
    fn test_end_run_before_start_is_ignored() {
        let mut state = state();
        state.end_run();
        assert_eq!(state.phase, GamePhase::AwaitingViewport);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = state();
        state.resize(1000.0, 2000.0);
        state.elapsed = Duration::from_secs(3);
        state.orbit.bounce();
        state.end_run();
        state.drain_events();

        // Resizes during game over are remembered for the next run
        state.resize(500.0, 500.0);
        state.restart();

        assert!(state.is_running());
        assert_eq!(state.elapsed, Duration::ZERO);
        assert!(!state.orbit.is_locked());
        assert_eq!(state.orbit.angle, crate::consts::INITIAL_ANGLE);
        assert_eq!(state.orbit.center, glam::Vec2::new(250.0, 250.0));
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_restart_without_viewport_waits() {
        let mut state = state();
        state.restart();
        assert_eq!(state.phase, GamePhase::AwaitingViewport);
        assert!(state.drain_events().is_empty());
    }
}
