//! Fixed-step game loop
//!
//! Glues the simulation to a presenter: one `step` runs one tick, dispatches
//! the events it produced and pushes the frame. Time is whatever the caller
//! says it is, so this loop runs identically under the threaded driver and
//! under tests.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::presenter::{Presenter, PresenterError, RenderSnapshot};
use crate::sim::{CollisionResult, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// A game state paired with its presenter
pub struct GameLoop<P: Presenter, R: Rng = Pcg32> {
    state: GameState<R>,
    presenter: P,
}

impl<P: Presenter> GameLoop<P> {
    pub fn new(tuning: Tuning, presenter: P) -> Self {
        Self::with_state(GameState::new(tuning), presenter)
    }
}

impl<P: Presenter, R: Rng> GameLoop<P, R> {
    pub fn with_state(state: GameState<R>, presenter: P) -> Self {
        Self { state, presenter }
    }

    /// Run one tick and emit its output
    ///
    /// Does nothing once the game is over (a resize is still remembered for
    /// a later restart).
    pub fn step(&mut self, input: &TickInput) -> Option<CollisionResult> {
        let was_over = self.state.is_over();
        let dt = self.state.tuning.tick_period();
        let result = tick(&mut self.state, input, dt);
        if was_over {
            return result;
        }

        self.dispatch_events();

        // The frame that ended the run is still drawn, flagged game_over
        if self.state.phase != GamePhase::AwaitingViewport {
            let frame = RenderSnapshot::from_state(&self.state);
            let score = frame.score;
            report("render", self.presenter.render(&frame));
            report("show_score", self.presenter.show_score(score));
        }

        result
    }

    /// Player tap, applied immediately
    pub fn tap(&mut self) -> bool {
        self.state.tap()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        self.dispatch_events();
    }

    /// Start a new run on the current viewport
    pub fn restart(&mut self) {
        self.state.restart();
        self.dispatch_events();
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            let outcome = match event {
                GameEvent::RunStarted => self.presenter.run_started(),
                GameEvent::Touch => self.presenter.touch_feedback(),
                GameEvent::GameOver { final_score } => self.presenter.game_over(final_score),
            };
            report("event", outcome);
        }
    }
}

/// Presenter failures are best-effort: log and carry on
fn report(what: &str, outcome: Result<(), PresenterError>) {
    if let Err(err) = outcome {
        log::warn!("Presenter {} failed: {}", what, err);
    }
}
