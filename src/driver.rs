//! Threaded fixed-rate scheduler
//!
//! The driver owns a worker thread that runs a [`GameLoop`] with a
//! fixed-timestep accumulator. Taps and resizes travel over a channel and
//! are applied at the start of the next tick, so simulation state is never
//! shared between threads. Stopping is a single flag checked before every
//! tick: once it is observed, no further tick runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::MAX_SUBSTEPS;
use crate::presenter::Presenter;
use crate::runner::GameLoop;
use crate::sim::TickInput;
use crate::tuning::{Tuning, TuningError};

/// Errors starting the driver
#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Tuning(#[from] TuningError),

    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Messages from the host to the worker
#[derive(Debug, Clone, Copy)]
enum Command {
    Tap,
    Resize(f32, f32),
    Restart,
    Stop,
}

/// Configures and starts the simulation thread
#[derive(Debug, Clone, Default)]
pub struct Driver {
    tuning: Tuning,
    viewport: Option<(f32, f32)>,
}

impl Driver {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            viewport: None,
        }
    }

    /// Start with a known viewport instead of waiting for a resize
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    /// Spawn the worker; the presenter is handed back by [`DriverHandle::stop`]
    pub fn spawn<P>(self, presenter: P) -> Result<DriverHandle<P>, DriverError>
    where
        P: Presenter + Send + 'static,
    {
        self.tuning.validate()?;

        let (commands, inbox) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let mut game = GameLoop::new(self.tuning, presenter);
        if let Some((width, height)) = self.viewport {
            game.resize(width, height);
        }

        let worker_stop = Arc::clone(&stop);
        let worker = thread::Builder::new()
            .name("points-runner-sim".into())
            .spawn(move || run(game, inbox, worker_stop))?;

        log::info!("Simulation thread started");
        Ok(DriverHandle {
            commands,
            stop,
            worker: Some(worker),
        })
    }
}

/// Host-side handle to a running simulation
///
/// Dropping the handle stops the simulation.
pub struct DriverHandle<P> {
    commands: Sender<Command>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<P>>,
}

impl<P> DriverHandle<P> {
    /// Reverse rotation on the next tick
    pub fn tap(&self) {
        self.send(Command::Tap);
    }

    /// Viewport changed size
    pub fn resize(&self, width: f32, height: f32) {
        self.send(Command::Resize(width, height));
    }

    /// Start a new run (after game over, or abandoning the current one)
    pub fn restart(&self) {
        self.send(Command::Restart);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Halt the simulation and wait for the worker to exit
    ///
    /// Returns the presenter on the first call, `None` afterwards or if the
    /// worker panicked.
    pub fn stop(&mut self) -> Option<P> {
        self.stop.store(true, Ordering::Release);
        // Wake the worker if it is parked after a game over
        self.send(Command::Stop);

        let worker = self.worker.take()?;
        match worker.join() {
            Ok(presenter) => {
                log::info!("Simulation thread stopped");
                Some(presenter)
            }
            Err(_) => {
                log::error!("Simulation thread panicked");
                None
            }
        }
    }

    fn send(&self, command: Command) {
        // The worker only hangs up once stopped; commands after that are moot
        if self.commands.send(command).is_err() {
            log::debug!("Dropped {:?}, simulation not running", command);
        }
    }
}

impl<P> Drop for DriverHandle<P> {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

/// Worker body: tick at a fixed rate until stopped
fn run<P: Presenter>(mut game: GameLoop<P>, inbox: Receiver<Command>, stop: Arc<AtomicBool>) -> P {
    let period = game.state().tuning.tick_period();
    let max_backlog = period * MAX_SUBSTEPS;
    let mut input = TickInput::default();
    let mut accumulator = Duration::ZERO;
    let mut last = Instant::now();

    'outer: loop {
        if stop.load(Ordering::Acquire) {
            break;
        }

        if game.state().is_over() {
            // Ticks are cancelled; only a restart, resize or stop wakes us
            match inbox.recv() {
                Ok(Command::Restart) => {
                    game.restart();
                    input = TickInput::default();
                    accumulator = Duration::ZERO;
                    last = Instant::now();
                }
                Ok(Command::Resize(width, height)) => game.resize(width, height),
                Ok(Command::Tap) => {}
                Ok(Command::Stop) | Err(_) => break,
            }
            continue;
        }

        // Sleep until the next tick is due, waking early for commands
        match inbox.recv_timeout(period.saturating_sub(accumulator)) {
            Ok(command) => {
                if !queue(command, &mut input, &mut game) {
                    break;
                }
                while let Ok(command) = inbox.try_recv() {
                    if !queue(command, &mut input, &mut game) {
                        break 'outer;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let now = Instant::now();
        accumulator = (accumulator + (now - last)).min(max_backlog);
        last = now;

        while accumulator >= period {
            if stop.load(Ordering::Acquire) {
                break 'outer;
            }
            game.step(&input);
            // Clear one-shot inputs after processing
            input = TickInput::default();
            accumulator -= period;

            if game.state().is_over() {
                accumulator = Duration::ZERO;
                break;
            }
        }
    }

    game.into_presenter()
}

/// Fold a command into the next tick's input; false means stop
fn queue<P: Presenter>(command: Command, input: &mut TickInput, game: &mut GameLoop<P>) -> bool {
    match command {
        // Two taps inside one tick cancel out
        Command::Tap => input.tap = !input.tap,
        Command::Resize(width, height) => input.resize = Some((width, height)),
        Command::Restart => game.restart(),
        Command::Stop => return false,
    }
    true
}
