//! Points Runner headless entry point
//!
//! Runs the simulation on its fixed-rate thread with a logging presenter and
//! a random tapper standing in for the player. Pass a tuning JSON path as the
//! first argument to override the defaults, or `--dump-tuning` to print the
//! default tuning as a template file and exit.

use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use points_runner::{Driver, Presenter, PresenterError, RenderSnapshot, Tuning};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Demo viewport (portrait phone)
const VIEWPORT: (f32, f32) = (1080.0, 1920.0);
/// Give up after this long even if the tapper keeps surviving
const TIME_LIMIT: Duration = Duration::from_secs(60);

/// Logs what a real view would draw or play
struct LogPresenter {
    last_score: Option<u64>,
    done: Sender<u64>,
}

impl Presenter for LogPresenter {
    fn render(&mut self, frame: &RenderSnapshot) -> Result<(), PresenterError> {
        log::trace!(
            "frame: points {:?} bars {}",
            frame.points,
            frame.bars.len()
        );
        Ok(())
    }

    fn show_score(&mut self, score: u64) -> Result<(), PresenterError> {
        if self.last_score != Some(score) {
            self.last_score = Some(score);
            log::info!("Score: {}", score);
        }
        Ok(())
    }

    fn run_started(&mut self) -> Result<(), PresenterError> {
        log::info!("Sound: soundtrack");
        Ok(())
    }

    fn touch_feedback(&mut self) -> Result<(), PresenterError> {
        log::info!("Sound: touch");
        Ok(())
    }

    fn game_over(&mut self, final_score: u64) -> Result<(), PresenterError> {
        log::info!("Sound: end");
        self.done
            .send(final_score)
            .map_err(|_| PresenterError::Disconnected)
    }
}

fn load_tuning() -> Tuning {
    match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("Using default tuning ({})", err);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    }
}

/// Print the default tuning as JSON
fn dump_tuning() {
    match Tuning::default().to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("Failed to serialize tuning: {}", err);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();
    if std::env::args().nth(1).as_deref() == Some("--dump-tuning") {
        dump_tuning();
        return;
    }
    log::info!("Points Runner (headless) starting...");

    let tuning = load_tuning();
    let (done_tx, done_rx) = mpsc::channel();
    let presenter = LogPresenter {
        last_score: None,
        done: done_tx,
    };

    let mut handle = match Driver::new(tuning)
        .with_viewport(VIEWPORT.0, VIEWPORT.1)
        .spawn(presenter)
    {
        Ok(handle) => handle,
        Err(err) => {
            log::error!("Failed to start: {}", err);
            std::process::exit(1);
        }
    };

    // Tap at random intervals until the run ends
    let mut rng = Pcg32::seed_from_u64(0x5eed);
    let started = Instant::now();
    let final_score = loop {
        let wait = Duration::from_millis(rng.random_range(150..900));
        match done_rx.recv_timeout(wait) {
            Ok(score) => break Some(score),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if started.elapsed() >= TIME_LIMIT {
                    break None;
                }
                handle.tap();
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break None,
        }
    };

    handle.stop();
    match final_score {
        Some(score) => println!("Game over - survived {} s", score),
        None => println!("Still alive after {} s", TIME_LIMIT.as_secs()),
    }
}
