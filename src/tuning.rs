//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a JSON file. Missing
//! fields fall back to the values in [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating tuning
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick period must be positive")]
    ZeroTickPeriod,

    #[error("{field} must be a finite non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("orbit radius factor must be in (0, 1] (got {0})")]
    OrbitFactor(f32),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed tick period (ms)
    pub tick_ms: u64,
    /// Rotation speed multiplier (degrees per tick)
    pub rotation_speed: f64,
    /// Bar fall speed (units per tick)
    pub bar_speed: f32,
    pub bar_thickness: f32,
    pub bar_stagger: f32,
    pub bar_length_base: f32,
    pub bar_length_spread: f32,
    pub orbit_radius_factor: f32,
    pub collision_radius: f32,
    pub dot_radius: f32,
    /// Direction lock after a bounce (ms)
    pub lock_duration_ms: u64,
    pub game_over_threshold: f32,
    /// Seed for bar lengths; random per run when absent
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            rotation_speed: ROTATION_SPEED,
            bar_speed: BAR_SPEED,
            bar_thickness: BAR_THICKNESS,
            bar_stagger: BAR_STAGGER,
            bar_length_base: BAR_LENGTH_BASE,
            bar_length_spread: BAR_LENGTH_SPREAD,
            orbit_radius_factor: ORBIT_RADIUS_FACTOR,
            collision_radius: COLLISION_RADIUS,
            dot_radius: DOT_RADIUS,
            lock_duration_ms: LOCK_DURATION_MS,
            game_over_threshold: GAME_OVER_THRESHOLD,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tick_ms == 0 {
            return Err(TuningError::ZeroTickPeriod);
        }

        let non_negative = [
            ("rotation_speed", self.rotation_speed),
            ("bar_speed", self.bar_speed as f64),
            ("bar_thickness", self.bar_thickness as f64),
            ("bar_stagger", self.bar_stagger as f64),
            ("bar_length_base", self.bar_length_base as f64),
            ("bar_length_spread", self.bar_length_spread as f64),
            ("collision_radius", self.collision_radius as f64),
            ("dot_radius", self.dot_radius as f64),
            ("game_over_threshold", self.game_over_threshold as f64),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        let factor = self.orbit_radius_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(TuningError::OrbitFactor(factor));
        }

        Ok(())
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[inline]
    pub fn lock_duration(&self) -> Duration {
        Duration::from_millis(self.lock_duration_ms)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
