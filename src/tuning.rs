//! Data-driven game balance
//!
//! Every size and timing the simulation uses lives here so it can be tuned
//! from a JSON file without touching the simulation code. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;

/// Upper bound for any tick duration in the tuning, about two years at 60 Hz
pub const MAX_TIMING_TICKS: u64 = u32::MAX as u64;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Sprite footprints (collision and danger line) ===
    /// Stone width; the danger line sits at twice this value
    pub stone_width: f32,
    pub stone_height: f32,
    pub bomb_width: f32,
    /// Rocket width; bombs launch just past it, touches left of 3x it steer
    pub rocket_width: f32,
    pub rocket_height: f32,

    // === Session ===
    /// Hit points at session start and after every reset
    pub max_hit_points: u32,
    /// Ticks a lost session stays on screen before resetting
    pub lost_time_before_reset: u64,

    // === Spawning ===
    /// Grace period after session start before the first spawn cycle
    pub game_launch_time: u64,
    /// Length of one spawn cycle in ticks
    pub cycle_period: u64,
    /// Distinct spawn ticks picked per cycle
    pub stones_per_cycle: usize,

    // === Effects / controls ===
    /// Ticks a crash marker stays alive after creation
    pub crash_lifetime: u64,
    /// Velocity change per cursor press
    pub rocket_thrust: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            stone_width: STONE_WIDTH,
            stone_height: STONE_HEIGHT,
            bomb_width: BOMB_WIDTH,
            rocket_width: ROCKET_WIDTH,
            rocket_height: ROCKET_HEIGHT,

            max_hit_points: TOTAL_HIT_POINTS,
            lost_time_before_reset: LOST_TIME_BEFORE_RESET,

            game_launch_time: GAME_LAUNCH_TIME,
            cycle_period: CYCLE_PERIOD,
            stones_per_cycle: STONES_PER_CYCLE,

            crash_lifetime: CRASH_LIFETIME,
            rocket_thrust: ROCKET_THRUST,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// X coordinate below which a stone has broken through the defence
    pub fn danger_line(&self) -> f32 {
        self.stone_width * 2.0
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let sizes = [
            ("stone_width", self.stone_width),
            ("stone_height", self.stone_height),
            ("bomb_width", self.bomb_width),
            ("rocket_width", self.rocket_width),
            ("rocket_height", self.rocket_height),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.rocket_thrust.is_finite() {
            return Err(SimError::InvalidTuning("rocket_thrust must be finite".into()));
        }
        if self.max_hit_points == 0 {
            return Err(SimError::InvalidTuning("max_hit_points must be at least 1".into()));
        }
        if self.cycle_period == 0 {
            return Err(SimError::InvalidTuning("cycle_period must be at least 1".into()));
        }
        let timings = [
            ("game_launch_time", self.game_launch_time),
            ("cycle_period", self.cycle_period),
            ("lost_time_before_reset", self.lost_time_before_reset),
            ("crash_lifetime", self.crash_lifetime),
        ];
        for (name, value) in timings {
            if value > MAX_TIMING_TICKS {
                return Err(SimError::InvalidTuning(format!(
                    "{name} must be at most {MAX_TIMING_TICKS} ticks, got {value}"
                )));
            }
        }
        if self.stones_per_cycle as u64 > self.cycle_period {
            return Err(SimError::InvalidTuning(format!(
                "stones_per_cycle ({}) exceeds cycle_period ({})",
                self.stones_per_cycle, self.cycle_period
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.max_hit_points, 5);
        assert_eq!(tuning.game_launch_time, 300);
        assert_eq!(tuning.cycle_period, 900);
        assert_eq!(tuning.danger_line(), 40.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_hit_points": 3, "cycle_period": 120 }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.max_hit_points, 3);
        assert_eq!(tuning.cycle_period, 120);
        assert_eq!(tuning.stone_width, STONE_WIDTH);
        assert_eq!(tuning.crash_lifetime, CRASH_LIFETIME);
    }

    #[test]
    fn test_rejects_crowded_cycle() {
        let result = Tuning::from_json(r#"{ "cycle_period": 2, "stones_per_cycle": 3 }"#);
        assert!(matches!(result, Err(SimError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_zero_sizes_and_hit_points() {
        let tuning = Tuning {
            bomb_width: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            max_hit_points: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_runaway_timings() {
        let result = Tuning::from_json(
            r#"{ "game_launch_time": 1, "cycle_period": 18446744073709551615 }"#,
        );
        assert!(matches!(result, Err(SimError::InvalidTuning(_))));

        let tuning = Tuning {
            game_launch_time: MAX_TIMING_TICKS + 1,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            cycle_period: MAX_TIMING_TICKS,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let result = Tuning::from_json("{ not json");
        assert!(matches!(result, Err(SimError::Json(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Tuning::load("/definitely/not/here/tuning.json");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
