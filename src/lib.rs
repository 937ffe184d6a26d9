//! Arcade Sim - rocket-versus-stones shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, spawning, session lifecycle)
//! - `input`: Touch classification and host input translation
//! - `scene`: Host-side visual map kept in sync from simulation events
//! - `platform`: Wall-clock to tick conversion for hosts
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod platform;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use input::{Direction, KeyCode, TouchPhase};
pub use sim::{GameState, SimEvent, Snapshot, Viewport};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Ticks per second of wall-clock time
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Sprite footprints
    pub const STONE_WIDTH: f32 = 20.0;
    pub const STONE_HEIGHT: f32 = 20.0;
    pub const BOMB_WIDTH: f32 = 20.0;
    pub const ROCKET_WIDTH: f32 = 40.0;
    pub const ROCKET_HEIGHT: f32 = 40.0;

    /// Session defaults
    pub const TOTAL_HIT_POINTS: u32 = 5;
    /// Ticks to wait after a loss before restarting
    pub const LOST_TIME_BEFORE_RESET: u64 = 240;

    /// Spawning defaults - no stones for roughly the first 5 seconds
    pub const GAME_LAUNCH_TIME: u64 = 5 * 60;
    pub const CYCLE_PERIOD: u64 = 15 * 60;
    pub const STONES_PER_CYCLE: usize = 3;

    /// Crash marker lifetime in ticks
    pub const CRASH_LIFETIME: u64 = 15;
    /// Velocity change per cursor press
    pub const ROCKET_THRUST: f32 = 2.0;

    /// Horizontal distance per tick for stones (leftward) and bombs (rightward)
    pub const DRIFT_PER_TICK: f32 = 1.0;
    /// Nominal speed recorded on spawned stones and bombs
    pub const ENTITY_SPEED: f32 = 2.0;
    /// Per-tick drift of a stone after it has been hit
    pub const HIT_STONE_DRIFT: Vec2 = Vec2::new(0.5, 1.5);
    /// Vertical slack above a stone in the collision test
    pub const COLLISION_SLACK_Y: f32 = 5.0;
    /// Gap between the rocket's right edge and a freshly fired bomb
    pub const BOMB_LAUNCH_GAP: f32 = 5.0;
    /// Crash marker position relative to the bomb that caused it
    pub const CRASH_OFFSET: Vec2 = Vec2::new(-5.0, 18.0);
}

/// Rotation of a hit stone at the given tick (radians)
#[inline]
pub fn hit_spin(tick: u64) -> f32 {
    -(tick as f32) / std::f32::consts::PI / 8.0
}

/// Whether `pos` lies inside the inclusive rectangle `[0, size.x] x [0, size.y]`
#[inline]
pub fn within_bounds(pos: Vec2, size: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= size.x && pos.y >= 0.0 && pos.y <= size.y
}
