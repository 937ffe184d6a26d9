//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer ticks only, never wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{bomb_hits_stone, detect_hits};
pub use spawner::{Spawner, pick_distinct_ticks};
pub use state::{
    Bomb, Crash, GameState, RemovalReason, Rocket, Session, SessionPhase, SimEvent, Snapshot,
    Stone, Viewport,
};
pub use store::{EntityId, EntityStore};
pub use tick::tick;
