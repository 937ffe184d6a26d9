//! Crate error type

use thiserror::Error;

use crate::sim::EntityId;

/// Errors surfaced by the simulation core and its configuration loader
#[derive(Debug, Error)]
pub enum SimError {
    /// `update` was called with a tick older than the last simulated one
    #[error("tick {now} is behind the last simulated tick {last}")]
    TickRewound { now: u64, last: u64 },

    /// An entity with this key is already live in the collection
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    /// Tuning values that the simulation cannot run with
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Viewport dimensions that are negative or not finite
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
