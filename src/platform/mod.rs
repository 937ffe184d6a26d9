//! Platform abstraction layer
//!
//! Host-side helpers that sit outside the deterministic core:
//! - Time/ticks

pub mod time;

pub use time::{TickClock, ticks_in};
