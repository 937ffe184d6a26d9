//! Wall-clock to tick conversion
//!
//! The simulation only sees integer ticks. Hosts keep one `TickClock` from
//! startup and feed `now()` into `GameState::update` every frame.

use std::time::{Duration, Instant};

use crate::consts::TICKS_PER_SECOND;

/// Whole ticks elapsed in `elapsed` at [`TICKS_PER_SECOND`]
pub fn ticks_in(elapsed: Duration) -> u64 {
    let ticks = elapsed.as_nanos() * u128::from(TICKS_PER_SECOND) / 1_000_000_000;
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// Monotonic tick source anchored at creation
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    start: Instant,
}

impl TickClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Ticks since the clock started
    pub fn now(&self) -> u64 {
        ticks_in(self.start.elapsed())
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::start()
    }
}
