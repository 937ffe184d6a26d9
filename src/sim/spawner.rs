//! Cycle-based stone scheduling
//!
//! Time is cut into cycles of `cycle_period` ticks. When a cycle begins, a
//! fixed number of distinct ticks inside it are drawn at random; a stone
//! spawns on each of them. The first cycle starts `game_launch_time` ticks
//! after the session does, which gives the player a quiet warm-up.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    cycle_period: u64,
    stones_per_cycle: usize,
    /// First tick of the next cycle
    next_boundary: u64,
    /// Ticks still due to spawn a stone
    pending: BTreeSet<u64>,
}

impl Spawner {
    /// Start scheduling for a session that begins at `now`
    pub fn new(now: u64, tuning: &Tuning) -> Self {
        Self {
            cycle_period: tuning.cycle_period,
            stones_per_cycle: tuning.stones_per_cycle,
            next_boundary: now.saturating_add(tuning.game_launch_time),
            pending: BTreeSet::new(),
        }
    }

    pub fn next_boundary(&self) -> u64 {
        self.next_boundary
    }

    /// Ticks at which a stone is still due, ascending
    pub fn pending(&self) -> impl Iterator<Item = u64> + '_ {
        self.pending.iter().copied()
    }

    /// Force a stone to spawn at `tick`, on top of the random schedule
    pub fn schedule(&mut self, tick: u64) {
        self.pending.insert(tick);
    }

    /// Advance the schedule to `now`; returns true if a stone spawns this tick
    ///
    /// Must be called once per tick with increasing `now`.
    pub fn poll<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) -> bool {
        while now >= self.next_boundary {
            let start = self.next_boundary;
            self.next_boundary = start.saturating_add(self.cycle_period);
            self.pending.retain(|&tick| tick >= now);
            let picked = pick_distinct_ticks(rng, start, self.next_boundary, self.stones_per_cycle);
            log::info!(
                "Spawn cycle {}..{}: stones at {:?}",
                start,
                self.next_boundary,
                picked
            );
            self.pending.extend(picked);
            if self.next_boundary == start {
                // Pinned at u64::MAX, no further cycles
                break;
            }
        }

        self.pending.remove(&now)
    }
}

/// Pick `count` distinct ticks uniformly from `[start, end)`
///
/// Sampling without replacement keeps this bounded even when `count`
/// approaches the window width; `count` is clamped to the width.
pub fn pick_distinct_ticks<R: Rng + ?Sized>(
    rng: &mut R,
    start: u64,
    end: u64,
    count: usize,
) -> Vec<u64> {
    let width = end.saturating_sub(start) as usize;
    let count = count.min(width);
    rand::seq::index::sample(rng, width, count)
        .into_iter()
        .map(|offset| start + offset as u64)
        .collect()
}
