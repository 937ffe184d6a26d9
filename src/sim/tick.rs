//! Fixed timestep simulation tick
//!
//! [`GameState::update`] folds every tick up to `now` into state, one at a
//! time, so the result does not depend on how often the host calls it.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::lifecycle;
use super::motion;
use super::state::GameState;
use super::store::EntityId;
use crate::SimError;
use crate::consts::BOMB_LAUNCH_GAP;
use crate::input::Direction;

/// Advance the game state by exactly one tick, numbered `now`
pub fn tick(state: &mut GameState, now: u64) {
    motion::step_rocket(&mut state.rocket);
    lifecycle::advance_stones(state, now);
    lifecycle::advance_bombs(state);
    collision::detect_hits(
        &mut state.bombs,
        &mut state.stones,
        &state.tuning,
        &mut state.events,
    );
    lifecycle::spawn_crashes(state, now);
    lifecycle::expire_crashes(state, now);

    if state.spawner.poll(now, &mut state.rng) {
        let pos = stone_entry_point(state);
        state.insert_stone(pos);
    }

    lifecycle::reset_if_cooled_down(state, now);
    state.last_tick = now;
}

/// Right edge, random height in `[0, height)`
fn stone_entry_point(state: &mut GameState) -> Vec2 {
    let rows = (state.viewport.height as u32).max(1);
    let y = state.rng.random_range(0..rows);
    Vec2::new(state.viewport.width, y as f32)
}

impl GameState {
    /// Simulate every tick after the last simulated one, up to and including `now`
    ///
    /// Returns how many ticks were simulated. A `now` older than the last
    /// simulated tick is rejected and leaves the state untouched.
    pub fn update(&mut self, now: u64) -> Result<u64, SimError> {
        if now < self.last_tick {
            log::warn!("Ignoring rewound tick {} (at {})", now, self.last_tick);
            return Err(SimError::TickRewound {
                now,
                last: self.last_tick,
            });
        }

        let simulated = now - self.last_tick;
        for t in self.last_tick + 1..=now {
            tick(self, t);
        }
        Ok(simulated)
    }

    /// Press or release a control
    ///
    /// A non-cursor press fires a bomb. A cursor press steers the rocket:
    /// `Up` while it is below the top, `Down` while it is above the bottom.
    /// Any release stops the rocket.
    pub fn press(&mut self, down: bool, direction: Direction, is_cursor: bool) {
        if !down {
            self.rocket.velocity = 0.0;
            return;
        }

        if !is_cursor {
            self.fire_bomb();
            return;
        }

        let thrust = self.tuning.rocket_thrust;
        match direction {
            Direction::Up if self.rocket.y > 0.0 => self.rocket.velocity -= thrust,
            Direction::Down if self.rocket.y < self.viewport.height => {
                self.rocket.velocity += thrust
            }
            _ => {}
        }
    }

    /// Fire a bomb from the rocket's nose; refused while the session is lost
    pub fn fire_bomb(&mut self) -> Option<EntityId> {
        if self.session.is_lost() {
            log::debug!("Bomb refused: session lost");
            return None;
        }
        let pos = Vec2::new(self.tuning.rocket_width + BOMB_LAUNCH_GAP, self.rocket.y);
        Some(self.insert_bomb(pos))
    }
}
