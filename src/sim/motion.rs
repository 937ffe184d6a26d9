//! Per-tick motion of the rocket, stones and bombs

use super::state::{Bomb, Rocket, Stone};
use crate::consts::{DRIFT_PER_TICK, HIT_STONE_DRIFT};
use crate::hit_spin;

/// Apply the rocket's velocity; bounds are the input handler's concern
pub fn step_rocket(rocket: &mut Rocket) {
    rocket.y += rocket.velocity;
}

/// Stones drift left until hit, then tumble down and to the right
pub fn step_stone(stone: &mut Stone, now: u64) {
    if stone.hit {
        stone.pos += HIT_STONE_DRIFT;
        stone.rotation = hit_spin(now);
    } else {
        stone.pos.x -= DRIFT_PER_TICK;
    }
}

/// Bombs drift right until they hit something
pub fn step_bomb(bomb: &mut Bomb) {
    if !bomb.hit {
        bomb.pos.x += DRIFT_PER_TICK;
    }
}
