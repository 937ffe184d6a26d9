//! Bomb versus stone collision detection
//!
//! The overlap test is deliberately loose: it only bounds the bomb from the
//! left, and it checks the bomb's leading edge against the stone twice with
//! different widths. Gameplay depends on this exact shape, so keep it as is.

use glam::Vec2;

use super::state::{Bomb, SimEvent, Stone};
use super::store::{EntityId, EntityStore};
use crate::consts::COLLISION_SLACK_Y;
use crate::tuning::Tuning;

/// Whether a bomb at `bomb` overlaps a stone at `stone`
pub fn bomb_hits_stone(bomb: Vec2, stone: Vec2, tuning: &Tuning) -> bool {
    bomb.x + tuning.bomb_width >= stone.x
        && bomb.x + tuning.bomb_width * 2.0 > stone.x
        && bomb.y >= stone.y - COLLISION_SLACK_Y
        && bomb.y <= stone.y + tuning.stone_height
}

/// Mark every overlapping bomb/stone pair as hit
///
/// Only entities that were unhit when the scan began take part. A bomb keeps
/// going after its first stone, so it takes out everything it overlaps.
pub fn detect_hits(
    bombs: &mut EntityStore<Bomb>,
    stones: &mut EntityStore<Stone>,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    let live_stones: Vec<EntityId> = stones
        .iter()
        .filter(|(_, stone)| !stone.hit)
        .map(|(id, _)| id)
        .collect();

    for (bomb_id, bomb) in bombs.iter_mut() {
        if bomb.hit {
            continue;
        }
        for &stone_id in &live_stones {
            let Some(stone) = stones.get_mut(stone_id) else {
                continue;
            };
            if !bomb_hits_stone(bomb.pos, stone.pos, tuning) {
                continue;
            }
            log::debug!("Bomb {} hit stone {}", bomb_id, stone_id);
            bomb.hit = true;
            stone.hit = true;
            events.push(SimEvent::Collision {
                bomb: bomb_id,
                stone: stone_id,
            });
        }
    }
}
