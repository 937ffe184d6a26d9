//! Entity retirement, damage, crash markers and session reset

use super::motion;
use super::state::{
    Crash, GameState, RemovalReason, Rocket, Session, SessionPhase, SimEvent,
};
use super::spawner::Spawner;
use crate::consts::CRASH_OFFSET;

/// Move every stone, charge damage for breakthroughs, retire stale stones
pub fn advance_stones(state: &mut GameState, now: u64) {
    let danger_line = state.tuning.danger_line();
    let mut breakthroughs = 0;
    let mut retired = Vec::new();

    for (id, stone) in state.stones.iter_mut() {
        motion::step_stone(stone, now);

        if stone.pos.x < danger_line {
            if !stone.hit {
                breakthroughs += 1;
            }
            retired.push((id, RemovalReason::CrossedDangerLine));
        } else if !state.viewport.contains(stone.pos) {
            retired.push((id, RemovalReason::OutOfBounds));
        }
    }

    for _ in 0..breakthroughs {
        state.session.take_hit(now, &mut state.events);
    }

    for (id, reason) in retired {
        if state.stones.remove(id).is_some() {
            state.events.push(SimEvent::StoneRemoved { id, reason });
        }
    }
}

/// Retire detonated bombs, move the rest, retire those that fly off screen
pub fn advance_bombs(state: &mut GameState) {
    let mut retired = Vec::new();

    for (id, bomb) in state.bombs.iter_mut() {
        if bomb.hit {
            retired.push((id, RemovalReason::Detonated));
            continue;
        }
        motion::step_bomb(bomb);
        if !state.viewport.contains(bomb.pos) {
            retired.push((id, RemovalReason::OutOfBounds));
        }
    }

    for (id, reason) in retired {
        if state.bombs.remove(id).is_some() {
            state.events.push(SimEvent::BombRemoved { id, reason });
        }
    }
}

/// Leave one crash marker per bomb hit, keyed like the bomb
pub fn spawn_crashes(state: &mut GameState, now: u64) {
    for (id, bomb) in state.bombs.iter_mut() {
        if !bomb.hit || bomb.crash_spawned {
            continue;
        }
        bomb.crash_spawned = true;

        let pos = bomb.pos + CRASH_OFFSET;
        match state.crashes.add(id, Crash { pos, created_at: now }) {
            Ok(()) => state.events.push(SimEvent::CrashSpawned { id, pos, tick: now }),
            Err(err) => log::warn!("Crash not spawned: {}", err),
        }
    }
}

/// Drop crash markers older than their lifetime
pub fn expire_crashes(state: &mut GameState, now: u64) {
    let lifetime = state.tuning.crash_lifetime;
    let expired: Vec<_> = state
        .crashes
        .iter()
        .filter(|(_, crash)| crash.age(now) > lifetime)
        .map(|(id, _)| id)
        .collect();

    for id in expired {
        state.crashes.remove(id);
        state.events.push(SimEvent::CrashRemoved {
            id,
            reason: RemovalReason::Expired,
        });
    }
}

/// Restart the session once a loss has been shown long enough
pub fn reset_if_cooled_down(state: &mut GameState, now: u64) {
    if let SessionPhase::Lost { since } = state.session.phase {
        if now.saturating_sub(since) > state.tuning.lost_time_before_reset {
            reset_session(state, now);
        }
    }
}

/// Clear every entity and start a fresh session at `now`
pub fn reset_session(state: &mut GameState, now: u64) {
    let reason = RemovalReason::Reset;
    for (id, _) in state.bombs.drain() {
        state.events.push(SimEvent::BombRemoved { id, reason });
    }
    for (id, _) in state.stones.drain() {
        state.events.push(SimEvent::StoneRemoved { id, reason });
    }
    for (id, _) in state.crashes.drain() {
        state.events.push(SimEvent::CrashRemoved { id, reason });
    }

    state.rocket = Rocket::centered(&state.viewport);
    state.session = Session::new(state.tuning.max_hit_points);
    state.spawner = Spawner::new(now, &state.tuning);
    state.events.push(SimEvent::SessionReset { tick: now });
    log::info!("Session reset at tick {}", now);
}
