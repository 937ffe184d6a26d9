//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Hosts read it
//! through accessors and [`GameState::snapshot`], and learn about entity
//! creation and removal from the drained [`SimEvent`] stream.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use super::store::{EntityId, EntityStore};
use crate::SimError;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::within_bounds;

/// Playable area in host units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(SimError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Inclusive bounds check against `[0, width] x [0, height]`
    pub fn contains(&self, pos: Vec2) -> bool {
        within_bounds(pos, Vec2::new(self.width, self.height))
    }
}

/// The player's rocket; only its height changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub y: f32,
    pub velocity: f32,
}

impl Rocket {
    /// Rocket parked at mid-height, not moving
    pub fn centered(viewport: &Viewport) -> Self {
        Self {
            y: viewport.height / 2.0,
            velocity: 0.0,
        }
    }
}

/// A hazard drifting in from the right edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub pos: Vec2,
    pub velocity: f32,
    /// Struck by a bomb; the stone tumbles away instead of advancing
    pub hit: bool,
    /// Spin of the tumbling animation (radians, visual only)
    pub rotation: f32,
}

impl Stone {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity: ENTITY_SPEED,
            hit: false,
            rotation: 0.0,
        }
    }
}

/// A projectile fired from the rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    pub velocity: f32,
    /// Collided with a stone this session
    pub hit: bool,
    /// The crash marker for this hit already exists
    pub crash_spawned: bool,
}

impl Bomb {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity: ENTITY_SPEED,
            hit: false,
            crash_spawned: false,
        }
    }
}

/// Short-lived marker left where a bomb struck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crash {
    pub pos: Vec2,
    pub created_at: u64,
}

impl Crash {
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Hit points ran out at tick `since`; waiting for the automatic reset
    Lost { since: u64 },
}

/// Per-session bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub hit_points: u32,
    pub phase: SessionPhase,
}

impl Session {
    pub fn new(max_hit_points: u32) -> Self {
        Self {
            hit_points: max_hit_points,
            phase: SessionPhase::Playing,
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.phase, SessionPhase::Lost { .. })
    }

    pub fn lost_since(&self) -> Option<u64> {
        match self.phase {
            SessionPhase::Lost { since } => Some(since),
            SessionPhase::Playing => None,
        }
    }

    /// Take one point of damage at `now`
    pub fn take_hit(&mut self, now: u64, events: &mut Vec<SimEvent>) {
        self.hit_points = self.hit_points.saturating_sub(1);
        events.push(SimEvent::HitPointLost {
            remaining: self.hit_points,
        });

        if self.hit_points < 1 && self.phase == SessionPhase::Playing {
            log::info!("Session lost at tick {}", now);
            self.phase = SessionPhase::Lost { since: now };
            events.push(SimEvent::SessionLost { tick: now });
        }
    }
}

/// Why an entity left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Stone slipped past the danger line
    CrossedDangerLine,
    /// Left the viewport
    OutOfBounds,
    /// Bomb consumed by a hit
    Detonated,
    /// Crash marker outlived its lifetime
    Expired,
    /// Cleared by a session reset
    Reset,
}

/// Notification for the host's visual layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    StoneSpawned { id: EntityId, pos: Vec2 },
    StoneRemoved { id: EntityId, reason: RemovalReason },
    BombFired { id: EntityId, pos: Vec2 },
    BombRemoved { id: EntityId, reason: RemovalReason },
    /// A bomb struck a stone; both are now marked hit
    Collision { bomb: EntityId, stone: EntityId },
    /// Crash markers share the key of the bomb that caused them
    CrashSpawned { id: EntityId, pos: Vec2, tick: u64 },
    CrashRemoved { id: EntityId, reason: RemovalReason },
    HitPointLost { remaining: u32 },
    SessionLost { tick: u64 },
    SessionReset { tick: u64 },
}

/// Comparable, serialisable copy of the whole simulation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub viewport: Viewport,
    pub rocket: Rocket,
    pub stones: Vec<(EntityId, Stone)>,
    pub bombs: Vec<(EntityId, Bomb)>,
    pub crashes: Vec<(EntityId, Crash)>,
    pub session: Session,
    pub spawner: Spawner,
}

/// Complete simulation state (deterministic for a given seed and input script)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) tuning: Tuning,
    pub(crate) viewport: Viewport,
    pub(crate) rocket: Rocket,
    pub(crate) stones: EntityStore<Stone>,
    pub(crate) bombs: EntityStore<Bomb>,
    pub(crate) crashes: EntityStore<Crash>,
    pub(crate) session: Session,
    pub(crate) spawner: Spawner,
    /// Last tick folded into state
    pub(crate) last_tick: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<SimEvent>,
    seed: u64,
    next_id: u64,
}

impl GameState {
    /// Create a simulation at tick 0
    pub fn new(viewport: Viewport, tuning: Tuning, seed: u64) -> Result<Self, SimError> {
        tuning.validate()?;
        Ok(Self {
            rocket: Rocket::centered(&viewport),
            stones: EntityStore::new(),
            bombs: EntityStore::new(),
            crashes: EntityStore::new(),
            session: Session::new(tuning.max_hit_points),
            spawner: Spawner::new(0, &tuning),
            last_tick: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            seed,
            next_id: 1,
            tuning,
            viewport,
        })
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn rocket(&self) -> Rocket {
        self.rocket
    }

    pub fn stones(&self) -> &EntityStore<Stone> {
        &self.stones
    }

    pub fn bombs(&self) -> &EntityStore<Bomb> {
        &self.bombs
    }

    pub fn crashes(&self) -> &EntityStore<Crash> {
        &self.crashes
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    /// Replace the playable area (host resize); entities keep their positions
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Move the rocket to a given height, keeping its velocity
    pub fn place_rocket(&mut self, y: f32) {
        self.rocket.y = y;
    }

    /// Force a stone to spawn at `tick` in addition to the random schedule
    pub fn schedule_stone(&mut self, tick: u64) {
        self.spawner.schedule(tick);
    }

    /// Put a stone into play at `pos`
    pub fn insert_stone(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        match self.stones.add(id, Stone::new(pos)) {
            Ok(()) => {
                log::debug!("Stone {} spawned at ({}, {})", id, pos.x, pos.y);
                self.events.push(SimEvent::StoneSpawned { id, pos });
            }
            Err(err) => log::warn!("Stone not spawned: {}", err),
        }
        id
    }

    /// Put a bomb into play at `pos`
    pub(crate) fn insert_bomb(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        match self.bombs.add(id, Bomb::new(pos)) {
            Ok(()) => self.events.push(SimEvent::BombFired { id, pos }),
            Err(err) => log::warn!("Bomb not fired: {}", err),
        }
        id
    }

    /// Hand over every notification produced since the last drain
    pub fn drain_events(&mut self) -> impl Iterator<Item = SimEvent> + use<> {
        std::mem::take(&mut self.events).into_iter()
    }

    /// Copy the full simulation state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.last_tick,
            viewport: self.viewport,
            rocket: self.rocket,
            stones: self.stones.to_vec(),
            bombs: self.bombs.to_vec(),
            crashes: self.crashes.to_vec(),
            session: self.session.clone(),
            spawner: self.spawner.clone(),
        }
    }
}
