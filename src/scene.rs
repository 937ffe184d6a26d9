//! Host-side visual map
//!
//! The simulation owns entity state only. A renderer keeps its own nodes,
//! keyed like the entities, and creates or destroys them as events arrive;
//! transforms are refreshed from the simulation after every update.
//! `SceneMirror` is that bookkeeping without any particular graphics API.

use std::collections::HashMap;

use glam::{Affine2, Vec2};

use crate::sim::{Bomb, Crash, EntityId, GameState, SimEvent, Stone};
use crate::tuning::Tuning;

/// Left margin for the rocket and the heart row
pub const PADDING: f32 = 10.0;
/// Drawn bomb height (thinner than its collision box)
pub const BOMB_SPRITE_HEIGHT: f32 = 15.0;
/// Crash sprite edge length
pub const CRASH_SPRITE_SIZE: f32 = 15.0;
/// Crash sprites sit slightly above their anchor
pub const CRASH_SPRITE_LIFT: f32 = 5.0;
pub const HEART_WIDTH: f32 = 25.0;
pub const HEART_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Stone,
    Bomb,
    Crash,
}

/// Crash markers share their bomb's key, so nodes are keyed by kind too
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub id: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Maps the unit square onto the sprite's screen rectangle
    pub transform: Affine2,
}

/// Visual nodes mirrored from simulation events
#[derive(Debug, Default)]
pub struct SceneMirror {
    nodes: HashMap<NodeKey, Node>,
    created: u64,
    destroyed: u64,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, kind: NodeKind, id: EntityId) -> Option<&Node> {
        self.nodes.get(&NodeKey { kind, id })
    }

    /// Nodes created and destroyed over the mirror's lifetime
    pub fn churn(&self) -> (u64, u64) {
        (self.created, self.destroyed)
    }

    /// Create and destroy nodes for a batch of events
    pub fn apply(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        for event in events {
            match event {
                SimEvent::StoneSpawned { id, pos } => self.create(NodeKind::Stone, id, pos),
                SimEvent::BombFired { id, pos } => self.create(NodeKind::Bomb, id, pos),
                SimEvent::CrashSpawned { id, pos, .. } => self.create(NodeKind::Crash, id, pos),
                SimEvent::StoneRemoved { id, .. } => self.destroy(NodeKind::Stone, id),
                SimEvent::BombRemoved { id, .. } => self.destroy(NodeKind::Bomb, id),
                SimEvent::CrashRemoved { id, .. } => self.destroy(NodeKind::Crash, id),
                SimEvent::Collision { .. }
                | SimEvent::HitPointLost { .. }
                | SimEvent::SessionLost { .. }
                | SimEvent::SessionReset { .. } => {}
            }
        }
    }

    /// Refresh every node's transform from the current simulation state
    pub fn sync(&mut self, state: &GameState) {
        let tuning = state.tuning();
        for (id, stone) in state.stones().iter() {
            if let Some(node) = self.nodes.get_mut(&NodeKey { kind: NodeKind::Stone, id }) {
                node.transform = stone_transform(stone, tuning);
            }
        }
        for (id, bomb) in state.bombs().iter() {
            if let Some(node) = self.nodes.get_mut(&NodeKey { kind: NodeKind::Bomb, id }) {
                node.transform = bomb_transform(bomb, tuning);
            }
        }
        for (id, crash) in state.crashes().iter() {
            if let Some(node) = self.nodes.get_mut(&NodeKey { kind: NodeKind::Crash, id }) {
                node.transform = crash_transform(crash);
            }
        }
    }

    /// Whether the node set matches the simulation's entities one to one
    pub fn matches(&self, state: &GameState) -> bool {
        let expected = state.stones().len() + state.bombs().len() + state.crashes().len();
        if expected != self.nodes.len() {
            return false;
        }
        let has = |kind, id| self.nodes.contains_key(&NodeKey { kind, id });
        state.stones().iter().all(|(id, _)| has(NodeKind::Stone, id))
            && state.bombs().iter().all(|(id, _)| has(NodeKind::Bomb, id))
            && state.crashes().iter().all(|(id, _)| has(NodeKind::Crash, id))
    }

    fn create(&mut self, kind: NodeKind, id: EntityId, pos: Vec2) {
        let node = Node {
            transform: Affine2::from_translation(pos),
        };
        if self.nodes.insert(NodeKey { kind, id }, node).is_some() {
            log::warn!("{:?} node {} created twice", kind, id);
        }
        self.created += 1;
    }

    fn destroy(&mut self, kind: NodeKind, id: EntityId) {
        if self.nodes.remove(&NodeKey { kind, id }).is_some() {
            self.destroyed += 1;
        }
    }
}

/// Stone sprite; hit stones spin about their centre
pub fn stone_transform(stone: &Stone, tuning: &Tuning) -> Affine2 {
    let base = Affine2::from_translation(stone.pos)
        * Affine2::from_scale(Vec2::new(tuning.stone_width, tuning.stone_height));
    if !stone.hit {
        return base;
    }
    base * Affine2::from_translation(Vec2::splat(0.5))
        * Affine2::from_angle(stone.rotation)
        * Affine2::from_translation(Vec2::splat(-0.5))
}

pub fn bomb_transform(bomb: &Bomb, tuning: &Tuning) -> Affine2 {
    Affine2::from_scale_angle_translation(
        Vec2::new(tuning.bomb_width, BOMB_SPRITE_HEIGHT),
        0.0,
        bomb.pos,
    )
}

pub fn crash_transform(crash: &Crash) -> Affine2 {
    Affine2::from_scale_angle_translation(
        Vec2::splat(CRASH_SPRITE_SIZE),
        0.0,
        crash.pos - Vec2::new(0.0, CRASH_SPRITE_LIFT),
    )
}

/// Rocket sprite, centred vertically on the rocket's height
pub fn rocket_transform(state: &GameState) -> Affine2 {
    let tuning = state.tuning();
    Affine2::from_scale_angle_translation(
        Vec2::new(tuning.rocket_width, tuning.rocket_height),
        0.0,
        Vec2::new(PADDING, state.rocket().y - tuning.rocket_height / 2.0),
    )
}

/// One slot of the hit-point row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    pub x: f32,
    pub full: bool,
}

/// Heart row: one slot per maximum hit point, left to right
pub fn hearts(hit_points: u32, max_hit_points: u32) -> Vec<Heart> {
    (0..max_hit_points)
        .map(|slot| Heart {
            x: PADDING + slot as f32 * HEART_WIDTH,
            full: slot < hit_points,
        })
        .collect()
}
