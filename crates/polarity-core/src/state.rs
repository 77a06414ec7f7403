//! Frame snapshot types handed to the frontend each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::events::{AudioRequest, ParticleDesc};

/// One drawable entity, in draw (insertion) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub archetype: Archetype,
    pub pos: Vec2,
    pub orientation: f32,
    pub frame: usize,
}

/// Everything the frontend needs to present one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub elapsed_secs: f64,
    pub score: i32,
    pub player_health: i32,
    pub enemy_count: i32,
    pub boss_count: i32,
    pub level: u32,
    pub boss_present: bool,
    pub level_cleared: bool,
    /// Live entities in draw order.
    pub sprites: Vec<SpriteFrame>,
    /// Audio requests emitted this tick, play-deduplicated.
    pub audio: Vec<AudioRequest>,
    /// One-shot particle effects spawned this tick.
    pub particles: Vec<ParticleDesc>,
}
