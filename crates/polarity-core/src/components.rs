//! Components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Behavior lives in the sim systems, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::Sphere;

/// Kinematic state shared by every entity.
///
/// The bounding sphere is derived from `pos` on demand, so its center
/// can never drift from the entity's position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Current position (sphere center).
    pub pos: Vec2,
    /// Position at the start of the current tick, for edge rollback.
    pub old_pos: Vec2,
    /// Velocity, for entities integrated as `pos += vel * dt`.
    pub vel: Vec2,
    /// Speed scalar, for entities driven by view-vector displacement.
    pub speed: f32,
    /// Orientation (roll) in radians. 0 faces +y.
    pub orientation: f32,
    /// Bounding sphere radius: half of max(sprite width, height).
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            old_pos: pos,
            vel: Vec2::ZERO,
            speed: 0.0,
            orientation: 0.0,
            radius,
        }
    }

    /// The bounding sphere, centered on the current position.
    pub fn sphere(&self) -> Sphere {
        Sphere {
            center: self.pos,
            radius: self.radius,
        }
    }

    /// Unit vector the entity is facing.
    pub fn view(&self) -> Vec2 {
        crate::types::view_vector(self.orientation)
    }
}

/// Per-instance health and the deferred-deletion flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitality {
    pub health: i32,
    pub dead: bool,
}

impl Vitality {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            dead: false,
        }
    }
}

/// Motion-intent flags, consumed by the movement code each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MotionFlags {
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub strafe_back: bool,
    pub strafe_forward: bool,
    pub charging: bool,
}

impl MotionFlags {
    /// Whether the entity is currently moving along its view axis.
    pub fn moving_vertically(&self) -> bool {
        self.strafe_back || self.strafe_forward
    }
}

/// Absolute cooldown timestamps on the session clock.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cooldowns {
    /// Last gun fire / decision time.
    pub gun: f64,
    /// Last forced player color swap (gambler).
    pub color_swap: f64,
    /// Last forcefield teardown (gambler).
    pub forcefield: f64,
    /// Last blackhole expiry (gambler).
    pub blackhole: f64,
    /// Last card deal (gambler).
    pub card: f64,
}

impl Cooldowns {
    /// All timers primed at `now`, matching entity creation.
    pub fn primed(now: f64) -> Self {
        Self {
            gun: now,
            color_swap: now,
            forcefield: now,
            blackhole: now,
            card: now,
        }
    }
}

/// Sprite animation state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Animation {
    pub frame: usize,
    /// Last time the frame was advanced.
    pub frame_timer: f64,
    pub frame_interval: f32,
}

impl Animation {
    pub fn new(now: f64) -> Self {
        Self {
            frame: 0,
            frame_timer: now,
            frame_interval: crate::constants::FRAME_INTERVAL,
        }
    }
}

/// Fixed lifespan for transient hazards and effects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Expiry {
    pub born_at: f64,
    pub lifespan: f64,
}

impl Expiry {
    pub fn new(born_at: f64, lifespan: f64) -> Self {
        Self { born_at, lifespan }
    }

    /// Whether the lifespan has elapsed at `now`.
    pub fn elapsed(&self, now: f64) -> bool {
        now - self.born_at >= self.lifespan
    }
}

/// Scripted flight path selector for ordinary enemies and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathId {
    DescendStop,
    DescendBandShift,
    DiagonalLeft,
    DiagonalRight,
    DescendShiftRight,
    DescendShiftLeft,
    ZigZag,
    Oscillate,
    RapidDescent,
    Descend,
}

/// Path state attached to scripted enemies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlightPath {
    pub id: PathId,
    /// Direction latch for the oscillating path: true = moving up.
    pub ascending: bool,
}

impl FlightPath {
    pub fn new(id: PathId) -> Self {
        Self {
            id,
            ascending: false,
        }
    }
}

/// Boss-only extension state. Attached to boss entities instead of
/// widening every entity with boss fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BossCore {
    /// Weak handle to the owned forcefield entity, if one is up.
    pub forcefield: Option<EntityHandle>,
    pub forcefield_up: bool,
    pub blackhole_up: bool,
    /// Round-robin state cycling bullet offsets across burst shots.
    pub burst_index: u8,
}

/// The face a card reveals when shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Queen,
    Jack,
}

/// Marks the player ship entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTag;

/// A weak entity reference stored as the entity's packed bits.
/// Only meaningful within the world that produced it; resolving a
/// handle to a despawned entity yields a lookup miss, never UB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);
