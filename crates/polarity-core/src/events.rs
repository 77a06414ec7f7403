//! Side-channel events emitted by the simulation.
//!
//! The simulation is headless: sounds and particles are not simulated,
//! they are queued as requests for whatever frontend drains the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Every sound the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Generic enemy gun report.
    EnemyGun,
    /// Player gun report.
    PlayerGun,
    /// Fireball launch.
    Fireball,
    /// Firetrap ignition.
    Firetrap,
    /// Opposite-color bullet striking an enemy or boss.
    Clang,
    /// Same-color bullet absorbed by the player.
    Absorb,
    /// An entity took a point of damage.
    Damage,
    /// Damage dealt to the player pool.
    PlayerHit,
    /// An entity's health reached zero.
    Death,
    /// Entity relocated back into the world from an edge.
    Respawn,
    /// Looping blackhole drone.
    BlackholeLoop,
}

/// A request against the frontend audio mixer.
///
/// `Play` requests are deduplicated per tick so that a burst of
/// identical hits produces one report, not a clipped stack of them.
/// `Loop`/`Stop` pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioRequest {
    Play(Sound),
    Loop(Sound),
    Stop(Sound),
}

/// Particle sprite selector for spawned effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleSprite {
    /// Impact spark on a bullet hit.
    Spark,
    /// Flash over a damaged entity.
    DamageFlash,
    /// Healing pickup flourish.
    Heart,
    /// Large teleport portal (boss relocation).
    LargePortal,
    /// Small teleport portal (enemy relocation).
    SmallPortal,
}

/// One-shot particle effect description.
///
/// The scale/fade fractions describe what part of the lifespan is
/// spent growing in and shrinking out; the frontend interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleDesc {
    pub sprite: ParticleSprite,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds the particle lives.
    pub lifespan: f32,
    pub max_scale: f32,
    /// Fraction of the lifespan spent scaling up from zero.
    pub scale_in_frac: f32,
    /// Fraction of the lifespan spent scaling back down.
    pub scale_out_frac: f32,
    /// Fraction of the lifespan spent fading in.
    pub fade_in_frac: f32,
    /// Fraction of the lifespan spent fading out.
    pub fade_out_frac: f32,
}

impl ParticleDesc {
    /// A stationary effect with symmetric in/out envelopes.
    pub fn burst(sprite: ParticleSprite, pos: Vec2, lifespan: f32, max_scale: f32) -> Self {
        Self {
            sprite,
            pos,
            vel: Vec2::ZERO,
            lifespan,
            max_scale,
            scale_in_frac: 0.25,
            scale_out_frac: 0.25,
            fade_in_frac: 0.1,
            fade_out_frac: 0.3,
        }
    }
}
