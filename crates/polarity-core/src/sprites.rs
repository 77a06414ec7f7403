//! Sprite extent table.
//!
//! The simulation never loads textures; it only needs the logical
//! width/height of each archetype's sprite to size bounding spheres
//! and spawn offsets. The table is plain data so tests can substitute
//! a uniform one.

use crate::archetype::Archetype;

/// Logical sprite extent, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
    /// Animation frame count for the sprite sheet.
    pub frames: usize,
}

impl Extent {
    const fn new(width: f32, height: f32, frames: usize) -> Self {
        Self {
            width,
            height,
            frames,
        }
    }

    /// Bounding sphere radius: half the larger dimension.
    pub fn radius(&self) -> f32 {
        self.width.max(self.height) / 2.0
    }
}

/// Archetype-to-extent lookup.
#[derive(Debug, Clone, Copy)]
pub struct SpriteTable {
    uniform: Option<f32>,
}

impl SpriteTable {
    /// The shipped sprite sizes.
    pub fn new() -> Self {
        Self { uniform: None }
    }

    /// A table where every archetype has the given square extent.
    /// Keeps geometry tests independent of the shipped sprite sizes.
    pub fn uniform(size: f32) -> Self {
        Self {
            uniform: Some(size),
        }
    }

    pub fn extent(&self, archetype: Archetype) -> Extent {
        if let Some(size) = self.uniform {
            return Extent::new(size, size, 1);
        }
        match archetype {
            Archetype::ShipBlue | Archetype::ShipRed => Extent::new(64.0, 64.0, 4),
            Archetype::PlayerBullet => Extent::new(16.0, 16.0, 1),
            Archetype::RedBullet | Archetype::BlueBullet => Extent::new(16.0, 16.0, 2),
            Archetype::Fireball => Extent::new(24.0, 24.0, 4),
            Archetype::RedLightEnemy | Archetype::BlueLightEnemy => Extent::new(64.0, 64.0, 2),
            Archetype::RedHeavyEnemy | Archetype::BlueHeavyEnemy => Extent::new(64.0, 64.0, 2),
            Archetype::RedLine | Archetype::BlueLine => Extent::new(1024.0, 16.0, 1),
            Archetype::Bomber => Extent::new(128.0, 128.0, 2),
            Archetype::Pyro => Extent::new(128.0, 128.0, 4),
            Archetype::Gambler => Extent::new(128.0, 128.0, 2),
            Archetype::Bomb => Extent::new(32.0, 32.0, 1),
            Archetype::Firetrap => Extent::new(64.0, 64.0, 4),
            Archetype::Forcefield => Extent::new(160.0, 160.0, 2),
            Archetype::Blackhole => Extent::new(96.0, 96.0, 4),
            Archetype::Card | Archetype::Queen | Archetype::Jack => Extent::new(48.0, 64.0, 1),
            Archetype::BigExplosion => Extent::new(128.0, 128.0, 8),
            Archetype::SmallExplosion => Extent::new(64.0, 64.0, 8),
        }
    }
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::new()
    }
}
