//! Archetype tags — the single enum distinguishing every kind of
//! simulated entity, plus the classification helpers the collision
//! and lifecycle code key off.

use serde::{Deserialize, Serialize};

/// Red/blue color polarity shared by ships, enemies, bullets and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Red,
    Blue,
}

impl Polarity {
    /// The opposite color.
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Red => Polarity::Blue,
            Polarity::Blue => Polarity::Red,
        }
    }
}

/// Boss variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    /// Fast patrol boss: bombs and triple bullet bursts.
    Bomber,
    /// Ranged caster: homing fireballs and timed firetraps.
    Pyro,
    /// Heavyweight: cards, forcefield, blackhole, charge attacks.
    Gambler,
}

/// The kind of every simulated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    // --- Player ---
    ShipBlue,
    ShipRed,

    // --- Projectiles ---
    PlayerBullet,
    RedBullet,
    BlueBullet,
    Fireball,

    // --- Ordinary enemies ---
    RedLightEnemy,
    BlueLightEnemy,
    RedHeavyEnemy,
    BlueHeavyEnemy,
    /// Full-width line hazards. Not counted toward the enemy total.
    RedLine,
    BlueLine,

    // --- Bosses ---
    Bomber,
    Pyro,
    Gambler,

    // --- Boss-spawned hazards ---
    Bomb,
    Firetrap,
    Forcefield,
    Blackhole,
    /// Face-down card; reveals as Queen or Jack when shot.
    Card,
    Queen,
    Jack,

    // --- Transient effects ---
    BigExplosion,
    SmallExplosion,
}

impl Archetype {
    /// Player ship of either color.
    pub fn is_ship(self) -> bool {
        matches!(self, Archetype::ShipBlue | Archetype::ShipRed)
    }

    /// Light or heavy colored enemy (the line hazards are excluded).
    pub fn is_ordinary_enemy(self) -> bool {
        matches!(
            self,
            Archetype::RedLightEnemy
                | Archetype::BlueLightEnemy
                | Archetype::RedHeavyEnemy
                | Archetype::BlueHeavyEnemy
        )
    }

    /// Line hazard of either color.
    pub fn is_line(self) -> bool {
        matches!(self, Archetype::RedLine | Archetype::BlueLine)
    }

    pub fn is_boss(self) -> bool {
        self.boss_kind().is_some()
    }

    pub fn boss_kind(self) -> Option<BossKind> {
        match self {
            Archetype::Bomber => Some(BossKind::Bomber),
            Archetype::Pyro => Some(BossKind::Pyro),
            Archetype::Gambler => Some(BossKind::Gambler),
            _ => None,
        }
    }

    /// Whether creation of this archetype increments the live
    /// ordinary-enemy counter.
    pub fn counts_toward_enemy_total(self) -> bool {
        self.is_ordinary_enemy()
    }

    /// Color polarity, for the entities that carry one.
    pub fn polarity(self) -> Option<Polarity> {
        match self {
            Archetype::ShipRed
            | Archetype::RedBullet
            | Archetype::RedLightEnemy
            | Archetype::RedHeavyEnemy
            | Archetype::RedLine => Some(Polarity::Red),
            Archetype::ShipBlue
            | Archetype::BlueBullet
            | Archetype::BlueLightEnemy
            | Archetype::BlueHeavyEnemy
            | Archetype::BlueLine => Some(Polarity::Blue),
            _ => None,
        }
    }

    /// The ship archetype for a polarity.
    pub fn ship_of(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Red => Archetype::ShipRed,
            Polarity::Blue => Archetype::ShipBlue,
        }
    }

    /// The enemy-bullet archetype for a polarity.
    pub fn bullet_of(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Red => Archetype::RedBullet,
            Polarity::Blue => Archetype::BlueBullet,
        }
    }

    /// Red or blue enemy bullet (not the player's).
    pub fn is_enemy_bullet(self) -> bool {
        matches!(self, Archetype::RedBullet | Archetype::BlueBullet)
    }
}
