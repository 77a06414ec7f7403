//! Boss spawn controller.
//!
//! On a boss level, the boss enters once the last ordinary enemy is
//! gone. Spawning also tops the player's health pool back up for the
//! fight. `boss_present` latches so the encounter happens once per
//! level.

use glam::Vec2;

use polarity_core::archetype::BossKind;
use polarity_core::constants::*;

use crate::store::EntityStore;

pub fn run(store: &mut EntityStore, now: f64) {
    if store.boss_present || store.enemy_count != 0 {
        return;
    }
    let kind = match store.level {
        PYRO_LEVEL => BossKind::Pyro,
        BOMBER_LEVEL => BossKind::Bomber,
        GAMBLER_LEVEL => BossKind::Gambler,
        _ => return,
    };
    let pos = match kind {
        BossKind::Gambler => Vec2::new(BOSS_SPAWN_MID.0, BOSS_SPAWN_MID.1),
        _ => Vec2::new(BOSS_SPAWN_HIGH.0, BOSS_SPAWN_HIGH.1),
    };

    store.create_boss(kind, pos, now);
    store.boss_present = true;
    store.player_health = PLAYER_START_HEALTH;
}
