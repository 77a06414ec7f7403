//! End-of-tick cull: despawn everything marked dead (plus expired
//! small explosions) and apply the per-archetype death effects.
//!
//! Deferring deletion to this single pass means mid-tick systems can
//! kill entities freely without invalidating each other's handles.

use hecs::Entity;

use polarity_core::archetype::{Archetype, BossKind};
use polarity_core::components::{Body, BossCore, Cooldowns, Expiry, Vitality};
use polarity_core::events::Sound;

use crate::store::EntityStore;

pub fn run(store: &mut EntityStore, now: f64) {
    let mut doomed: Vec<Entity> = Vec::new();
    for &e in store.order() {
        let dead = store
            .world()
            .get::<&Vitality>(e)
            .map(|v| v.dead)
            .unwrap_or(true);
        let expired_effect = store.archetype_of(e) == Some(Archetype::SmallExplosion)
            && store
                .world()
                .get::<&Expiry>(e)
                .map(|x| x.elapsed(now))
                .unwrap_or(true);
        if dead || expired_effect {
            doomed.push(e);
        }
    }

    let mut blasts: Vec<glam::Vec2> = Vec::new();
    for e in doomed {
        let Some(archetype) = store.archetype_of(e) else {
            store.despawn(e);
            continue;
        };
        let pos = store
            .world()
            .get::<&Body>(e)
            .map(|b| b.pos)
            .unwrap_or_default();

        match archetype {
            a if a.counts_toward_enemy_total() => {
                store.enemy_count -= 1;
            }
            a if a.is_boss() => {
                store.audio.play(Sound::Death);
                blasts.push(pos);
                store.boss_count -= 1;
            }
            Archetype::Bomb => {
                store.audio.play(Sound::Death);
                blasts.push(pos);
            }
            Archetype::Forcefield => drop_forcefield(store, now),
            Archetype::Blackhole => close_blackhole(store, now),
            _ => {}
        }

        store.despawn(e);
    }

    for pos in blasts {
        store.create(Archetype::BigExplosion, pos, now);
    }
}

/// A downed forcefield releases its owner: clear the handle and start
/// the re-raise cooldown from now.
fn drop_forcefield(store: &mut EntityStore, now: f64) {
    let Some(owner) = store.current_boss else {
        return;
    };
    if let Ok(mut core) = store.world().get::<&mut BossCore>(owner) {
        core.forcefield = None;
        core.forcefield_up = false;
    }
    if let Ok(mut cds) = store.world().get::<&mut Cooldowns>(owner) {
        cds.forcefield = now;
    }
}

/// An expired blackhole stops its drone and restarts the gambler's
/// blackhole clock.
fn close_blackhole(store: &mut EntityStore, now: f64) {
    store.audio.stop(Sound::BlackholeLoop);
    let Some(owner) = store.current_boss else {
        return;
    };
    if store.archetype_of(owner).and_then(Archetype::boss_kind) != Some(BossKind::Gambler) {
        return;
    }
    if let Ok(mut core) = store.world().get::<&mut BossCore>(owner) {
        core.blackhole_up = false;
    }
    if let Ok(mut cds) = store.world().get::<&mut Cooldowns>(owner) {
        cds.blackhole = now;
    }
}
