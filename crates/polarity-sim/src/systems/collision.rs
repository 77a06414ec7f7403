//! Collision pipeline.
//!
//! Broad phase: every live collider's bounding sphere against every
//! other, O(n²) over the draw order. Narrow phase: a symmetric rule
//! table keyed on the archetype pair. Each directed rule is tried
//! with the pair in both orders, so the outcome never depends on
//! insertion order; a pair matching no rule is a deliberate no-op.
//!
//! Line hazards are excluded: their sphere spans the whole world, and
//! they damage through the band check in their flight path instead.

use hecs::Entity;

use polarity_core::archetype::Archetype;
use polarity_core::components::{Body, CardFace};
use polarity_core::constants::SCORE_PER_ABSORB;
use polarity_core::events::Sound;
use polarity_core::types::Sphere;

use crate::store::EntityStore;

pub fn run(store: &mut EntityStore, now: f64) {
    let mut colliders: Vec<(Entity, Archetype, Sphere)> = Vec::with_capacity(store.order().len());
    for &e in store.order() {
        let Some(archetype) = store.archetype_of(e) else {
            continue;
        };
        if archetype.is_line() {
            continue;
        }
        let Ok(body) = store.world().get::<&Body>(e) else {
            continue;
        };
        colliders.push((e, archetype, body.sphere()));
    }

    for i in 0..colliders.len() {
        for j in (i + 1)..colliders.len() {
            let (a, arch_a, sphere_a) = colliders[i];
            let (b, arch_b, sphere_b) = colliders[j];
            if !sphere_a.intersects(&sphere_b) {
                continue;
            }
            if !resolve(store, a, arch_a, b, arch_b, now) {
                resolve(store, b, arch_b, a, arch_a, now);
            }
        }
    }
}

/// Apply the directed rule for (subject, object), if one exists.
/// Returns whether a rule matched.
fn resolve(
    store: &mut EntityStore,
    subject: Entity,
    s: Archetype,
    object: Entity,
    o: Archetype,
    now: f64,
) -> bool {
    match (s, o) {
        // Ramming an ordinary enemy hurts the ship and shoves it back
        // to where it started the tick.
        (a, b) if a.is_ship() && b.is_ordinary_enemy() => {
            store.hit_player(now);
            if let Ok(mut body) = store.world().get::<&mut Body>(subject) {
                body.pos = body.old_pos;
            }
            true
        }

        // Player bullets damage enemies with a clang, bosses and the
        // forcefield without one.
        (Archetype::PlayerBullet, b) if b.is_ordinary_enemy() => {
            store.kill(subject);
            store.audio.play(Sound::Clang);
            store.damage_entity(object, now);
            true
        }
        (Archetype::PlayerBullet, b) if b.is_boss() || b == Archetype::Forcefield => {
            store.kill(subject);
            store.damage_entity(object, now);
            true
        }

        // Enemy bullets: absorbed for points when the colors match,
        // damaging when they clash.
        (a, b) if a.is_enemy_bullet() && b.is_ship() => {
            store.kill(subject);
            if a.polarity() == b.polarity() {
                store.score += SCORE_PER_ABSORB;
                store.audio.play(Sound::Absorb);
            } else {
                store.hit_player(now);
            }
            true
        }

        // Boss hazards burn the ship regardless of color.
        (Archetype::Fireball, b) if b.is_ship() => {
            store.kill(subject);
            store.hit_player(now);
            true
        }
        (Archetype::Firetrap, b) if b.is_ship() => {
            store.kill(subject);
            store.hit_player(now);
            true
        }
        (Archetype::Blackhole, b) if b.is_ship() => {
            store.hit_player(now);
            true
        }
        (a, b) if a.is_boss() && b.is_ship() => {
            store.hit_player(now);
            true
        }

        // Shooting a face-down card turns it over.
        (Archetype::Card, Archetype::PlayerBullet) => {
            store.kill(object);
            reveal_card(store, subject);
            true
        }

        // Revealed cards: the queen heals on any contact, the jack
        // punishes the ship and soaks a bullet.
        (Archetype::Queen, b) if b.is_ship() => {
            let at = store
                .world()
                .get::<&Body>(subject)
                .map(|body| body.pos)
                .unwrap_or_default();
            store.kill(subject);
            store.heal_player(at);
            true
        }
        (Archetype::Queen, Archetype::PlayerBullet) => {
            let at = store
                .world()
                .get::<&Body>(subject)
                .map(|body| body.pos)
                .unwrap_or_default();
            store.kill(subject);
            store.heal_player(at);
            true
        }
        (Archetype::Jack, b) if b.is_ship() => {
            store.kill(subject);
            store.hit_player(now);
            true
        }
        (Archetype::Jack, Archetype::PlayerBullet) => {
            store.kill(subject);
            true
        }

        // A falling bomb bumped by the ship is defused without
        // detonating on it.
        (Archetype::Bomb, b) if b.is_ship() => {
            store.kill(subject);
            true
        }

        // The blast only hurts while the boss fight is live.
        (Archetype::BigExplosion, b) if b.is_ship() => {
            if store.boss_count != 0 {
                store.hit_player(now);
            }
            true
        }

        _ => false,
    }
}

/// Flip a card to the face fixed when it was dealt.
fn reveal_card(store: &mut EntityStore, card: Entity) {
    let face = store.world().get::<&CardFace>(card).map(|f| *f);
    let Ok(face) = face else {
        return;
    };
    if let Ok(mut archetype) = store.world().get::<&mut Archetype>(card) {
        *archetype = match face {
            CardFace::Queen => Archetype::Queen,
            CardFace::Jack => Archetype::Jack,
        };
    }
}
