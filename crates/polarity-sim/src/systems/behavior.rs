//! Per-entity behavior: movement, scripted paths, boss decisions,
//! projectile integration, expiry checks, and animation.
//!
//! Entities are visited in draw order by index so that anything
//! spawned mid-pass still gets its first update this tick. Deaths
//! only mark the entity; the cull system despawns at end of tick.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use polarity_core::archetype::{Archetype, BossKind};
use polarity_core::components::{
    Animation, Body, BossCore, CardFace, Cooldowns, Expiry, FlightPath, MotionFlags, Vitality,
};
use polarity_core::constants::*;
use polarity_core::events::Sound;
use polarity_core::types::side_vector;
use polarity_enemy_ai::boss::{self, BossAction, BossContext, DodgeContext, Strafe};
use polarity_enemy_ai::paths::{self, PathContext};

use crate::store::{handle, resolve, EntityStore};

pub fn run<R: Rng>(store: &mut EntityStore, now: f64, dt: f32, rng: &mut R) {
    let mut i = 0;
    while i < store.order().len() {
        let e = store.order()[i];
        i += 1;
        let Some(archetype) = store.archetype_of(e) else {
            continue;
        };
        if is_dead(store, e) {
            continue;
        }

        match archetype {
            a if a.is_ship() => step_ship(store, e, a, dt),
            a if a.is_ordinary_enemy() || a.is_line() => {
                step_scripted(store, e, a, now, dt, rng)
            }
            a if a.is_boss() => step_boss(store, e, a, now, dt, rng),
            Archetype::PlayerBullet => step_player_bullet(store, e, dt, rng),
            a if a.is_enemy_bullet() => step_projectile(store, e, dt),
            Archetype::Fireball => step_projectile(store, e, dt),
            Archetype::Bomb => step_bomb(store, e, dt),
            Archetype::Card | Archetype::Queen | Archetype::Jack => {
                step_projectile(store, e, dt)
            }
            Archetype::Firetrap | Archetype::Blackhole | Archetype::BigExplosion => {
                expire(store, e, now)
            }
            // The forcefield rides its boss; small explosions are
            // culled directly on expiry.
            Archetype::Forcefield | Archetype::SmallExplosion => {}
            _ => {}
        }

        advance_animation(store, e, archetype, now);
    }
}

fn is_dead(store: &EntityStore, e: Entity) -> bool {
    store
        .world()
        .get::<&Vitality>(e)
        .map(|v| v.dead)
        .unwrap_or(true)
}

/// Player ship movement: thrust along the view axis (clamped at the
/// world top and bottom), single-tick strafe impulses gated at the
/// side edges. Strafe flags are consumed by the move.
fn step_ship(store: &mut EntityStore, e: Entity, archetype: Archetype, dt: f32) {
    let Ok(mut body) = store.world().get::<&Body>(e).map(|b| *b) else {
        return;
    };
    let Ok(mut flags) = store.world().get::<&MotionFlags>(e).map(|f| *f) else {
        return;
    };
    let extent = store.sprites.extent(archetype);
    let (hw, hh) = (extent.width / 2.0, extent.height / 2.0);

    body.old_pos = body.pos;
    let view = body.view();
    let side = side_vector(view);

    let mut speed = body.speed;
    if body.pos.y - hh <= 0.0 {
        speed = speed.max(0.0);
    }
    if body.pos.y + hh >= WORLD_HEIGHT {
        speed = speed.min(0.0);
    }
    body.pos += speed * dt * view;

    let strafing = flags.strafe_left || flags.strafe_right;
    let d = STRAFE_SPEED * dt;
    if flags.strafe_right && body.pos.x + hw <= WORLD_WIDTH {
        body.pos += d * side;
    }
    if flags.strafe_left && body.pos.x - hw >= 0.0 {
        body.pos -= d * side;
    }
    if flags.strafe_back && body.pos.y - hh > 0.0 {
        body.pos -= d * view;
    }
    flags.strafe_left = false;
    flags.strafe_right = false;
    flags.strafe_back = false;

    if let Ok(mut b) = store.world().get::<&mut Body>(e) {
        *b = body;
    }
    if let Ok(mut f) = store.world().get::<&mut MotionFlags>(e) {
        *f = flags;
    }

    // The ship animates faster while sliding sideways.
    let lateral = if strafing { STRAFE_SPEED } else { 0.0 };
    if let Ok(mut anim) = store.world().get::<&mut Animation>(e) {
        anim.frame_interval = 1000.0 * FRAME_INTERVAL / (1500.0 + lateral);
    }
}

/// Scripted enemies and line hazards: advance the flight path, apply
/// any band hit, respond to the world edge, and fire when in range.
fn step_scripted<R: Rng>(
    store: &mut EntityStore,
    e: Entity,
    archetype: Archetype,
    now: f64,
    dt: f32,
    rng: &mut R,
) {
    let Ok(mut body) = store.world().get::<&Body>(e).map(|b| *b) else {
        return;
    };
    let Ok(mut path) = store.world().get::<&FlightPath>(e).map(|p| *p) else {
        return;
    };
    let player_pos = store.player_pos();
    let player_polarity = store.player_polarity();

    body.old_pos = body.pos;
    let step = paths::step(&PathContext {
        id: path.id,
        ascending: path.ascending,
        pos: body.pos,
        orientation: body.orientation,
        speed: body.speed,
        dt,
        polarity: archetype.polarity(),
        player_pos,
        player_polarity,
    });
    body.pos = step.pos;
    body.speed = step.speed;
    path.ascending = step.ascending;

    if let Ok(mut b) = store.world().get::<&mut Body>(e) {
        *b = body;
    }
    if let Ok(mut p) = store.world().get::<&mut FlightPath>(e) {
        *p = path;
    }

    if step.hits_player {
        store.hit_player(now);
    }

    if store.at_world_edge(e) {
        if archetype.is_ordinary_enemy() {
            store.relocate(e, rng);
        } else {
            store.kill(e);
        }
        return;
    }

    if archetype.is_ordinary_enemy() {
        enemy_fire(store, e, archetype, body, player_pos, now);
    }
}

/// Open fire on the player when in aggro range and off cooldown.
fn enemy_fire(
    store: &mut EntityStore,
    e: Entity,
    archetype: Archetype,
    body: Body,
    player_pos: Vec2,
    now: f64,
) {
    let cooldown = match archetype {
        Archetype::RedLightEnemy | Archetype::BlueLightEnemy => LIGHT_ENEMY_FIRE_COOLDOWN,
        _ => HEAVY_ENEMY_FIRE_COOLDOWN,
    };
    let ready = store
        .world()
        .get::<&Cooldowns>(e)
        .map(|c| now > c.gun + cooldown)
        .unwrap_or(false);
    let range = player_pos - body.pos;
    if !ready || range.length() > ENEMY_AGGRO_RADIUS {
        return;
    }

    if let Ok(mut c) = store.world().get::<&mut Cooldowns>(e) {
        c.gun = now;
    }

    let polarity = match archetype.polarity() {
        Some(p) => p,
        None => return,
    };
    let half_width = store.sprites.extent(archetype).width / 2.0;
    let pos = body.pos - half_width * body.view();
    let vel = (Vec2::new(0.0, ENEMY_BULLET_DROP) + range) * ENEMY_BULLET_DAMP;

    let bullet = store.create(Archetype::bullet_of(polarity), pos, now);
    if let Ok(mut b) = store.world().get::<&mut Body>(bullet) {
        b.vel = vel;
    }
    store.audio.play(Sound::EnemyGun);
}

/// Boss movement and decision tick.
fn step_boss<R: Rng>(
    store: &mut EntityStore,
    e: Entity,
    archetype: Archetype,
    now: f64,
    dt: f32,
    rng: &mut R,
) {
    let kind = match archetype.boss_kind() {
        Some(k) => k,
        None => return,
    };
    let Ok(mut body) = store.world().get::<&Body>(e).map(|b| *b) else {
        return;
    };
    let Ok(mut flags) = store.world().get::<&MotionFlags>(e).map(|f| *f) else {
        return;
    };
    let Ok(mut core) = store.world().get::<&BossCore>(e).map(|c| *c) else {
        return;
    };
    let Ok(mut cds) = store.world().get::<&Cooldowns>(e).map(|c| *c) else {
        return;
    };

    body.old_pos = body.pos;
    body.speed = match kind {
        BossKind::Bomber => boss::bomber_speed(body.pos.y, rng),
        BossKind::Pyro => PYRO_SPEED,
        BossKind::Gambler => boss::gambler_speed(rng),
    };
    let displacement = body.speed * dt;

    let delta = match kind {
        BossKind::Bomber | BossKind::Pyro => {
            let (f, d) = boss::patrol_step(body.pos, body.orientation, flags, displacement);
            flags = f;
            d
        }
        BossKind::Gambler => {
            let (f, d) = boss::gambler_step(body.pos, body.orientation, flags, displacement);
            flags = f;
            d
        }
    };
    body.pos += delta;

    // With nothing driving it, the gambler parks (unless its shield
    // is up, which keeps the strafe cycle alive).
    if kind == BossKind::Gambler
        && !flags.charging
        && !flags.strafe_back
        && !flags.strafe_forward
        && !core.forcefield_up
    {
        body.speed = 0.0;
        flags.strafe_left = false;
        flags.strafe_right = false;
        flags.strafe_back = false;
    }

    if let Ok(mut b) = store.world().get::<&mut Body>(e) {
        *b = body;
    }

    if kind == BossKind::Gambler {
        // The forcefield rides every gambler move.
        if delta != Vec2::ZERO {
            if let Some(ff) = core.forcefield.and_then(resolve) {
                if let Ok(mut b) = store.world().get::<&mut Body>(ff) {
                    b.pos += delta;
                }
            }
        }
        // Drifting past the side bounds teleports it back inside.
        if body.pos.x <= GAMBLER_MIN_X {
            store.teleport_boss(e, Vec2::new(750.0, BOSS_RESPAWN_Y));
            body.pos = Vec2::new(750.0, BOSS_RESPAWN_Y);
        } else if body.pos.x >= GAMBLER_MAX_X {
            store.teleport_boss(e, Vec2::new(200.0, BOSS_RESPAWN_Y));
            body.pos = Vec2::new(200.0, BOSS_RESPAWN_Y);
        }
    } else if store.at_world_edge(e) {
        store.relocate(e, rng);
        if let Ok(b) = store.world().get::<&Body>(e) {
            body.pos = b.pos;
        }
    }

    let decision = boss::decide(
        &BossContext {
            kind,
            pos: body.pos,
            orientation: body.orientation,
            half_width: store.sprites.extent(archetype).width / 2.0,
            flags,
            forcefield_up: core.forcefield_up,
            blackhole_up: core.blackhole_up,
            burst_index: core.burst_index,
            cooldowns: cds,
            player_pos: store.player_pos(),
            now,
        },
        rng,
    );
    if decision.rearm_gun {
        cds.gun = now;
    }
    core.burst_index = decision.burst_index;

    for action in decision.actions {
        apply_boss_action(
            store, body.pos, action, &mut flags, &mut core, &mut cds, now, rng,
        );
    }

    if let Ok(mut f) = store.world().get::<&mut MotionFlags>(e) {
        *f = flags;
    }
    if let Ok(mut c) = store.world().get::<&mut BossCore>(e) {
        *c = core;
    }
    if let Ok(mut c) = store.world().get::<&mut Cooldowns>(e) {
        *c = cds;
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_boss_action<R: Rng>(
    store: &mut EntityStore,
    boss_pos: Vec2,
    action: BossAction,
    flags: &mut MotionFlags,
    core: &mut BossCore,
    cds: &mut Cooldowns,
    now: f64,
    rng: &mut R,
) {
    match action {
        BossAction::Fire {
            archetype,
            pos,
            vel,
        } => {
            let bullet = store.create(archetype, pos, now);
            if let Ok(mut b) = store.world().get::<&mut Body>(bullet) {
                b.vel = vel;
            }
            let sound = if archetype == Archetype::Fireball {
                Sound::Fireball
            } else {
                Sound::EnemyGun
            };
            store.audio.play(sound);
        }
        BossAction::DropBomb { pos } => {
            let bomb = store.create(Archetype::Bomb, pos, now);
            if let Ok(mut b) = store.world().get::<&mut Body>(bomb) {
                b.vel = Vec2::new(0.0, BOMB_FALL_SPEED);
            }
            store.audio.play(Sound::EnemyGun);
        }
        BossAction::PlaceFiretrap { pos } => {
            store.create(Archetype::Firetrap, pos, now);
            store.audio.play(Sound::Firetrap);
        }
        BossAction::DealCards => {
            for column in CARD_COLUMNS {
                let face = if rng.gen_range(0..100) <= 50 {
                    CardFace::Queen
                } else {
                    CardFace::Jack
                };
                store.create_card(Vec2::new(column, CARD_DEAL_Y), face, now);
            }
            cds.card = now;
        }
        BossAction::RaiseForcefield => {
            let ff = store.create(Archetype::Forcefield, boss_pos, now);
            core.forcefield = Some(handle(ff));
            core.forcefield_up = true;
        }
        BossAction::BeginCharge => {
            flags.charging = true;
            flags.strafe_back = true;
        }
        BossAction::OpenBlackhole { pos } => {
            store.create(Archetype::Blackhole, pos, now);
            core.blackhole_up = true;
            store.audio.start_loop(Sound::BlackholeLoop);
        }
        BossAction::SwapPlayerColor => {
            store.swap_player_color();
            cds.color_swap = now;
        }
    }
}

/// Player bullet: fly, die past the world top, and give the current
/// boss its chance to sidestep.
fn step_player_bullet<R: Rng>(store: &mut EntityStore, e: Entity, dt: f32, rng: &mut R) {
    let Ok(mut body) = store.world().get::<&Body>(e).map(|b| *b) else {
        return;
    };
    body.old_pos = body.pos;
    body.pos += body.vel * dt;
    if let Ok(mut b) = store.world().get::<&mut Body>(e) {
        *b = body;
    }

    if body.pos.y >= WORLD_HEIGHT || store.at_world_edge(e) {
        store.kill(e);
        return;
    }

    let Some(boss) = store.current_boss else {
        return;
    };
    let (Some(boss_arch), Ok(boss_body)) = (
        store.archetype_of(boss),
        store.world().get::<&Body>(boss).map(|b| *b),
    ) else {
        return;
    };
    let kind = match boss_arch.boss_kind() {
        Some(k) => k,
        None => return,
    };
    let (Ok(flags), Ok(core)) = (
        store.world().get::<&MotionFlags>(boss).map(|f| *f),
        store.world().get::<&BossCore>(boss).map(|c| *c),
    ) else {
        return;
    };

    let dodge = boss::evaluate_dodge(
        &DodgeContext {
            kind,
            pos: boss_body.pos,
            half_width: store.sprites.extent(boss_arch).width / 2.0,
            flags,
            forcefield_up: core.forcefield_up,
            at_world_edge: store.at_world_edge(boss),
            bullet_pos: body.pos,
        },
        rng,
    );
    if let Some(strafe) = dodge {
        if let Ok(mut f) = store.world().get::<&mut MotionFlags>(boss) {
            match strafe {
                Strafe::Right => {
                    f.strafe_right = true;
                    f.strafe_left = false;
                }
                Strafe::Left => {
                    f.strafe_left = true;
                    f.strafe_right = false;
                }
            }
        }
    }
}

/// Straight-line projectiles and falling cards: integrate and die at
/// the world edge.
fn step_projectile(store: &mut EntityStore, e: Entity, dt: f32) {
    let Ok(mut body) = store.world().get::<&Body>(e).map(|b| *b) else {
        return;
    };
    body.old_pos = body.pos;
    body.pos += body.vel * dt;
    if let Ok(mut b) = store.world().get::<&mut Body>(e) {
        *b = body;
    }
    if store.at_world_edge(e) {
        store.kill(e);
    }
}

/// Falling bomb: detonates at its trigger altitude. The cull pass
/// turns the dead bomb into the big explosion.
fn step_bomb(store: &mut EntityStore, e: Entity, dt: f32) {
    let Ok(mut body) = store.world().get::<&Body>(e).map(|b| *b) else {
        return;
    };
    body.old_pos = body.pos;
    body.pos += body.vel * dt;
    if let Ok(mut b) = store.world().get::<&mut Body>(e) {
        *b = body;
    }
    if body.pos.y <= BOMB_TRIGGER_Y || store.at_world_edge(e) {
        store.kill(e);
    }
}

/// Timed hazards die when their lifespan runs out.
fn expire(store: &mut EntityStore, e: Entity, now: f64) {
    let expired = store
        .world()
        .get::<&Expiry>(e)
        .map(|x| x.elapsed(now))
        .unwrap_or(false);
    if expired {
        store.kill(e);
    }
}

fn advance_animation(store: &mut EntityStore, e: Entity, archetype: Archetype, now: f64) {
    let frames = store.sprites.extent(archetype).frames;
    if frames <= 1 {
        return;
    }
    if let Ok(mut anim) = store.world().get::<&mut Animation>(e) {
        if now - anim.frame_timer >= f64::from(anim.frame_interval) {
            anim.frame = (anim.frame + 1) % frames;
            anim.frame_timer = now;
        }
    }
}
