use glam::Vec2;

use polarity_core::archetype::{Archetype, BossKind, Polarity};
use polarity_core::commands::{PlayerCommand, Thrust};
use polarity_core::components::{Body, BossCore, CardFace, Cooldowns, PathId, Vitality};
use polarity_core::constants::*;
use polarity_core::sprites::SpriteTable;

use crate::store::{handle, EntityStore};
use crate::systems::{behavior, collision, cull};
use crate::{GameEngine, SimConfig};

fn engine(seed: u64) -> GameEngine {
    GameEngine::new(SimConfig { seed })
}

/// A store whose every sprite is a 64-unit square, so geometry in
/// tests is easy to reason about.
fn uniform_store() -> EntityStore {
    EntityStore::with_sprites(SpriteTable::uniform(64.0))
}

fn rng() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(7)
}

fn health_of(store: &EntityStore, e: hecs::Entity) -> i32 {
    store.world().get::<&Vitality>(e).map(|v| v.health).unwrap()
}

fn is_dead(store: &EntityStore, e: hecs::Entity) -> bool {
    store.world().get::<&Vitality>(e).map(|v| v.dead).unwrap()
}

// --- Engine determinism ---

fn scripted_run(seed: u64) -> Vec<String> {
    let mut eng = engine(seed);
    eng.start_level(2);
    // Seed a wave so the level stays live and the enemies shoot back.
    eng.store_mut().create_enemy(
        Vec2::new(400.0, 900.0),
        Archetype::RedLightEnemy,
        PathId::ZigZag,
        0.0,
    );
    eng.store_mut().create_enemy(
        Vec2::new(600.0, 950.0),
        Archetype::BlueHeavyEnemy,
        PathId::Descend,
        0.0,
    );
    let mut frames = Vec::new();
    for tick in 0..120 {
        if tick % 3 == 0 {
            eng.queue_command(PlayerCommand::Fire);
        }
        if tick == 10 {
            eng.queue_command(PlayerCommand::Thrust {
                dir: Thrust::Forward,
            });
        }
        if tick % 7 == 0 {
            eng.queue_command(PlayerCommand::StrafeRight);
        }
        let snap = eng.tick();
        frames.push(serde_json::to_string(&snap).unwrap());
    }
    frames
}

#[test]
fn same_seed_same_commands_runs_identically() {
    assert_eq!(scripted_run(11), scripted_run(11));
}

#[test]
fn different_seeds_diverge() {
    // Bullet deflection draws from the RNG, so the streams part ways.
    assert_ne!(scripted_run(1), scripted_run(2));
}

// --- Lifecycle ---

#[test]
fn dead_entities_do_not_survive_the_tick() {
    let mut eng = engine(3);
    eng.start_level(1);
    let e = eng.store_mut().create_enemy(
        Vec2::new(500.0, 500.0),
        Archetype::BlueLightEnemy,
        PathId::DescendStop,
        0.0,
    );
    assert_eq!(eng.store().enemy_count, 1);

    eng.store_mut().kill(e);
    eng.tick();

    assert!(!eng.store().world().contains(e));
    assert_eq!(eng.store().enemy_count, 0);
}

#[test]
fn bounding_sphere_tracks_position_after_ticks() {
    let mut eng = engine(4);
    eng.start_level(1);
    eng.queue_command(PlayerCommand::Thrust {
        dir: Thrust::Forward,
    });
    for _ in 0..30 {
        eng.tick();
    }
    for &e in eng.store().order() {
        let body = eng.store().world().get::<&Body>(e).unwrap();
        assert_eq!(body.sphere().center, body.pos);
    }
}

#[test]
fn player_hits_are_throttled_by_invincibility() {
    let mut store = uniform_store();
    store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);

    store.hit_player(0.0);
    store.hit_player(0.0);
    assert_eq!(store.player_health, 2);

    store.hit_player(1.0);
    assert_eq!(store.player_health, 2);

    store.hit_player(PLAYER_INVINCIBILITY_SECS + 0.1);
    assert_eq!(store.player_health, 1);
}

#[test]
fn depleted_pool_kills_the_ship() {
    let mut store = uniform_store();
    let ship = store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);

    store.hit_player(0.0);
    store.hit_player(10.0);
    store.hit_player(20.0);

    assert_eq!(store.player_health, 0);
    assert!(is_dead(&store, ship));
}

#[test]
fn light_enemy_dies_on_third_hit_and_scores() {
    let mut store = uniform_store();
    let e = store.create_enemy(
        Vec2::new(400.0, 600.0),
        Archetype::RedLightEnemy,
        PathId::Descend,
        0.0,
    );

    store.damage_entity(e, 0.0);
    store.damage_entity(e, 0.0);
    assert!(!is_dead(&store, e));
    assert_eq!(store.score, 0);

    store.damage_entity(e, 0.0);
    assert!(is_dead(&store, e));
    assert_eq!(store.score, SCORE_PER_KILL);

    cull::run(&mut store, 0.0);
    assert!(!store.world().contains(e));
    assert_eq!(store.enemy_count, 0);
}

#[test]
fn boss_death_decrements_boss_count_and_detonates() {
    let mut store = uniform_store();
    store.boss_count = 1;
    let boss = store.create_boss(BossKind::Pyro, Vec2::new(512.0, 600.0), 0.0);
    for _ in 0..PYRO_HEALTH {
        store.damage_entity(boss, 0.0);
    }
    assert!(is_dead(&store, boss));

    cull::run(&mut store, 0.0);
    assert!(!store.world().contains(boss));
    assert_eq!(store.boss_count, 0);
    assert!(store
        .order()
        .iter()
        .any(|&e| store.archetype_of(e) == Some(Archetype::BigExplosion)));
}

// --- Boss spawn controller ---

#[test]
fn level_three_clear_spawns_the_pyro() {
    let mut eng = engine(5);
    eng.start_level(PYRO_LEVEL);
    assert_eq!(eng.store().boss_count, 1);
    assert!(!eng.store().boss_present);

    let snap = eng.tick();

    assert!(eng.store().boss_present);
    assert_eq!(eng.store().player_health, PLAYER_START_HEALTH);
    assert!(!snap.level_cleared);
    let pyro = snap
        .sprites
        .iter()
        .find(|s| s.archetype == Archetype::Pyro)
        .expect("pyro spawned");
    assert_eq!(pyro.pos, Vec2::new(BOSS_SPAWN_HIGH.0, BOSS_SPAWN_HIGH.1));
}

#[test]
fn boss_spawns_only_once_per_level() {
    let mut eng = engine(6);
    eng.start_level(GAMBLER_LEVEL);
    eng.tick();
    let boss = eng.store().current_boss.expect("gambler spawned");
    for _ in 0..GAMBLER_HEALTH {
        eng.store_mut().damage_entity(boss, 1.0);
    }
    let snap = eng.tick();
    assert!(snap.level_cleared);

    for _ in 0..10 {
        eng.tick();
    }
    let bosses = eng
        .store()
        .order()
        .iter()
        .filter(|&&e| {
            eng.store()
                .archetype_of(e)
                .map(|a| a.is_boss())
                .unwrap_or(false)
        })
        .count();
    assert_eq!(bosses, 0);
}

#[test]
fn cleared_level_ignores_fire_commands() {
    let mut eng = engine(7);
    eng.start_level(1);
    let snap = eng.tick();
    // No enemies and no boss ledger: cleared immediately.
    assert!(snap.level_cleared);

    eng.queue_command(PlayerCommand::Fire);
    let snap = eng.tick();
    assert!(!snap
        .sprites
        .iter()
        .any(|s| s.archetype == Archetype::PlayerBullet));
}

// --- Collision rules ---

#[test]
fn same_color_bullet_is_absorbed_for_points() {
    let mut store = uniform_store();
    store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
    let bullet = store.create(Archetype::BlueBullet, Vec2::new(512.0, 80.0), 0.0);

    collision::run(&mut store, 0.0);

    assert!(is_dead(&store, bullet));
    assert_eq!(store.score, SCORE_PER_ABSORB);
    assert_eq!(store.player_health, PLAYER_START_HEALTH);
}

#[test]
fn opposite_color_bullet_damages_the_pool() {
    let mut store = uniform_store();
    store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
    let bullet = store.create(Archetype::RedBullet, Vec2::new(512.0, 80.0), 0.0);

    collision::run(&mut store, 0.0);

    assert!(is_dead(&store, bullet));
    assert_eq!(store.score, 0);
    assert_eq!(store.player_health, PLAYER_START_HEALTH - 1);
}

#[test]
fn ramming_an_enemy_rolls_the_ship_back() {
    let mut store = uniform_store();
    let ship = store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
    {
        let mut body = store.world().get::<&mut Body>(ship).unwrap();
        body.old_pos = Vec2::new(512.0, 10.0);
    }
    store.create_enemy(
        Vec2::new(520.0, 90.0),
        Archetype::BlueLightEnemy,
        PathId::Descend,
        0.0,
    );

    collision::run(&mut store, 0.0);

    assert_eq!(store.player_health, PLAYER_START_HEALTH - 1);
    let body = store.world().get::<&Body>(ship).unwrap();
    assert_eq!(body.pos, Vec2::new(512.0, 10.0));
}

#[test]
fn forcefield_soaks_hits_meant_for_the_gambler() {
    let mut store = uniform_store();
    let boss = store.create_boss(BossKind::Gambler, Vec2::new(200.0, 600.0), 0.0);
    let ff = store.create(Archetype::Forcefield, Vec2::new(700.0, 600.0), 0.0);
    {
        let mut core = store.world().get::<&mut BossCore>(boss).unwrap();
        core.forcefield = Some(handle(ff));
        core.forcefield_up = true;
    }
    let bullet = store.create(Archetype::PlayerBullet, Vec2::new(700.0, 610.0), 0.0);

    collision::run(&mut store, 0.0);

    assert!(is_dead(&store, bullet));
    assert_eq!(health_of(&store, ff), FORCEFIELD_HEALTH - 1);
    assert_eq!(health_of(&store, boss), GAMBLER_HEALTH);
}

#[test]
fn unshielded_boss_takes_bullet_damage() {
    let mut store = uniform_store();
    let boss = store.create_boss(BossKind::Gambler, Vec2::new(500.0, 600.0), 0.0);
    let bullet = store.create(Archetype::PlayerBullet, Vec2::new(500.0, 610.0), 0.0);

    collision::run(&mut store, 0.0);

    assert!(is_dead(&store, bullet));
    assert_eq!(health_of(&store, boss), GAMBLER_HEALTH - 1);
}

#[test]
fn downed_forcefield_releases_the_gambler() {
    let mut store = uniform_store();
    let boss = store.create_boss(BossKind::Gambler, Vec2::new(200.0, 600.0), 0.0);
    let ff = store.create(Archetype::Forcefield, Vec2::new(700.0, 600.0), 0.0);
    {
        let mut core = store.world().get::<&mut BossCore>(boss).unwrap();
        core.forcefield = Some(handle(ff));
        core.forcefield_up = true;
    }
    for _ in 0..FORCEFIELD_HEALTH {
        store.damage_entity(ff, 0.0);
    }
    cull::run(&mut store, 9.0);

    assert!(!store.world().contains(ff));
    let core = store.world().get::<&BossCore>(boss).unwrap();
    assert!(!core.forcefield_up);
    assert_eq!(core.forcefield, None);
    let cds = store.world().get::<&Cooldowns>(boss).unwrap();
    assert_eq!(cds.forcefield, 9.0);
}

#[test]
fn killing_the_gambler_takes_its_forcefield_down() {
    let mut store = uniform_store();
    let boss = store.create_boss(BossKind::Gambler, Vec2::new(200.0, 600.0), 0.0);
    let ff = store.create(Archetype::Forcefield, Vec2::new(200.0, 600.0), 0.0);
    {
        let mut core = store.world().get::<&mut BossCore>(boss).unwrap();
        core.forcefield = Some(handle(ff));
        core.forcefield_up = true;
    }

    store.kill(boss);
    assert!(is_dead(&store, ff));
}

#[test]
fn card_reveals_its_face_when_shot() {
    let mut store = uniform_store();
    let card = store.create_card(Vec2::new(500.0, 800.0), CardFace::Jack, 0.0);
    let bullet = store.create(Archetype::PlayerBullet, Vec2::new(500.0, 810.0), 0.0);

    collision::run(&mut store, 0.0);

    assert!(is_dead(&store, bullet));
    assert_eq!(store.archetype_of(card), Some(Archetype::Jack));
}

#[test]
fn queen_heals_and_jack_hurts() {
    let mut store = uniform_store();
    store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
    let queen = store.create(Archetype::Queen, Vec2::new(512.0, 90.0), 0.0);

    collision::run(&mut store, 0.0);
    assert!(is_dead(&store, queen));
    assert_eq!(store.player_health, PLAYER_START_HEALTH + 1);

    cull::run(&mut store, 0.0);
    let jack = store.create(Archetype::Jack, Vec2::new(512.0, 90.0), 0.0);
    collision::run(&mut store, 10.0);
    assert!(is_dead(&store, jack));
    assert_eq!(store.player_health, PLAYER_START_HEALTH);
}

#[test]
fn narrow_phase_is_order_independent() {
    // The same overlap produces the same outcome whichever entity was
    // spawned first.
    let outcome = |ship_first: bool| {
        let mut store = uniform_store();
        if ship_first {
            store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
            store.create(Archetype::RedBullet, Vec2::new(512.0, 80.0), 0.0);
        } else {
            store.create(Archetype::RedBullet, Vec2::new(512.0, 80.0), 0.0);
            store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
        }
        collision::run(&mut store, 0.0);
        (store.player_health, store.score)
    };
    assert_eq!(outcome(true), outcome(false));
}

// --- Behavior ---

#[test]
fn bullet_below_floor_dies_while_enemy_relocates() {
    let mut store = EntityStore::new();
    store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
    let enemy = store.create_enemy(
        Vec2::new(500.0, -200.0),
        Archetype::RedHeavyEnemy,
        PathId::Descend,
        0.0,
    );
    let bullet = store.create(Archetype::RedBullet, Vec2::new(500.0, -200.0), 0.0);
    {
        let mut body = store.world().get::<&mut Body>(bullet).unwrap();
        body.vel = Vec2::new(0.0, -50.0);
    }

    behavior::run(&mut store, 0.0, DT, &mut rng());

    assert!(is_dead(&store, bullet));
    assert!(!is_dead(&store, enemy));
    let body = store.world().get::<&Body>(enemy).unwrap();
    assert_eq!(body.pos.y, RELOCATE_BOTTOM_Y);
    assert!(body.pos.x >= RELOCATE_X_MIN);
    assert!(body.pos.x < RELOCATE_X_MIN + RELOCATE_X_SPAN as f32);
}

#[test]
fn bomb_detonates_at_trigger_altitude() {
    let mut store = EntityStore::new();
    let bomb = store.create(Archetype::Bomb, Vec2::new(512.0, BOMB_TRIGGER_Y + 1.0), 0.0);
    {
        let mut body = store.world().get::<&mut Body>(bomb).unwrap();
        body.vel = Vec2::new(0.0, BOMB_FALL_SPEED);
    }

    behavior::run(&mut store, 0.0, DT, &mut rng());
    assert!(is_dead(&store, bomb));

    cull::run(&mut store, 0.0);
    assert!(store
        .order()
        .iter()
        .any(|&e| store.archetype_of(e) == Some(Archetype::BigExplosion)));
}

#[test]
fn blackhole_expiry_resets_the_gambler_clock() {
    let mut store = EntityStore::new();
    let boss = store.create_boss(BossKind::Gambler, Vec2::new(900.0, 600.0), 0.0);
    {
        let mut core = store.world().get::<&mut BossCore>(boss).unwrap();
        core.blackhole_up = true;
    }
    let hole = store.create(Archetype::Blackhole, Vec2::new(300.0, 300.0), 0.0);

    let expiry = BLACKHOLE_LIFESPAN + 0.1;
    behavior::run(&mut store, expiry, DT, &mut rng());
    assert!(is_dead(&store, hole));

    cull::run(&mut store, expiry);
    assert!(!store.world().contains(hole));
    let core = store.world().get::<&BossCore>(boss).unwrap();
    assert!(!core.blackhole_up);
    let cds = store.world().get::<&Cooldowns>(boss).unwrap();
    assert_eq!(cds.blackhole, expiry);
}

#[test]
fn firetrap_burns_out_after_its_lifespan() {
    let mut store = EntityStore::new();
    let trap = store.create(Archetype::Firetrap, Vec2::new(400.0, 400.0), 0.0);

    behavior::run(&mut store, FIRETRAP_LIFESPAN - 0.1, DT, &mut rng());
    assert!(!is_dead(&store, trap));

    behavior::run(&mut store, FIRETRAP_LIFESPAN + 0.1, DT, &mut rng());
    assert!(is_dead(&store, trap));
}

#[test]
fn enemy_in_range_fires_a_bullet_of_its_color() {
    let mut store = EntityStore::new();
    store.spawn_player(Polarity::Blue, Vec2::new(512.0, 78.0), 0.0);
    store.create_enemy(
        Vec2::new(512.0, 500.0),
        Archetype::RedLightEnemy,
        PathId::DescendStop,
        0.0,
    );

    // The gun timer is primed at creation; step past the cooldown.
    behavior::run(&mut store, LIGHT_ENEMY_FIRE_COOLDOWN + 0.1, DT, &mut rng());

    assert!(store
        .order()
        .iter()
        .any(|&e| store.archetype_of(e) == Some(Archetype::RedBullet)));
}

#[test]
fn player_bullet_dies_past_the_world_top() {
    let mut store = EntityStore::new();
    let bullet = store.create(Archetype::PlayerBullet, Vec2::new(512.0, 1020.0), 0.0);
    {
        let mut body = store.world().get::<&mut Body>(bullet).unwrap();
        body.vel = Vec2::new(0.0, PLAYER_BULLET_SPEED);
    }

    behavior::run(&mut store, 0.0, DT, &mut rng());
    assert!(is_dead(&store, bullet));
}

#[test]
fn ship_strafe_is_gated_at_the_world_edge() {
    let mut eng = engine(9);
    eng.start_level(1);
    // A distant parked enemy keeps the level live so the strafe
    // commands keep landing.
    eng.store_mut().create_enemy(
        Vec2::new(100.0, 900.0),
        Archetype::BlueLightEnemy,
        PathId::DescendStop,
        0.0,
    );
    // Park the ship on the right edge and keep strafing right.
    {
        let store = eng.store_mut();
        let ship = store.player.unwrap();
        let mut body = store.world().get::<&mut Body>(ship).unwrap();
        body.pos.x = WORLD_WIDTH - 30.0;
    }
    for _ in 0..20 {
        eng.queue_command(PlayerCommand::StrafeRight);
        eng.tick();
    }
    let store = eng.store();
    let ship = store.player.unwrap();
    let body = store.world().get::<&Body>(ship).unwrap();
    // The gate rejects the strafe outright, so the ship never moves.
    assert_eq!(body.pos.x, WORLD_WIDTH - 30.0);
}

#[test]
fn swap_color_command_flips_the_ship() {
    let mut eng = engine(10);
    eng.start_level(2);
    eng.queue_command(PlayerCommand::SwapColor);
    let snap = eng.tick();
    assert!(snap
        .sprites
        .iter()
        .any(|s| s.archetype == Archetype::ShipRed));
}
