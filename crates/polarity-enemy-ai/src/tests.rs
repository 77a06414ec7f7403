use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use polarity_core::archetype::{Archetype, BossKind, Polarity};
use polarity_core::components::{Cooldowns, MotionFlags, PathId};
use polarity_core::constants::*;

use crate::boss::{
    decide, evaluate_dodge, gambler_step, patrol_step, BossAction, BossContext, DodgeContext,
    Strafe,
};
use crate::paths::{step, PathContext};

fn path_ctx(id: PathId, pos: Vec2, speed: f32) -> PathContext {
    PathContext {
        id,
        ascending: false,
        pos,
        orientation: 0.0,
        speed,
        dt: DT,
        polarity: None,
        player_pos: Vec2::new(512.0, 78.0),
        player_polarity: Polarity::Blue,
    }
}

#[test]
fn descend_stop_parks_on_the_stop_line() {
    let mut ctx = path_ctx(PathId::DescendStop, Vec2::new(512.0, 520.0), 100.0);
    // Descending above the line.
    let out = step(&ctx);
    assert!(out.pos.y < ctx.pos.y);
    assert_eq!(out.speed, 100.0);

    // At the line the speed drops to zero and movement stops.
    ctx.pos.y = PATH_STOP_Y;
    let out = step(&ctx);
    assert_eq!(out.speed, 0.0);
    assert_eq!(out.pos, ctx.pos);
}

#[test]
fn plain_descent_moves_straight_down() {
    let ctx = path_ctx(PathId::Descend, Vec2::new(300.0, 900.0), 100.0);
    let out = step(&ctx);
    assert_eq!(out.pos.x, 300.0);
    assert!((out.pos.y - (900.0 - 100.0 * DT)).abs() < 1e-4);
}

#[test]
fn diagonal_paths_descend_straight_above_the_world() {
    let ctx = path_ctx(PathId::DiagonalLeft, Vec2::new(512.0, 1100.0), 100.0);
    let out = step(&ctx);
    assert_eq!(out.pos.x, 512.0);

    let ctx = path_ctx(PathId::DiagonalLeft, Vec2::new(512.0, 900.0), 100.0);
    let out = step(&ctx);
    assert!(out.pos.x < 512.0);
    assert!(out.pos.y < 900.0);
}

#[test]
fn shift_paths_trade_descent_for_drift() {
    let high = path_ctx(PathId::DescendShiftRight, Vec2::new(512.0, 500.0), 100.0);
    let out = step(&high);
    assert!(out.pos.y < 500.0);
    assert_eq!(out.pos.x, 512.0);

    let low = path_ctx(PathId::DescendShiftRight, Vec2::new(512.0, 399.0), 100.0);
    let out = step(&low);
    assert_eq!(out.pos.y, 399.0);
    assert!(out.pos.x > 512.0);
}

#[test]
fn zigzag_alternates_by_band() {
    let d = 100.0 * DT;
    let top = path_ctx(PathId::ZigZag, Vec2::new(512.0, 900.0), 100.0);
    let out = step(&top);
    assert!((out.pos.x - (512.0 + 2.0 * d)).abs() < 1e-4);

    let second = path_ctx(PathId::ZigZag, Vec2::new(512.0, 700.0), 100.0);
    let out = step(&second);
    assert!((out.pos.x - (512.0 - 2.0 * d)).abs() < 1e-4);

    let bottom = path_ctx(PathId::ZigZag, Vec2::new(512.0, 100.0), 100.0);
    let out = step(&bottom);
    assert_eq!(out.pos.x, 512.0);
    assert!(out.pos.y < 100.0);
}

#[test]
fn oscillating_line_flips_at_world_bounds() {
    let mut ctx = path_ctx(PathId::Oscillate, Vec2::new(512.0, 1.0), LINE_SPEED);
    ctx.polarity = Some(Polarity::Blue);
    ctx.ascending = false;
    let out = step(&ctx);
    assert!(out.ascending);

    ctx.pos.y = WORLD_HEIGHT - 1.0;
    ctx.ascending = true;
    let out = step(&ctx);
    assert!(!out.ascending);
}

#[test]
fn line_band_hits_only_the_opposite_color() {
    let mut ctx = path_ctx(PathId::RapidDescent, Vec2::new(512.0, 80.0), LINE_SPEED);
    ctx.polarity = Some(Polarity::Red);
    ctx.player_polarity = Polarity::Blue;
    ctx.player_pos = Vec2::new(512.0, ctx.pos.y - LINE_SPEED * 6.0 * DT);
    let out = step(&ctx);
    assert!(out.hits_player);

    ctx.player_polarity = Polarity::Red;
    let out = step(&ctx);
    assert!(!out.hits_player);
}

#[test]
fn line_band_misses_outside_the_band() {
    let mut ctx = path_ctx(PathId::RapidDescent, Vec2::new(512.0, 500.0), LINE_SPEED);
    ctx.polarity = Some(Polarity::Red);
    ctx.player_polarity = Polarity::Blue;
    ctx.player_pos = Vec2::new(512.0, 100.0);
    let out = step(&ctx);
    assert!(!out.hits_player);
}

#[test]
fn patrol_turns_left_at_the_floor() {
    let flags = MotionFlags {
        strafe_back: true,
        ..Default::default()
    };
    let (flags, delta) = patrol_step(Vec2::new(512.0, PATROL_FLOOR_Y), 0.0, flags, 10.0);
    assert!(flags.strafe_left);
    assert!(!flags.strafe_back);
    assert!(delta.x < 0.0);
}

#[test]
fn patrol_sweeps_between_the_margins() {
    let flags = MotionFlags {
        strafe_left: true,
        ..Default::default()
    };
    let (flags, _) = patrol_step(Vec2::new(PATROL_LEFT_X, 550.0), 0.0, flags, 10.0);
    assert!(flags.strafe_right);

    let (flags, delta) = patrol_step(Vec2::new(PATROL_RIGHT_X, 550.0), 0.0, flags, 10.0);
    assert!(flags.strafe_left);
    assert!(delta.x < 0.0);
}

#[test]
fn charge_bottoms_out_and_climbs_back() {
    let flags = MotionFlags {
        strafe_back: true,
        charging: true,
        ..Default::default()
    };
    let (flags, delta) = gambler_step(Vec2::new(512.0, CHARGE_FLOOR_Y), 0.0, flags, 10.0);
    assert!(delta.y < 0.0);
    assert!(!flags.charging);
    assert!(flags.strafe_forward);
    // The dive flag clears once the charge ends.
    assert!(!flags.strafe_back);

    let (flags, _) = gambler_step(Vec2::new(512.0, CHARGE_CEILING_Y), 0.0, flags, 10.0);
    assert!(!flags.strafe_forward);
}

fn boss_ctx(kind: BossKind, pos: Vec2, player_pos: Vec2, now: f64) -> BossContext {
    BossContext {
        kind,
        pos,
        orientation: 0.0,
        half_width: 64.0,
        flags: MotionFlags::default(),
        forcefield_up: false,
        blackhole_up: false,
        burst_index: 0,
        cooldowns: Cooldowns::primed(0.0),
        player_pos,
        now,
    }
}

#[test]
fn bomber_holds_fire_outside_the_corridor() {
    let mut rng = StdRng::seed_from_u64(7);
    // Player well off to the side.
    let ctx = boss_ctx(
        BossKind::Bomber,
        Vec2::new(512.0, 600.0),
        Vec2::new(100.0, 78.0),
        10.0,
    );
    let out = decide(&ctx, &mut rng);
    assert!(out.actions.is_empty());
    assert!(!out.rearm_gun);
}

#[test]
fn bomber_attacks_are_bombs_or_triple_bursts() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut saw_bomb = false;
    let mut saw_burst = false;

    for _ in 0..200 {
        let ctx = boss_ctx(
            BossKind::Bomber,
            Vec2::new(512.0, 600.0),
            Vec2::new(512.0, 78.0),
            10.0,
        );
        let out = decide(&ctx, &mut rng);
        assert!(out.rearm_gun);
        match out.actions.as_slice() {
            [BossAction::DropBomb { .. }] => saw_bomb = true,
            bullets if bullets.len() == 3 => {
                saw_burst = true;
                let base = (Vec2::new(0.0, ENEMY_BULLET_DROP)
                    + (Vec2::new(512.0, 78.0) - Vec2::new(512.0, 600.0)))
                    * ENEMY_BULLET_DAMP;
                for (i, action) in bullets.iter().enumerate() {
                    match action {
                        BossAction::Fire { archetype, vel, .. } => {
                            assert!(archetype.is_enemy_bullet());
                            assert!((vel.x - (base.x + BOMBER_BURST_OFFSETS[i])).abs() < 1e-4);
                            assert!((vel.y - base.y).abs() < 1e-4);
                        }
                        other => panic!("unexpected action in burst: {other:?}"),
                    }
                }
            }
            other => panic!("unexpected bomber decision: {other:?}"),
        }
    }

    assert!(saw_bomb && saw_burst);
}

#[test]
fn pyro_alternates_fireballs_and_traps() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut saw_fireball = false;
    let mut saw_trap = false;
    let player = Vec2::new(400.0, 78.0);

    for _ in 0..200 {
        let ctx = boss_ctx(BossKind::Pyro, Vec2::new(512.0, 600.0), player, 10.0);
        let out = decide(&ctx, &mut rng);
        assert_eq!(out.actions.len(), 1);
        match out.actions[0] {
            BossAction::Fire {
                archetype: Archetype::Fireball,
                vel,
                ..
            } => {
                saw_fireball = true;
                let expect =
                    (Vec2::new(0.0, FIREBALL_DROP) + (player - Vec2::new(512.0, 600.0)))
                        * FIREBALL_DAMP;
                assert!((vel - expect).length() < 1e-4);
            }
            BossAction::PlaceFiretrap { pos } => {
                saw_trap = true;
                // Player is left of center, so the trap lands to the right.
                assert_eq!(pos, Vec2::new(player.x + FIRETRAP_OFFSET, player.y));
            }
            other => panic!("unexpected pyro decision: {other:?}"),
        }
    }

    assert!(saw_fireball && saw_trap);
}

#[test]
fn gambler_blackhole_runs_on_its_own_timer() {
    let mut rng = StdRng::seed_from_u64(3);
    // Player far out of aggro range; the blackhole opens anyway.
    let player = Vec2::new(900.0, 78.0);
    let ctx = boss_ctx(BossKind::Gambler, Vec2::new(100.0, 600.0), player, 100.0);
    let out = decide(&ctx, &mut rng);
    assert!(out
        .actions
        .iter()
        .any(|a| matches!(a, BossAction::OpenBlackhole { pos }
            if *pos == Vec2::new(player.x - BLACKHOLE_OFFSET, player.y))));
    assert!(out.actions.contains(&BossAction::SwapPlayerColor));
}

#[test]
fn gambler_blackhole_respects_the_up_flag() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut ctx = boss_ctx(
        BossKind::Gambler,
        Vec2::new(100.0, 600.0),
        Vec2::new(900.0, 78.0),
        100.0,
    );
    ctx.blackhole_up = true;
    let out = decide(&ctx, &mut rng);
    assert!(!out
        .actions
        .iter()
        .any(|a| matches!(a, BossAction::OpenBlackhole { .. })));
}

#[test]
fn gambler_cards_wait_for_the_card_cooldown() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let mut ctx = boss_ctx(
            BossKind::Gambler,
            Vec2::new(512.0, 600.0),
            Vec2::new(512.0, 78.0),
            10.0,
        );
        // Card timer primed at t=0; 10 seconds is well inside the
        // 21-second cooldown.
        ctx.cooldowns.color_swap = 10.0;
        ctx.cooldowns.blackhole = 10.0;
        let out = decide(&ctx, &mut rng);
        assert!(!out.actions.contains(&BossAction::DealCards));
    }
}

#[test]
fn gambler_deals_cards_once_the_cooldown_clears() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut dealt = false;
    for _ in 0..200 {
        let mut ctx = boss_ctx(
            BossKind::Gambler,
            Vec2::new(512.0, 600.0),
            Vec2::new(512.0, 78.0),
            30.0,
        );
        ctx.cooldowns.color_swap = 30.0;
        ctx.cooldowns.blackhole = 30.0;
        if decide(&ctx, &mut rng).actions.contains(&BossAction::DealCards) {
            dealt = true;
            break;
        }
    }
    assert!(dealt);
}

#[test]
fn charging_gambler_neither_shoots_nor_deals() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..200 {
        let mut ctx = boss_ctx(
            BossKind::Gambler,
            Vec2::new(512.0, 400.0),
            Vec2::new(512.0, 78.0),
            100.0,
        );
        ctx.flags.charging = true;
        ctx.flags.strafe_back = true;
        ctx.cooldowns.color_swap = 100.0;
        ctx.cooldowns.blackhole = 100.0;
        let out = decide(&ctx, &mut rng);
        assert!(out.rearm_gun);
        assert!(out.actions.is_empty(), "charging gambler produced {:?}", out.actions);
    }
}

fn dodge_ctx(kind: BossKind, bullet_pos: Vec2) -> DodgeContext {
    DodgeContext {
        kind,
        pos: Vec2::new(512.0, 600.0),
        half_width: 64.0,
        flags: MotionFlags::default(),
        forcefield_up: false,
        at_world_edge: false,
        bullet_pos,
    }
}

#[test]
fn pyro_never_dodges() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let ctx = dodge_ctx(BossKind::Pyro, Vec2::new(510.0, 500.0));
        assert_eq!(evaluate_dodge(&ctx, &mut rng), None);
    }
}

#[test]
fn dodge_moves_away_from_the_bullet() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut dodged = false;
    for _ in 0..100 {
        // Bullet just left of the gambler, point blank.
        let ctx = dodge_ctx(BossKind::Gambler, Vec2::new(480.0, 500.0));
        if let Some(dir) = evaluate_dodge(&ctx, &mut rng) {
            assert_eq!(dir, Strafe::Right);
            dodged = true;
        }
    }
    assert!(dodged);
}

#[test]
fn dodge_is_suppressed_by_a_forcefield() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let mut ctx = dodge_ctx(BossKind::Gambler, Vec2::new(480.0, 500.0));
        ctx.forcefield_up = true;
        assert_eq!(evaluate_dodge(&ctx, &mut rng), None);
    }
}

#[test]
fn dodge_ignores_distant_bullets() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let ctx = dodge_ctx(BossKind::Gambler, Vec2::new(100.0, 100.0));
        assert_eq!(evaluate_dodge(&ctx, &mut rng), None);
    }
}
