//! Boss decision logic.
//!
//! Pure functions that pick each boss's next attack, patrol strafe,
//! charge phase, and bullet dodge. Randomness comes in through the
//! caller's RNG so the whole layer stays deterministic under a fixed
//! seed. The sim applies the returned actions; nothing here spawns
//! entities or plays sounds directly.

use glam::Vec2;
use rand::Rng;

use polarity_core::archetype::{Archetype, BossKind, Polarity};
use polarity_core::components::{Cooldowns, MotionFlags};
use polarity_core::constants::*;
use polarity_core::types::{side_vector, view_vector};

/// Input to the per-tick boss decision.
pub struct BossContext {
    pub kind: BossKind,
    pub pos: Vec2,
    pub orientation: f32,
    /// Half the boss sprite width, for muzzle offsets.
    pub half_width: f32,
    pub flags: MotionFlags,
    pub forcefield_up: bool,
    pub blackhole_up: bool,
    /// Round-robin offset index carried across burst shots.
    pub burst_index: u8,
    pub cooldowns: Cooldowns,
    pub player_pos: Vec2,
    pub now: f64,
}

/// One attack the sim must carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossAction {
    /// Spawn a projectile with a fully computed trajectory.
    Fire {
        archetype: Archetype,
        pos: Vec2,
        vel: Vec2,
    },
    DropBomb {
        pos: Vec2,
    },
    PlaceFiretrap {
        pos: Vec2,
    },
    /// Deal the three face-down cards into their columns.
    DealCards,
    RaiseForcefield,
    BeginCharge,
    OpenBlackhole {
        pos: Vec2,
    },
    /// Flip the player's polarity.
    SwapPlayerColor,
}

/// The outcome of one decision tick.
#[derive(Default)]
pub struct BossDecision {
    pub actions: Vec<BossAction>,
    /// The attack cooldown elapsed with the player in range; the sim
    /// rearms the gun timer even when no action came out of it.
    pub rearm_gun: bool,
    /// Updated burst offset index.
    pub burst_index: u8,
}

/// Decide what a boss does this tick.
pub fn decide<R: Rng>(ctx: &BossContext, rng: &mut R) -> BossDecision {
    match ctx.kind {
        BossKind::Bomber => decide_bomber(ctx, rng),
        BossKind::Pyro => decide_pyro(ctx, rng),
        BossKind::Gambler => decide_gambler(ctx, rng),
    }
}

fn decide_bomber<R: Rng>(ctx: &BossContext, rng: &mut R) -> BossDecision {
    let mut out = BossDecision {
        burst_index: ctx.burst_index,
        ..Default::default()
    };

    let range = ctx.player_pos - ctx.pos;
    let in_range = range.x.abs() < BOMBER_AGGRO_CORRIDOR && range.length() < BOSS_AGGRO_RADIUS;
    if !in_range || ctx.now <= ctx.cooldowns.gun + BOMBER_DECISION_COOLDOWN {
        return out;
    }
    out.rearm_gun = true;

    if rng.gen_range(0..100) < BOMBER_BOMB_PCT {
        out.actions.push(BossAction::DropBomb {
            pos: muzzle(ctx),
        });
    } else {
        for _ in 0..BOMBER_BURST_OFFSETS.len() {
            let archetype = if rng.gen_range(0..10) < 5 {
                Archetype::BlueBullet
            } else {
                Archetype::RedBullet
            };
            let mut vel = aimed_bullet_vel(ctx);
            vel.x += BOMBER_BURST_OFFSETS[out.burst_index as usize];
            out.actions.push(BossAction::Fire {
                archetype,
                pos: muzzle(ctx),
                vel,
            });
            out.burst_index = (out.burst_index + 1) % BOMBER_BURST_OFFSETS.len() as u8;
        }
    }

    out
}

fn decide_pyro<R: Rng>(ctx: &BossContext, rng: &mut R) -> BossDecision {
    let mut out = BossDecision {
        burst_index: ctx.burst_index,
        ..Default::default()
    };

    let range = ctx.player_pos - ctx.pos;
    if range.length() >= BOSS_AGGRO_RADIUS
        || ctx.now <= ctx.cooldowns.gun + PYRO_DECISION_COOLDOWN
    {
        return out;
    }
    out.rearm_gun = true;

    if rng.gen_range(0..100) < PYRO_FIREBALL_PCT {
        let aim = ctx.player_pos - ctx.pos;
        let vel = (Vec2::new(0.0, FIREBALL_DROP) + aim) * FIREBALL_DAMP;
        out.actions.push(BossAction::Fire {
            archetype: Archetype::Fireball,
            pos: muzzle(ctx),
            vel,
        });
    } else {
        out.actions.push(BossAction::PlaceFiretrap {
            pos: flank_player(ctx.player_pos, FIRETRAP_OFFSET),
        });
    }

    out
}

fn decide_gambler<R: Rng>(ctx: &BossContext, rng: &mut R) -> BossDecision {
    let mut out = BossDecision {
        burst_index: ctx.burst_index,
        ..Default::default()
    };

    let range = ctx.player_pos - ctx.pos;
    // Signed corridor bound: aggro extends further on the left side.
    let in_range = range.x < GAMBLER_AGGRO_CORRIDOR && range.length() < GAMBLER_AGGRO_RADIUS;

    if in_range && ctx.now > ctx.cooldowns.gun + GAMBLER_DECISION_COOLDOWN {
        out.rearm_gun = true;
        let roll = rng.gen_range(0..100);
        let charging = ctx.flags.charging;
        if roll < GAMBLER_CARD_PCT
            && !charging
            && ctx.now > ctx.cooldowns.card + GAMBLER_CARD_COOLDOWN
        {
            out.actions.push(BossAction::DealCards);
        } else if roll < GAMBLER_FIRE_PCT && !charging {
            for _ in 0..GAMBLER_BURST_OFFSETS.len() {
                let mut pos = muzzle(ctx);
                pos.x += GAMBLER_BURST_OFFSETS[out.burst_index as usize];
                let archetype = if rng.gen_range(0..10) <= 5 {
                    Archetype::RedBullet
                } else {
                    Archetype::BlueBullet
                };
                out.actions.push(BossAction::Fire {
                    archetype,
                    pos,
                    vel: aimed_bullet_vel(ctx),
                });
                out.burst_index = (out.burst_index + 1) % GAMBLER_BURST_OFFSETS.len() as u8;
            }
        } else if !ctx.forcefield_up
            && ctx.now > ctx.cooldowns.forcefield + GAMBLER_FORCEFIELD_COOLDOWN
            && !ctx.flags.strafe_forward
            && !ctx.flags.strafe_back
        {
            out.actions.push(BossAction::RaiseForcefield);
        } else if !charging && !ctx.forcefield_up {
            out.actions.push(BossAction::BeginCharge);
        }
    }

    // The blackhole and the forced color swap run on their own timers,
    // independent of aggro range.
    if ctx.now > ctx.cooldowns.blackhole + GAMBLER_BLACKHOLE_COOLDOWN
        && !ctx.flags.charging
        && !ctx.blackhole_up
    {
        out.actions.push(BossAction::OpenBlackhole {
            pos: flank_player(ctx.player_pos, BLACKHOLE_OFFSET),
        });
    }
    if ctx.now > ctx.cooldowns.color_swap + GAMBLER_COLOR_SWAP_COOLDOWN {
        out.actions.push(BossAction::SwapPlayerColor);
    }

    out
}

/// Projectile spawn point: half a sprite width behind the view vector.
fn muzzle(ctx: &BossContext) -> Vec2 {
    ctx.pos - ctx.half_width * view_vector(ctx.orientation)
}

/// The shared aimed-bullet trajectory: lead toward the player, biased
/// downward, damped.
fn aimed_bullet_vel(ctx: &BossContext) -> Vec2 {
    let aim = ctx.player_pos - ctx.pos;
    (Vec2::new(0.0, ENEMY_BULLET_DROP) + aim) * ENEMY_BULLET_DAMP
}

/// Hazard placement beside the player: on whichever side faces the
/// world center, at the player's row.
fn flank_player(player_pos: Vec2, offset: f32) -> Vec2 {
    let x = if WORLD_WIDTH / 2.0 - player_pos.x >= 0.0 {
        player_pos.x + offset
    } else {
        player_pos.x - offset
    };
    Vec2::new(x, player_pos.y)
}

// --- Movement helpers ---

/// One step of the bomber/pyro patrol cycle: strafe back to the
/// patrol floor, then sweep between the left and right margins.
pub fn patrol_step(pos: Vec2, orientation: f32, flags: MotionFlags, displacement: f32) -> (MotionFlags, Vec2) {
    let front = view_vector(orientation);
    let side = side_vector(front);

    let mut flags = flags;
    if flags.strafe_back && pos.y <= PATROL_FLOOR_Y {
        flags.strafe_left = true;
        flags.strafe_right = false;
        flags.strafe_back = false;
    } else if flags.strafe_right && pos.x >= PATROL_RIGHT_X {
        flags.strafe_left = true;
        flags.strafe_right = false;
        flags.strafe_back = false;
    } else if flags.strafe_left && pos.x <= PATROL_LEFT_X {
        flags.strafe_right = true;
        flags.strafe_left = false;
        flags.strafe_back = false;
    }

    let mut delta = Vec2::ZERO;
    if flags.strafe_back {
        delta -= displacement * front;
    } else if flags.strafe_right {
        delta += displacement * side;
    } else if flags.strafe_left {
        delta -= displacement * side;
    }

    (flags, delta)
}

/// One step of the gambler's strafe state machine. Returns the new
/// flags and the displacement to apply to the boss (and its
/// forcefield, which rides along).
pub fn gambler_step(
    pos: Vec2,
    orientation: f32,
    flags: MotionFlags,
    displacement: f32,
) -> (MotionFlags, Vec2) {
    let front = view_vector(orientation);
    let side = side_vector(front);

    let mut flags = flags;
    let mut delta = Vec2::ZERO;

    if flags.strafe_back {
        delta -= displacement * front;
    } else if flags.strafe_left {
        delta -= displacement * side;
    } else if flags.strafe_right {
        delta += displacement * side;
    } else if flags.strafe_forward {
        if pos.y >= CHARGE_CEILING_Y {
            flags.strafe_forward = false;
        } else {
            delta += displacement * front;
        }
    }

    // The dive bottoms out at the charge floor and turns into a climb.
    if flags.charging && pos.y <= CHARGE_FLOOR_Y {
        flags.strafe_forward = true;
        flags.charging = false;
    }
    if !flags.charging {
        flags.strafe_back = false;
    }

    (flags, delta)
}

/// Pick the bomber's speed for this tick. It crawls while still above
/// the world, and randomly drops to a crawl in play.
pub fn bomber_speed<R: Rng>(pos_y: f32, rng: &mut R) -> f32 {
    if pos_y > WORLD_HEIGHT {
        BOMBER_CRAWL_SPEED
    } else if rng.gen_range(0..20) < BOMBER_CRAWL_ROLL {
        BOMBER_CRAWL_SPEED
    } else {
        BOMBER_SPEED
    }
}

/// Pick the gambler's speed for this tick: an occasional sprint burst.
pub fn gambler_speed<R: Rng>(rng: &mut R) -> f32 {
    if rng.gen_range(0..500) < GAMBLER_SPRINT_ROLL {
        GAMBLER_SPRINT_SPEED
    } else {
        GAMBLER_SPEED
    }
}

/// Strafe direction a dodge resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strafe {
    Left,
    Right,
}

/// Input to the point-blank bullet dodge check.
pub struct DodgeContext {
    pub kind: BossKind,
    pub pos: Vec2,
    pub half_width: f32,
    pub flags: MotionFlags,
    pub forcefield_up: bool,
    pub at_world_edge: bool,
    pub bullet_pos: Vec2,
}

/// Whether the boss sidesteps a player bullet this tick, and which
/// way. Only the bomber and the gambler dodge; a raised forcefield or
/// a vertical move suppresses it.
pub fn evaluate_dodge<R: Rng>(ctx: &DodgeContext, rng: &mut R) -> Option<Strafe> {
    if ctx.forcefield_up {
        return None;
    }
    let range = ctx.bullet_pos - ctx.pos;
    let point_blank = range.y.abs() < DODGE_RECT_DY && range.x.abs() < DODGE_RECT_DX;

    let reaction = rng.gen_range(0..100);
    let dodges = match ctx.kind {
        BossKind::Gambler => reaction < GAMBLER_DODGE_PCT,
        BossKind::Bomber => reaction < BOMBER_DODGE_PCT,
        BossKind::Pyro => false,
    };
    if !(point_blank && dodges) || ctx.flags.strafe_back || ctx.flags.strafe_forward {
        return None;
    }

    if ctx.at_world_edge {
        // Pinned against an edge: dodge back toward the interior.
        if ctx.pos.x - ctx.half_width < 0.0 && !ctx.flags.strafe_left {
            return Some(Strafe::Right);
        }
        if ctx.pos.x + ctx.half_width > WORLD_WIDTH && !ctx.flags.strafe_right {
            return Some(Strafe::Left);
        }
        return None;
    }

    if ctx.bullet_pos.x < ctx.pos.x && !ctx.flags.strafe_left {
        Some(Strafe::Right)
    } else if ctx.bullet_pos.x > ctx.pos.x && !ctx.flags.strafe_right {
        Some(Strafe::Left)
    } else if ctx.pos.x <= WORLD_WIDTH / 2.0 && !ctx.flags.strafe_left {
        Some(Strafe::Right)
    } else {
        Some(Strafe::Left)
    }
}
