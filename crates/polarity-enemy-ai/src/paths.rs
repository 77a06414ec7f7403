//! Scripted enemy flight paths.
//!
//! Pure functions that compute per-tick displacement for the ten
//! enemy paths. A path never despawns an entity or touches the world;
//! it reports the new position plus any side effect the sim must
//! apply (a speed halt, a direction latch, a line-hazard hit).

use glam::Vec2;

use polarity_core::archetype::Polarity;
use polarity_core::components::PathId;
use polarity_core::constants::*;
use polarity_core::types::{side_vector, view_vector};

/// Input to a single path step.
pub struct PathContext {
    pub id: PathId,
    /// Direction latch used by the oscillating path.
    pub ascending: bool,
    pub pos: Vec2,
    pub orientation: f32,
    pub speed: f32,
    pub dt: f32,
    /// Polarity of the enemy, if it carries one. Only the line
    /// hazards consult this.
    pub polarity: Option<Polarity>,
    pub player_pos: Vec2,
    pub player_polarity: Polarity,
}

/// Output of a single path step.
pub struct PathStep {
    pub pos: Vec2,
    /// Updated speed. Only the stopping path changes it.
    pub speed: f32,
    /// Updated direction latch.
    pub ascending: bool,
    /// The line hazard overlapped the opposite-color player's row.
    pub hits_player: bool,
}

/// Advance one enemy along its path by one tick.
pub fn step(ctx: &PathContext) -> PathStep {
    let front = view_vector(ctx.orientation);
    let side = side_vector(front);
    let d = ctx.speed * ctx.dt;

    let mut out = PathStep {
        pos: ctx.pos,
        speed: ctx.speed,
        ascending: ctx.ascending,
        hits_player: false,
    };

    match ctx.id {
        // Descend and park on the stop line.
        PathId::DescendStop => {
            if ctx.pos.y <= PATH_STOP_Y {
                out.speed = 0.0;
            }
            out.pos -= out.speed * ctx.dt * front;
        }

        // Descend on the right, then sweep left; bounce off the left
        // margin.
        PathId::DescendBandShift => {
            if ctx.pos.y <= PATH_BAND_Y || ctx.pos.x >= 750.0 {
                out.pos -= side * d;
            } else if ctx.pos.x <= 100.0 {
                out.pos += side * d;
            } else {
                out.pos -= d * front;
            }
        }

        // Straight down while above the world, then diagonal.
        PathId::DiagonalLeft => {
            out.pos.y -= d;
            if ctx.pos.y < WORLD_HEIGHT {
                out.pos.x -= d;
            }
        }
        PathId::DiagonalRight => {
            out.pos.y -= d;
            if ctx.pos.y < WORLD_HEIGHT {
                out.pos.x += d;
            }
        }

        // Descend to the shift line, then drift sideways only.
        PathId::DescendShiftRight => {
            if ctx.pos.y >= PATH_SHIFT_Y {
                out.pos.y -= d;
            } else {
                out.pos.x += d;
            }
        }
        PathId::DescendShiftLeft => {
            if ctx.pos.y >= PATH_SHIFT_Y {
                out.pos.y -= d;
            } else {
                out.pos.x -= d;
            }
        }

        // Alternating diagonal bands, doubled lateral speed.
        PathId::ZigZag => {
            out.pos.y -= d;
            if ctx.pos.y >= WORLD_HEIGHT {
                // still entering from above, straight down
            } else if ctx.pos.y >= 824.0 {
                out.pos.x += d * 2.0;
            } else if ctx.pos.y >= 624.0 {
                out.pos.x -= d * 2.0;
            } else if ctx.pos.y >= 424.0 {
                out.pos.x += d * 2.0;
            } else if ctx.pos.y >= 224.0 {
                out.pos.x -= d * 2.0;
            }
        }

        // Line hazard bouncing between the world top and bottom at
        // triple speed.
        PathId::Oscillate => {
            if ctx.ascending {
                out.pos.y += d * 3.0;
            } else {
                out.pos.y -= d * 3.0;
            }
            if out.pos.y >= WORLD_HEIGHT {
                out.ascending = false;
            }
            if out.pos.y <= 0.0 {
                out.ascending = true;
            }
            out.hits_player = line_crosses_player(ctx, out.pos.y);
        }

        // Line hazard dropping at six times its speed.
        PathId::RapidDescent => {
            out.pos.y -= d * 6.0;
            out.hits_player = line_crosses_player(ctx, out.pos.y);
        }

        PathId::Descend => {
            out.pos.y -= d;
        }
    }

    out
}

/// A line hazard damages the player when the player is the opposite
/// color and sits within the hit band around the line's row.
fn line_crosses_player(ctx: &PathContext, line_y: f32) -> bool {
    let opposite = match ctx.polarity {
        Some(p) => p != ctx.player_polarity,
        None => false,
    };
    opposite
        && ctx.player_pos.y > line_y - LINE_HIT_BAND
        && ctx.player_pos.y < line_y + LINE_HIT_BAND
}
