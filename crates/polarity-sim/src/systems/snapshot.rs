//! Frame snapshot assembly: the drawable state plus the tick's audio
//! and particle requests, drained from the store.

use polarity_core::components::{Animation, Body};
use polarity_core::state::{FrameSnapshot, SpriteFrame};
use polarity_core::types::SimTime;

use crate::store::EntityStore;

pub fn build(store: &mut EntityStore, time: SimTime) -> FrameSnapshot {
    let mut sprites = Vec::with_capacity(store.order().len());
    for &e in store.order() {
        let Some(archetype) = store.archetype_of(e) else {
            continue;
        };
        let Ok(body) = store.world().get::<&Body>(e) else {
            continue;
        };
        let frame = store
            .world()
            .get::<&Animation>(e)
            .map(|a| a.frame)
            .unwrap_or(0);
        sprites.push(SpriteFrame {
            archetype,
            pos: body.pos,
            orientation: body.orientation,
            frame,
        });
    }

    FrameSnapshot {
        tick: time.tick,
        elapsed_secs: time.elapsed_secs,
        score: store.score,
        player_health: store.player_health,
        enemy_count: store.enemy_count,
        boss_count: store.boss_count,
        level: store.level,
        boss_present: store.boss_present,
        level_cleared: store.level_cleared,
        sprites,
        audio: store.audio.drain(),
        particles: std::mem::take(&mut store.particles),
    }
}
