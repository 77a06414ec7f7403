//! The simulation engine: owns the store, the clock, the RNG, and the
//! command queue, and runs the per-tick pipeline.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use polarity_core::archetype::Polarity;
use polarity_core::commands::{PlayerCommand, Thrust};
use polarity_core::components::{Body, MotionFlags};
use polarity_core::constants::*;
use polarity_core::sprites::SpriteTable;
use polarity_core::state::FrameSnapshot;
use polarity_core::types::SimTime;

use crate::store::EntityStore;
use crate::systems::{behavior, collision, cull, snapshot, spawner};

/// Engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed. Two engines with the same seed and the same command
    /// stream produce identical snapshots.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// A deterministic, headless game simulation.
///
/// Commands are queued at any time and drained at the start of the
/// next tick, so the pipeline always sees a consistent world.
pub struct GameEngine {
    store: EntityStore,
    time: SimTime,
    rng: ChaCha8Rng,
    commands: VecDeque<PlayerCommand>,
}

impl GameEngine {
    pub fn new(config: SimConfig) -> Self {
        Self::with_sprites(config, SpriteTable::new())
    }

    /// An engine over a substitute sprite table, for geometry tests.
    pub fn with_sprites(config: SimConfig, sprites: SpriteTable) -> Self {
        Self {
            store: EntityStore::with_sprites(sprites),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            commands: VecDeque::new(),
        }
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.commands.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.commands.extend(commands);
    }

    /// Run one simulation tick and return its snapshot.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.store.audio.begin_frame();
        let now = self.time.elapsed_secs;
        let dt = self.time.dt();

        while let Some(command) = self.commands.pop_front() {
            self.apply_command(command, now);
        }

        behavior::run(&mut self.store, now, dt, &mut self.rng);
        collision::run(&mut self.store, now);
        cull::run(&mut self.store, now);
        spawner::run(&mut self.store, now);

        if (1..=GAMBLER_LEVEL).contains(&self.store.level)
            && self.store.enemy_count == 0
            && self.store.boss_count == 0
        {
            self.store.level_cleared = true;
        }

        self.time.advance();
        snapshot::build(&mut self.store, self.time)
    }

    fn apply_command(&mut self, command: PlayerCommand, now: f64) {
        if let PlayerCommand::StartLevel { level } = command {
            self.start_level(level);
            return;
        }
        // A cleared level or a dead ship ignores everything but a
        // level start.
        if self.store.level_cleared || self.store.player_health <= 0 {
            return;
        }

        match command {
            PlayerCommand::Thrust { dir } => {
                let speed = match dir {
                    Thrust::Forward => PLAYER_THRUST_SPEED,
                    Thrust::Back => -PLAYER_THRUST_SPEED,
                    Thrust::Stop => 0.0,
                };
                if let Some(p) = self.store.player {
                    if let Ok(mut body) = self.store.world().get::<&mut Body>(p) {
                        body.speed = speed;
                    }
                }
            }
            PlayerCommand::StrafeLeft => self.set_player_flag(|f| f.strafe_left = true),
            PlayerCommand::StrafeRight => self.set_player_flag(|f| f.strafe_right = true),
            PlayerCommand::StrafeBack => self.set_player_flag(|f| f.strafe_back = true),
            PlayerCommand::Fire => self.store.player_fires(now, &mut self.rng),
            PlayerCommand::SwapColor => self.store.swap_player_color(),
            PlayerCommand::StartLevel { .. } => {}
        }
    }

    fn set_player_flag(&mut self, set: impl FnOnce(&mut MotionFlags)) {
        if let Some(p) = self.store.player {
            if let Ok(mut flags) = self.store.world().get::<&mut MotionFlags>(p) {
                set(&mut flags);
            }
        }
    }

    /// Reset the world for a level: fresh ship, full pool, and the
    /// boss ledger armed on boss levels.
    pub fn start_level(&mut self, level: u32) {
        let now = self.time.elapsed_secs;
        self.store.clear();
        self.store.level = level;
        self.store.level_cleared = false;
        self.store.player_health = PLAYER_START_HEALTH;
        self.store.enemy_count = 0;
        self.store.boss_present = false;
        self.store.boss_count =
            if matches!(level, PYRO_LEVEL | BOMBER_LEVEL | GAMBLER_LEVEL) {
                1
            } else {
                0
            };
        self.store.spawn_player(
            Polarity::Blue,
            glam::Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            now,
        );
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> i32 {
        self.store.score
    }

    pub fn player_health(&self) -> i32 {
        self.store.player_health
    }

    pub fn level_cleared(&self) -> bool {
        self.store.level_cleared
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }
}
