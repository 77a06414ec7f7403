//! Entity store: the hecs world plus the bookkeeping around it.
//!
//! The store owns the draw-order list, the session counters (score,
//! enemy and boss counts, the shared player health pool), the weak
//! current-boss handle, and the effect buffers the systems write
//! into. All spawning and damage flows through here so the counters
//! can never drift from the world contents.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use polarity_core::archetype::{Archetype, BossKind, Polarity};
use polarity_core::components::{
    Animation, Body, BossCore, CardFace, Cooldowns, EntityHandle, Expiry, FlightPath,
    MotionFlags, PathId, PlayerTag, Vitality,
};
use polarity_core::constants::*;
use polarity_core::events::{ParticleDesc, ParticleSprite, Sound};
use polarity_core::sprites::SpriteTable;

use crate::audio::AudioQueue;

pub struct EntityStore {
    world: World,
    /// Insertion order doubles as draw order.
    order: Vec<Entity>,
    pub sprites: SpriteTable,

    pub score: i32,
    pub enemy_count: i32,
    pub boss_count: i32,
    pub player_health: i32,
    pub level: u32,
    pub boss_present: bool,
    pub level_cleared: bool,

    pub current_boss: Option<Entity>,
    pub player: Option<Entity>,
    last_player_hit: f64,

    pub audio: AudioQueue,
    pub particles: Vec<ParticleDesc>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::with_sprites(SpriteTable::new())
    }

    pub fn with_sprites(sprites: SpriteTable) -> Self {
        Self {
            world: World::new(),
            order: Vec::new(),
            sprites,
            score: 0,
            enemy_count: 0,
            boss_count: 0,
            player_health: PLAYER_START_HEALTH,
            level: 0,
            boss_present: false,
            level_cleared: false,
            current_boss: None,
            player: None,
            last_player_hit: f64::NEG_INFINITY,
            audio: AudioQueue::new(),
            particles: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Live entities in draw order.
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    /// Despawn everything. Counters are reset by level setup, not here.
    pub fn clear(&mut self) {
        self.world.clear();
        self.order.clear();
        self.current_boss = None;
        self.player = None;
    }

    pub fn archetype_of(&self, e: Entity) -> Option<Archetype> {
        self.world.get::<&Archetype>(e).ok().map(|a| *a)
    }

    fn radius_of(&self, archetype: Archetype) -> f32 {
        self.sprites.extent(archetype).radius()
    }

    fn push(&mut self, e: Entity) -> Entity {
        self.order.push(e);
        e
    }

    /// Spawn a plain entity: projectiles, hazards, effects.
    pub fn create(&mut self, archetype: Archetype, pos: Vec2, now: f64) -> Entity {
        let body = Body::new(pos, self.radius_of(archetype));
        let health = match archetype {
            Archetype::Forcefield => FORCEFIELD_HEALTH,
            _ => 1,
        };
        let anim = Animation::new(now);

        let e = match archetype {
            Archetype::Firetrap => self.world.spawn((
                archetype,
                body,
                Vitality::new(health),
                anim,
                Expiry::new(now, FIRETRAP_LIFESPAN),
            )),
            Archetype::Blackhole => self.world.spawn((
                archetype,
                body,
                Vitality::new(health),
                anim,
                Expiry::new(now, BLACKHOLE_LIFESPAN),
            )),
            Archetype::BigExplosion => self.world.spawn((
                archetype,
                body,
                Vitality::new(health),
                anim,
                Expiry::new(now, BIG_EXPLOSION_LIFESPAN),
            )),
            Archetype::SmallExplosion => self.world.spawn((
                archetype,
                body,
                Vitality::new(health),
                anim,
                Expiry::new(now, SMALL_EXPLOSION_LIFESPAN),
            )),
            _ => self
                .world
                .spawn((archetype, body, Vitality::new(health), anim)),
        };
        self.push(e)
    }

    /// Spawn a face-down card. The face it reveals when shot is fixed
    /// at creation.
    pub fn create_card(&mut self, pos: Vec2, face: CardFace, now: f64) -> Entity {
        let mut body = Body::new(pos, self.radius_of(Archetype::Card));
        body.vel = Vec2::new(0.0, CARD_FALL_SPEED);
        let e = self.world.spawn((
            Archetype::Card,
            body,
            Vitality::new(CARD_HEALTH),
            Animation::new(now),
            face,
        ));
        self.push(e)
    }

    /// Spawn an ordinary enemy or line hazard on a scripted path.
    /// Lines do not count toward the enemy total.
    pub fn create_enemy(
        &mut self,
        pos: Vec2,
        archetype: Archetype,
        path: PathId,
        now: f64,
    ) -> Entity {
        let (speed, health) = match archetype {
            Archetype::RedLightEnemy | Archetype::BlueLightEnemy => {
                (LIGHT_ENEMY_SPEED, LIGHT_ENEMY_HEALTH)
            }
            Archetype::RedHeavyEnemy | Archetype::BlueHeavyEnemy => {
                (HEAVY_ENEMY_SPEED, HEAVY_ENEMY_HEALTH)
            }
            _ => (LINE_SPEED, 1),
        };
        let mut body = Body::new(pos, self.radius_of(archetype));
        body.speed = speed;

        let e = self.world.spawn((
            archetype,
            body,
            Vitality::new(health),
            FlightPath::new(path),
            Cooldowns::primed(now),
            Animation::new(now),
        ));
        if archetype.counts_toward_enemy_total() {
            self.enemy_count += 1;
        }
        self.push(e)
    }

    /// Spawn a boss and register it as the current boss.
    pub fn create_boss(&mut self, kind: BossKind, pos: Vec2, now: f64) -> Entity {
        let (archetype, health, speed) = match kind {
            BossKind::Bomber => (Archetype::Bomber, BOMBER_HEALTH, BOMBER_SPEED),
            BossKind::Pyro => (Archetype::Pyro, PYRO_HEALTH, PYRO_SPEED),
            BossKind::Gambler => (Archetype::Gambler, GAMBLER_HEALTH, GAMBLER_SPEED),
        };
        let mut body = Body::new(pos, self.radius_of(archetype));
        body.speed = speed;

        // The patrol bosses open by strafing down into the arena.
        let flags = MotionFlags {
            strafe_back: kind != BossKind::Gambler,
            ..Default::default()
        };

        let e = self.world.spawn((
            archetype,
            body,
            Vitality::new(health),
            flags,
            BossCore::default(),
            Cooldowns::primed(now),
            Animation::new(now),
        ));
        self.current_boss = Some(e);
        self.push(e)
    }

    /// Spawn the player ship.
    pub fn spawn_player(&mut self, polarity: Polarity, pos: Vec2, now: f64) -> Entity {
        let archetype = Archetype::ship_of(polarity);
        let body = Body::new(pos, self.radius_of(archetype));
        let e = self.world.spawn((
            archetype,
            body,
            Vitality::new(1),
            MotionFlags::default(),
            Animation::new(now),
            PlayerTag,
        ));
        self.player = Some(e);
        self.push(e)
    }

    pub fn player_polarity(&self) -> Polarity {
        self.player
            .and_then(|p| self.archetype_of(p))
            .and_then(|a| a.polarity())
            .unwrap_or(Polarity::Blue)
    }

    pub fn player_pos(&self) -> Vec2 {
        self.player
            .and_then(|p| self.world.get::<&Body>(p).ok().map(|b| b.pos))
            .unwrap_or(Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1))
    }

    /// Flip the player ship's polarity.
    pub fn swap_player_color(&mut self) {
        let Some(p) = self.player else { return };
        if let Ok(mut archetype) = self.world.get::<&mut Archetype>(p) {
            if let Some(polarity) = archetype.polarity() {
                *archetype = Archetype::ship_of(polarity.flipped());
            }
        }
    }

    /// Fire the player's gun: bullet from the nose with a small random
    /// lateral deflection, plus the muzzle spark.
    pub fn player_fires<R: Rng>(&mut self, now: f64, rng: &mut R) {
        let Some(p) = self.player else { return };
        let Ok(body) = self.world.get::<&Body>(p).map(|b| *b) else {
            return;
        };
        let archetype = match self.archetype_of(p) {
            Some(a) => a,
            None => return,
        };

        self.audio.play(Sound::PlayerGun);

        let view = body.view();
        let half_width = self.sprites.extent(archetype).width / 2.0;
        let pos = body.pos + half_width * view;

        let norm = polarity_core::types::side_vector(view);
        let m = 2.0 * rng.gen::<f32>() - 1.0;
        let deflection = PLAYER_BULLET_DEFLECTION * m * norm;
        let vel = body.vel + PLAYER_BULLET_SPEED * (view + deflection);

        let bullet = self.create(Archetype::PlayerBullet, pos, now);
        if let Ok(mut b) = self.world.get::<&mut Body>(bullet) {
            b.vel = vel;
        }

        self.particles.push(ParticleDesc {
            sprite: ParticleSprite::Spark,
            pos,
            vel: body.speed * view,
            lifespan: 0.25,
            max_scale: 0.5,
            scale_in_frac: 0.4,
            scale_out_frac: 0.0,
            fade_in_frac: 0.0,
            fade_out_frac: 0.5,
        });
    }

    /// Damage flash and report at an entity's nose.
    fn hit_feedback(&mut self, pos: Vec2, view: Vec2, half_width: f32) {
        self.audio.play(Sound::Damage);
        self.particles.push(ParticleDesc {
            sprite: ParticleSprite::DamageFlash,
            pos: pos - half_width * view,
            vel: Vec2::ZERO,
            lifespan: 0.6,
            max_scale: 0.5,
            scale_in_frac: 0.4,
            scale_out_frac: 0.0,
            fade_in_frac: 0.0,
            fade_out_frac: 0.5,
        });
    }

    /// Damage the shared player pool.
    ///
    /// Throttled by the invincibility window and suppressed entirely
    /// once the level is cleared. The pool reaching zero marks the
    /// ship dead.
    pub fn hit_player(&mut self, now: f64) {
        if now - self.last_player_hit >= PLAYER_INVINCIBILITY_SECS && !self.level_cleared {
            self.last_player_hit = now;
            self.player_health -= 1;

            if let Some(p) = self.player {
                if let Ok(body) = self.world.get::<&Body>(p).map(|b| *b) {
                    let half_width = self
                        .archetype_of(p)
                        .map(|a| self.sprites.extent(a).width / 2.0)
                        .unwrap_or(0.0);
                    self.hit_feedback(body.pos, body.view(), half_width);
                }
            }
            self.audio.play(Sound::PlayerHit);
        }

        if self.player_health <= 0 {
            if let Some(p) = self.player {
                let pos = self.player_pos();
                self.audio.play(Sound::Death);
                self.create(Archetype::SmallExplosion, pos, now);
                self.kill(p);
            }
        }
    }

    /// Heal the shared player pool by one, with the heart flourish at
    /// the healer's position.
    pub fn heal_player(&mut self, at: Vec2) {
        self.player_health += 1;
        self.particles.push(ParticleDesc {
            sprite: ParticleSprite::Heart,
            pos: at,
            vel: Vec2::ZERO,
            lifespan: 0.6,
            max_scale: 0.5,
            scale_in_frac: 0.4,
            scale_out_frac: 0.0,
            fade_in_frac: 0.0,
            fade_out_frac: 0.5,
        });
    }

    /// Damage an enemy, boss, forcefield, or other per-instance
    /// target. Unthrottled: every call decrements. Zero health scores
    /// a kill and marks the entity dead.
    pub fn damage_entity(&mut self, e: Entity, now: f64) {
        let Ok(body) = self.world.get::<&Body>(e).map(|b| *b) else {
            return;
        };
        let half_width = self
            .archetype_of(e)
            .map(|a| self.sprites.extent(a).width / 2.0)
            .unwrap_or(0.0);
        self.hit_feedback(body.pos, body.view(), half_width);

        let health = match self.world.get::<&mut Vitality>(e) {
            Ok(mut v) => {
                v.health -= 1;
                v.health
            }
            Err(_) => return,
        };

        if health <= 0 {
            self.score += SCORE_PER_KILL;
            self.kill(e);
            self.audio.play(Sound::Death);
            self.create(Archetype::SmallExplosion, body.pos, now);
        }
    }

    /// Mark an entity dead for the end-of-tick cull. Killing the
    /// gambler takes its forcefield down with it, so a dead boss never
    /// leaves a live shield behind.
    pub fn kill(&mut self, e: Entity) {
        let archetype = self.archetype_of(e);
        if let Ok(mut v) = self.world.get::<&mut Vitality>(e) {
            v.dead = true;
        }

        if archetype == Some(Archetype::Gambler) {
            let forcefield = self
                .world
                .get::<&BossCore>(e)
                .ok()
                .and_then(|core| core.forcefield)
                .and_then(resolve);
            if let Some(ff) = forcefield {
                if let Ok(mut v) = self.world.get::<&mut Vitality>(ff) {
                    v.dead = true;
                }
            }
        }
    }

    /// Whether an entity has drifted out of the play area. The top is
    /// open so enemies can enter from above.
    pub fn at_world_edge(&self, e: Entity) -> bool {
        let (Some(archetype), Ok(body)) = (self.archetype_of(e), self.world.get::<&Body>(e))
        else {
            return false;
        };
        let extent = self.sprites.extent(archetype);
        body.pos.x + extent.width < 0.0
            || body.pos.x - extent.width > WORLD_WIDTH
            || body.pos.y + extent.height < 0.0
    }

    /// Edge response: bosses teleport to the respawn point with a
    /// large portal, colored enemies re-enter at a random column with
    /// a small portal, and everything else rolls back a tick.
    pub fn relocate<R: Rng>(&mut self, e: Entity, rng: &mut R) {
        let Some(archetype) = self.archetype_of(e) else {
            return;
        };

        if archetype.is_boss() {
            let pos = Vec2::new(WORLD_WIDTH / 2.0, BOSS_RESPAWN_Y);
            self.teleport_boss(e, pos);
        } else if archetype.is_ordinary_enemy() {
            let x = rng.gen_range(0..RELOCATE_X_SPAN) as f32 + RELOCATE_X_MIN;
            let y = match self.world.get::<&Body>(e) {
                Ok(body) if body.pos.y + self.sprites.extent(archetype).height < 0.0 => {
                    RELOCATE_BOTTOM_Y
                }
                Ok(_) => RELOCATE_SIDE_Y,
                Err(_) => return,
            };
            let pos = Vec2::new(x, y);
            if let Ok(mut body) = self.world.get::<&mut Body>(e) {
                body.pos = pos;
                body.old_pos = pos;
            }
            self.audio.play(Sound::Respawn);
            self.particles.push(portal(ParticleSprite::SmallPortal, pos));
        } else if let Ok(mut body) = self.world.get::<&mut Body>(e) {
            body.pos = body.old_pos;
        }
    }

    /// Move a boss (and its forcefield) to a fixed point, with the
    /// large portal effect.
    pub fn teleport_boss(&mut self, e: Entity, pos: Vec2) {
        if let Ok(mut body) = self.world.get::<&mut Body>(e) {
            body.pos = pos;
            body.old_pos = pos;
        }
        let forcefield = self
            .world
            .get::<&BossCore>(e)
            .ok()
            .and_then(|core| core.forcefield)
            .and_then(resolve);
        if let Some(ff) = forcefield {
            if let Ok(mut body) = self.world.get::<&mut Body>(ff) {
                body.pos = pos;
                body.old_pos = pos;
            }
        }
        self.audio.play(Sound::Respawn);
        self.particles.push(portal(ParticleSprite::LargePortal, pos));
    }

    /// Remove an entity from the world and the draw order.
    pub fn despawn(&mut self, e: Entity) {
        let _ = self.world.despawn(e);
        self.order.retain(|&o| o != e);
        if self.player == Some(e) {
            self.player = None;
        }
        if self.current_boss == Some(e) {
            self.current_boss = None;
        }
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a stored weak handle back to a hecs entity.
pub fn resolve(handle: EntityHandle) -> Option<Entity> {
    Entity::from_bits(handle.0)
}

/// Pack a hecs entity into a component-storable weak handle.
pub fn handle(e: Entity) -> EntityHandle {
    EntityHandle(e.to_bits().get())
}

fn portal(sprite: ParticleSprite, pos: Vec2) -> ParticleDesc {
    ParticleDesc {
        sprite,
        pos,
        vel: Vec2::ZERO,
        lifespan: 0.8,
        max_scale: 0.8,
        scale_in_frac: 0.2,
        scale_out_frac: 0.2,
        fade_in_frac: 0.8,
        fade_out_frac: 0.8,
    }
}
