//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- World ---

/// World width in units. Origin is the bottom-left corner.
pub const WORLD_WIDTH: f32 = 1024.0;

/// World height in units.
pub const WORLD_HEIGHT: f32 = 1024.0;

/// Player ship spawn position.
pub const PLAYER_SPAWN: (f32, f32) = (512.0, 78.0);

// --- Player ---

/// Shared player health pool at the start of a level.
pub const PLAYER_START_HEALTH: i32 = 3;

/// Seconds of invincibility after a successful hit on the player pool.
pub const PLAYER_INVINCIBILITY_SECS: f64 = 3.0;

/// Lateral/back strafe speed (units per second).
pub const STRAFE_SPEED: f32 = 300.0;

/// Vertical thrust speed along the view axis.
pub const PLAYER_THRUST_SPEED: f32 = 250.0;

/// Player bullet muzzle speed.
pub const PLAYER_BULLET_SPEED: f32 = 500.0;

/// Magnitude of the random lateral deflection on player bullets.
pub const PLAYER_BULLET_DEFLECTION: f32 = 0.01;

// --- Scoring ---

/// Score awarded when an enemy's health reaches zero.
pub const SCORE_PER_KILL: i32 = 100;

/// Score awarded for absorbing a same-color bullet.
pub const SCORE_PER_ABSORB: i32 = 10;

// --- Ordinary enemies ---

pub const LIGHT_ENEMY_SPEED: f32 = 100.0;
pub const LIGHT_ENEMY_HEALTH: i32 = 3;
pub const LIGHT_ENEMY_FIRE_COOLDOWN: f64 = 0.9;

pub const HEAVY_ENEMY_SPEED: f32 = 50.0;
pub const HEAVY_ENEMY_HEALTH: i32 = 6;
pub const HEAVY_ENEMY_FIRE_COOLDOWN: f64 = 2.0;

pub const LINE_SPEED: f32 = 50.0;

/// Distance from the player within which ordinary enemies open fire.
pub const ENEMY_AGGRO_RADIUS: f32 = 800.0;

/// Downward bias mixed into enemy bullet aim.
pub const ENEMY_BULLET_DROP: f32 = -700.0;

/// Damping factor applied to the aimed enemy bullet velocity.
pub const ENEMY_BULLET_DAMP: f32 = 0.25;

/// Half-height of the vertical band in which a line hazard damages
/// the opposite-color player every tick.
pub const LINE_HIT_BAND: f32 = 15.0;

// --- Paths ---

/// Path 1 stop line.
pub const PATH_STOP_Y: f32 = 512.0;

/// Lateral-shift band used by path 2.
pub const PATH_BAND_Y: f32 = 500.0;

/// Threshold at which paths 5/6 switch from descent to lateral drift.
pub const PATH_SHIFT_Y: f32 = 400.0;

// --- Bosses, shared ---

/// Boss decision aggro radius (bomber and pyro).
pub const BOSS_AGGRO_RADIUS: f32 = 800.0;

/// Patrol strafe cycle bounds: back until y at most this...
pub const PATROL_FLOOR_Y: f32 = 600.0;

/// ...then left until x at most this...
pub const PATROL_LEFT_X: f32 = 100.0;

/// ...then right until x at least this.
pub const PATROL_RIGHT_X: f32 = 800.0;

/// Fixed boss respawn row used by the world-edge relocation.
pub const BOSS_RESPAWN_Y: f32 = 550.0;

/// Spawn position for the bomber and pyro bosses (above the world).
pub const BOSS_SPAWN_HIGH: (f32, f32) = (512.0, 1100.0);

/// Spawn position for the gambler (already on screen).
pub const BOSS_SPAWN_MID: (f32, f32) = (512.0, 600.0);

/// Levels on which a boss encounter happens.
pub const PYRO_LEVEL: u32 = 3;
pub const BOMBER_LEVEL: u32 = 6;
pub const GAMBLER_LEVEL: u32 = 9;

// --- Bomber ---

pub const BOMBER_HEALTH: i32 = 10;
pub const BOMBER_SPEED: f32 = 400.0;
pub const BOMBER_CRAWL_SPEED: f32 = 50.0;
/// Per-tick chance (out of 20) that the bomber drops to crawl speed.
pub const BOMBER_CRAWL_ROLL: u32 = 3;
pub const BOMBER_DECISION_COOLDOWN: f64 = 0.5;
/// Percent chance a bomber decision is a bomb drop (else a triple burst).
pub const BOMBER_BOMB_PCT: u32 = 25;
/// Aggro x-corridor half-width for the bomber.
pub const BOMBER_AGGRO_CORRIDOR: f32 = 100.0;
/// Lateral velocity offsets cycled across the bullets of a burst.
pub const BOMBER_BURST_OFFSETS: [f32; 3] = [0.0, 50.0, -50.0];
/// Percent chance a bomber dodges a point-blank player bullet.
pub const BOMBER_DODGE_PCT: u32 = 25;

// --- Pyro ---

pub const PYRO_HEALTH: i32 = 24;
pub const PYRO_SPEED: f32 = 80.0;
pub const PYRO_DECISION_COOLDOWN: f64 = 1.3;
/// Percent chance a pyro decision is a fireball (else a firetrap).
pub const PYRO_FIREBALL_PCT: u32 = 70;
/// Downward bias mixed into fireball aim.
pub const FIREBALL_DROP: f32 = -220.0;
/// Damping factor applied to the aimed fireball velocity.
pub const FIREBALL_DAMP: f32 = 0.5;
/// Horizontal offset of a summoned firetrap from the player.
pub const FIRETRAP_OFFSET: f32 = 250.0;
pub const FIRETRAP_LIFESPAN: f64 = 3.0;

// --- Gambler ---

pub const GAMBLER_HEALTH: i32 = 30;
pub const GAMBLER_SPEED: f32 = 600.0;
pub const GAMBLER_SPRINT_SPEED: f32 = 1500.0;
/// Chance (out of 500) that the gambler moves at sprint speed this tick.
pub const GAMBLER_SPRINT_ROLL: u32 = 105;
pub const GAMBLER_DECISION_COOLDOWN: f64 = 1.0;
pub const GAMBLER_AGGRO_RADIUS: f32 = 700.0;
/// Signed x-corridor bound for gambler aggro.
pub const GAMBLER_AGGRO_CORRIDOR: f32 = 180.0;
/// Percent chance a gambler decision deals cards (gated by CARD_COOLDOWN).
pub const GAMBLER_CARD_PCT: u32 = 23;
/// Percent threshold below which the decision is a two-bullet burst.
pub const GAMBLER_FIRE_PCT: u32 = 75;
pub const GAMBLER_CARD_COOLDOWN: f64 = 21.0;
pub const GAMBLER_FORCEFIELD_COOLDOWN: f64 = 5.0;
pub const GAMBLER_BLACKHOLE_COOLDOWN: f64 = 10.0;
pub const GAMBLER_COLOR_SWAP_COOLDOWN: f64 = 5.0;
/// Spawn-position x offsets cycled across the bullets of a burst.
pub const GAMBLER_BURST_OFFSETS: [f32; 2] = [-30.0, 30.0];
/// Percent chance the gambler dodges a point-blank player bullet.
pub const GAMBLER_DODGE_PCT: u32 = 50;
/// Charge dives until y reaches this floor...
pub const CHARGE_FLOOR_Y: f32 = 200.0;
/// ...then retreats until y reaches this ceiling.
pub const CHARGE_CEILING_Y: f32 = 600.0;
/// Gambler x bounds beyond which it is teleported back inside.
pub const GAMBLER_MIN_X: f32 = 90.0;
pub const GAMBLER_MAX_X: f32 = 900.0;
/// Vertical reach of the dodge-trigger rectangle in front of a boss.
pub const DODGE_RECT_DY: f32 = 250.0;
/// Horizontal reach of the dodge-trigger rectangle.
pub const DODGE_RECT_DX: f32 = 100.0;

// --- Boss-spawned hazards ---

pub const FORCEFIELD_HEALTH: i32 = 10;
pub const CARD_HEALTH: i32 = 3;
/// Shared downward velocity of dealt cards.
pub const CARD_FALL_SPEED: f32 = -110.0;
/// Fixed x columns where the gambler deals its three cards.
pub const CARD_COLUMNS: [f32; 3] = [200.0, 500.0, 750.0];
/// y position where dealt cards appear.
pub const CARD_DEAL_Y: f32 = 1000.0;
pub const BOMB_FALL_SPEED: f32 = -200.0;
/// Altitude at which a falling bomb detonates.
pub const BOMB_TRIGGER_Y: f32 = 200.0;
pub const BLACKHOLE_LIFESPAN: f64 = 5.0;
/// Horizontal offset of a summoned blackhole/firetrap from the player.
pub const BLACKHOLE_OFFSET: f32 = 250.0;

// --- Effects ---

pub const BIG_EXPLOSION_LIFESPAN: f64 = 0.85;
pub const SMALL_EXPLOSION_LIFESPAN: f64 = 0.5;

// --- Relocation (world-edge collision response) ---

/// Random x band for relocated enemies: RELOCATE_X_MIN + rand(0..RELOCATE_X_SPAN).
pub const RELOCATE_X_MIN: f32 = 200.0;
pub const RELOCATE_X_SPAN: u32 = 700;
/// y for enemies relocated off the left/right edges.
pub const RELOCATE_SIDE_Y: f32 = 500.0;
/// y for enemies relocated off the bottom edge.
pub const RELOCATE_BOTTOM_Y: f32 = 750.0;

// --- Animation ---

/// Base interval between animation frames (seconds), before the
/// horizontal-speed scaling.
pub const FRAME_INTERVAL: f32 = 0.1;
