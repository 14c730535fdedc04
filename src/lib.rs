//! Hot Typing - a typing action arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, typing, effects)
//! - `game`: State machine and frame loop driving the simulation
//! - `words`: Difficulty-tiered word lists
//! - `snapshot`: Render/sound-facing view of a session
//! - `settings`: Word list locations and loop tuning

pub mod game;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod words;

pub use game::{Direction, Game, GameInput};
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use words::{FileWordSource, StaticWordSource, WordBank, WordSource};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz, matching the movement speeds below)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Simulation ticks per second
    pub const TICK_RATE: f32 = 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player and enemy share one body size
    pub const ENTITY_RADIUS: f32 = 15.0;
    /// Player movement per tick along one axis
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Enemy movement per tick along its heading
    pub const ENEMY_SPEED: f32 = 3.0;
    /// Diagonal input scale so diagonal speed equals axial speed (1/sqrt(2))
    pub const DIAGONAL_SCALE: f32 = std::f32::consts::FRAC_1_SQRT_2;
    /// Minimum distance between a freshly spawned enemy and the player
    pub const ENEMY_SPAWN_CLEARANCE: f32 = 200.0;

    /// Player health at session start
    pub const STARTING_HEALTH: u8 = 3;
    /// Seconds after a hit during which collisions are ignored
    pub const INVINCIBILITY_SECS: f64 = 3.0;
    /// Seconds between an enemy defeat and its replacement
    pub const RESPAWN_DELAY_SECS: f64 = 3.0;

    /// Correct words required to clear the game
    pub const TARGET_WORDS: u32 = 15;
    /// Correct words at which medium words start
    pub const MEDIUM_TIER_AT: u32 = 5;
    /// Correct words at which long words start
    pub const LONG_TIER_AT: u32 = 10;

    /// Death effect lifetime (seconds)
    pub const DEATH_EFFECT_SECS: f32 = 3.0;
    /// Downward drift of a death effect over its lifetime (pixels)
    pub const DEATH_EFFECT_DRIFT: f32 = 30.0;
    /// Particles per death effect
    pub const DEATH_PARTICLES: usize = 20;
    /// Particle speed range (pixels per tick)
    pub const PARTICLE_SPEED_MIN: f32 = 1.0;
    pub const PARTICLE_SPEED_MAX: f32 = 3.0;
    /// Particle size range (pixels)
    pub const PARTICLE_SIZE_MIN: f32 = 1.0;
    pub const PARTICLE_SIZE_MAX: f32 = 3.0;
    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE_TICKS: f32 = 100.0;
}

use glam::Vec2;

/// Centre of the playfield
#[inline]
pub fn playfield_center() -> Vec2 {
    Vec2::new(consts::PLAYFIELD_WIDTH / 2.0, consts::PLAYFIELD_HEIGHT / 2.0)
}

/// Convert an angle and length to a vector
#[inline]
pub fn from_polar(length: f32, theta: f32) -> Vec2 {
    Vec2::new(length * theta.cos(), length * theta.sin())
}
