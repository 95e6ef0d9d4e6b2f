//! Threader - a side-scrolling tunnel arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, world generation, collisions, stages)
//! - `game`: Top-level controller (screens, input, frame loop)
//! - `snapshot`: Frame-stable view of the game handed to renderers
//! - `clock`: Monotonic clock sources and frame timing
//! - `autopilot`: Built-in steering for headless runs
//! - `config`: Runtime options for the native runner

pub mod autopilot;
pub mod clock;
pub mod config;
pub mod game;
pub mod highscores;
pub mod sim;
pub mod snapshot;

pub use clock::{Clock, FrameTimer, ManualClock, SystemClock};
pub use config::{ConfigError, GameConfig};
pub use game::{FrameOutcome, Game, InputEvent, InputSource, Renderer, Screen, run};
pub use highscores::HighScores;
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    pub const SIM_DT: f64 = 1.0 / TICKS_PER_SECOND as f64;

    /// Viewport dimensions (y grows downward)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player defaults - x never changes
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_RADIUS: f32 = 5.0;
    pub const PLAYER_INITIAL_Y_SPEED: f32 = 2.0;
    /// Vertical speed change per tick
    pub const PLAYER_ACCELERATION: f32 = 0.1;
    pub const PLAYER_MAX_Y_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HP: u32 = 100;

    /// Tunnel walls
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_DAMAGE: u32 = 1;
    /// Tunnel center drift per tick
    pub const TUNNEL_Y_CHANGE_SPEED: f32 = 0.5;
    /// Tunnel center reverses drift this close to the top/bottom edge
    pub const TUNNEL_EDGE_MARGIN: f32 = 150.0;

    /// Per-segment spawn chances
    pub const ITEM_SPAWN_CHANCE: f32 = 0.01;
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.015;

    /// Item effects
    pub const HEAL_AMOUNT: u32 = 25;
    pub const SHIELD_DURATION: f64 = 5.0;
    pub const SPEED_DOWN_DURATION: f64 = 8.0;
    pub const SPEED_DOWN_FACTOR: f32 = 0.5;
    pub const SCORE_MULT_DURATION: f64 = 7.0;
    pub const SCORE_MULTIPLIER: f32 = 2.0;
    pub const ITEM_SIZE: f32 = 10.0;
    pub const SCORE_ITEM_SIZE: f32 = 12.0;

    /// Regular enemies
    pub const ENEMY_DAMAGE: u32 = 10;
    pub const STATIC_ENEMY_SIZE: f32 = 15.0;
    pub const PATROL_ENEMY_WIDTH: f32 = 20.0;
    pub const PATROL_ENEMY_HEIGHT: f32 = 10.0;
    pub const PATROL_ENEMY_SPEED: f32 = 2.0;

    /// Boss battle
    pub const BOSS_BATTLE_DURATION: f64 = 20.0;
    pub const BOSS_DAMAGE: u32 = 25;
    pub const BOSS_WIDTH: f32 = 80.0;
    pub const BOSS_HEIGHT: f32 = 120.0;
    /// Boss spawns centered this far from the right edge
    pub const BOSS_SPAWN_OFFSET: f32 = 50.0;
    /// Boss left edge never drifts further left than this from the right edge
    pub const BOSS_MIN_OFFSET: f32 = 90.0;

    /// Boss projectiles
    pub const PROJECTILE_DAMAGE: u32 = 15;
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
}
