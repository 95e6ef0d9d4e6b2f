//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps passed in by the caller, never read from the OS
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod progression;
pub mod rect;
pub mod stage;
pub mod state;
pub mod tick;
pub mod world_gen;

pub use entity::{
    Boss, Enemy, EnemyKind, Entity, EntityId, EntityKind, ItemKind, Player, Projectile, Shot,
    StatusEffects,
};
pub use rect::Rect;
pub use stage::{BossParams, BossTrigger, Stage, StageConfig};
pub use state::{DamageSource, GameEvent, GameState, Phase, Tunnel};
pub use tick::{TickInput, tick};
