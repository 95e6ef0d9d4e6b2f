//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! ambient global state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, ItemKind, Player};
use super::stage::Stage;
use crate::consts::*;

/// Stage/boss progression phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Tunnel generation running for the current stage
    Normal,
    /// Boss fight in progress, started at this timestamp
    BossBattle { started_at: f64 },
    /// Player died
    GameOver,
}

/// Procedural tunnel cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Tunnel {
    /// Vertical center of the gap
    pub center_y: f32,
    /// Drift direction of the center (+1 down, -1 up)
    pub drift: f32,
    /// x up to which wall segments have been generated
    pub frontier: f32,
}

impl Default for Tunnel {
    fn default() -> Self {
        Self {
            center_y: VIEWPORT_HEIGHT / 2.0,
            drift: 1.0,
            frontier: 0.0,
        }
    }
}

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Obstacle,
    Enemy,
    Boss,
    Projectile,
}

/// Gameplay events recorded during a tick (cleared at the start of the next)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemCollected(ItemKind),
    /// Hit landed; `amount` is the hp actually lost
    Damaged { source: DamageSource, amount: u32 },
    /// Hit absorbed by the shield
    Blocked { source: DamageSource },
    BossBattleStarted { stage: Stage },
    BossBattleEnded { cleared: Stage, next: Stage },
    PlayerDied,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Timestamp of the current (or last) tick, seconds
    pub now: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: f64,
    pub stage: Stage,
    /// Horizontal world speed (px/tick)
    pub scroll_speed: f32,
    pub phase: Phase,
    pub player: Player,
    pub tunnel: Tunnel,
    /// Entity arena, sorted by id
    pub entities: Vec<Entity>,
    /// Handle of the active boss
    pub boss: Option<EntityId>,
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Fresh run: stage 1, score 0, full hp, empty arena
    pub fn new(seed: u64) -> Self {
        let stage = Stage::One;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now: 0.0,
            time_ticks: 0,
            score: 0.0,
            stage,
            scroll_speed: stage.config().scroll_speed,
            phase: Phase::Normal,
            player: Player::new(),
            tunnel: Tunnel::default(),
            entities: Vec::new(),
            boss: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate an id, build the entity and add it to the arena
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        let entity = build(id);
        debug_assert_eq!(entity.id, id);
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_obstacle())
    }

    pub fn items(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_item())
    }

    /// Enemies, boss included
    pub fn enemies(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_enemy())
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_projectile())
    }

    pub fn boss_entity(&self) -> Option<&Entity> {
        self.boss.and_then(|id| self.entity(id))
    }

    pub fn boss_battle_active(&self) -> bool {
        matches!(self.phase, Phase::BossBattle { .. })
    }

    /// Seconds left in the boss battle, if one is running
    pub fn boss_time_remaining(&self) -> Option<f64> {
        match self.phase {
            Phase::BossBattle { started_at } => {
                Some((BOSS_BATTLE_DURATION - (self.now - started_at)).max(0.0))
            }
            _ => None,
        }
    }

    /// Screen clear: every enemy except the active boss, and every projectile
    pub fn clear_enemies_and_projectiles(&mut self) {
        let boss = self.boss;
        self.entities.retain(|e| {
            let clearable = e.is_projectile() || (e.is_enemy() && Some(e.id) != boss);
            !clearable
        });
    }

    /// Ensure the arena is sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}
