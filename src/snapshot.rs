//! Frame-stable view of the game handed to renderers
//!
//! Built between ticks from the controller's state. Renderers only ever see
//! this, never the live [`GameState`].

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::entity::time_remaining;
use crate::sim::{EnemyKind, Entity, EntityId, EntityKind, GameEvent, GameState, ItemKind, Stage};

/// What to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen")]
pub enum Snapshot {
    StartMenu { best: Option<u64> },
    Playing(PlayingView),
    GameOver(GameOverView),
}

/// HUD and world while a run is in progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayingView {
    pub tick: u64,
    /// Whole points, as displayed
    pub score: u64,
    pub stage: Stage,
    pub stage_label: &'static str,
    pub boss_time_remaining: Option<f64>,
    pub player: PlayerView,
    pub sprites: Vec<SpriteView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub center: Vec2,
    pub radius: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// Seconds left on each active status
    pub shield_remaining: Option<f64>,
    pub slow_remaining: Option<f64>,
    pub multiplier_remaining: Option<f64>,
}

/// One arena entity, in draw order (by id)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub id: EntityId,
    pub kind: SpriteKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Obstacle,
    Item(ItemKind),
    StaticEnemy,
    PatrolEnemy,
    Boss { color: [u8; 3] },
    Projectile,
}

/// Final screen of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverView {
    pub score: u64,
    pub stage: Stage,
    /// Leaderboard position of this run, if it placed
    pub rank: Option<usize>,
    pub best: Option<u64>,
}

impl PlayingView {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let effects = &player.effects;
        Self {
            tick: state.time_ticks,
            score: state.score as u64,
            stage: state.stage,
            stage_label: state.stage.label(),
            boss_time_remaining: state.boss_time_remaining(),
            player: PlayerView {
                center: player.center(),
                radius: PLAYER_RADIUS,
                hp: player.hp,
                max_hp: PLAYER_MAX_HP,
                shield_remaining: time_remaining(effects.shield_until, state.now),
                slow_remaining: time_remaining(effects.slow_until, state.now),
                multiplier_remaining: time_remaining(effects.multiplier_until, state.now),
            },
            sprites: state.entities.iter().map(SpriteView::from).collect(),
            events: state.events.clone(),
        }
    }
}

impl From<&Entity> for SpriteView {
    fn from(entity: &Entity) -> Self {
        let kind = match &entity.kind {
            EntityKind::Obstacle => SpriteKind::Obstacle,
            EntityKind::Item(item) => SpriteKind::Item(*item),
            EntityKind::Enemy(enemy) => match &enemy.kind {
                EnemyKind::Static => SpriteKind::StaticEnemy,
                EnemyKind::VerticalPatrol { .. } => SpriteKind::PatrolEnemy,
                EnemyKind::Boss(boss) => SpriteKind::Boss {
                    color: boss.params.color,
                },
            },
            EntityKind::Projectile(_) => SpriteKind::Projectile,
        };
        Self {
            id: entity.id,
            kind,
            pos: entity.rect.pos,
            size: entity.rect.size,
        }
    }
}
