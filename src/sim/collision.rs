//! Player collision resolution and pickup effects
//!
//! Resolution runs once per tick in a fixed order so simultaneous contacts
//! always play out the same way:
//! 1. obstacles (1 damage per tick of overlap, walls persist)
//! 2. items (effect applied, item consumed)
//! 3. enemies, boss included (contact damage per tick, enemy persists)
//! 4. projectiles (consumed, one hit of damage per tick)

use super::entity::{EnemyKind, EntityKind, ItemKind};
use super::state::{DamageSource, GameEvent, GameState};
use crate::consts::*;

/// Resolve all player contacts for this tick
pub fn resolve(state: &mut GameState, now: f64) {
    let player_rect = state.player.rect;

    // 1. Obstacles: one hit no matter how many walls overlap
    if state.obstacles().any(|o| o.rect.overlaps(&player_rect)) {
        damage_player(state, OBSTACLE_DAMAGE, DamageSource::Obstacle);
    }

    // 2. Items, in arena order
    let touched: Vec<_> = state
        .items()
        .filter(|i| i.rect.overlaps(&player_rect))
        .filter_map(|i| match i.kind {
            EntityKind::Item(kind) => Some((i.id, kind)),
            _ => None,
        })
        .collect();
    for (id, kind) in touched {
        state.entities.retain(|e| e.id != id);
        apply_item(state, kind, now);
    }

    // 3. Enemies (a screen clear above may have removed some)
    let hits: Vec<_> = state
        .enemies()
        .filter(|e| e.rect.overlaps(&player_rect))
        .filter_map(|e| match &e.kind {
            EntityKind::Enemy(enemy) => {
                let source = match enemy.kind {
                    EnemyKind::Boss(_) => DamageSource::Boss,
                    _ => DamageSource::Enemy,
                };
                Some((enemy.damage, source))
            }
            _ => None,
        })
        .collect();
    for (damage, source) in hits {
        damage_player(state, damage, source);
    }

    // 4. Projectiles: all overlapping ones are consumed, damage lands once
    let before = state.entities.len();
    state
        .entities
        .retain(|e| !(e.is_projectile() && e.rect.overlaps(&player_rect)));
    if state.entities.len() < before {
        damage_player(state, PROJECTILE_DAMAGE, DamageSource::Projectile);
    }
}

/// Apply damage through the shield and record what happened
pub fn damage_player(state: &mut GameState, amount: u32, source: DamageSource) {
    if state.player.effects.shielded() {
        state.events.push(GameEvent::Blocked { source });
        return;
    }
    let lost = state.player.take_damage(amount);
    if lost > 0 {
        state.events.push(GameEvent::Damaged {
            source,
            amount: lost,
        });
    }
}

/// Item effect dispatch
pub fn apply_item(state: &mut GameState, kind: ItemKind, now: f64) {
    log::debug!("Collected {:?}", kind);
    match kind {
        ItemKind::HealHp => state.player.heal(HEAL_AMOUNT),
        ItemKind::Shield => state.player.activate_shield(now),
        ItemKind::SpeedDown => state.player.activate_speed_down(now),
        ItemKind::ScoreMultiplier => state.player.activate_score_multiplier(now),
        ItemKind::ScreenClear => state.clear_enemies_and_projectiles(),
    }
    state.events.push(GameEvent::ItemCollected(kind));
}
