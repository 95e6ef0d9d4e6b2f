//! Procedural tunnel generation
//!
//! Wall segments are emitted at the frontier until it sits one obstacle width
//! past the right edge of the viewport. Each segment may carry one item or
//! one enemy at its gap center.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, ItemKind};
use super::rect::Rect;
use super::state::GameState;
use crate::consts::*;

/// x the frontier must reach before generation stops
const LOOKAHEAD_X: f32 = VIEWPORT_WIDTH + OBSTACLE_WIDTH;

/// Extend the tunnel for this tick. No-op during a boss battle.
pub fn extend(state: &mut GameState) {
    if state.boss_battle_active() {
        return;
    }

    let tunnel = &mut state.tunnel;
    tunnel.center_y += tunnel.drift * TUNNEL_Y_CHANGE_SPEED;
    if tunnel.center_y < TUNNEL_EDGE_MARGIN || tunnel.center_y > VIEWPORT_HEIGHT - TUNNEL_EDGE_MARGIN {
        tunnel.drift = -tunnel.drift;
    }

    let gap = state.stage.config().gap;
    let mut segments = 0;
    while state.tunnel.frontier < LOOKAHEAD_X {
        spawn_segment(state, gap);
        state.tunnel.frontier += OBSTACLE_WIDTH;
        segments += 1;
    }
    if segments > 0 {
        log::trace!("Generated {} segments up to x={}", segments, state.tunnel.frontier);
    }

    // Everything already generated scrolls left this tick
    state.tunnel.frontier -= state.scroll_speed;

    debug_assert!(
        state.tunnel.frontier >= VIEWPORT_WIDTH || state.scroll_speed > OBSTACLE_WIDTH,
        "tunnel frontier fell behind the viewport"
    );
}

/// Emit one wall pair at the frontier plus an optional item/enemy
fn spawn_segment(state: &mut GameState, gap: f32) {
    let x = state.tunnel.frontier;
    let center_y = state.tunnel.center_y;
    let gap_top = center_y - gap / 2.0;
    let gap_bottom = center_y + gap / 2.0;

    state.spawn(|id| Entity::obstacle(id, Rect::new(x, 0.0, OBSTACLE_WIDTH, gap_top)));
    state.spawn(|id| {
        Entity::obstacle(
            id,
            Rect::new(x, gap_bottom, OBSTACLE_WIDTH, VIEWPORT_HEIGHT - gap_bottom),
        )
    });

    let center = Vec2::new(x + OBSTACLE_WIDTH / 2.0, center_y);
    if state.rng.random::<f32>() < ITEM_SPAWN_CHANCE {
        let kind = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
        log::debug!("Spawned {:?} at x={}", kind, center.x);
        state.spawn(|id| Entity::item(id, kind, center));
    } else if state.rng.random::<f32>() < ENEMY_SPAWN_CHANCE {
        if state.rng.random_bool(0.5) {
            state.spawn(|id| Entity::static_enemy(id, center));
        } else {
            state.spawn(|id| Entity::patrol_enemy(id, center, gap_top, gap_bottom));
        }
        log::debug!("Spawned enemy at x={}", center.x);
    }
}
