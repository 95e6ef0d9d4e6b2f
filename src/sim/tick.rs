//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. The
//! timestamp is read once per frame by the caller and passed in, so every
//! expiry check within a tick sees the same time.

use super::entity::Entity;
use super::state::{GameEvent, GameState, Phase};
use super::{collision, progression, world_gen};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flip the player's vertical direction before moving
    pub toggle_direction: bool,
}

/// Advance the game state by one tick at timestamp `now` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    // Nothing moves after death
    if state.phase == Phase::GameOver {
        return;
    }

    state.now = now;
    state.time_ticks += 1;
    state.events.clear();

    if input.toggle_direction {
        state.player.switch_direction();
    }

    progression::accrue_score(state);
    progression::ramp_speed(state);
    progression::update(state, now);

    world_gen::extend(state);
    advance_entities(state, now);
    collision::resolve(state, now);

    if !state.player.alive {
        state.phase = Phase::GameOver;
        state.events.push(GameEvent::PlayerDied);
        log::info!(
            "Player died on {:?} with score {:.0} after {} ticks",
            state.stage,
            state.score,
            state.time_ticks
        );
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Move the player, then every arena entity in id order. Boss shots fired
/// this tick are spawned afterwards and first move on the next tick.
fn advance_entities(state: &mut GameState, now: f64) {
    state.player.advance(now);

    let scroll_speed = state.scroll_speed;
    let mut shots = Vec::new();
    state
        .entities
        .retain_mut(|e| e.advance(scroll_speed, now, &mut shots));

    for shot in shots {
        state.spawn(|id| Entity::projectile(id, shot));
    }
}
