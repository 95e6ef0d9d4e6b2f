//! Stage and boss progression
//!
//! `Normal(stage)` becomes `BossBattle(stage, now)` once the score reaches the
//! stage's trigger. The battle ends after [`BOSS_BATTLE_DURATION`] seconds,
//! moving to the next stage with the score reset. Endless mode never fights a
//! boss; its scroll speed ramps every tick instead.

use super::entity::Entity;
use super::state::{GameEvent, GameState, Phase};
use crate::consts::*;

/// Add this tick's score
pub fn accrue_score(state: &mut GameState) {
    state.score += (state.scroll_speed * state.player.score_multiplier()) as f64;
}

/// Endless-mode speed ramp
pub fn ramp_speed(state: &mut GameState) {
    if state.stage.is_endless() {
        state.scroll_speed += state.stage.config().speed_increase_rate;
    }
}

/// Evaluate stage/boss transitions for this tick
pub fn update(state: &mut GameState, now: f64) {
    match state.phase {
        Phase::Normal => {
            let triggered = state
                .stage
                .config()
                .boss
                .is_some_and(|trigger| state.score >= trigger.score);
            if triggered {
                start_boss_battle(state, now);
            }
        }
        Phase::BossBattle { started_at } => {
            if now - started_at >= BOSS_BATTLE_DURATION {
                end_boss_battle(state);
            }
        }
        Phase::GameOver => {}
    }
}

/// Spawn the stage boss and clear the tunnel out of its way
pub fn start_boss_battle(state: &mut GameState, now: f64) {
    let Some(trigger) = state.stage.config().boss else {
        debug_assert!(false, "{:?} has no boss", state.stage);
        return;
    };

    state.phase = Phase::BossBattle { started_at: now };
    state.entities.retain(|e| !(e.is_obstacle() || e.is_enemy()));
    let id = state.spawn(|id| Entity::boss(id, trigger.boss, now));
    state.boss = Some(id);

    log::info!(
        "Boss battle started ({:?}, score {:.0})",
        state.stage,
        state.score
    );
    state.events.push(GameEvent::BossBattleStarted { stage: state.stage });
}

/// Remove the boss, reset the score and move on to the next stage
pub fn end_boss_battle(state: &mut GameState) {
    if let Some(id) = state.boss.take() {
        state.entities.retain(|e| e.id != id);
    }

    let cleared = state.stage;
    state.stage = cleared.next();
    state.score = 0.0;
    state.scroll_speed = state.stage.config().scroll_speed;
    state.phase = Phase::Normal;

    log::info!("Boss battle over: {:?} -> {:?}", cleared, state.stage);
    state.events.push(GameEvent::BossBattleEnded {
        cleared,
        next: state.stage,
    });
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::entity::{ItemKind, Shot};
    use crate::sim::stage::Stage;
    use crate::sim::world_gen;

    fn at_trigger(stage: Stage) -> GameState {
        let mut state = GameState::new(5);
        state.stage = stage;
        state.scroll_speed = stage.config().scroll_speed;
        state.score = stage.config().boss.map(|t| t.score).unwrap_or(0.0);
        state
    }

    #[test]
    fn test_trigger_starts_battle() {
        let mut state = at_trigger(Stage::One);
        world_gen::extend(&mut state);
        state.spawn(|id| Entity::static_enemy(id, Vec2::new(400.0, 300.0)));
        state.spawn(|id| Entity::item(id, ItemKind::Shield, Vec2::new(500.0, 300.0)));
        let items = state.items().count();

        update(&mut state, 12.0);

        assert_eq!(state.phase, Phase::BossBattle { started_at: 12.0 });
        assert_eq!(state.obstacles().count(), 0);
        let enemies: Vec<_> = state.enemies().collect();
        assert_eq!(enemies.len(), 1);
        assert!(enemies[0].is_boss());
        assert_eq!(state.boss, Some(enemies[0].id));
        assert_eq!(state.items().count(), items, "items survive the purge");
    }

    #[test]
    fn test_below_trigger_stays_normal() {
        let mut state = at_trigger(Stage::Two);
        state.score -= 1.0;
        update(&mut state, 0.0);
        assert_eq!(state.phase, Phase::Normal);
        assert!(state.boss.is_none());
    }

    #[test]
    fn test_battle_ends_exactly_at_duration() {
        let mut state = at_trigger(Stage::One);
        update(&mut state, 10.0);
        assert!(state.boss_battle_active());

        update(&mut state, 10.0 + BOSS_BATTLE_DURATION - 0.001);
        assert!(state.boss_battle_active());

        update(&mut state, 10.0 + BOSS_BATTLE_DURATION);
        assert_eq!(state.phase, Phase::Normal);
        assert_eq!(state.stage, Stage::Two);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.scroll_speed, Stage::Two.config().scroll_speed);
        assert!(state.boss.is_none());
        assert_eq!(state.enemies().count(), 0);
    }

    #[test]
    fn test_stage_three_leads_to_endless() {
        let mut state = at_trigger(Stage::Three);
        update(&mut state, 0.0);
        update(&mut state, BOSS_BATTLE_DURATION);
        assert_eq!(state.stage, Stage::Endless);
        assert!(state.events.contains(&GameEvent::BossBattleEnded {
            cleared: Stage::Three,
            next: Stage::Endless
        }));
    }

    #[test]
    fn test_endless_never_triggers_boss() {
        let mut state = at_trigger(Stage::Endless);
        state.score = 1.0e12;
        update(&mut state, 0.0);
        assert_eq!(state.phase, Phase::Normal);
        assert!(state.boss.is_none());
    }

    #[test]
    fn test_endless_ramps_speed() {
        let mut state = at_trigger(Stage::Endless);
        let base = state.scroll_speed;
        for _ in 0..1000 {
            ramp_speed(&mut state);
        }
        assert!(state.scroll_speed > base + 0.09);

        let mut stage_one = GameState::new(5);
        ramp_speed(&mut stage_one);
        assert_eq!(stage_one.scroll_speed, Stage::One.config().scroll_speed);
    }

    #[test]
    fn test_score_uses_multiplier() {
        let mut state = GameState::new(5);
        accrue_score(&mut state);
        assert_eq!(state.score, 2.0);
        state.player.activate_score_multiplier(0.0);
        accrue_score(&mut state);
        assert_eq!(state.score, 6.0);
    }

    #[test]
    fn test_projectiles_survive_battle_end() {
        let mut state = at_trigger(Stage::One);
        update(&mut state, 0.0);
        let shot = Shot {
            origin: Vec2::new(600.0, 300.0),
            speed: 5.0,
        };
        state.spawn(|id| Entity::projectile(id, shot));
        end_boss_battle(&mut state);
        assert_eq!(state.projectiles().count(), 1);
    }
}
