//! Built-in steering for demo and headless runs
//!
//! The player can only flip direction, and speed changes by a fixed
//! acceleration each tick, so steering is bang-bang: keep heading toward the
//! target until the point where the player would come to rest (if it reversed
//! now) overshoots the target by a small margin, then flip.

use crate::consts::*;
use crate::sim::{Entity, GameState, Phase};

/// How far ahead of the player the tunnel is sampled, in ticks of scroll
const GAP_LOOKAHEAD_TICKS: f32 = 30.0;
/// Enemies closer than this (px ahead of the player) are dodged
const ENEMY_LOOKAHEAD: f32 = 250.0;
/// Allowed overshoot past the target before flipping
const DEADBAND: f32 = 15.0;
/// Heights considered while dodging the boss
const DODGE_LANES: [f32; 5] = [100.0, 200.0, 300.0, 400.0, 500.0];

/// Whether to toggle direction this tick
pub fn steer(state: &GameState) -> bool {
    let target = match state.phase {
        Phase::Normal => match gap_target(state) {
            Some(target) => target,
            None => return false,
        },
        Phase::BossBattle { .. } => dodge_target(state),
        Phase::GameOver => return false,
    };

    let player = &state.player;
    // Where the player comes to rest if it reverses right now
    let speed = player.y_speed;
    let rest_y = player.center().y + speed * speed.abs() / (2.0 * PLAYER_ACCELERATION);

    if player.direction > 0.0 {
        rest_y > target + DEADBAND
    } else {
        rest_y < target - DEADBAND
    }
}

/// Center of the tunnel gap a little way ahead, nudged around any enemy
/// sitting in it
fn gap_target(state: &GameState) -> Option<f32> {
    let probe_x = PLAYER_X + state.scroll_speed * GAP_LOOKAHEAD_TICKS;
    let column: Vec<&Entity> = state
        .obstacles()
        .filter(|o| o.rect.left() <= probe_x && o.rect.right() > probe_x)
        .collect();

    let gap_top = column
        .iter()
        .filter(|o| o.rect.top() <= 0.0)
        .map(|o| o.rect.bottom())
        .next()?;
    let gap_bottom = column
        .iter()
        .filter(|o| o.rect.bottom() >= VIEWPORT_HEIGHT)
        .map(|o| o.rect.top())
        .next()?;
    let center = (gap_top + gap_bottom) / 2.0;

    // Nearest enemy ahead that the player has not yet passed
    let player_left = state.player.rect.left();
    let threat = state
        .enemies()
        .filter(|e| e.rect.right() >= player_left && e.rect.left() <= PLAYER_X + ENEMY_LOOKAHEAD)
        .min_by(|a, b| {
            a.rect
                .left()
                .partial_cmp(&b.rect.left())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    Some(match threat {
        // Pass on whichever side has more room
        Some(enemy) if enemy.rect.center().y >= center => (gap_top + enemy.rect.top()) / 2.0,
        Some(enemy) => (enemy.rect.bottom() + gap_bottom) / 2.0,
        None => center,
    })
}

/// Lane with the most clearance from the boss and incoming projectiles
fn dodge_target(state: &GameState) -> f32 {
    let player_left = state.player.rect.left();
    let threats: Vec<f32> = state
        .boss_entity()
        .into_iter()
        .chain(state.projectiles().filter(|p| p.rect.right() >= player_left))
        .map(|e| e.rect.center().y)
        .collect();

    let clearance = |lane: f32| {
        threats
            .iter()
            .map(|y| (lane - y).abs())
            .fold(f32::INFINITY, f32::min)
    };

    DODGE_LANES
        .into_iter()
        .max_by(|a, b| {
            clearance(*a)
                .partial_cmp(&clearance(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(VIEWPORT_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::{DamageSource, GameEvent, Shot, TickInput, tick, world_gen};

    fn time_of(tick: u64) -> f64 {
        tick as f64 * SIM_DT
    }

    #[test]
    fn test_flips_when_overshooting_gap() {
        let mut state = GameState::new(1);
        world_gen::extend(&mut state);
        // Heading down at full speed from the gap center
        state.player.y_speed = PLAYER_MAX_Y_SPEED;
        assert!(steer(&state));

        // Heading up from the same spot needs no flip yet
        state.player.y_speed = 0.0;
        state.player.direction = -1.0;
        assert!(!steer(&state));
    }

    #[test]
    fn test_flips_back_toward_gap_from_far_side() {
        let mut state = GameState::new(1);
        world_gen::extend(&mut state);
        state.player.rect.set_center_y(120.0);
        state.player.direction = -1.0;
        state.player.y_speed = 0.0;
        assert!(steer(&state));
    }

    #[test]
    fn test_no_walls_means_no_opinion() {
        let state = GameState::new(1);
        assert!(!steer(&state));
    }

    #[test]
    fn test_enemy_in_gap_shifts_target() {
        let mut state = GameState::new(1);
        world_gen::extend(&mut state);
        state.entities.retain(|e| e.is_obstacle());
        let center = gap_target(&state).unwrap();

        let at = Vec2::new(PLAYER_X + 100.0, center + 5.0);
        state.spawn(|id| Entity::static_enemy(id, at));
        let dodged = gap_target(&state).unwrap();
        assert!(dodged < center - 30.0, "target {dodged} vs center {center}");
    }

    #[test]
    fn test_dodge_lane_avoids_boss_and_shots() {
        let mut state = GameState::new(1);
        state.score = 4000.0;
        tick(&mut state, &TickInput::default(), 0.0);
        // Spawned mid-height, then one tick of vertical motion
        let vy = crate::sim::Stage::One.config().boss.unwrap().boss.vy;
        let boss_y = state.boss_entity().unwrap().rect.center().y;
        assert_eq!(boss_y, VIEWPORT_HEIGHT / 2.0 + vy);

        let shot = Shot {
            origin: Vec2::new(400.0, 100.0),
            speed: 5.0,
        };
        state.spawn(|id| Entity::projectile(id, shot));
        assert_eq!(dodge_target(&state), 500.0);
    }

    #[test]
    fn test_autopilot_threads_tunnel_without_touching_walls() {
        for seed in 1..=3 {
            let mut state = GameState::new(seed);
            for i in 0..1200 {
                // Walls only: patrol enemies sweep the whole gap
                state.entities.retain(|e| !e.is_enemy());
                let input = TickInput {
                    toggle_direction: steer(&state),
                };
                tick(&mut state, &input, time_of(i));
                let scraped = state.events.iter().any(|e| {
                    matches!(
                        e,
                        GameEvent::Damaged {
                            source: DamageSource::Obstacle,
                            ..
                        }
                    )
                });
                assert!(!scraped, "seed {seed} hit a wall at tick {i}");
            }
            assert!(state.player.alive);
        }
    }
}
