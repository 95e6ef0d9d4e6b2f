//! Entity model: the player plus everything that scrolls past it
//!
//! Scrolling entities share one [`Entity`] shape (id, bounds, kind) and live
//! in a single arena on [`GameState`](super::GameState). Kind-specific motion
//! is dispatched with a `match` in [`Entity::advance`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::stage::BossParams;
use crate::consts::*;

/// Stable handle into the entity arena
pub type EntityId = u32;

/// Timed player statuses, stored as absolute expiry timestamps (seconds)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusEffects {
    pub shield_until: Option<f64>,
    pub slow_until: Option<f64>,
    pub multiplier_until: Option<f64>,
}

impl StatusEffects {
    /// Drop every status whose expiry is strictly before `now`
    pub fn expire(&mut self, now: f64) {
        for until in [
            &mut self.shield_until,
            &mut self.slow_until,
            &mut self.multiplier_until,
        ] {
            if until.is_some_and(|t| now > t) {
                *until = None;
            }
        }
    }

    pub fn shielded(&self) -> bool {
        self.shield_until.is_some()
    }

    pub fn slowed(&self) -> bool {
        self.slow_until.is_some()
    }

    pub fn multiplied(&self) -> bool {
        self.multiplier_until.is_some()
    }
}

/// Seconds left on a status, if active
pub fn time_remaining(until: Option<f64>, now: f64) -> Option<f64> {
    until.map(|t| (t - now).max(0.0))
}

/// The player: a small point sweeping up and down at a fixed x
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Vertical speed (px/tick, positive = down)
    pub y_speed: f32,
    /// Facing: +1 down, -1 up
    pub direction: f32,
    pub hp: u32,
    pub alive: bool,
    pub effects: StatusEffects,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let size = Vec2::splat(PLAYER_RADIUS * 2.0);
        Self {
            rect: Rect::from_center(Vec2::new(PLAYER_X, VIEWPORT_HEIGHT / 2.0), size),
            y_speed: PLAYER_INITIAL_Y_SPEED,
            direction: 1.0,
            hp: PLAYER_MAX_HP,
            alive: true,
            effects: StatusEffects::default(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn switch_direction(&mut self) {
        self.direction = -self.direction;
    }

    /// Apply damage unless shielded. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if self.effects.shielded() || !self.alive {
            return 0;
        }
        let lost = amount.min(self.hp);
        self.hp -= lost;
        if self.hp == 0 {
            self.alive = false;
        }
        lost
    }

    pub fn heal(&mut self, amount: u32) {
        if !self.alive {
            return;
        }
        self.hp = (self.hp + amount).min(PLAYER_MAX_HP);
    }

    pub fn activate_shield(&mut self, now: f64) {
        self.effects.shield_until = Some(now + SHIELD_DURATION);
    }

    pub fn activate_speed_down(&mut self, now: f64) {
        self.effects.slow_until = Some(now + SPEED_DOWN_DURATION);
    }

    pub fn activate_score_multiplier(&mut self, now: f64) {
        self.effects.multiplier_until = Some(now + SCORE_MULT_DURATION);
    }

    pub fn score_multiplier(&self) -> f32 {
        if self.effects.multiplied() {
            SCORE_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn max_speed(&self) -> f32 {
        if self.effects.slowed() {
            PLAYER_MAX_Y_SPEED * SPEED_DOWN_FACTOR
        } else {
            PLAYER_MAX_Y_SPEED
        }
    }

    /// One tick of player motion. Returns false once the player is dead.
    pub fn advance(&mut self, now: f64) -> bool {
        self.effects.expire(now);

        // Ease toward the target speed without overshooting it
        let target = self.max_speed() * self.direction;
        if self.y_speed < target {
            self.y_speed = (self.y_speed + PLAYER_ACCELERATION).min(target);
        } else if self.y_speed > target {
            self.y_speed = (self.y_speed - PLAYER_ACCELERATION).max(target);
        }

        self.rect.translate(Vec2::new(0.0, self.y_speed));
        if self.rect.top() < 0.0 {
            self.rect.set_top(0.0);
        }
        if self.rect.bottom() > VIEWPORT_HEIGHT {
            self.rect.set_bottom(VIEWPORT_HEIGHT);
        }

        self.alive
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealHp,
    Shield,
    SpeedDown,
    ScoreMultiplier,
    ScreenClear,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::HealHp,
        ItemKind::Shield,
        ItemKind::SpeedDown,
        ItemKind::ScoreMultiplier,
        ItemKind::ScreenClear,
    ];

    pub fn size(self) -> f32 {
        match self {
            ItemKind::ScoreMultiplier => SCORE_ITEM_SIZE,
            _ => ITEM_SIZE,
        }
    }
}

/// Boss runtime state
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub params: BossParams,
    /// Current vertical velocity (sign flips on bounce)
    pub vy: f32,
    /// Timestamp of the last shot
    pub last_shot: f64,
}

impl Boss {
    fn advance(&mut self, rect: &mut Rect, scroll_speed: f32, now: f64, shots: &mut Vec<Shot>) {
        rect.translate(Vec2::new(0.0, self.vy));
        if rect.top() < 0.0 || rect.bottom() > VIEWPORT_HEIGHT {
            self.vy = -self.vy;
        }

        if now - self.last_shot > self.params.fire_rate {
            shots.push(Shot {
                origin: rect.center(),
                speed: self.params.projectile_speed,
            });
            self.last_shot = now;
        }

        // Scroll still applies, but the boss stays pinned near the right edge
        rect.translate(Vec2::new(-scroll_speed, 0.0));
        let min_left = VIEWPORT_WIDTH - BOSS_MIN_OFFSET;
        if rect.left() < min_left {
            rect.set_left(min_left);
        }
    }
}

/// Enemy behaviors
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyKind {
    Static,
    /// Bounces between two y bounds captured at spawn
    VerticalPatrol {
        vy: f32,
        top_bound: f32,
        bottom_bound: f32,
    },
    Boss(Boss),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Contact damage per tick of overlap
    pub damage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Leftward speed, independent of scroll
    pub speed: f32,
    pub damage: u32,
}

/// A projectile requested by the boss during [`Entity::advance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Obstacle,
    Item(ItemKind),
    Enemy(Enemy),
    Projectile(Projectile),
}

/// A scrolling entity
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub rect: Rect,
    pub kind: EntityKind,
}

impl Entity {
    pub fn obstacle(id: EntityId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            kind: EntityKind::Obstacle,
        }
    }

    pub fn item(id: EntityId, kind: ItemKind, center: Vec2) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(kind.size())),
            kind: EntityKind::Item(kind),
        }
    }

    pub fn static_enemy(id: EntityId, center: Vec2) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(STATIC_ENEMY_SIZE)),
            kind: EntityKind::Enemy(Enemy {
                kind: EnemyKind::Static,
                damage: ENEMY_DAMAGE,
            }),
        }
    }

    pub fn patrol_enemy(id: EntityId, center: Vec2, top_bound: f32, bottom_bound: f32) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::new(PATROL_ENEMY_WIDTH, PATROL_ENEMY_HEIGHT)),
            kind: EntityKind::Enemy(Enemy {
                kind: EnemyKind::VerticalPatrol {
                    vy: PATROL_ENEMY_SPEED,
                    top_bound,
                    bottom_bound,
                },
                damage: ENEMY_DAMAGE,
            }),
        }
    }

    /// Boss centered near the right edge, mid-height
    pub fn boss(id: EntityId, params: BossParams, now: f64) -> Self {
        let center = Vec2::new(VIEWPORT_WIDTH - BOSS_SPAWN_OFFSET, VIEWPORT_HEIGHT / 2.0);
        Self {
            id,
            rect: Rect::from_center(center, Vec2::new(BOSS_WIDTH, BOSS_HEIGHT)),
            kind: EntityKind::Enemy(Enemy {
                kind: EnemyKind::Boss(Boss {
                    params,
                    vy: params.vy,
                    last_shot: now,
                }),
                damage: BOSS_DAMAGE,
            }),
        }
    }

    pub fn projectile(id: EntityId, shot: Shot) -> Self {
        Self {
            id,
            rect: Rect::from_center(shot.origin, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT)),
            kind: EntityKind::Projectile(Projectile {
                speed: shot.speed,
                damage: PROJECTILE_DAMAGE,
            }),
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, EntityKind::Obstacle)
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, EntityKind::Item(_))
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy(_))
    }

    pub fn is_boss(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Enemy(Enemy {
                kind: EnemyKind::Boss(_),
                ..
            })
        )
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile(_))
    }

    /// Advance one tick: kind-specific motion, then scroll drift.
    ///
    /// Returns false once the entity has scrolled fully off the left edge.
    /// Boss shots are pushed to `shots` for the caller to spawn.
    pub fn advance(&mut self, scroll_speed: f32, now: f64, shots: &mut Vec<Shot>) -> bool {
        match &mut self.kind {
            EntityKind::Obstacle | EntityKind::Item(_) => {}
            EntityKind::Enemy(enemy) => match &mut enemy.kind {
                EnemyKind::Static => {}
                EnemyKind::VerticalPatrol {
                    vy,
                    top_bound,
                    bottom_bound,
                } => {
                    self.rect.translate(Vec2::new(0.0, *vy));
                    if self.rect.top() < *top_bound || self.rect.bottom() > *bottom_bound {
                        *vy = -*vy;
                    }
                }
                EnemyKind::Boss(boss) => {
                    boss.advance(&mut self.rect, scroll_speed, now, shots);
                    return true;
                }
            },
            EntityKind::Projectile(projectile) => {
                self.rect.translate(Vec2::new(-projectile.speed, 0.0));
                return self.rect.right() >= 0.0;
            }
        }

        self.rect.translate(Vec2::new(-scroll_speed, 0.0));
        self.rect.right() >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stage::Stage;

    fn stage_one_boss() -> BossParams {
        Stage::One.config().boss.unwrap().boss
    }

    #[test]
    fn test_player_accelerates_without_overshoot() {
        let mut player = Player::new();
        assert_eq!(player.y_speed, PLAYER_INITIAL_Y_SPEED);
        for _ in 0..100 {
            player.advance(0.0);
            assert!(player.y_speed <= PLAYER_MAX_Y_SPEED);
        }
        assert_eq!(player.y_speed, PLAYER_MAX_Y_SPEED);

        player.switch_direction();
        player.advance(0.0);
        assert!((player.y_speed - (PLAYER_MAX_Y_SPEED - PLAYER_ACCELERATION)).abs() < 1e-5);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut player = Player::new();
        for _ in 0..500 {
            player.advance(0.0);
        }
        assert_eq!(player.rect.bottom(), VIEWPORT_HEIGHT);

        player.switch_direction();
        for _ in 0..500 {
            player.advance(0.0);
        }
        assert_eq!(player.rect.top(), 0.0);
    }

    #[test]
    fn test_speed_down_halves_max_speed() {
        let mut player = Player::new();
        player.activate_speed_down(0.0);
        for _ in 0..100 {
            player.advance(1.0);
        }
        assert_eq!(player.y_speed, PLAYER_MAX_Y_SPEED * SPEED_DOWN_FACTOR);

        // Expired: speed climbs back toward full max
        player.advance(SPEED_DOWN_DURATION + 0.01);
        assert!(!player.effects.slowed());
        assert!(player.y_speed > PLAYER_MAX_Y_SPEED * SPEED_DOWN_FACTOR);
    }

    #[test]
    fn test_status_expiry_boundary() {
        let mut player = Player::new();
        player.activate_shield(10.0);
        let expiry = 10.0 + SHIELD_DURATION;

        player.advance(expiry);
        assert!(player.effects.shielded(), "still shielded at the expiry timestamp");
        assert_eq!(player.take_damage(50), 0);

        player.advance(expiry + 1e-9);
        assert!(!player.effects.shielded());
        assert_eq!(player.take_damage(50), 50);
    }

    #[test]
    fn test_damage_and_heal_stay_in_range() {
        let mut player = Player::new();
        player.heal(HEAL_AMOUNT);
        assert_eq!(player.hp, PLAYER_MAX_HP);

        assert_eq!(player.take_damage(30), 30);
        assert_eq!(player.take_damage(500), 70);
        assert_eq!(player.hp, 0);
        assert!(!player.alive);
        assert!(!player.advance(0.0));
    }

    #[test]
    fn test_score_multiplier() {
        let mut player = Player::new();
        assert_eq!(player.score_multiplier(), 1.0);
        player.activate_score_multiplier(0.0);
        assert_eq!(player.score_multiplier(), SCORE_MULTIPLIER);
        player.advance(SCORE_MULT_DURATION + 0.1);
        assert_eq!(player.score_multiplier(), 1.0);
    }

    #[test]
    fn test_scroll_and_offscreen_removal() {
        let mut obstacle = Entity::obstacle(1, Rect::new(5.0, 0.0, OBSTACLE_WIDTH, 100.0));
        let mut shots = Vec::new();
        assert!(obstacle.advance(2.0, 0.0, &mut shots));
        assert_eq!(obstacle.rect.left(), 3.0);
        // Right edge at -1 after this step
        assert!(!obstacle.advance(24.0, 0.0, &mut shots));
    }

    #[test]
    fn test_patrol_bounces_between_bounds() {
        let mut enemy = Entity::patrol_enemy(1, Vec2::new(400.0, 300.0), 280.0, 320.0);
        let mut shots = Vec::new();
        let mut flips = 0;
        let mut last_sign = 1.0;
        for _ in 0..100 {
            enemy.advance(0.0, 0.0, &mut shots);
            let EntityKind::Enemy(Enemy {
                kind: EnemyKind::VerticalPatrol { vy, .. },
                ..
            }) = enemy.kind
            else {
                panic!("expected patrol");
            };
            assert_eq!(vy.abs(), PATROL_ENEMY_SPEED);
            if vy.signum() != last_sign {
                flips += 1;
                last_sign = vy.signum();
            }
            assert!(enemy.rect.top() >= 280.0 - PATROL_ENEMY_SPEED);
            assert!(enemy.rect.bottom() <= 320.0 + PATROL_ENEMY_SPEED);
        }
        assert!(flips >= 2);
    }

    #[test]
    fn test_projectile_ignores_scroll() {
        let shot = Shot {
            origin: Vec2::new(700.0, 300.0),
            speed: 5.0,
        };
        let mut projectile = Entity::projectile(1, shot);
        let mut shots = Vec::new();
        projectile.advance(100.0, 0.0, &mut shots);
        assert_eq!(projectile.rect.center().x, 695.0);
    }

    #[test]
    fn test_boss_pinned_and_fires_on_interval() {
        let params = stage_one_boss();
        let mut boss = Entity::boss(1, params, 0.0);
        let min_left = VIEWPORT_WIDTH - BOSS_MIN_OFFSET;
        let mut shots = Vec::new();

        // Not yet past the fire interval
        assert!(boss.advance(3.0, params.fire_rate, &mut shots));
        assert!(shots.is_empty());
        assert_eq!(boss.rect.left(), min_left);

        boss.advance(3.0, params.fire_rate + 0.01, &mut shots);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].speed, params.projectile_speed);
        // Fired from the center; the pinned boss ends the tick where it started in x
        assert_eq!(shots[0].origin, boss.rect.center());

        // Immediately after a shot the timer restarts
        boss.advance(3.0, params.fire_rate + 0.02, &mut shots);
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn test_boss_bounces_inside_field() {
        let mut boss = Entity::boss(1, stage_one_boss(), 0.0);
        let mut shots = Vec::new();
        for _ in 0..1000 {
            boss.advance(2.0, 0.0, &mut shots);
            assert!(boss.rect.top() >= -10.0 && boss.rect.bottom() <= VIEWPORT_HEIGHT + 10.0);
        }
    }
}
