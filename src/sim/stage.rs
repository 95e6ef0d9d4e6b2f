//! Stage table
//!
//! Stages are a closed set, so a lookup can never miss.

use serde::{Deserialize, Serialize};

/// Stage identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    One,
    Two,
    Three,
    /// No boss; scroll speed keeps climbing
    Endless,
}

/// Parameters for a stage's boss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossParams {
    /// Display color tag (RGB)
    pub color: [u8; 3],
    /// Vertical speed (px/tick)
    pub vy: f32,
    /// Minimum seconds between shots
    pub fire_rate: f64,
    /// Projectile speed (px/tick, leftward)
    pub projectile_speed: f32,
}

/// Score threshold and boss for a stage that has one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossTrigger {
    pub score: f64,
    pub boss: BossParams,
}

/// Immutable per-stage configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageConfig {
    pub scroll_speed: f32,
    /// Vertical tunnel gap height
    pub gap: f32,
    pub boss: Option<BossTrigger>,
    /// Scroll speed gained per tick
    pub speed_increase_rate: f32,
}

const STAGE_ONE: StageConfig = StageConfig {
    scroll_speed: 2.0,
    gap: 200.0,
    boss: Some(BossTrigger {
        score: 4000.0,
        boss: BossParams {
            color: [255, 69, 0],
            vy: 3.0,
            fire_rate: 0.6,
            projectile_speed: 5.0,
        },
    }),
    speed_increase_rate: 0.0,
};

const STAGE_TWO: StageConfig = StageConfig {
    scroll_speed: 2.5,
    gap: 180.0,
    boss: Some(BossTrigger {
        score: 4000.0,
        boss: BossParams {
            color: [200, 0, 200],
            vy: 4.0,
            fire_rate: 0.4,
            projectile_speed: 6.0,
        },
    }),
    speed_increase_rate: 0.0,
};

const STAGE_THREE: StageConfig = StageConfig {
    scroll_speed: 3.0,
    gap: 160.0,
    boss: Some(BossTrigger {
        score: 5000.0,
        boss: BossParams {
            color: [150, 150, 255],
            vy: 5.0,
            fire_rate: 0.25,
            projectile_speed: 7.0,
        },
    }),
    speed_increase_rate: 0.0,
};

const STAGE_ENDLESS: StageConfig = StageConfig {
    scroll_speed: 3.5,
    gap: 150.0,
    boss: None,
    speed_increase_rate: 0.0001,
};

impl Stage {
    pub fn config(self) -> &'static StageConfig {
        match self {
            Stage::One => &STAGE_ONE,
            Stage::Two => &STAGE_TWO,
            Stage::Three => &STAGE_THREE,
            Stage::Endless => &STAGE_ENDLESS,
        }
    }

    /// Stage reached after beating this stage's boss
    pub fn next(self) -> Stage {
        match self {
            Stage::One => Stage::Two,
            Stage::Two => Stage::Three,
            Stage::Three | Stage::Endless => Stage::Endless,
        }
    }

    pub fn is_endless(self) -> bool {
        self == Stage::Endless
    }

    /// HUD label
    pub fn label(self) -> &'static str {
        match self {
            Stage::One => "Stage: 1",
            Stage::Two => "Stage: 2",
            Stage::Three => "Stage: 3",
            Stage::Endless => "Endless",
        }
    }
}
