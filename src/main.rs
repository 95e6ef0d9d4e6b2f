//! Threader entry point
//!
//! Headless native runner: the autopilot plays, a HUD line is logged every
//! few seconds, and the final frame is printed as JSON.
//!
//! Usage: `threader [config.json]`

use threader::snapshot::Snapshot;
use threader::{
    Game, GameConfig, InputEvent, InputSource, ManualClock, Renderer, SystemClock, run,
};

/// Keeps the session moving without a keyboard: Confirm every frame (a no-op
/// while playing, restarts after a game over) and Quit once the frame budget
/// is spent.
struct HeadlessInput {
    frame: u64,
    max_frames: Option<u64>,
}

impl InputSource for HeadlessInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        if self.max_frames.is_some_and(|max| self.frame >= max) {
            return vec![InputEvent::Quit];
        }
        self.frame += 1;
        vec![InputEvent::Confirm]
    }
}

/// Logs a one-line HUD instead of drawing
struct HudLogger {
    every: u64,
    frames: u64,
    last: Option<Snapshot>,
}

impl Renderer for HudLogger {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        if self.every > 0 && self.frames % self.every == 0 {
            match snapshot {
                Snapshot::Playing(view) => {
                    let boss = view
                        .boss_time_remaining
                        .map(|t| format!(" | Boss: {:.0}s", t))
                        .unwrap_or_default();
                    log::info!(
                        "[frame {}] Score: {} | {} | HP: {}/{} | Entities: {}{}",
                        self.frames,
                        view.score,
                        view.stage_label,
                        view.player.hp,
                        view.player.max_hp,
                        view.sprites.len(),
                        boss
                    );
                }
                other => log::info!("[frame {}] {:?}", self.frames, other),
            }
        }
        self.last = Some(snapshot.clone());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Threader (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).unwrap_or_else(|err| {
            log::error!("Could not load {}: {}; using defaults", path, err);
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };

    let mut game = Game::new(config.clone());
    let mut input = HeadlessInput {
        frame: 0,
        max_frames: config.max_frames,
    };
    let mut hud = HudLogger {
        every: config.log_every,
        frames: 0,
        last: None,
    };

    let frames = if config.realtime {
        run(&mut game, &SystemClock::new(), &mut input, &mut hud)
    } else {
        run(&mut game, &ManualClock::new(0.0), &mut input, &mut hud)
    };

    log::info!("{} runs in {} frames", game.runs(), frames);
    for (i, entry) in game.high_scores().entries.iter().enumerate() {
        log::info!("#{} {} ({})", i + 1, entry.score, entry.stage.label());
    }

    if let Some(snapshot) = hud.last {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Failed to serialize final snapshot: {}", err),
        }
    }
}
