//! Top-level game controller
//!
//! Owns the simulation for the current run and the screen it is shown on,
//! turns normalized input events into simulation intent, and drives the
//! external frame loop through the [`InputSource`], [`Renderer`] and
//! [`Clock`] seams.

use serde::{Deserialize, Serialize};

use crate::autopilot;
use crate::clock::{Clock, FrameTimer};
use crate::config::GameConfig;
use crate::highscores::HighScores;
use crate::sim::{GameState, Phase, TickInput, tick};
use crate::snapshot::{GameOverView, PlayingView, Snapshot};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    StartMenu,
    Playing,
    GameOver,
}

/// Normalized input, independent of the device it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    ToggleDirection,
    Confirm,
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Source of input events, drained once per frame
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Draws one frame from a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Game controller
#[derive(Debug, Clone)]
pub struct Game {
    screen: Screen,
    state: GameState,
    config: GameConfig,
    /// Runs started this session
    runs: u64,
    high_scores: HighScores,
    /// Leaderboard rank of the last finished run
    last_rank: Option<usize>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            screen: Screen::StartMenu,
            state: GameState::new(config.seed),
            config,
            runs: 0,
            high_scores: HighScores::new(),
            last_rank: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Handle this frame's input and, while playing, run one tick at `now`
    pub fn frame(&mut self, events: &[InputEvent], now: f64) -> FrameOutcome {
        let mut toggle = false;
        for event in events {
            match event {
                InputEvent::Quit => {
                    log::info!("Quit requested");
                    return FrameOutcome::Quit;
                }
                InputEvent::ToggleDirection => {
                    if self.screen == Screen::Playing {
                        toggle = !toggle;
                    }
                }
                InputEvent::Confirm => match self.screen {
                    Screen::StartMenu => self.start_run(),
                    Screen::GameOver => self.screen = Screen::StartMenu,
                    Screen::Playing => {}
                },
            }
        }

        if self.screen == Screen::Playing {
            if self.config.autopilot && autopilot::steer(&self.state) {
                toggle = !toggle;
            }
            tick(
                &mut self.state,
                &TickInput {
                    toggle_direction: toggle,
                },
                now,
            );
            for event in &self.state.events {
                log::debug!("{:?}", event);
            }
            if self.state.phase == Phase::GameOver {
                self.finish_run();
            }
        }

        FrameOutcome::Continue
    }

    /// Frame-stable view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        match self.screen {
            Screen::StartMenu => Snapshot::StartMenu {
                best: self.high_scores.top_score(),
            },
            Screen::Playing => Snapshot::Playing(PlayingView::capture(&self.state)),
            Screen::GameOver => Snapshot::GameOver(GameOverView {
                score: self.state.score as u64,
                stage: self.state.stage,
                rank: self.last_rank,
                best: self.high_scores.top_score(),
            }),
        }
    }

    fn start_run(&mut self) {
        let seed = self.config.seed.wrapping_add(self.runs);
        self.runs += 1;
        self.state = GameState::new(seed);
        self.last_rank = None;
        self.screen = Screen::Playing;
        log::info!("Run {} started (seed {:#x})", self.runs, seed);
    }

    fn finish_run(&mut self) {
        let score = self.state.score as u64;
        self.last_rank = self.high_scores.add_score(score, self.state.stage);
        self.screen = Screen::GameOver;
        log::info!(
            "Run {} over: score {} on {}",
            self.runs,
            score,
            self.state.stage.label()
        );
    }
}

/// Drive the game until input asks to quit. Returns the number of frames
/// rendered.
///
/// Each frame reads the clock once, polls input, steps the controller,
/// renders, then waits for the next frame deadline.
pub fn run(
    game: &mut Game,
    clock: &impl Clock,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
) -> u64 {
    let mut timer = FrameTimer::new(game.config().target_fps);
    let mut frames = 0;

    loop {
        let now = clock.now();
        timer.begin_frame(now);

        let events = input.poll();
        if game.frame(&events, now) == FrameOutcome::Quit {
            break;
        }
        renderer.render(&game.snapshot());
        frames += 1;

        clock.wait_until(timer.next_deadline());
    }

    match timer.fps() {
        Some(fps) => log::info!("Stopped after {} frames ({:.1} fps)", frames, fps),
        None => log::info!("Stopped after {} frames", frames),
    }
    frames
}
