//! Session driver
//!
//! Pose delivery is the clock: every tracker callback becomes one tick.
//! The engine reads time and audio, runs the pure simulation, forwards
//! milestones to the commentary trigger and picks up whatever line has
//! landed in the mailbox since the previous tick.

use std::cell::RefCell;

use crate::Settings;
use crate::audio::AudioFeed;
use crate::clock::Clock;
use crate::commentary::{CommentaryTrigger, INITIAL_COMMENTARY};
use crate::pose::Skeleton;
use crate::sim::{Frame, FrameInput, GameState, Surface, tick};

pub struct Engine {
    state: GameState,
    settings: Settings,
    clock: Box<dyn Clock>,
    audio: Box<dyn AudioFeed>,
    commentary: CommentaryTrigger,
    commentary_text: String,
    paused: bool,
}

impl Engine {
    pub fn new(
        seed: u64,
        settings: Settings,
        clock: Box<dyn Clock>,
        audio: Box<dyn AudioFeed>,
        commentary: CommentaryTrigger,
    ) -> Self {
        log::info!("session started (seed {seed}, quality {})", settings.quality.as_str());
        Self {
            state: GameState::new(seed),
            settings,
            clock,
            audio,
            commentary,
            commentary_text: INITIAL_COMMENTARY.to_string(),
            paused: false,
        }
    }

    /// Run one tick for a pose delivery. `None` while paused.
    pub fn on_pose(&mut self, skeleton: Option<&Skeleton>, surface: Surface) -> Option<Frame> {
        if self.paused {
            return None;
        }

        let input = FrameInput {
            skeleton,
            surface,
            audio: self.audio.sample(),
            now_ms: self.clock.now_ms(),
        };
        let mut frame = tick(&mut self.state, &input, &self.settings);

        for (score, combo) in frame.milestones() {
            self.commentary.fire(score, combo);
        }

        if let Some(text) = self.commentary.poll() {
            log::debug!("commentary: {text}");
            self.commentary_text.clone_from(&text);
            frame.commentary = Some(text);
        }

        Some(frame)
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("paused at score {}", self.state.score());
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::info!("resumed");
            self.paused = false;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start over with a fresh state; in-flight commentary is discarded
    pub fn reset(&mut self, seed: u64) {
        log::info!("session reset (seed {seed})");
        self.state = GameState::new(seed);
        self.commentary.cancel_pending();
        self.commentary_text = INITIAL_COMMENTARY.to_string();
        self.paused = false;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> u64 {
        self.state.score()
    }

    pub fn combo(&self) -> u32 {
        self.state.combo()
    }

    /// Line currently on display
    pub fn commentary(&self) -> &str {
        &self.commentary_text
    }
}

/// Hand a pose to a shared engine. A delivery that arrives while another
/// is still ticking is dropped.
pub fn deliver(
    engine: &RefCell<Engine>,
    skeleton: Option<&Skeleton>,
    surface: Surface,
) -> Option<Frame> {
    match engine.try_borrow_mut() {
        Ok(mut engine) => engine.on_pose(skeleton, surface),
        Err(_) => {
            log::debug!("tick already running, pose dropped");
            None
        }
    }
}
