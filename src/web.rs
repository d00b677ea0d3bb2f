//! Browser host bindings
//!
//! The page owns the camera, the pose tracker and the audio analyser. It
//! pushes audio into the game whenever the analyser updates and calls
//! `on_pose` from the tracker callback, drawing whatever frame comes back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::audio::{AudioVisuals, SharedFeed};
use crate::clock::SystemClock;
use crate::commentary::{CommentaryTrigger, Dispatch, INITIAL_COMMENTARY};
use crate::pose::Skeleton;
use crate::sim::Surface;
use crate::{Engine, Settings, deliver};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Neon Pulse starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    engine: RefCell<Engine>,
    audio: Rc<Cell<AudioVisuals>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGame {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(seed as u64);
        let audio = Rc::new(Cell::new(AudioVisuals::default()));
        let engine = Engine::new(
            seed,
            settings,
            Box::new(SystemClock::new()),
            Box::new(SharedFeed::new(Rc::clone(&audio))),
            CommentaryTrigger::preset(seed, Dispatch::Inline),
        );
        WebGame {
            engine: RefCell::new(engine),
            audio,
        }
    }

    /// Latest band energies, each in [0, 1]
    pub fn set_audio(&self, bass: f32, mid: f32, treble: f32) {
        self.audio.set(AudioVisuals::new(bass, mid, treble));
    }

    /// Raw analyser bins (byte frequency data)
    pub fn set_spectrum(&self, bins: &[u8]) {
        self.audio.set(AudioVisuals::from_spectrum(bins));
    }

    /// One tracker result. `landmarks` is flat `[x, y, visibility, ...]`,
    /// absent until a body is found. Returns the frame as JSON, or nothing
    /// when paused or still busy with the previous pose.
    pub fn on_pose(
        &self,
        landmarks: Option<Box<[f32]>>,
        width: f32,
        height: f32,
    ) -> Option<String> {
        let skeleton = landmarks.map(|flat| Skeleton::from_flat(&flat));
        let frame = deliver(&self.engine, skeleton.as_ref(), Surface::new(width, height))?;
        match serde_json::to_string(&frame) {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("frame serialization failed: {e}");
                None
            }
        }
    }

    pub fn pause(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.pause();
        }
    }

    pub fn resume(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.resume();
        }
    }

    pub fn reset(&self, seed: u32) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => {
                let seed = engine.settings().seed.unwrap_or(seed as u64);
                engine.reset(seed);
            }
            Err(_) => log::warn!("reset ignored, tick in progress"),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.engine.try_borrow().is_ok_and(|e| e.is_paused())
    }

    /// JS numbers are f64; scores stay well inside 2^53
    pub fn score(&self) -> f64 {
        self.engine.try_borrow().map_or(0.0, |e| e.score() as f64)
    }

    pub fn combo(&self) -> u32 {
        self.engine.try_borrow().map_or(0, |e| e.combo())
    }

    pub fn commentary(&self) -> String {
        self.engine
            .try_borrow()
            .map_or_else(|_| INITIAL_COMMENTARY.to_string(), |e| e.commentary().to_string())
    }

    /// Persist the current preferences
    pub fn save_settings(&self) {
        let Ok(engine) = self.engine.try_borrow() else {
            return;
        };
        if let Err(e) = engine.settings().save() {
            log::warn!("settings not saved: {e}");
        }
    }
}
