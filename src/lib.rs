//! Neon Pulse - a motion-controlled rhythm game engine
//!
//! Core modules:
//! - `sim`: Per-tick simulation (targets, particles, collisions, score)
//! - `pose`: Skeleton input from an external landmark tracker
//! - `audio`: Band-energy input from an external spectrum analyser
//! - `render`: Drawable primitives handed to the display surface
//! - `commentary`: Background hype-text requests on score milestones
//! - `engine`: Session driver (clock, pause/resume, tick gating)
//! - `settings`: Player preferences

pub mod audio;
pub mod clock;
pub mod commentary;
pub mod engine;
pub mod error;
pub mod pose;
pub mod render;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Engine, deliver};
pub use error::{Error, Result};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Maximum number of live targets
    pub const MAX_TARGETS: usize = 30;
    /// Spawn keeps targets this far from every surface edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Spawn interval while the music is in a strong-beat window (ms)
    pub const HIGH_ENERGY_SPAWN_INTERVAL_MS: f64 = 400.0;
    /// Spawn interval otherwise (ms)
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Bass energy above this counts as a strong beat
    pub const STRONG_BEAT_THRESHOLD: f32 = 0.7;

    /// Target geometry
    pub const TARGET_MIN_RADIUS: f32 = 15.0;
    pub const TARGET_RADIUS_SPREAD: f32 = 10.0;
    pub const HIGH_ENERGY_SIZE_MULTIPLIER: f32 = 1.4;

    /// Speed scale per category (velocity components span ±scale/2)
    pub const STANDARD_SPEED: f32 = 2.0;
    pub const HIGH_ENERGY_SPEED: f32 = 4.0;

    /// Score values
    pub const STANDARD_POINTS: u32 = 10;
    pub const HIGH_ENERGY_POINTS: u32 = 50;

    /// Landmarks below this visibility are ignored
    pub const VISIBILITY_THRESHOLD: f32 = 0.5;

    /// Particles per burst at intensity 1.0
    pub const PARTICLES_PER_BURST: f32 = 15.0;
    /// Burst intensity for high-energy targets
    pub const HIGH_ENERGY_INTENSITY: f32 = 2.0;
    /// Life lost per tick (~50 ticks, ~0.83s at 60 Hz)
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Score distance between two commentary requests
    pub const MILESTONE_STEP: u64 = 50;

    /// Render radius pulse from mid energy
    pub const MID_PULSE: f32 = 0.3;
    /// Skeleton/label scale pulse from bass energy
    pub const BASS_PULSE: f32 = 0.5;
}
