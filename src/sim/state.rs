//! Game state and core simulation types
//!
//! Everything the tick mutates lives here and is owned by `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ledger::ScoreLedger;
use crate::consts::*;
use crate::render::Hsl;

/// Emoji pool for standard targets
pub const STANDARD_EMOJIS: [&str; 6] = ["🍭", "🍬", "⚡️", "💎", "🎵", "🌟"];
/// Emoji pool for high-energy targets
pub const HIGH_ENERGY_EMOJIS: [&str; 6] = ["🔥", "💣", "🚀", "🎸", "💿", "👑"];

/// Target category, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Standard,
    /// Spawned during a strong-beat window: bigger, faster, worth more
    HighEnergy,
}

impl TargetKind {
    pub fn from_energy(high_energy: bool) -> Self {
        if high_energy {
            TargetKind::HighEnergy
        } else {
            TargetKind::Standard
        }
    }

    pub fn points(self) -> u32 {
        match self {
            TargetKind::Standard => STANDARD_POINTS,
            TargetKind::HighEnergy => HIGH_ENERGY_POINTS,
        }
    }

    /// Velocity components are drawn from ±speed/2
    pub fn speed(self) -> f32 {
        match self {
            TargetKind::Standard => STANDARD_SPEED,
            TargetKind::HighEnergy => HIGH_ENERGY_SPEED,
        }
    }

    pub fn size_multiplier(self) -> f32 {
        match self {
            TargetKind::Standard => 1.0,
            TargetKind::HighEnergy => HIGH_ENERGY_SIZE_MULTIPLIER,
        }
    }

    /// Explosion intensity when this target is hit
    pub fn intensity(self) -> f32 {
        match self {
            TargetKind::Standard => 1.0,
            TargetKind::HighEnergy => HIGH_ENERGY_INTENSITY,
        }
    }

    pub fn emojis(self) -> &'static [&'static str; 6] {
        match self {
            TargetKind::Standard => &STANDARD_EMOJIS,
            TargetKind::HighEnergy => &HIGH_ENERGY_EMOJIS,
        }
    }
}

/// A hittable, bouncing target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius (the rendered radius pulses, this one doesn't)
    pub radius: f32,
    pub kind: TargetKind,
    /// Index into the kind's emoji pool
    pub emoji_index: usize,
    /// 0-359
    pub hue: u16,
    /// Clock time at spawn; never used for removal
    pub created_at_ms: f64,
}

impl Target {
    pub fn emoji(&self) -> &'static str {
        let pool = self.kind.emojis();
        pool[self.emoji_index % pool.len()]
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Color shared by the outline and the explosion
    pub fn glow_color(&self) -> Hsl {
        Hsl::new(self.hue as f32, 100.0, 60.0)
    }
}

/// Particle shape, picked 50/50 at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    Star,
    Circle,
}

/// A particle for hit feedback
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Hsl,
    pub life: f32, // 0-1, decreases every tick
    pub size: f32,
    pub shape: ParticleShape,
}

/// Drawing surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero-sized, not yet laid out or non-finite surface can't host a
    /// simulation step
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }

    /// Scale a normalized [0,1] point to surface pixels
    pub fn scale(&self, normalized: Vec2) -> Vec2 {
        Vec2::new(normalized.x * self.width, normalized.y * self.height)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG driving spawns and explosions
    pub rng: Pcg32,
    /// Score, combo and milestone bookkeeping
    pub ledger: ScoreLedger,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Surface the last tick ran against
    pub surface: Surface,
    /// Live targets, in spawn order
    pub targets: Vec<Target>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Clock time of the last spawn attempt
    pub last_spawn_ms: Option<f64>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ledger: ScoreLedger::new(),
            time_ticks: 0,
            surface: Surface::default(),
            targets: Vec::with_capacity(MAX_TARGETS),
            particles: Vec::new(),
            last_spawn_ms: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> u64 {
        self.ledger.score()
    }

    pub fn combo(&self) -> u32 {
        self.ledger.combo()
    }
}
