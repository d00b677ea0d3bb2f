//! Per-frame simulation
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Time comes in through `FrameInput`, never read from the system
//! - Stable iteration order (spawn order)
//! - No rendering surface or platform dependencies

pub mod collision;
pub mod explosion;
pub mod ledger;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, contact_point, detect};
pub use explosion::{burst_size, explode};
pub use ledger::{HitOutcome, Milestone, ScoreLedger};
pub use motion::{advance_particle, advance_target, beat_scale, pulse_radius};
pub use spawn::{maybe_spawn, spawn_interval_ms, spawn_target};
pub use state::{GameState, Particle, ParticleShape, Surface, Target, TargetKind};
pub use tick::{Frame, FrameInput, GameEvent, tick};
