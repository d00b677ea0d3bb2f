//! Per-frame simulation tick
//!
//! One call per pose delivery. The order is fixed:
//! surface sync → audio → targets → skeleton + hits → particles → spawn.

use glam::Vec2;
use serde::Serialize;

use super::collision::detect;
use super::explosion::explode;
use super::motion::{advance_particle, advance_target, beat_scale};
use super::spawn::maybe_spawn;
use super::state::{GameState, Surface, TargetKind};
use crate::audio::AudioVisuals;
use crate::pose::Skeleton;
use crate::render::{Drawable, particle_drawable, skeleton_drawables, target_drawables};
use crate::settings::Settings;

/// Everything the outside world hands one tick
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// `None` until the tracker has locked on
    pub skeleton: Option<&'a Skeleton>,
    /// Current container size
    pub surface: Surface,
    /// Audio polled for this tick
    pub audio: AudioVisuals,
    /// Clock time of this tick
    pub now_ms: f64,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SurfaceResized {
        width: f32,
        height: f32,
    },
    TargetSpawned {
        id: u32,
        kind: TargetKind,
    },
    TargetHit {
        id: u32,
        kind: TargetKind,
        points: u32,
        position: Vec2,
        score: u64,
        combo: u32,
    },
    /// Score crossed into a new band; the commentary trigger listens for this
    Milestone {
        score: u64,
        combo: u32,
    },
}

/// What the renderer and HUD get back from a tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    /// Back to front
    pub drawables: Vec<Drawable>,
    pub score: u64,
    pub combo: u32,
    pub events: Vec<GameEvent>,
    /// New commentary line, if one arrived since the last frame
    pub commentary: Option<String>,
}

impl Frame {
    pub fn milestones(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            GameEvent::Milestone { score, combo } => Some((score, combo)),
            _ => None,
        })
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput<'_>, settings: &Settings) -> Frame {
    state.time_ticks += 1;
    let mut frame = Frame::default();

    // Follow the container size
    if input.surface != state.surface {
        log::debug!(
            "surface resized to {}x{}",
            input.surface.width,
            input.surface.height
        );
        state.surface = input.surface;
        frame.events.push(GameEvent::SurfaceResized {
            width: input.surface.width,
            height: input.surface.height,
        });
    }
    let surface = state.surface;

    // Nothing can be placed on a surface that isn't laid out yet
    if surface.is_empty() {
        frame.score = state.score();
        frame.combo = state.combo();
        return frame;
    }

    let audio = input.audio;
    let pulse = settings.pulse_enabled();

    // Targets
    for target in &mut state.targets {
        advance_target(target, surface);
        frame
            .drawables
            .extend(target_drawables(target, &audio, pulse));
    }

    // Skeleton and hits
    if let Some(skeleton) = input.skeleton {
        if settings.show_skeleton {
            let scale = if pulse { beat_scale(audio.bass) } else { 1.0 };
            skeleton_drawables(skeleton, surface, scale, input.now_ms, &mut frame.drawables);
        }

        for hit in detect(skeleton, &mut state.targets, surface) {
            let target = hit.target;
            let burst = explode(
                &mut state.rng,
                target.pos,
                target.glow_color(),
                target.kind.intensity(),
            );
            state.particles.extend(burst);

            let outcome = state.ledger.register_hit(target.points());
            frame.events.push(GameEvent::TargetHit {
                id: target.id,
                kind: target.kind,
                points: target.points(),
                position: target.pos,
                score: outcome.score,
                combo: outcome.combo,
            });
            if let Some(milestone) = outcome.milestone {
                log::info!("milestone at score {} (combo {})", milestone.score, milestone.combo);
                frame.events.push(GameEvent::Milestone {
                    score: milestone.score,
                    combo: milestone.combo,
                });
            }
        }

        // Oldest particles go first when over the cap
        let max = settings.max_particles();
        if state.particles.len() > max {
            let excess = state.particles.len() - max;
            state.particles.drain(..excess);
        }
    }

    // Particles
    let drawables = &mut frame.drawables;
    state.particles.retain_mut(|particle| {
        let alive = advance_particle(particle);
        if alive {
            drawables.push(particle_drawable(particle));
        }
        alive
    });

    // Spawning
    let high_energy = audio.is_strong_beat();
    if let Some(id) = maybe_spawn(state, surface, high_energy, input.now_ms) {
        frame.events.push(GameEvent::TargetSpawned {
            id,
            kind: TargetKind::from_energy(high_energy),
        });
    }

    frame.score = state.score();
    frame.combo = state.combo();
    frame
}
