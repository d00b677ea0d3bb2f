//! Per-tick motion for targets and particles
//!
//! Velocities are in surface pixels per tick. Targets reflect off the
//! surface edges; particles fly free and fade out.

use glam::Vec2;

use super::state::{Particle, Surface, Target};
use crate::consts::{BASS_PULSE, MID_PULSE, PARTICLE_DECAY};

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Move a target one tick and resolve wall contacts.
///
/// Each axis is handled on its own, so a corner contact bounces both
/// components in the same tick. A target whose edge crossed a wall is put
/// back touching it.
pub fn advance_target(target: &mut Target, surface: Surface) {
    target.pos += target.vel;
    let r = target.radius;

    if target.pos.x - r < 0.0 {
        target.pos.x = r;
        target.vel = reflect_velocity(target.vel, Vec2::X);
    }
    if target.pos.x + r > surface.width {
        target.pos.x = surface.width - r;
        target.vel = reflect_velocity(target.vel, Vec2::NEG_X);
    }
    if target.pos.y - r < 0.0 {
        target.pos.y = r;
        target.vel = reflect_velocity(target.vel, Vec2::Y);
    }
    if target.pos.y + r > surface.height {
        target.pos.y = surface.height - r;
        target.vel = reflect_velocity(target.vel, Vec2::NEG_Y);
    }
}

/// Move a particle one tick and burn one step of life.
///
/// Returns `false` once the particle is spent and must not be drawn.
pub fn advance_particle(particle: &mut Particle) -> bool {
    particle.pos += particle.vel;
    particle.life -= PARTICLE_DECAY;
    particle.life > 0.0
}

/// Rendered target radius; collision keeps using the stored radius
#[inline]
pub fn pulse_radius(radius: f32, mid: f32) -> f32 {
    radius * (1.0 + mid * MID_PULSE)
}

/// Scale for skeleton strokes and target labels
#[inline]
pub fn beat_scale(bass: f32) -> f32 {
    1.0 + bass * BASS_PULSE
}
