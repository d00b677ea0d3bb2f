//! Hit feedback bursts

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleShape};
use crate::consts::PARTICLES_PER_BURST;
use crate::render::Hsl;

/// Particles in one burst (15 at intensity 1, 30 at intensity 2)
pub fn burst_size(intensity: f32) -> usize {
    (PARTICLES_PER_BURST * intensity).max(0.0).ceil() as usize
}

/// Radial burst of particles from `origin`.
///
/// Direction is uniform on the circle; speed in [2,7) and size in [5,15),
/// both scaled by `intensity`. Shapes split 50/50 between stars and circles.
pub fn explode<R: Rng>(rng: &mut R, origin: Vec2, color: Hsl, intensity: f32) -> Vec<Particle> {
    (0..burst_size(intensity))
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let speed = (2.0 + rng.random::<f32>() * 5.0) * intensity;
            let size = (5.0 + rng.random::<f32>() * 10.0) * intensity;
            let shape = if rng.random_bool(0.5) {
                ParticleShape::Star
            } else {
                ParticleShape::Circle
            };
            Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: 1.0,
                size,
                shape,
            }
        })
        .collect()
}
