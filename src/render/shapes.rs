//! Drawables for targets and particles

use super::{Drawable, Glow, Hsl, Stroke};
use crate::audio::AudioVisuals;
use crate::sim::motion::{beat_scale, pulse_radius};
use crate::sim::state::{Particle, ParticleShape, Target, TargetKind};

/// Base emoji size before the bass pulse
const LABEL_SIZE: f32 = 14.0;
const PARTICLE_GLOW: f32 = 10.0;

/// Pulsing disc plus emoji label for one target.
///
/// With `pulse` off the render radius and label size stay at rest values.
pub fn target_drawables(target: &Target, audio: &AudioVisuals, pulse: bool) -> [Drawable; 2] {
    let (radius, label_scale) = if pulse {
        (pulse_radius(target.radius, audio.mid), beat_scale(audio.bass))
    } else {
        (target.radius, 1.0)
    };

    let (line_width, glow_blur) = match target.kind {
        TargetKind::HighEnergy => (4.0, 25.0),
        TargetKind::Standard => (3.0, 15.0),
    };
    let outline = target.glow_color();

    [
        Drawable::Circle {
            center: target.pos,
            radius,
            fill: Hsl::new(target.hue as f32, 100.0, 50.0).with_alpha(0.6),
            stroke: Some(Stroke {
                color: outline,
                width: line_width,
            }),
            glow: Some(Glow {
                color: outline,
                blur: glow_blur,
            }),
            alpha: 1.0,
        },
        Drawable::Glyph {
            text: target.emoji(),
            position: target.pos,
            size: LABEL_SIZE * label_scale,
            color: Hsl::WHITE,
        },
    ]
}

/// Fading, shrinking particle; opacity and size follow remaining life
pub fn particle_drawable(particle: &Particle) -> Drawable {
    let radius = particle.size * particle.life;
    let glow = Some(Glow {
        color: particle.color,
        blur: PARTICLE_GLOW,
    });
    match particle.shape {
        ParticleShape::Circle => Drawable::Circle {
            center: particle.pos,
            radius,
            fill: particle.color,
            stroke: None,
            glow,
            alpha: particle.life,
        },
        ParticleShape::Star => Drawable::Star {
            center: particle.pos,
            radius,
            fill: particle.color,
            glow,
            alpha: particle.life,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn target(kind: TargetKind) -> Target {
        Target {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            radius: 20.0,
            kind,
            emoji_index: 0,
            hue: 200,
            created_at_ms: 0.0,
        }
    }

    #[test]
    fn test_target_pulses_with_mid() {
        let audio = AudioVisuals::new(0.0, 1.0, 0.0);
        let [disc, _] = target_drawables(&target(TargetKind::Standard), &audio, true);
        match disc {
            Drawable::Circle { radius, .. } => assert!((radius - 26.0).abs() < 1e-4),
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_reduced_motion_keeps_rest_size() {
        let audio = AudioVisuals::new(1.0, 1.0, 1.0);
        let [disc, label] = target_drawables(&target(TargetKind::HighEnergy), &audio, false);
        assert!(matches!(disc, Drawable::Circle { radius, .. } if radius == 20.0));
        assert!(matches!(
            label,
            Drawable::Glyph { size, text, .. } if size == 14.0 && text == "🔥"
        ));
    }

    #[test]
    fn test_particle_scales_with_life() {
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Hsl::new(10.0, 100.0, 60.0),
            life: 0.5,
            size: 10.0,
            shape: ParticleShape::Star,
        };
        match particle_drawable(&particle) {
            Drawable::Star { radius, alpha, .. } => {
                assert_eq!(radius, 5.0);
                assert_eq!(alpha, 0.5);
            }
            other => panic!("expected star, got {other:?}"),
        }
    }
}
