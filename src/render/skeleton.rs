//! Neon skeleton overlay

use super::{Drawable, Glow, Hsl};
use crate::pose::{POSE_CONNECTIONS, Skeleton};
use crate::sim::state::Surface;

const BONE_WIDTH: f32 = 6.0;
const BONE_GLOW: f32 = 20.0;
const JOINT_RADIUS: f32 = 6.0;
const JOINT_GLOW: f32 = 10.0;

/// Hue of the bone color wheel; one full turn every 3.6 s
fn bone_hue(now_ms: f64) -> f32 {
    ((now_ms / 10.0) % 360.0) as f32
}

/// Append bones (both ends visible) then joints (each visible landmark).
pub fn skeleton_drawables(
    skeleton: &Skeleton,
    surface: Surface,
    beat_scale: f32,
    now_ms: f64,
    out: &mut Vec<Drawable>,
) {
    let hue = bone_hue(now_ms);

    for (start, end) in POSE_CONNECTIONS {
        let (Some(a), Some(b)) = (skeleton.get(start), skeleton.get(end)) else {
            continue;
        };
        if !(a.is_visible() && b.is_visible()) {
            continue;
        }
        out.push(Drawable::Line {
            from: surface.scale(a.normalized()),
            to: surface.scale(b.normalized()),
            width: BONE_WIDTH * beat_scale,
            color: Hsl::new(hue, 100.0, 60.0),
            glow: Some(Glow {
                color: Hsl::new(hue, 100.0, 75.0),
                blur: BONE_GLOW * beat_scale,
            }),
        });
    }

    for landmark in skeleton.landmarks().iter().filter(|l| l.is_visible()) {
        out.push(Drawable::Circle {
            center: surface.scale(landmark.normalized()),
            radius: JOINT_RADIUS * beat_scale,
            fill: Hsl::WHITE,
            stroke: None,
            glow: Some(Glow {
                color: Hsl::CYAN,
                blur: JOINT_GLOW,
            }),
            alpha: 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LandmarkIndex};

    fn full_skeleton(visibility: f32) -> Skeleton {
        Skeleton::new(vec![Landmark::new(0.5, 0.5, visibility); LandmarkIndex::COUNT])
    }

    #[test]
    fn test_visible_skeleton_draws_bones_and_joints() {
        let mut out = Vec::new();
        skeleton_drawables(&full_skeleton(0.9), Surface::new(100.0, 100.0), 1.0, 0.0, &mut out);
        let lines = out.iter().filter(|d| matches!(d, Drawable::Line { .. })).count();
        let joints = out.iter().filter(|d| matches!(d, Drawable::Circle { .. })).count();
        assert_eq!(lines, POSE_CONNECTIONS.len());
        assert_eq!(joints, LandmarkIndex::COUNT);
    }

    #[test]
    fn test_hidden_landmarks_are_skipped() {
        let mut out = Vec::new();
        skeleton_drawables(&full_skeleton(0.2), Surface::new(100.0, 100.0), 1.0, 0.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_bone_hue_wraps() {
        assert_eq!(bone_hue(3600.0), 0.0);
        assert_eq!(bone_hue(1200.0), 120.0);
    }
}
