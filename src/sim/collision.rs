//! Body point vs. target hit detection
//!
//! Only the nose, index fingertips and wrists can hit. A point counts when
//! the tracker is confident about it and it sits strictly inside a target's
//! stored (unpulsed) radius.

use super::state::{Surface, Target};
use crate::pose::{INTERACTION_POINTS, LandmarkIndex, Skeleton};

/// A target taken out this tick
#[derive(Debug, Clone)]
pub struct Hit {
    pub target: Target,
    /// First interaction point that reached it
    pub point: LandmarkIndex,
}

/// First interaction point, in `INTERACTION_POINTS` order, touching `target`
pub fn contact_point(
    skeleton: &Skeleton,
    target: &Target,
    surface: Surface,
) -> Option<LandmarkIndex> {
    INTERACTION_POINTS.into_iter().find(|&index| {
        skeleton
            .get(index)
            .filter(|landmark| landmark.is_visible())
            .is_some_and(|landmark| {
                surface.scale(landmark.normalized()).distance(target.pos) < target.radius
            })
    })
}

/// Remove every touched target and return them as hits.
///
/// Walks the list back to front so removal doesn't disturb the walk; hits
/// come out in that order. Each target is tested once, so it can be hit at
/// most once per tick, while one point may take out several targets.
pub fn detect(skeleton: &Skeleton, targets: &mut Vec<Target>, surface: Surface) -> Vec<Hit> {
    let mut hits = Vec::new();
    for i in (0..targets.len()).rev() {
        if let Some(point) = contact_point(skeleton, &targets[i], surface) {
            let target = targets.remove(i);
            log::debug!("target {} hit by {point:?}", target.id);
            hits.push(Hit { target, point });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;
    use crate::sim::state::TargetKind;
    use glam::Vec2;

    const SURFACE: Surface = Surface {
        width: 1000.0,
        height: 1000.0,
    };

    fn target(id: u32, x: f32, y: f32, radius: f32) -> Target {
        Target {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            kind: TargetKind::Standard,
            emoji_index: 0,
            hue: 90,
            created_at_ms: 0.0,
        }
    }

    /// Skeleton with every point parked off-surface except `set`
    fn skeleton_with(set: &[(LandmarkIndex, Landmark)]) -> Skeleton {
        let mut landmarks = vec![Landmark::new(-1.0, -1.0, 0.9); LandmarkIndex::COUNT];
        for &(index, landmark) in set {
            landmarks[index.index()] = landmark;
        }
        Skeleton::new(landmarks)
    }

    #[test]
    fn test_nose_hits_centered_target() {
        let skeleton = skeleton_with(&[(LandmarkIndex::Nose, Landmark::new(0.5, 0.5, 0.9))]);
        let mut targets = vec![target(1, 500.0, 500.0, 20.0)];
        let hits = detect(&skeleton, &mut targets, SURFACE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target.id, 1);
        assert_eq!(hits[0].point, LandmarkIndex::Nose);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_low_visibility_point_is_ignored() {
        let skeleton = skeleton_with(&[(LandmarkIndex::RightWrist, Landmark::new(0.5, 0.5, 0.4))]);
        let mut targets = vec![target(1, 500.0, 500.0, 20.0)];
        assert!(detect(&skeleton, &mut targets, SURFACE).is_empty());
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_point_outside_radius_misses() {
        let skeleton = skeleton_with(&[(LandmarkIndex::LeftIndex, Landmark::new(0.525, 0.5, 0.9))]);
        let mut targets = vec![target(1, 500.0, 500.0, 20.0)];
        assert!(detect(&skeleton, &mut targets, SURFACE).is_empty());
    }

    #[test]
    fn test_non_interaction_points_never_hit() {
        let skeleton = skeleton_with(&[(LandmarkIndex::LeftKnee, Landmark::new(0.5, 0.5, 1.0))]);
        let mut targets = vec![target(1, 500.0, 500.0, 20.0)];
        assert!(detect(&skeleton, &mut targets, SURFACE).is_empty());
    }

    #[test]
    fn test_first_point_in_order_wins() {
        let skeleton = skeleton_with(&[
            (LandmarkIndex::RightWrist, Landmark::new(0.5, 0.5, 0.9)),
            (LandmarkIndex::RightIndex, Landmark::new(0.505, 0.5, 0.9)),
        ]);
        let mut targets = vec![target(1, 500.0, 500.0, 20.0)];
        let hits = detect(&skeleton, &mut targets, SURFACE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, LandmarkIndex::RightIndex);
    }

    #[test]
    fn test_one_point_takes_overlapping_targets() {
        let skeleton = skeleton_with(&[(LandmarkIndex::Nose, Landmark::new(0.5, 0.5, 0.9))]);
        let mut targets = vec![
            target(1, 495.0, 500.0, 20.0),
            target(2, 900.0, 900.0, 20.0),
            target(3, 505.0, 500.0, 20.0),
        ];
        let hits = detect(&skeleton, &mut targets, SURFACE);
        let ids: Vec<u32> = hits.iter().map(|h| h.target.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, 2);
    }

    #[test]
    fn test_truncated_skeleton_is_tolerated() {
        let skeleton = Skeleton::new(vec![Landmark::new(0.5, 0.5, 0.9)]);
        let mut targets = vec![target(1, 500.0, 500.0, 20.0)];
        assert_eq!(detect(&skeleton, &mut targets, SURFACE).len(), 1);
    }
}
