//! Skeleton input from the external landmark tracker
//!
//! Landmarks follow the 33-point MediaPipe Pose topology with x/y normalized
//! to [0,1] and a visibility confidence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::VISIBILITY_THRESHOLD;

/// MediaPipe Pose landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Points that can hit targets, tested in this order
pub const INTERACTION_POINTS: [LandmarkIndex; 5] = [
    LandmarkIndex::Nose,
    LandmarkIndex::LeftIndex,
    LandmarkIndex::RightIndex,
    LandmarkIndex::LeftWrist,
    LandmarkIndex::RightWrist,
];

/// Bone segments drawn between landmarks
pub const POSE_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 12] = {
    use LandmarkIndex::*;
    [
        // Arms
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (LeftShoulder, RightShoulder),
        // Torso
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        // Legs
        (LeftHip, LeftKnee),
        (LeftKnee, LeftAnkle),
        (RightHip, RightKnee),
        (RightKnee, RightAnkle),
    ]
};

/// Single tracked point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X (0.0-1.0)
    pub x: f32,
    /// Normalized Y (0.0-1.0)
    pub y: f32,
    /// Confidence (0.0-1.0)
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility > VISIBILITY_THRESHOLD
    }

    pub fn normalized(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One frame of tracker output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    landmarks: Vec<Landmark>,
}

impl Skeleton {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build from packed `[x, y, visibility, x, y, visibility, ...]`.
    /// A trailing partial triple is ignored.
    pub fn from_flat(values: &[f32]) -> Self {
        let landmarks = values
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        Self { landmarks }
    }

    /// `None` when the tracker delivered fewer points than `index`
    pub fn get(&self, index: LandmarkIndex) -> Option<&Landmark> {
        self.landmarks.get(index.index())
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_drops_partial_triple() {
        let skeleton = Skeleton::from_flat(&[0.1, 0.2, 0.9, 0.3, 0.4, 0.8, 0.5]);
        assert_eq!(skeleton.len(), 2);
        assert_eq!(skeleton.get(LandmarkIndex::LeftEyeInner), Some(&Landmark::new(0.3, 0.4, 0.8)));
        assert_eq!(skeleton.get(LandmarkIndex::RightWrist), None);
    }

    #[test]
    fn test_visibility_threshold_is_exclusive() {
        assert!(!Landmark::new(0.0, 0.0, 0.5).is_visible());
        assert!(Landmark::new(0.0, 0.0, 0.51).is_visible());
    }

    #[test]
    fn test_interaction_points_indices() {
        let indices: Vec<usize> = INTERACTION_POINTS.iter().map(|i| i.index()).collect();
        assert_eq!(indices, vec![0, 19, 20, 15, 16]);
        assert_eq!(LandmarkIndex::RightFootIndex.index() + 1, LandmarkIndex::COUNT);
    }
}
