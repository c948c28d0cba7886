//! Animal keypoint model

use crate::GeometryError;
use serde::{Deserialize, Serialize};

/// Named anatomical landmarks in the fixed model output order.
///
/// The index mapping is part of the classifier contract: landmark `i` in
/// the model output is always the same body part, so conversion goes
/// through this table rather than positional convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointId {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftFrontPaw,
    RightFrontPaw,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftBackPaw,
    RightBackPaw,
    TailBase,
    TailEnd,
}

impl KeypointId {
    /// Number of landmarks in the model output
    pub const COUNT: usize = 19;

    /// All landmarks in index order
    pub const ALL: [KeypointId; Self::COUNT] = [
        KeypointId::Nose,
        KeypointId::LeftEye,
        KeypointId::RightEye,
        KeypointId::LeftEar,
        KeypointId::RightEar,
        KeypointId::LeftShoulder,
        KeypointId::RightShoulder,
        KeypointId::LeftElbow,
        KeypointId::RightElbow,
        KeypointId::LeftFrontPaw,
        KeypointId::RightFrontPaw,
        KeypointId::LeftHip,
        KeypointId::RightHip,
        KeypointId::LeftKnee,
        KeypointId::RightKnee,
        KeypointId::LeftBackPaw,
        KeypointId::RightBackPaw,
        KeypointId::TailBase,
        KeypointId::TailEnd,
    ];

    /// Fixed index of this landmark in the model output
    pub fn index(self) -> usize {
        self as usize
    }

    /// Landmark for a model output index
    pub fn from_index(index: usize) -> Option<KeypointId> {
        Self::ALL.get(index).copied()
    }
}

/// A detected 2D landmark with confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl Keypoint {
    /// Create a keypoint, clamping confidence into [0, 1]
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Position as an (x, y) pair
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// One frame's worth of keypoints for a single animal
#[derive(Debug, Clone, Default)]
pub struct DogPose {
    keypoints: Vec<Option<Keypoint>>,
}

impl DogPose {
    /// Build a pose from raw model output `[x, y, confidence]` triples in
    /// index order. Extra entries beyond the landmark table are ignored;
    /// missing trailing entries are treated as undetected landmarks.
    pub fn from_raw(raw: &[[f32; 3]]) -> Self {
        let mut keypoints = vec![None; KeypointId::COUNT];
        for (i, slot) in keypoints.iter_mut().enumerate() {
            if let Some(&[x, y, c]) = raw.get(i) {
                *slot = Some(Keypoint::new(x, y, c));
            }
        }
        Self { keypoints }
    }

    /// Set a single landmark (test construction and partial updates)
    pub fn set(&mut self, id: KeypointId, keypoint: Keypoint) {
        if self.keypoints.is_empty() {
            self.keypoints = vec![None; KeypointId::COUNT];
        }
        self.keypoints[id.index()] = Some(keypoint);
    }

    /// Look up a landmark, requiring at least `min_confidence`
    pub fn keypoint(
        &self,
        id: KeypointId,
        min_confidence: f32,
    ) -> Result<&Keypoint, GeometryError> {
        self.keypoints
            .get(id.index())
            .and_then(|slot| slot.as_ref())
            .filter(|kp| kp.confidence >= min_confidence)
            .ok_or(GeometryError::MissingKeypoint(id))
    }

    /// Mean position over all detected landmarks (actor centroid)
    pub fn centroid(&self) -> Option<(f32, f32)> {
        let detected: Vec<&Keypoint> =
            self.keypoints.iter().filter_map(|slot| slot.as_ref()).collect();
        if detected.is_empty() {
            return None;
        }
        let n = detected.len() as f32;
        let sx: f32 = detected.iter().map(|kp| kp.x).sum();
        let sy: f32 = detected.iter().map(|kp| kp.y).sum();
        Some((sx / n, sy / n))
    }

    /// Whether any landmark was detected at all
    pub fn is_empty(&self) -> bool {
        self.keypoints.iter().all(|slot| slot.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for id in KeypointId::ALL {
            assert_eq!(KeypointId::from_index(id.index()), Some(id));
        }
        assert_eq!(KeypointId::from_index(KeypointId::COUNT), None);
    }

    #[test]
    fn test_fixed_table_positions() {
        assert_eq!(KeypointId::Nose.index(), 0);
        assert_eq!(KeypointId::LeftShoulder.index(), 5);
        assert_eq!(KeypointId::LeftHip.index(), 11);
        assert_eq!(KeypointId::RightBackPaw.index(), 16);
        assert_eq!(KeypointId::TailEnd.index(), 18);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Keypoint::new(0.0, 0.0, 1.7).confidence, 1.0);
        assert_eq!(Keypoint::new(0.0, 0.0, -0.2).confidence, 0.0);
    }

    #[test]
    fn test_missing_keypoint_lookup() {
        let pose = DogPose::from_raw(&[[10.0, 20.0, 0.9]]);
        assert!(pose.keypoint(KeypointId::Nose, 0.3).is_ok());
        assert_eq!(
            pose.keypoint(KeypointId::TailEnd, 0.3),
            Err(GeometryError::MissingKeypoint(KeypointId::TailEnd))
        );
    }

    #[test]
    fn test_low_confidence_treated_as_missing() {
        let pose = DogPose::from_raw(&[[10.0, 20.0, 0.1]]);
        assert_eq!(
            pose.keypoint(KeypointId::Nose, 0.3),
            Err(GeometryError::MissingKeypoint(KeypointId::Nose))
        );
    }
}
