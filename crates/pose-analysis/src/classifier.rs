//! Leg-lift, squat, and tail heuristics

use crate::geometry::{distance, joint_angle};
use crate::keypoints::{DogPose, KeypointId};
use crate::{GeometryError, PoseConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which urination pose a signal corresponds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseBehavior {
    LegLift,
    Squat,
}

/// Per-frame structured pose signal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PoseSignal {
    pub leg_lift_detected: bool,
    pub leg_lift_confidence: f32,
    pub squat_detected: bool,
    pub squat_confidence: f32,
    pub tail_raised: bool,
}

impl PoseSignal {
    /// Whether either urination pose is present this frame
    pub fn positive(&self) -> bool {
        self.leg_lift_detected || self.squat_detected
    }

    /// Strongest heuristic confidence this frame
    pub fn confidence(&self) -> f32 {
        self.leg_lift_confidence.max(self.squat_confidence)
    }

    /// Dominant behavior; leg-lift takes precedence when both fire
    pub fn behavior(&self) -> Option<PoseBehavior> {
        if self.leg_lift_detected {
            Some(PoseBehavior::LegLift)
        } else if self.squat_detected {
            Some(PoseBehavior::Squat)
        } else {
            None
        }
    }
}

/// Stateless per-frame pose classifier
pub struct PoseClassifier {
    config: PoseConfig,
}

impl PoseClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(config: PoseConfig) -> Self {
        Self { config }
    }

    /// Classify one frame of keypoints into a [`PoseSignal`].
    ///
    /// Never fails: a heuristic that cannot be evaluated (missing keypoint,
    /// degenerate geometry) contributes a negative, zero-confidence result
    /// for this frame only.
    pub fn classify(&self, pose: &DogPose) -> PoseSignal {
        let (leg_lift_detected, leg_lift_confidence) =
            self.detect_leg_lift(pose).unwrap_or_else(|e| {
                debug!("leg lift heuristic skipped: {}", e);
                (false, 0.0)
            });

        let (squat_detected, squat_confidence) = self.detect_squat(pose).unwrap_or_else(|e| {
            debug!("squat heuristic skipped: {}", e);
            (false, 0.0)
        });

        let tail_raised = self.tail_raised(pose).unwrap_or_else(|e| {
            debug!("tail heuristic skipped: {}", e);
            false
        });

        PoseSignal {
            leg_lift_detected,
            leg_lift_confidence,
            squat_detected,
            squat_confidence,
            tail_raised,
        }
    }

    /// Detect a lifted rear leg (typical male urination pose).
    ///
    /// A leg is lifted when its hip-knee-paw angle is folded below the
    /// angle threshold and the paw's vertical displacement from the hip
    /// exceeds the body-height reference scaled by the height ratio.
    pub fn detect_leg_lift(&self, pose: &DogPose) -> Result<(bool, f32), GeometryError> {
        let min_conf = self.config.min_keypoint_confidence;

        let left_hip = pose.keypoint(KeypointId::LeftHip, min_conf)?.position();
        let left_knee = pose.keypoint(KeypointId::LeftKnee, min_conf)?.position();
        let left_paw = pose.keypoint(KeypointId::LeftBackPaw, min_conf)?.position();

        let right_hip = pose.keypoint(KeypointId::RightHip, min_conf)?.position();
        let right_knee = pose.keypoint(KeypointId::RightKnee, min_conf)?.position();
        let right_paw = pose.keypoint(KeypointId::RightBackPaw, min_conf)?.position();

        let body_height = self.body_height(pose)?;

        let left_angle = joint_angle(left_hip, left_knee, left_paw);
        let left_height = (left_paw.1 - left_hip.1).abs();

        let right_angle = joint_angle(right_hip, right_knee, right_paw);
        let right_height = (right_paw.1 - right_hip.1).abs();

        let angle_threshold = self.config.leg_lift_angle_threshold;
        let height_ratio = self.config.leg_lift_height_ratio;

        let left_lifted =
            left_angle < angle_threshold && left_height > body_height * height_ratio;
        let right_lifted =
            right_angle < angle_threshold && right_height > body_height * height_ratio;

        let left_conf = if left_lifted {
            (left_angle / angle_threshold).min(1.0)
        } else {
            0.0
        };
        let right_conf = if right_lifted {
            (right_angle / angle_threshold).min(1.0)
        } else {
            0.0
        };

        Ok((left_lifted || right_lifted, left_conf.max(right_conf)))
    }

    /// Detect a squat (typical female urination pose).
    ///
    /// The body counts as lowered when the hip-to-rear-paw distance shrinks
    /// relative to the shoulder-hip reference, and the stance as widened
    /// when the rear paws spread beyond it. Confidence blends both margins.
    pub fn detect_squat(&self, pose: &DogPose) -> Result<(bool, f32), GeometryError> {
        let min_conf = self.config.min_keypoint_confidence;

        let hip = pose.keypoint(KeypointId::LeftHip, min_conf)?.position();
        let left_paw = pose.keypoint(KeypointId::LeftBackPaw, min_conf)?.position();
        let right_paw = pose.keypoint(KeypointId::RightBackPaw, min_conf)?.position();

        let body_height = self.body_height(pose)?;

        let height_ratio = distance(hip, left_paw) / body_height;
        let width_ratio = distance(left_paw, right_paw) / body_height;

        let is_lowered = height_ratio < self.config.squat_height_ratio;
        let is_wide = width_ratio > self.config.squat_width_ratio;

        let confidence =
            ((1.0 - height_ratio) * 0.6 + (width_ratio - 1.0) * 0.4).clamp(0.0, 1.0);

        Ok((is_lowered && is_wide, confidence))
    }

    /// Whether the tail tip is at or above the tail base (image coordinates)
    pub fn tail_raised(&self, pose: &DogPose) -> Result<bool, GeometryError> {
        let min_conf = self.config.min_keypoint_confidence;

        let tail_base = pose.keypoint(KeypointId::TailBase, min_conf)?;
        let tail_end = pose.keypoint(KeypointId::TailEnd, min_conf)?;

        Ok(tail_end.y <= tail_base.y)
    }

    /// Shoulder-hip distance, the scale reference for all ratios
    fn body_height(&self, pose: &DogPose) -> Result<f32, GeometryError> {
        let min_conf = self.config.min_keypoint_confidence;

        let shoulder = pose.keypoint(KeypointId::LeftShoulder, min_conf)?.position();
        let hip = pose.keypoint(KeypointId::LeftHip, min_conf)?.position();

        let body_height = distance(shoulder, hip);
        if body_height <= f32::EPSILON {
            return Err(GeometryError::Degenerate("zero-length shoulder-hip reference"));
        }
        Ok(body_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoints::Keypoint;

    fn kp(x: f32, y: f32) -> Keypoint {
        Keypoint::new(x, y, 0.9)
    }

    /// Standing dog, side view, image coordinates (y grows downward)
    fn standing_pose() -> DogPose {
        let mut pose = DogPose::default();
        pose.set(KeypointId::LeftShoulder, kp(50.0, 50.0));
        pose.set(KeypointId::RightShoulder, kp(55.0, 50.0));
        pose.set(KeypointId::LeftHip, kp(100.0, 50.0));
        pose.set(KeypointId::RightHip, kp(105.0, 50.0));
        pose.set(KeypointId::LeftKnee, kp(100.0, 75.0));
        pose.set(KeypointId::RightKnee, kp(105.0, 75.0));
        pose.set(KeypointId::LeftBackPaw, kp(100.0, 100.0));
        pose.set(KeypointId::RightBackPaw, kp(105.0, 100.0));
        pose.set(KeypointId::TailBase, kp(110.0, 45.0));
        pose.set(KeypointId::TailEnd, kp(120.0, 55.0));
        pose
    }

    #[test]
    fn test_standing_pose_is_negative() {
        let classifier = PoseClassifier::new(PoseConfig::default());
        let signal = classifier.classify(&standing_pose());

        assert!(!signal.leg_lift_detected);
        assert!(!signal.squat_detected);
        assert!(!signal.tail_raised);
        assert!(!signal.positive());
        assert_eq!(signal.behavior(), None);
    }

    #[test]
    fn test_leg_lift_detected() {
        // Left rear leg folded (~35 degrees at the knee) with the paw
        // pulled up toward hip level.
        let mut pose = standing_pose();
        pose.set(KeypointId::LeftKnee, kp(90.0, 60.0));
        pose.set(KeypointId::LeftBackPaw, kp(95.0, 30.0));

        let classifier = PoseClassifier::new(PoseConfig::default());
        let (lifted, confidence) = classifier.detect_leg_lift(&pose).unwrap();

        assert!(lifted);
        assert!(confidence > 0.8 && confidence <= 1.0);

        let signal = classifier.classify(&pose);
        assert!(signal.positive());
        assert_eq!(signal.behavior(), Some(PoseBehavior::LegLift));
    }

    #[test]
    fn test_squat_detected() {
        // Body lowered (hip close to rear paw) with a wide rear stance.
        let mut pose = standing_pose();
        pose.set(KeypointId::LeftBackPaw, kp(105.0, 68.0));
        pose.set(KeypointId::RightBackPaw, kp(35.0, 80.0));
        // Keep the knees folded out of leg-lift range.
        pose.set(KeypointId::LeftKnee, kp(100.0, 60.0));
        pose.set(KeypointId::RightKnee, kp(105.0, 60.0));

        let classifier = PoseClassifier::new(PoseConfig::default());
        let (squatting, confidence) = classifier.detect_squat(&pose).unwrap();

        assert!(squatting);
        assert!(confidence > 0.4 && confidence <= 1.0);
    }

    #[test]
    fn test_tail_raised() {
        let mut pose = standing_pose();
        pose.set(KeypointId::TailEnd, kp(120.0, 40.0));

        let classifier = PoseClassifier::new(PoseConfig::default());
        assert!(classifier.tail_raised(&pose).unwrap());

        // Level tail counts as raised (<=)
        pose.set(KeypointId::TailEnd, kp(120.0, 45.0));
        assert!(classifier.tail_raised(&pose).unwrap());
    }

    #[test]
    fn test_missing_keypoint_degrades_gracefully() {
        let mut pose = standing_pose();
        pose.set(KeypointId::LeftKnee, Keypoint::new(100.0, 75.0, 0.05));

        let classifier = PoseClassifier::new(PoseConfig::default());
        assert_eq!(
            classifier.detect_leg_lift(&pose),
            Err(GeometryError::MissingKeypoint(KeypointId::LeftKnee))
        );

        // classify never propagates the failure
        let signal = classifier.classify(&pose);
        assert!(!signal.leg_lift_detected);
        assert_eq!(signal.leg_lift_confidence, 0.0);
    }

    #[test]
    fn test_empty_pose_is_fully_negative() {
        let classifier = PoseClassifier::new(PoseConfig::default());
        let signal = classifier.classify(&DogPose::default());

        assert!(!signal.positive());
        assert!(!signal.tail_raised);
        assert_eq!(signal.confidence(), 0.0);
    }

    #[test]
    fn test_degenerate_body_reference() {
        let mut pose = standing_pose();
        // Shoulder collapsed onto the hip: no usable scale reference.
        pose.set(KeypointId::LeftShoulder, kp(100.0, 50.0));

        let classifier = PoseClassifier::new(PoseConfig::default());
        assert_eq!(
            classifier.detect_leg_lift(&pose),
            Err(GeometryError::Degenerate("zero-length shoulder-hip reference"))
        );
    }
}
