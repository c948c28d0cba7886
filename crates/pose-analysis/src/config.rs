//! Pose heuristic configuration

use serde::{Deserialize, Serialize};

/// Thresholds for the pose heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Knee joint angle below which a rear leg counts as folded (degrees)
    pub leg_lift_angle_threshold: f32,

    /// Paw elevation relative to body height for a lifted leg
    pub leg_lift_height_ratio: f32,

    /// Hip-to-paw distance relative to body height below which the body
    /// counts as lowered
    pub squat_height_ratio: f32,

    /// Rear-paw spread relative to body height above which the stance
    /// counts as widened
    pub squat_width_ratio: f32,

    /// Keypoints below this confidence are treated as missing
    pub min_keypoint_confidence: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            leg_lift_angle_threshold: 40.0,
            leg_lift_height_ratio: 0.35,
            squat_height_ratio: 0.45,
            squat_width_ratio: 1.3,
            min_keypoint_confidence: 0.3,
        }
    }
}

impl PoseConfig {
    /// Strict profile (fewer false positives, may miss subtle poses)
    pub fn strict() -> Self {
        Self {
            leg_lift_angle_threshold: 35.0,
            leg_lift_height_ratio: 0.40,
            squat_height_ratio: 0.40,
            squat_width_ratio: 1.4,
            ..Default::default()
        }
    }

    /// Lenient profile (catches subtle poses, more false positives)
    pub fn lenient() -> Self {
        Self {
            leg_lift_angle_threshold: 45.0,
            leg_lift_height_ratio: 0.30,
            squat_height_ratio: 0.50,
            squat_width_ratio: 1.2,
            ..Default::default()
        }
    }
}
