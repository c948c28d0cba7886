//! Classifier input contract

use pose_analysis::DogPose;
use serde::{Deserialize, Serialize};

/// Raw keypoints for one detected actor, `[x, y, confidence]` triples in
/// the fixed landmark order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPose {
    pub keypoints: Vec<[f32; 3]>,
}

impl RawPose {
    /// Convert into the typed pose model
    pub fn to_pose(&self) -> DogPose {
        DogPose::from_raw(&self.keypoints)
    }
}

/// Axis-aligned detection box with a class label
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub class_id: u32,
    pub confidence: f32,
}

impl BoundingBox {
    /// Box center point
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// One frame of upstream model output.
///
/// The first pose is the monitored animal; any further poses are other
/// actors (used for proximity suppression). An `Empty` frame is a
/// negative signal for every stream, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameObservation {
    Poses { poses: Vec<RawPose> },
    Boxes { boxes: Vec<BoundingBox> },
    Empty,
}
