//! Pose Heuristic Analysis
//!
//! Converts per-frame animal keypoints from an external pose model into a
//! structured behavior signal:
//! - Leg-lift detection (joint angle + paw elevation)
//! - Squat detection (body lowering + rear-leg spread)
//! - Tail position
//!
//! All heuristics degrade gracefully: a partially visible animal yields a
//! negative signal for the affected heuristic, never an error to the caller.

mod classifier;
mod config;
mod geometry;
mod keypoints;

pub use classifier::{PoseBehavior, PoseClassifier, PoseSignal};
pub use config::PoseConfig;
pub use geometry::{distance, joint_angle};
pub use keypoints::{DogPose, Keypoint, KeypointId};

use thiserror::Error;

/// Recoverable per-frame geometry errors.
///
/// These never propagate out of [`PoseClassifier::classify`]; they are
/// exposed so callers of the individual heuristics can assert on the
/// failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Keypoint absent from the frame or below the confidence floor
    #[error("keypoint {0:?} missing or below confidence threshold")]
    MissingKeypoint(KeypointId),

    /// Geometry that cannot be evaluated (e.g. zero-length body reference)
    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),
}
