//! Detection events and per-frame signals

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Confirmed behavior kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionKind {
    LegLift,
    Squat,
    ZoneViolation,
}

impl DetectionKind {
    /// Stable lowercase name (log records, snapshot filenames)
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionKind::LegLift => "leg_lift",
            DetectionKind::Squat => "squat",
            DetectionKind::ZoneViolation => "zone_violation",
        }
    }
}

/// One frame's positive evidence for a monitored behavior.
///
/// A frame with no evidence is represented as `None` at the aggregator
/// boundary; this struct only exists for positive frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameSignal {
    /// Behavior the evidence points at
    pub kind: DetectionKind,

    /// Heuristic confidence in [0, 1]
    pub confidence: f32,

    /// Whether a raised tail co-occurred (pose streams only)
    pub tail_raised: bool,
}

impl FrameSignal {
    /// Positive signal without tail evidence
    pub fn new(kind: DetectionKind, confidence: f32) -> Self {
        Self {
            kind,
            confidence,
            tail_raised: false,
        }
    }

    /// Positive signal with tail evidence attached
    pub fn with_tail(kind: DetectionKind, confidence: f32, tail_raised: bool) -> Self {
        Self {
            kind,
            confidence,
            tail_raised,
        }
    }
}

/// A confirmed detection, emitted at most once per cooldown window.
///
/// Immutable once emitted; consumed by the notification sink.
#[derive(Debug, Clone, Copy)]
pub struct DetectionEvent {
    /// Confirmed behavior
    pub kind: DetectionKind,

    /// Confidence at confirmation time, tail-boosted for pose streams
    pub confidence: f32,

    /// Consecutive positive frames at confirmation
    pub sustained_frames: u32,

    /// Monotonic confirmation instant
    pub timestamp: Instant,
}
