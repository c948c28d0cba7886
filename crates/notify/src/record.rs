//! Detection records

use chrono::{DateTime, Utc};
use detection::{DetectionEvent, DetectionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the frame a detection was confirmed on.
///
/// The core never holds pixel data; external capture tooling resolves the
/// sequence number back to an image if snapshots are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRef {
    /// Frame sequence number within the session
    pub sequence: u64,
}

/// A confirmed detection, stamped for persistence and human consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Stable record id
    pub id: Uuid,

    /// Wall-clock confirmation time
    pub timestamp: DateTime<Utc>,

    /// Confirmed behavior
    pub kind: DetectionKind,

    /// Confidence at confirmation
    pub confidence: f32,

    /// Consecutive positive frames at confirmation
    pub sustained_frames: u32,

    /// Zone name for zone violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    /// Snapshot path, if a capture tool saved one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<String>,
}

impl DetectionRecord {
    /// Build a record from a confirmed event at the given wall-clock time
    pub fn from_event(event: &DetectionEvent, at: DateTime<Utc>, zone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: at,
            kind: event.kind,
            confidence: event.confidence,
            sustained_frames: event.sustained_frames,
            zone,
            snapshot_path: None,
        }
    }
}

/// Deterministic snapshot filename for a detection.
///
/// `violation_{kind}_{NN}pct_{YYYYmmdd_HHMMSS}.jpg`
pub fn snapshot_filename(kind: DetectionKind, confidence: f32, at: DateTime<Utc>) -> String {
    format!(
        "violation_{}_{}pct_{}.jpg",
        kind.as_str(),
        (confidence.clamp(0.0, 1.0) * 100.0).round() as u32,
        at.format("%Y%m%d_%H%M%S"),
    )
}
