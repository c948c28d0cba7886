//! Violation Detection
//!
//! Turns noisy per-frame signals into a small number of confirmed
//! detection events:
//! - Consecutive-frame debounce (single-frame noise never confirms)
//! - Confirmation cooldown (no alert storms on sustained behavior)
//! - Reusable cooldown gate shared with the escalation layer

mod aggregator;
mod event;
mod limiter;

pub use aggregator::{DetectorConfig, ViolationAggregator, ViolationState};
pub use event::{DetectionEvent, DetectionKind, FrameSignal};
pub use limiter::CooldownGate;

use thiserror::Error;

/// Detector configuration errors (fatal at session start)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectorConfigError {
    /// A zero frame threshold would confirm on any single noisy frame
    #[error("threshold_frames must be greater than 0")]
    InvalidThreshold,
}
