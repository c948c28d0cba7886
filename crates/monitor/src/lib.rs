//! Monitoring Session
//!
//! Orchestrates the per-frame pipeline:
//! classifier output -> pose/zone signal -> violation aggregation ->
//! escalation decision -> notification and action dispatch.
//!
//! Processing is single-threaded and frame-sequential; the only
//! concurrency boundary is the fire-and-forget dispatch of response
//! actions, which must never stall the frame loop.

mod config;
mod dispatch;
mod observation;
mod session;

pub use config::SessionConfig;
pub use dispatch::{spawn_dispatcher, ChannelSink};
pub use observation::{BoundingBox, FrameObservation, RawPose};
pub use session::{ConfirmedDetection, FrameOutcome, MonitorSession, SessionStats};

use thiserror::Error;

/// Session startup errors (fatal before the frame loop starts)
#[derive(Debug, Error)]
pub enum SessionError {
    /// Layered configuration could not be read or merged
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// A configuration value failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Zone set failed to load or validate
    #[error(transparent)]
    Zone(#[from] zones::ZoneError),

    /// Detector configuration failed validation
    #[error(transparent)]
    Detector(#[from] detection::DetectorConfigError),
}
