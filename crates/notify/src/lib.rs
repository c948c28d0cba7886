//! Detection Notifications
//!
//! Consumes confirmed detection events exactly once each:
//! - Structured detection records with stable ids
//! - Append-only CSV detection log
//! - Deterministic snapshot file naming for external capture tools
//! - Fan-out to multiple sinks with per-sink failure isolation

mod log;
mod record;
mod sink;

pub use log::DetectionLog;
pub use record::{snapshot_filename, DetectionRecord, FrameRef};
pub use sink::{CompositeNotifier, ConsoleNotifier, NotificationSink};

use thiserror::Error;

/// Notification errors (non-fatal; isolated per sink)
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Detection log could not be written
    #[error("failed to write detection log: {0}")]
    Io(#[from] std::io::Error),
}
