//! Notification sinks

use crate::record::{DetectionRecord, FrameRef};
use crate::NotifyError;
use tracing::{info, warn};

/// Consumer of confirmed detections.
///
/// Called synchronously, at most once per confirmed event. Sinks own
/// persistence, snapshotting, and human-facing notification.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, frame: &FrameRef, record: &DetectionRecord) -> Result<(), NotifyError>;
}

/// Sink that logs detections through `tracing`
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, frame: &FrameRef, record: &DetectionRecord) -> Result<(), NotifyError> {
        info!(
            "DETECTION! kind={} confidence={:.2} frames={} frame_seq={}{}",
            record.kind.as_str(),
            record.confidence,
            record.sustained_frames,
            frame.sequence,
            record
                .zone
                .as_deref()
                .map(|z| format!(" zone={z}"))
                .unwrap_or_default(),
        );
        Ok(())
    }
}

/// Fan-out to multiple sinks.
///
/// One sink failing must not keep the others from being notified; failures
/// are logged and swallowed.
#[derive(Default)]
pub struct CompositeNotifier {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl CompositeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink to the fan-out
    pub fn push(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Number of registered sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for CompositeNotifier {
    fn notify(&self, frame: &FrameRef, record: &DetectionRecord) -> Result<(), NotifyError> {
        for sink in &self.sinks {
            if let Err(e) = sink.notify(frame, record) {
                warn!("notification sink failed: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use detection::DetectionKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    struct CountingSink(Arc<AtomicUsize>);

    impl NotificationSink for CountingSink {
        fn notify(&self, _: &FrameRef, _: &DetectionRecord) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn notify(&self, _: &FrameRef, _: &DetectionRecord) -> Result<(), NotifyError> {
            Err(NotifyError::Io(std::io::Error::other("disk full")))
        }
    }

    fn record() -> DetectionRecord {
        DetectionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: DetectionKind::ZoneViolation,
            confidence: 1.0,
            sustained_frames: 5,
            zone: Some("sofa".to_string()),
            snapshot_path: None,
        }
    }

    #[test]
    fn test_composite_isolates_failures() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut composite = CompositeNotifier::new();
        composite.push(Box::new(FailingSink));
        composite.push(Box::new(CountingSink(count.clone())));

        composite.notify(&FrameRef { sequence: 1 }, &record()).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
