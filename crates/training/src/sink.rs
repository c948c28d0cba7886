//! Alert sink capability boundary

use crate::escalation::AlertAction;
use crate::DispatchError;
use std::sync::Mutex;
use tracing::{info, warn};

/// Executor of external response actions (sound, speech).
///
/// The core only ever hands over action identifiers; playback, phrasing,
/// and platform specifics live behind this trait. Implementations must not
/// block the caller for the duration of playback.
pub trait AlertSink: Send + Sync {
    /// Execute one action
    fn dispatch(&self, action: AlertAction) -> Result<(), DispatchError>;
}

/// Dispatch a batch of actions, logging and swallowing failures.
///
/// A failed action never affects detection state or later dispatch
/// attempts.
pub fn dispatch_all(sink: &dyn AlertSink, actions: &[AlertAction]) {
    for &action in actions {
        if let Err(e) = sink.dispatch(action) {
            warn!("alert action {:?} failed: {}", action, e);
        }
    }
}

/// Sink that logs actions (headless sessions, silent deployments)
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn dispatch(&self, action: AlertAction) -> Result<(), DispatchError> {
        info!("alert action: {:?}", action);
        Ok(())
    }
}

/// Recording fake for deterministic tests
#[derive(Default)]
pub struct RecordingSink {
    actions: Mutex<Vec<AlertAction>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions dispatched so far, in order
    pub fn recorded(&self) -> Vec<AlertAction> {
        self.actions.lock().expect("recording sink poisoned").clone()
    }
}

impl AlertSink for RecordingSink {
    fn dispatch(&self, action: AlertAction) -> Result<(), DispatchError> {
        self.actions
            .lock()
            .expect("recording sink poisoned")
            .push(action);
        Ok(())
    }
}
