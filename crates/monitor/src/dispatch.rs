//! Fire-and-forget action dispatch
//!
//! Sound and speech playback can take multiple seconds; the frame loop
//! hands actions to a dispatcher task over a channel and never waits,
//! so playback latency cannot skew the debounce timing.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;
use training::{AlertAction, AlertSink, DispatchError};

/// Sink that forwards actions to the dispatcher task without blocking
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AlertAction>,
}

impl AlertSink for ChannelSink {
    fn dispatch(&self, action: AlertAction) -> Result<(), DispatchError> {
        self.tx.send(action).map_err(|_| DispatchError::ChannelClosed)
    }
}

/// Spawn the dispatcher task draining actions into `executor`.
///
/// Executor failures are logged and swallowed; they never reach the frame
/// loop. The task ends when every `ChannelSink` clone is dropped.
pub fn spawn_dispatcher(executor: Arc<dyn AlertSink>) -> (ChannelSink, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        while let Some(action) = rx.recv().await {
            if let Err(e) = executor.dispatch(action) {
                warn!("alert action {:?} failed: {}", action, e);
            }
        }
    });

    (ChannelSink { tx }, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use training::RecordingSink;

    #[tokio::test]
    async fn test_actions_reach_the_executor() {
        let recorder = Arc::new(RecordingSink::new());
        let (sink, handle) = spawn_dispatcher(recorder.clone());

        sink.dispatch(AlertAction::GentleBeep).unwrap();
        sink.dispatch(AlertAction::Buzzer).unwrap();
        drop(sink);

        handle.await.unwrap();
        assert_eq!(
            recorder.recorded(),
            vec![AlertAction::GentleBeep, AlertAction::Buzzer]
        );
    }

    #[tokio::test]
    async fn test_cloned_sink_keeps_the_channel_open() {
        let recorder = Arc::new(RecordingSink::new());
        let (sink, handle) = spawn_dispatcher(recorder.clone());

        let cloned = sink.clone();
        drop(sink);
        cloned.dispatch(AlertAction::GentleBeep).unwrap();
        drop(cloned);

        handle.await.unwrap();
        assert_eq!(recorder.recorded(), vec![AlertAction::GentleBeep]);
    }
}
