//! Active Training Responses
//!
//! Maps sustained-violation duration to an escalating sequence of
//! corrective actions:
//! - Training modes (gentle / standard / intensive / silent)
//! - Ordered escalation tier table, last-match-wins
//! - Independent alert-delay rate limiting per session
//! - `AlertSink` capability boundary (the core never touches audio APIs)

mod escalation;
mod modes;
mod session;
mod sink;

pub use escalation::{AlertAction, CommandKind, EscalationController, EscalationTier};
pub use modes::{ModeProfile, TrainingMode, Volume};
pub use session::TrainingSessionState;
pub use sink::{dispatch_all, AlertSink, RecordingSink, TracingSink};

use thiserror::Error;

/// Failure to execute an external response action.
///
/// Non-fatal: dispatch failures are logged and swallowed, and never affect
/// detection state or future dispatch attempts.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Audio/speech backend unavailable (missing device, missing binary)
    #[error("alert backend unavailable: {0}")]
    Unavailable(String),

    /// Fire-and-forget channel to the action executor has closed
    #[error("alert dispatch channel closed")]
    ChannelClosed,
}
