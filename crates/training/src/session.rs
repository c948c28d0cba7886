//! Per-session training state

use crate::modes::TrainingMode;
use detection::CooldownGate;
use std::time::Instant;

/// Mutable state for one detector run.
///
/// Owned by the caller and passed into the escalation controller each
/// frame; discarded at session end.
#[derive(Debug, Clone)]
pub struct TrainingSessionState {
    /// Active training mode
    pub mode: TrainingMode,

    /// Alert-delay gate (`last_fired` = last alert instant)
    pub gate: CooldownGate,

    /// Alerts fired this session
    pub alert_count: u32,
}

impl TrainingSessionState {
    /// Create session state for a mode, with the mode's alert delay
    pub fn new(mode: TrainingMode) -> Self {
        Self {
            mode,
            gate: CooldownGate::new(mode.profile().alert_delay),
            alert_count: 0,
        }
    }

    /// Instant of the last fired alert, if any
    pub fn last_alert_at(&self) -> Option<Instant> {
        self.gate.last_fired()
    }
}
