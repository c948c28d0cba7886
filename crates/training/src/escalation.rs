//! Escalation tier table and controller

use crate::session::TrainingSessionState;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Spoken command category.
///
/// The controller never picks phrasing; the sink owns the words for each
/// category, which keeps the core deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    No,
    Warning,
    Praise,
}

/// External response action identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    /// Short low-intensity sound
    GentleBeep,

    /// Spoken command of the given category
    VoiceCommand(CommandKind),

    /// Loud deterrent sound
    Buzzer,

    /// Maximum-intensity high-frequency deterrent
    UltrasonicPulse,

    /// Positive-reinforcement sound
    PositiveChime,
}

/// One entry of the escalation table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationTier {
    /// Inclusive lower bound on violation duration for this tier
    pub min_duration: Duration,

    /// Actions fired when this tier is selected, in dispatch order
    pub actions: Vec<AlertAction>,
}

/// Maps live violation duration to response actions.
///
/// Runs every frame, independent of event confirmation, and is rate
/// limited by the session's alert-delay gate. Tiers are inclusive lower
/// bounds with an open upper bound at the next tier; the last tier whose
/// threshold is met wins.
pub struct EscalationController {
    tiers: Vec<EscalationTier>,
}

impl Default for EscalationController {
    fn default() -> Self {
        Self::new()
    }
}

impl EscalationController {
    /// Controller with the standard four-tier table
    pub fn new() -> Self {
        Self::with_tiers(vec![
            EscalationTier {
                min_duration: Duration::ZERO,
                actions: vec![AlertAction::GentleBeep],
            },
            EscalationTier {
                min_duration: Duration::from_secs(1),
                actions: vec![AlertAction::VoiceCommand(CommandKind::No)],
            },
            EscalationTier {
                min_duration: Duration::from_secs(3),
                actions: vec![
                    AlertAction::Buzzer,
                    AlertAction::VoiceCommand(CommandKind::No),
                ],
            },
            EscalationTier {
                min_duration: Duration::from_secs(5),
                actions: vec![
                    AlertAction::UltrasonicPulse,
                    AlertAction::VoiceCommand(CommandKind::No),
                    AlertAction::Buzzer,
                ],
            },
        ])
    }

    /// Controller with a custom tier table (sorted into ascending order)
    pub fn with_tiers(mut tiers: Vec<EscalationTier>) -> Self {
        tiers.sort_by_key(|tier| tier.min_duration);
        Self { tiers }
    }

    /// The last tier whose threshold is met by `duration`
    pub fn select_tier(&self, duration: Duration) -> Option<&EscalationTier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| duration >= tier.min_duration)
    }

    /// Decide the response for one frame of ongoing violation.
    ///
    /// Returns the actions to dispatch (possibly empty). Silent mode fires
    /// nothing; other modes are gated by the session's alert delay.
    /// Escalating modes walk the tier table; non-escalating modes repeat
    /// the first-tier alert.
    pub fn on_frame(
        &self,
        duration: Duration,
        now: Instant,
        state: &mut TrainingSessionState,
    ) -> Vec<AlertAction> {
        if state.mode.is_silent() {
            return Vec::new();
        }

        if !state.gate.try_fire(now) {
            return Vec::new();
        }

        state.alert_count += 1;
        let profile = state.mode.profile();

        let actions = if profile.escalation {
            self.select_tier(duration)
                .map(|tier| tier.actions.clone())
                .unwrap_or_default()
        } else {
            let first = self
                .tiers
                .first()
                .map(|tier| tier.actions.as_slice())
                .unwrap_or_default();
            let mut repeated = Vec::with_capacity(first.len() * profile.repeat_alerts as usize);
            for _ in 0..profile.repeat_alerts {
                repeated.extend_from_slice(first);
            }
            repeated
        };

        debug!(
            "escalation tier for {:.1}s violation: {:?}",
            duration.as_secs_f64(),
            actions
        );
        actions
    }

    /// Decide the response when the tracked animal leaves the zone.
    ///
    /// Positive reinforcement fires only after a meaningfully long stay,
    /// and never in silent mode.
    pub fn on_exit(
        &self,
        duration_was_above_minimum: bool,
        state: &TrainingSessionState,
    ) -> Vec<AlertAction> {
        if state.mode.is_silent() || !duration_was_above_minimum {
            return Vec::new();
        }
        vec![
            AlertAction::PositiveChime,
            AlertAction::VoiceCommand(CommandKind::Praise),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::TrainingMode;

    const FRAME: Duration = Duration::from_millis(33);

    #[test]
    fn test_tier_boundaries() {
        let controller = EscalationController::new();

        let tier = controller.select_tier(Duration::from_millis(500)).unwrap();
        assert_eq!(tier.min_duration, Duration::ZERO);
        assert_eq!(tier.actions, vec![AlertAction::GentleBeep]);

        let tier = controller.select_tier(Duration::from_secs(1)).unwrap();
        assert_eq!(tier.min_duration, Duration::from_secs(1));

        let tier = controller.select_tier(Duration::from_secs(4)).unwrap();
        assert_eq!(
            tier.actions,
            vec![AlertAction::Buzzer, AlertAction::VoiceCommand(CommandKind::No)]
        );

        let tier = controller.select_tier(Duration::from_secs(60)).unwrap();
        assert_eq!(tier.min_duration, Duration::from_secs(5));
        assert_eq!(tier.actions.len(), 3);
    }

    #[test]
    fn test_tier_selection_is_monotonic() {
        let controller = EscalationController::new();
        let samples = [0.0f64, 0.4, 0.9, 1.0, 1.1, 2.9, 3.0, 4.2, 5.0, 7.5, 30.0];

        let mut last_min = Duration::ZERO;
        for seconds in samples {
            let tier = controller
                .select_tier(Duration::from_secs_f64(seconds))
                .unwrap();
            assert!(tier.min_duration >= last_min);
            last_min = tier.min_duration;
        }
    }

    #[test]
    fn test_standard_mode_escalates() {
        let controller = EscalationController::new();
        let mut state = TrainingSessionState::new(TrainingMode::Standard);
        let base = Instant::now();

        let actions = controller.on_frame(Duration::ZERO, base, &mut state);
        assert_eq!(actions, vec![AlertAction::GentleBeep]);

        // Past the 5s tier, after the alert delay has elapsed.
        let actions = controller.on_frame(
            Duration::from_secs(6),
            base + Duration::from_secs(2),
            &mut state,
        );
        assert_eq!(
            actions,
            vec![
                AlertAction::UltrasonicPulse,
                AlertAction::VoiceCommand(CommandKind::No),
                AlertAction::Buzzer,
            ]
        );
        assert_eq!(state.alert_count, 2);
    }

    #[test]
    fn test_alert_delay_gates_firing() {
        let controller = EscalationController::new();
        let mut state = TrainingSessionState::new(TrainingMode::Standard);
        let base = Instant::now();

        assert!(!controller.on_frame(Duration::ZERO, base, &mut state).is_empty());
        // 200ms later: still inside the 500ms standard delay.
        let actions = controller.on_frame(
            Duration::from_millis(200),
            base + Duration::from_millis(200),
            &mut state,
        );
        assert!(actions.is_empty());
        assert_eq!(state.alert_count, 1);
    }

    #[test]
    fn test_gentle_mode_never_escalates() {
        // Violation grows 0 -> 6s; only the first-tier beep may ever fire.
        let controller = EscalationController::new();
        let mut state = TrainingSessionState::new(TrainingMode::Gentle);
        let base = Instant::now();

        let mut fired = Vec::new();
        let mut frame = 0u32;
        let mut elapsed = Duration::ZERO;
        while elapsed < Duration::from_secs(6) {
            elapsed = FRAME * frame;
            let actions = controller.on_frame(elapsed, base + elapsed, &mut state);
            fired.extend(actions);
            frame += 1;
        }

        assert!(fired.len() >= 2, "beep should repeat across 6s");
        assert!(fired.iter().all(|a| *a == AlertAction::GentleBeep));
    }

    #[test]
    fn test_silent_mode_fires_nothing() {
        let controller = EscalationController::new();
        let mut state = TrainingSessionState::new(TrainingMode::Silent);
        let base = Instant::now();

        for i in 0..100u32 {
            let actions = controller.on_frame(FRAME * i, base + FRAME * i, &mut state);
            assert!(actions.is_empty());
        }
        assert_eq!(state.alert_count, 0);
        assert!(controller.on_exit(true, &state).is_empty());
    }

    #[test]
    fn test_exit_reinforcement_requires_long_stay() {
        let controller = EscalationController::new();
        let state = TrainingSessionState::new(TrainingMode::Standard);

        assert!(controller.on_exit(false, &state).is_empty());
        assert_eq!(
            controller.on_exit(true, &state),
            vec![
                AlertAction::PositiveChime,
                AlertAction::VoiceCommand(CommandKind::Praise),
            ]
        );
    }

    #[test]
    fn test_intensive_mode_fires_every_frame() {
        let controller = EscalationController::new();
        let mut state = TrainingSessionState::new(TrainingMode::Intensive);
        let base = Instant::now();

        // Zero delay: every frame past the gate fires.
        let mut count = 0;
        for i in 0..10u32 {
            if !controller.on_frame(FRAME * i, base + FRAME * i, &mut state).is_empty() {
                count += 1;
            }
        }
        assert_eq!(count, 10);
    }
}
