//! Debounce/hysteresis state machine

use crate::event::{DetectionEvent, FrameSignal};
use crate::limiter::CooldownGate;
use crate::DetectorConfigError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Aggregator configuration, validated once at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Consecutive positive frames required before a confirmation
    pub threshold_frames: u32,

    /// Minimum time between confirmations of the same stream
    pub cooldown: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_frames: 25,
            cooldown: Duration::from_secs(90),
        }
    }
}

impl DetectorConfig {
    /// Reject configurations that would confirm on single-frame noise
    pub fn validate(&self) -> Result<(), DetectorConfigError> {
        if self.threshold_frames == 0 {
            return Err(DetectorConfigError::InvalidThreshold);
        }
        Ok(())
    }
}

/// Mutable per-stream debounce state, owned by its aggregator
#[derive(Debug, Clone)]
pub struct ViolationState {
    /// Length of the current run of positive frames
    pub consecutive_frames: u32,

    /// Confirmation cooldown gate (`last_fired` = last confirmation)
    pub gate: CooldownGate,
}

/// Per-stream debounce state machine.
///
/// Consumes one optional [`FrameSignal`] per frame and emits a confirmed
/// [`DetectionEvent`] only when the consecutive-positive counter crosses
/// the threshold and the cooldown gate allows it. One instance exists per
/// monitored stream; instances share nothing.
pub struct ViolationAggregator {
    config: DetectorConfig,
    state: ViolationState,
}

impl ViolationAggregator {
    /// Create an aggregator, validating the configuration
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorConfigError> {
        config.validate()?;
        let gate = CooldownGate::new(config.cooldown);
        Ok(Self {
            config,
            state: ViolationState {
                consecutive_frames: 0,
                gate,
            },
        })
    }

    /// Advance the state machine by one frame.
    ///
    /// `None` is a negative frame and hard-resets the counter; a positive
    /// frame increments it. A [`DetectionEvent`] is emitted when the
    /// counter reaches the threshold and the cooldown has elapsed (or no
    /// confirmation has happened yet). A raised-tail co-signal boosts the
    /// emitted confidence by 1.2x, capped at 1.0.
    pub fn observe(
        &mut self,
        signal: Option<FrameSignal>,
        now: Instant,
    ) -> Option<DetectionEvent> {
        let Some(signal) = signal else {
            self.state.consecutive_frames = 0;
            return None;
        };

        self.state.consecutive_frames += 1;

        if self.state.consecutive_frames < self.config.threshold_frames {
            return None;
        }

        if !self.state.gate.try_fire(now) {
            debug!(
                "{:?} sustained for {} frames but confirmation is in cooldown",
                signal.kind, self.state.consecutive_frames
            );
            return None;
        }

        let mut confidence = signal.confidence.clamp(0.0, 1.0);
        if signal.tail_raised {
            confidence = (confidence * 1.2).min(1.0);
        }

        info!(
            "Confirmed {:?} after {} consecutive frames (confidence {:.2})",
            signal.kind, self.state.consecutive_frames, confidence
        );

        Some(DetectionEvent {
            kind: signal.kind,
            confidence,
            sustained_frames: self.state.consecutive_frames,
            timestamp: now,
        })
    }

    /// Force the counter back to zero.
    ///
    /// The cooldown gate is deliberately untouched: a manual reset must
    /// not allow a confirmation to bypass the cooldown.
    pub fn reset(&mut self) {
        self.state.consecutive_frames = 0;
    }

    /// Current consecutive-positive run length
    pub fn consecutive_frames(&self) -> u32 {
        self.state.consecutive_frames
    }

    /// Instant of the last confirmation, if any
    pub fn last_confirmed_at(&self) -> Option<Instant> {
        self.state.gate.last_fired()
    }

    /// Configured frame threshold
    pub fn threshold_frames(&self) -> u32 {
        self.config.threshold_frames
    }
}
