//! Per-frame session orchestration

use crate::observation::FrameObservation;
use crate::{SessionConfig, SessionError};
use detection::{DetectionEvent, DetectionKind, FrameSignal, ViolationAggregator};
use notify::FrameRef;
use pose_analysis::{DogPose, PoseBehavior, PoseClassifier};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};
use training::{AlertAction, EscalationController, TrainingSessionState};
use zones::ZoneSetConfig;

/// A confirmed detection plus the zone it happened in, if any
#[derive(Debug, Clone)]
pub struct ConfirmedDetection {
    pub event: DetectionEvent,
    pub zone: Option<String>,
}

/// Result of processing one frame
#[derive(Debug, Clone, Default)]
pub struct FrameOutcome {
    /// Frame reference for notification sinks
    pub frame: FrameRef,

    /// Confirmed detections this frame (at most one per stream)
    pub detections: Vec<ConfirmedDetection>,

    /// Response actions to dispatch, in order
    pub actions: Vec<AlertAction>,

    /// Zone currently violated, if any
    pub zone: Option<String>,
}

/// Counters reported at session end
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SessionStats {
    pub frames_processed: u64,
    pub detections_confirmed: u64,
    pub alerts_fired: u64,
}

/// One monitoring run over a frame stream.
///
/// Owns all mutable per-session state; must only be driven from a single
/// thread, one observation at a time, in frame order.
pub struct MonitorSession {
    config: SessionConfig,
    classifier: PoseClassifier,
    zones: ZoneSetConfig,
    pose_aggregator: ViolationAggregator,
    zone_aggregator: ViolationAggregator,
    escalation: EscalationController,
    training: TrainingSessionState,
    stats: SessionStats,
    frame_sequence: u64,
    in_violation: bool,
    last_run_frames: u32,
}

impl MonitorSession {
    /// Build a session from validated configuration and a loaded zone set
    pub fn new(config: SessionConfig, zones: ZoneSetConfig) -> Result<Self, SessionError> {
        config.validate()?;
        zones.validate()?;

        if zones.zones.is_empty() {
            info!("No zones configured; zone detection disabled for this session");
        }

        let classifier = PoseClassifier::new(config.pose.clone());
        let pose_aggregator = ViolationAggregator::new(config.pose_detector())?;
        let zone_aggregator = ViolationAggregator::new(config.zone_detector())?;
        let training = TrainingSessionState::new(config.mode);

        info!(
            "Session ready: mode={:?}, pose threshold {} frames, zone threshold {} frames",
            config.mode, config.pose_threshold_frames, config.zone_threshold_frames
        );

        Ok(Self {
            config,
            classifier,
            zones,
            pose_aggregator,
            zone_aggregator,
            escalation: EscalationController::new(),
            training,
            stats: SessionStats::default(),
            frame_sequence: 0,
            in_violation: false,
            last_run_frames: 0,
        })
    }

    /// Process one frame of classifier output.
    ///
    /// Exactly one signal evaluation and one aggregator transition happens
    /// per stream, followed by one escalation decision, in that order.
    pub fn process(&mut self, observation: &FrameObservation, now: Instant) -> FrameOutcome {
        self.frame_sequence += 1;
        self.stats.frames_processed += 1;

        let mut outcome = FrameOutcome {
            frame: FrameRef {
                sequence: self.frame_sequence,
            },
            ..Default::default()
        };

        // Per-frame signals; an observation of one kind is a negative
        // frame for the other stream.
        let pose_signal = match observation {
            FrameObservation::Poses { poses } => self.pose_signal(poses),
            _ => None,
        };

        let (zone_signal, zone_name) = match observation {
            FrameObservation::Boxes { boxes } => self.zone_signal(boxes),
            _ => (None, None),
        };
        outcome.zone = zone_name;

        // Aggregator transitions
        if let Some(event) = self.pose_aggregator.observe(pose_signal, now) {
            self.stats.detections_confirmed += 1;
            outcome.detections.push(ConfirmedDetection { event, zone: None });
        }
        if let Some(event) = self.zone_aggregator.observe(zone_signal, now) {
            self.stats.detections_confirmed += 1;
            outcome.detections.push(ConfirmedDetection {
                event,
                zone: outcome.zone.clone(),
            });
        }

        // Escalation runs on the live violation run, confirmed or not.
        let run_frames = self
            .pose_aggregator
            .consecutive_frames()
            .max(self.zone_aggregator.consecutive_frames());

        if run_frames > 0 {
            self.in_violation = true;
            self.last_run_frames = run_frames;
            let duration = self.config.frames_to_duration(run_frames);
            outcome.actions = self.escalation.on_frame(duration, now, &mut self.training);
        } else if self.in_violation {
            self.in_violation = false;
            let long_stay = self.last_run_frames > self.config.reinforcement_min_frames;
            outcome.actions = self.escalation.on_exit(long_stay, &self.training);
            if long_stay {
                debug!("violation ended after {} frames; reinforcing", self.last_run_frames);
            }
            self.last_run_frames = 0;
        }

        if !outcome.actions.is_empty() {
            self.stats.alerts_fired += 1;
        }

        outcome
    }

    /// Manual detection reset (counters only; cooldowns are preserved)
    pub fn reset_detection(&mut self) {
        self.pose_aggregator.reset();
        self.zone_aggregator.reset();
        info!("Detection counters reset");
    }

    /// Session counters so far
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Alerts fired by the training layer
    pub fn alert_count(&self) -> u32 {
        self.training.alert_count
    }

    /// Pose stream signal for one frame, with proximity suppression
    fn pose_signal(&self, poses: &[crate::observation::RawPose]) -> Option<FrameSignal> {
        let primary = poses.first()?.to_pose();
        if primary.is_empty() {
            return None;
        }

        if self.config.ignore_with_humans_nearby && self.other_actor_nearby(&primary, poses) {
            debug!("pose signal suppressed: another actor nearby");
            return None;
        }

        let signal = self.classifier.classify(&primary);
        let kind = match signal.behavior()? {
            PoseBehavior::LegLift => DetectionKind::LegLift,
            PoseBehavior::Squat => DetectionKind::Squat,
        };
        Some(FrameSignal::with_tail(
            kind,
            signal.confidence(),
            signal.tail_raised,
        ))
    }

    /// Zone stream signal for one frame: first target-class box whose
    /// center lies inside a forbidden zone
    fn zone_signal(&self, boxes: &[crate::observation::BoundingBox]) -> (Option<FrameSignal>, Option<String>) {
        for bbox in boxes {
            if bbox.class_id != self.config.target_class {
                continue;
            }
            if let Some(zone) = self.zones.locate(bbox.center()) {
                return (
                    Some(FrameSignal::new(DetectionKind::ZoneViolation, bbox.confidence)),
                    Some(zone.name.clone()),
                );
            }
        }
        (None, None)
    }

    /// Whether any secondary actor is horizontally close to the monitored
    /// animal (fraction of frame width)
    fn other_actor_nearby(&self, primary: &DogPose, poses: &[crate::observation::RawPose]) -> bool {
        let Some((px, _)) = primary.centroid() else {
            return false;
        };
        let limit = self.config.frame_width * self.config.human_proximity_threshold;

        poses.iter().skip(1).any(|raw| {
            raw.to_pose()
                .centroid()
                .is_some_and(|(ox, _)| (ox - px).abs() < limit)
        })
    }
}
