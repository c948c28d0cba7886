//! Layered session configuration

use crate::SessionError;
use detection::DetectorConfig;
use pose_analysis::PoseConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use training::TrainingMode;

/// Session settings, merged from defaults, an optional config file, and
/// `PAWGUARD_*` environment overrides; validated once at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Training mode
    pub mode: TrainingMode,

    /// Nominal camera frame rate (converts frame counts to durations)
    pub fps: f64,

    /// Frame width in pixels (proximity suppression reference)
    pub frame_width: f32,

    /// Pose heuristic thresholds
    pub pose: PoseConfig,

    /// Consecutive frames before a pose confirmation (~0.8s at 30fps)
    pub pose_threshold_frames: u32,

    /// Cooldown between pose confirmations
    pub pose_cooldown_seconds: u64,

    /// Consecutive frames before a zone confirmation (quick detection)
    pub zone_threshold_frames: u32,

    /// Cooldown between zone confirmations
    pub zone_cooldown_seconds: u64,

    /// Object class treated as the monitored animal (COCO: 16 = dog)
    pub target_class: u32,

    /// Suppress pose detection when another actor is close by
    pub ignore_with_humans_nearby: bool,

    /// Proximity threshold as a fraction of frame width
    pub human_proximity_threshold: f32,

    /// In-zone frames required before leaving earns reinforcement
    pub reinforcement_min_frames: u32,

    /// Zone configuration file; `None` disables zone detection
    pub zone_config: Option<String>,

    /// CSV detection log path
    pub detection_log: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: TrainingMode::Standard,
            fps: 30.0,
            frame_width: 1280.0,
            pose: PoseConfig::default(),
            pose_threshold_frames: 25,
            pose_cooldown_seconds: 90,
            zone_threshold_frames: 5,
            zone_cooldown_seconds: 30,
            target_class: 16,
            ignore_with_humans_nearby: true,
            human_proximity_threshold: 0.3,
            reinforcement_min_frames: 30,
            zone_config: None,
            detection_log: "logs/detections.csv".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load settings: defaults, then the optional file, then environment
    /// variables (`PAWGUARD_MODE=gentle`, `PAWGUARD_FPS=15`, ...).
    pub fn load(file: Option<&Path>) -> Result<Self, SessionError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
            info!("Loading session config from {}", path.display());
        }

        let merged = builder
            .add_source(
                config::Environment::with_prefix("PAWGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: SessionConfig = merged.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate once at session start; any failure is fatal
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(self.fps > 0.0) {
            return Err(SessionError::Invalid(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if !(self.frame_width > 0.0) {
            return Err(SessionError::Invalid(format!(
                "frame_width must be positive, got {}",
                self.frame_width
            )));
        }
        if !(0.0..=1.0).contains(&self.human_proximity_threshold) {
            return Err(SessionError::Invalid(format!(
                "human_proximity_threshold must be in [0, 1], got {}",
                self.human_proximity_threshold
            )));
        }
        self.pose_detector().validate()?;
        self.zone_detector().validate()?;
        Ok(())
    }

    /// Aggregator configuration for the pose stream
    pub fn pose_detector(&self) -> DetectorConfig {
        DetectorConfig {
            threshold_frames: self.pose_threshold_frames,
            cooldown: Duration::from_secs(self.pose_cooldown_seconds),
        }
    }

    /// Aggregator configuration for the zone stream
    pub fn zone_detector(&self) -> DetectorConfig {
        DetectorConfig {
            threshold_frames: self.zone_threshold_frames,
            cooldown: Duration::from_secs(self.zone_cooldown_seconds),
        }
    }

    /// Duration represented by `frames` at the configured frame rate
    pub fn frames_to_duration(&self, frames: u32) -> Duration {
        Duration::from_secs_f64(frames as f64 / self.fps)
    }
}
