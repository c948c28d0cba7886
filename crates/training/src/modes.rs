//! Training mode profiles

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Operating mode for the escalation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    /// Soft alerts, long delay, no escalation (for sensitive animals)
    Gentle,

    /// Balanced response
    #[default]
    Standard,

    /// Immediate, aggressive response
    Intensive,

    /// Detection and logging only; no actions fire
    Silent,
}

/// Alert playback volume hint for the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volume {
    Medium,
    High,
    VeryHigh,
}

/// Per-mode response parameters
#[derive(Debug, Clone, Copy)]
pub struct ModeProfile {
    /// Minimum time between alert firings
    pub alert_delay: Duration,

    /// Whether sustained violations escalate through the tier table
    pub escalation: bool,

    /// Repeat count for the non-escalating first-tier alert
    pub repeat_alerts: u32,

    /// Playback volume hint
    pub volume: Volume,
}

impl TrainingMode {
    /// Response parameters for this mode
    pub fn profile(self) -> ModeProfile {
        match self {
            TrainingMode::Gentle => ModeProfile {
                alert_delay: Duration::from_secs(2),
                escalation: false,
                repeat_alerts: 1,
                volume: Volume::Medium,
            },
            TrainingMode::Standard => ModeProfile {
                alert_delay: Duration::from_millis(500),
                escalation: true,
                repeat_alerts: 2,
                volume: Volume::High,
            },
            TrainingMode::Intensive => ModeProfile {
                alert_delay: Duration::ZERO,
                escalation: true,
                repeat_alerts: 3,
                volume: Volume::VeryHigh,
            },
            TrainingMode::Silent => ModeProfile {
                alert_delay: Duration::ZERO,
                escalation: false,
                repeat_alerts: 0,
                volume: Volume::Medium,
            },
        }
    }

    /// Whether response dispatch is disabled entirely
    pub fn is_silent(self) -> bool {
        matches!(self, TrainingMode::Silent)
    }
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gentle" => Ok(TrainingMode::Gentle),
            "standard" => Ok(TrainingMode::Standard),
            "intensive" => Ok(TrainingMode::Intensive),
            "silent" => Ok(TrainingMode::Silent),
            other => Err(format!("unknown training mode '{other}'")),
        }
    }
}
