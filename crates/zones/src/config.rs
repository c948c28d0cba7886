//! Zone configuration loading

use crate::{ZoneError, ZonePolygon};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Camera source: device index or a video file path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CameraSource {
    Index(u32),
    Path(String),
}

impl Default for CameraSource {
    fn default() -> Self {
        CameraSource::Index(0)
    }
}

/// Persisted zone configuration, consumed once at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSetConfig {
    /// Configured zones
    pub zones: Vec<ZonePolygon>,

    /// Camera source the zones were drawn against
    #[serde(default)]
    pub camera_index: CameraSource,
}

impl ZoneSetConfig {
    /// Load and validate zone configuration from a JSON file.
    ///
    /// Any zone with fewer than 3 vertices is a fatal configuration error;
    /// the session must not start with an invalid zone set.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ZoneError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: ZoneSetConfig = serde_json::from_str(&raw)?;
        config.validate()?;

        info!("Loaded {} zone(s) from {}", config.zones.len(), path.display());
        for zone in &config.zones {
            info!("  - {}: {} points, {:?}", zone.name, zone.points.len(), zone.kind);
        }

        Ok(config)
    }

    /// Validate every zone's polygon invariant
    pub fn validate(&self) -> Result<(), ZoneError> {
        for zone in &self.zones {
            zone.validate()?;
        }
        Ok(())
    }

    /// Find the first zone containing `point`, if any
    pub fn locate(&self, point: (f32, f32)) -> Option<&ZonePolygon> {
        self.zones
            .iter()
            .find(|zone| matches!(zone.contains(point), Ok(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZoneKind;

    const SAMPLE: &str = r#"{
        "zones": [
            {
                "name": "sofa",
                "points": [[100.0, 200.0], [400.0, 200.0], [400.0, 480.0], [100.0, 480.0]],
                "color": [255, 0, 0],
                "type": "forbidden"
            }
        ],
        "camera_index": 0
    }"#;

    #[test]
    fn test_parse_sample_config() {
        let config: ZoneSetConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.zones.len(), 1);
        assert_eq!(config.zones[0].name, "sofa");
        assert_eq!(config.zones[0].kind, ZoneKind::Forbidden);
        assert_eq!(config.camera_index, CameraSource::Index(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_camera_source_as_path() {
        let raw = r#"{"zones": [], "camera_index": "clips/backyard.mp4"}"#;
        let config: ZoneSetConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(
            config.camera_index,
            CameraSource::Path("clips/backyard.mp4".to_string())
        );
    }

    #[test]
    fn test_degenerate_zone_rejected() {
        let raw = r#"{
            "zones": [
                {"name": "bad", "points": [[0.0, 0.0], [5.0, 5.0]], "color": [0, 0, 0], "type": "forbidden"}
            ],
            "camera_index": 0
        }"#;
        let config: ZoneSetConfig = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ZoneError::DegeneratePolygon { count: 2, .. })
        ));
    }

    #[test]
    fn test_locate_finds_containing_zone() {
        let config: ZoneSetConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.locate((250.0, 300.0)).map(|z| z.name.as_str()), Some("sofa"));
        assert!(config.locate((50.0, 50.0)).is_none());
    }
}
