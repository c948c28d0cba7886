//! Append-only CSV detection log

use crate::record::DetectionRecord;
use crate::NotifyError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER: &str = "timestamp,detection_type,confidence,snapshot_path";

/// CSV log of confirmed detections.
///
/// The header is written on first use; rows append afterward.
pub struct DetectionLog {
    path: PathBuf,
}

impl DetectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the log writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one detection record
    pub fn append(&self, record: &DetectionRecord) -> Result<(), NotifyError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let is_new = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if is_new {
            writeln!(file, "{HEADER}")?;
        }

        writeln!(
            file,
            "{},{},{:.4},{}",
            record.timestamp.to_rfc3339(),
            record.kind.as_str(),
            record.confidence,
            record.snapshot_path.as_deref().unwrap_or("N/A"),
        )?;

        info!("Detection logged to {}", self.path.display());
        Ok(())
    }
}

impl crate::sink::NotificationSink for DetectionLog {
    fn notify(
        &self,
        _frame: &crate::record::FrameRef,
        record: &DetectionRecord,
    ) -> Result<(), NotifyError> {
        self.append(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use detection::DetectionKind;
    use uuid::Uuid;

    fn sample_record() -> DetectionRecord {
        DetectionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap(),
            kind: DetectionKind::Squat,
            confidence: 0.75,
            sustained_frames: 25,
            zone: None,
            snapshot_path: None,
        }
    }

    #[test]
    fn test_header_written_once() {
        let path = std::env::temp_dir().join(format!("pawguard_log_{}.csv", Uuid::new_v4()));
        let log = DetectionLog::new(&path);

        log.append(&sample_record()).unwrap();
        log.append(&sample_record()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("2024-03-05T14:30:09"));
        assert!(lines[1].contains(",squat,0.7500,N/A"));
        assert_eq!(lines[1], lines[2]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_snapshot_path_column() {
        let path = std::env::temp_dir().join(format!("pawguard_log_{}.csv", Uuid::new_v4()));
        let log = DetectionLog::new(&path);

        let mut record = sample_record();
        record.snapshot_path = Some("snaps/violation_squat_75pct.jpg".to_string());
        log.append(&record).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("snaps/violation_squat_75pct.jpg"));

        std::fs::remove_file(&path).ok();
    }
}
