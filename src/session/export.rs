//! Session export
//!
//! Writes the in-memory gaze history to disk as pretty-printed JSON,
//! together with the session id, export time, and the settings that were
//! active.

use crate::session::settings::TrackerSettings;
use crate::stream::source::{TrackerError, TrackerResult};
use crate::stream::types::GazePoint;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub id: Uuid,
    pub exported_at: DateTime<Utc>,
    pub settings: TrackerSettings,
    pub points: Vec<GazePoint>,
}

impl SessionExport {
    pub fn new(settings: TrackerSettings, points: Vec<GazePoint>) -> Self {
        Self {
            id: Uuid::new_v4(),
            exported_at: Utc::now(),
            settings,
            points,
        }
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> TrackerResult<()> {
        let data = serde_json::to_vec_pretty(value)
            .map_err(|e| TrackerError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Write the export into the given directory, creating it if needed.
    /// Returns the path of the written file.
    pub fn write_to_dir(&self, dir: &Path) -> TrackerResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("gaze-session-{}.json", self.id));
        Self::write_json(&path, self)?;

        tracing::info!(
            "Exported {} gaze points to {}",
            self.points.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Snapshot and write one session in a single call.
pub fn export_session(
    dir: &Path,
    settings: TrackerSettings,
    points: Vec<GazePoint>,
) -> TrackerResult<PathBuf> {
    SessionExport::new(settings, points).write_to_dir(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> GazePoint {
        GazePoint {
            x,
            y,
            timestamp: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn test_export_writes_points_and_settings() {
        let dir = tempfile::tempdir().unwrap();
        let points = vec![point(1.0, 2.0), point(3.0, 4.0)];

        let path = export_session(dir.path(), TrackerSettings::default(), points).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["points"].as_array().unwrap().len(), 2);
        assert_eq!(value["points"][0]["x"], 1.0);
        assert_eq!(value["settings"]["smoothing"], 5);
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("sessions");

        let path = export_session(&nested, TrackerSettings::default(), vec![]).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_exports_get_distinct_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let a = export_session(dir.path(), TrackerSettings::default(), vec![]).unwrap();
        let b = export_session(dir.path(), TrackerSettings::default(), vec![]).unwrap();
        assert_ne!(a, b);
    }
}
