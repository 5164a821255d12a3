//! Application configuration
//!
//! Loaded from an optional JSON file; every field has a default matching
//! the stock gaze feed deployment.

use crate::session::settings::TrackerSettings;
use crate::stream::source::{TrackerError, TrackerResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Gaze feed endpoint.
    pub stream_url: String,
    pub overlay: OverlaySettings,
    pub heatmap: HeatmapSettings,
    /// Directory session exports are written into.
    pub export_dir: PathBuf,
    /// Initial user settings.
    pub settings: TrackerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlaySettings {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatmapSettings {
    pub cell_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stream_url: "ws://localhost:5000/ws".to_string(),
            overlay: OverlaySettings::default(),
            heatmap: HeatmapSettings::default(),
            export_dir: PathBuf::from("data"),
            settings: TrackerSettings::default(),
        }
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        // Matches the stock camera constraints the viewer runs at.
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self { cell_size: 16 }
    }
}

impl AppConfig {
    /// Load configuration, falling back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> TrackerResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            TrackerError::Configuration(format!("Invalid config {}: {}", path.display(), e))
        })
    }
}
