//! User-facing tracker settings
//!
//! Two 0..=10 dials carried with the session. `smoothing` drives the
//! replay spring; `sensitivity` belongs to the upstream estimator and is
//! stored and exported unchanged for it.

use crate::processing::spring::SmoothingConfig;
use crate::stream::source::{TrackerError, TrackerResult};
use serde::{Deserialize, Serialize};

/// Upper bound of both setting dials.
pub const LEVEL_MAX: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSettings {
    pub sensitivity: u8,
    pub smoothing: u8,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            sensitivity: 5,
            smoothing: 5,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub sensitivity: Option<u8>,
    pub smoothing: Option<u8>,
}

impl TrackerSettings {
    /// Merge an update, rejecting out-of-range levels before any field
    /// is touched.
    pub fn apply(&mut self, update: SettingsUpdate) -> TrackerResult<()> {
        for (name, value) in [
            ("sensitivity", update.sensitivity),
            ("smoothing", update.smoothing),
        ] {
            if let Some(level) = value {
                if level > LEVEL_MAX {
                    return Err(TrackerError::InvalidSetting(format!(
                        "{} must be between 0 and {}, got {}",
                        name, LEVEL_MAX, level
                    )));
                }
            }
        }

        if let Some(sensitivity) = update.sensitivity {
            self.sensitivity = sensitivity;
        }
        if let Some(smoothing) = update.smoothing {
            self.smoothing = smoothing;
        }
        Ok(())
    }

    /// Spring constants for the current smoothing level.
    pub fn smoothing_config(&self) -> SmoothingConfig {
        SmoothingConfig::from_level(self.smoothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TrackerSettings::default();
        assert_eq!(settings.sensitivity, 5);
        assert_eq!(settings.smoothing, 5);
    }

    #[test]
    fn test_partial_update_keeps_other_field() {
        let mut settings = TrackerSettings::default();
        settings
            .apply(SettingsUpdate {
                smoothing: Some(8),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.smoothing, 8);
        assert_eq!(settings.sensitivity, 5);
    }

    #[test]
    fn test_out_of_range_rejected_without_partial_write() {
        let mut settings = TrackerSettings::default();
        let result = settings.apply(SettingsUpdate {
            sensitivity: Some(3),
            smoothing: Some(11),
        });

        assert!(matches!(result, Err(TrackerError::InvalidSetting(_))));
        assert_eq!(
            settings,
            TrackerSettings::default(),
            "a rejected update must not change either field"
        );
    }

    #[test]
    fn test_update_decodes_from_json() {
        let update: SettingsUpdate = serde_json::from_str(r#"{"smoothing": 2}"#).unwrap();
        assert_eq!(update.smoothing, Some(2));
        assert_eq!(update.sensitivity, None);
    }

    #[test]
    fn test_smoothing_config_follows_level() {
        let mut settings = TrackerSettings::default();
        let mid = settings.smoothing_config();

        settings
            .apply(SettingsUpdate {
                smoothing: Some(10),
                ..Default::default()
            })
            .unwrap();
        let soft = settings.smoothing_config();

        assert!(soft.stiffness < mid.stiffness);
    }
}
