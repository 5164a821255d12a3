//! Session state
//!
//! User settings carried with a tracking session and the JSON export of
//! its recorded history.

pub mod export;
pub mod settings;

pub use export::{export_session, SessionExport};
pub use settings::{SettingsUpdate, TrackerSettings, LEVEL_MAX};
