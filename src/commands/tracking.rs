//! Tracking commands
//!
//! Host-facing operations over the shared controller: toggle tracking,
//! report status, change settings, export the session. Results use
//! host-friendly string errors so any frontend can surface them as-is.

use crate::display::controller::GazeDisplayController;
use crate::session::export::export_session;
use crate::session::settings::{SettingsUpdate, TrackerSettings};
use crate::stream::types::ConnectionStatus;
use parking_lot::Mutex as ParkingMutex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Controller handle shared between the stream task and the command layer.
pub type SharedController = Arc<ParkingMutex<GazeDisplayController>>;

/// Application state for tracking commands
pub struct TrackerHandle {
    controller: SharedController,
    settings: Arc<ParkingMutex<TrackerSettings>>,
    export_dir: PathBuf,
}

impl TrackerHandle {
    pub fn new(
        controller: SharedController,
        settings: Arc<ParkingMutex<TrackerSettings>>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            controller,
            settings,
            export_dir,
        }
    }

    pub fn controller(&self) -> &SharedController {
        &self.controller
    }

    pub fn settings(&self) -> &Arc<ParkingMutex<TrackerSettings>> {
        &self.settings
    }

    pub fn export_dir(&self) -> &PathBuf {
        &self.export_dir
    }
}

/// Snapshot of the tracker surfaced to the host UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub tracking: bool,
    pub connection: ConnectionStatus,
    pub points_recorded: usize,
    pub settings: TrackerSettings,
}

/// Start forwarding inbound points to the renderers
pub async fn start_tracking(state: &TrackerHandle) -> Result<(), String> {
    state.controller.lock().start();
    Ok(())
}

/// Stop forwarding inbound points
pub async fn stop_tracking(state: &TrackerHandle) -> Result<(), String> {
    state.controller.lock().stop();
    Ok(())
}

/// Get the current tracking status
pub async fn tracking_status(state: &TrackerHandle) -> Result<StatusReport, String> {
    let controller = state.controller.lock();
    Ok(StatusReport {
        tracking: controller.is_tracking(),
        connection: controller.status(),
        points_recorded: controller.history().len(),
        settings: state.settings.lock().clone(),
    })
}

/// Merge a settings update and return the resulting settings
pub async fn update_settings(
    state: &TrackerHandle,
    update: SettingsUpdate,
) -> Result<TrackerSettings, String> {
    let mut settings = state.settings.lock();
    settings.apply(update).map_err(|e| e.to_string())?;
    tracing::info!("Updated settings: {:?}", *settings);
    Ok(settings.clone())
}

/// Export the session history to the configured directory
pub async fn export_tracked_session(state: &TrackerHandle) -> Result<String, String> {
    let points = state.controller.lock().history().to_vec();
    let settings = state.settings.lock().clone();

    export_session(&state.export_dir, settings, points)
        .map(|path| path.display().to_string())
        .map_err(|e| e.to_string())
}

/// Outcome of one dispatched command line.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Reply(String),
    Quit,
}

const HELP: &str =
    "commands: start | stop | status | export | replay <fps> | set <sensitivity|smoothing> <0-10> | quit";

/// Dispatch one line of host input against the tracker.
pub async fn dispatch_line(state: &TrackerHandle, line: &str) -> CommandOutcome {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let reply = match parts.as_slice() {
        ["start"] => start_tracking(state)
            .await
            .map(|_| "tracking started".to_string()),
        ["stop"] => stop_tracking(state)
            .await
            .map(|_| "tracking stopped".to_string()),
        ["status"] => tracking_status(state).await.and_then(|report| {
            serde_json::to_string(&report).map_err(|e| e.to_string())
        }),
        ["export"] => export_tracked_session(state)
            .await
            .map(|path| format!("session written to {}", path)),
        ["replay", fps] => match fps.parse::<f64>() {
            Ok(fps) => crate::commands::replay::smooth_session(state, fps)
                .await
                .map(|frames| format!("smoothed {} replay frames at {}fps", frames.len(), fps)),
            Err(_) => Err(format!("not a frame rate: {}", fps)),
        },
        ["set", key, value] => match value.parse::<u8>() {
            Ok(level) => {
                let update = match *key {
                    "sensitivity" => SettingsUpdate {
                        sensitivity: Some(level),
                        ..Default::default()
                    },
                    "smoothing" => SettingsUpdate {
                        smoothing: Some(level),
                        ..Default::default()
                    },
                    other => return CommandOutcome::Reply(format!("unknown setting: {}", other)),
                };
                update_settings(state, update)
                    .await
                    .map(|s| format!("settings now {:?}", s))
            }
            Err(_) => Err(format!("not a level: {}", value)),
        },
        ["quit"] | ["exit"] => return CommandOutcome::Quit,
        [] => return CommandOutcome::Reply(String::new()),
        _ => Err(HELP.to_string()),
    };

    CommandOutcome::Reply(reply.unwrap_or_else(|e| format!("error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::heatmap::GridHeatmap;
    use crate::display::overlay::PixelOverlay;
    use crate::stream::source::GazeStreamHandler;
    use crate::stream::types::GazePoint;

    fn handle(export_dir: PathBuf) -> TrackerHandle {
        let controller: SharedController = Arc::new(ParkingMutex::new(GazeDisplayController::new(
            Box::new(PixelOverlay::new(64, 64)),
            Box::new(GridHeatmap::new(64, 64, 8)),
        )));
        TrackerHandle::new(
            controller,
            Arc::new(ParkingMutex::new(TrackerSettings::default())),
            export_dir,
        )
    }

    #[tokio::test]
    async fn test_start_stop_flip_tracking() {
        let state = handle(PathBuf::from("data"));

        start_tracking(&state).await.unwrap();
        assert!(tracking_status(&state).await.unwrap().tracking);

        stop_tracking(&state).await.unwrap();
        assert!(!tracking_status(&state).await.unwrap().tracking);
    }

    #[tokio::test]
    async fn test_status_counts_recorded_points() {
        let state = handle(PathBuf::from("data"));
        start_tracking(&state).await.unwrap();

        state.controller.lock().on_point(GazePoint {
            x: 10.0,
            y: 20.0,
            timestamp: None,
        });

        let report = tracking_status(&state).await.unwrap();
        assert_eq!(report.points_recorded, 1);
        assert_eq!(report.settings, TrackerSettings::default());
    }

    #[tokio::test]
    async fn test_update_settings_rejects_bad_level() {
        let state = handle(PathBuf::from("data"));
        let result = update_settings(
            &state,
            SettingsUpdate {
                smoothing: Some(99),
                ..Default::default()
            },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = handle(dir.path().to_path_buf());

        assert_eq!(
            dispatch_line(&state, "start").await,
            CommandOutcome::Reply("tracking started".to_string())
        );
        assert_eq!(
            dispatch_line(&state, "set smoothing 7").await,
            CommandOutcome::Reply(
                "settings now TrackerSettings { sensitivity: 5, smoothing: 7 }".to_string()
            )
        );
        assert_eq!(dispatch_line(&state, "quit").await, CommandOutcome::Quit);

        let outcome = dispatch_line(&state, "export").await;
        match outcome {
            CommandOutcome::Reply(reply) => {
                assert!(reply.starts_with("session written to "), "got: {}", reply)
            }
            CommandOutcome::Quit => panic!("export must not quit"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_command_replies_help() {
        let state = handle(PathBuf::from("data"));
        match dispatch_line(&state, "dance").await {
            CommandOutcome::Reply(reply) => assert!(reply.starts_with("error: commands:")),
            CommandOutcome::Quit => panic!("unknown input must not quit"),
        }
    }
}
