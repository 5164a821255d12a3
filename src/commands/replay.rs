//! Replay commands
//!
//! These commands expose session smoothing to the host: preview the
//! smoothed trail in memory, or write it out for replay tooling. The
//! spring constants come from the session's smoothing dial.

use crate::commands::tracking::TrackerHandle;
use crate::processing::trail_smoothing::{smooth_gaze_trail, SmoothedGazeFrame};
use std::path::Path;

/// Smooth the recorded session at the given output frame rate.
///
/// This is used for real-time replay preview; nothing is written.
pub async fn smooth_session(
    state: &TrackerHandle,
    output_fps: f64,
) -> Result<Vec<SmoothedGazeFrame>, String> {
    if output_fps <= 0.0 {
        return Err(format!("output fps must be positive, got {}", output_fps));
    }

    let points = state.controller().lock().history().to_vec();
    let config = state.settings().lock().smoothing_config();

    tracing::info!(
        "Smoothing {} gaze points at {}fps with config: stiffness={}, damping={}, mass={}",
        points.len(),
        output_fps,
        config.stiffness,
        config.damping,
        config.mass
    );

    let frames = smooth_gaze_trail(&points, &config, output_fps);

    tracing::info!("Generated {} replay frames", frames.len());

    Ok(frames)
}

/// Smooth the recorded session and write the frames to a file.
pub async fn export_replay(
    state: &TrackerHandle,
    output_fps: f64,
    output_file: &Path,
) -> Result<usize, String> {
    let frames = smooth_session(state, output_fps).await?;

    let data =
        serde_json::to_vec_pretty(&frames).map_err(|e| format!("Failed to serialize: {}", e))?;
    std::fs::write(output_file, data)
        .map_err(|e| format!("Failed to write {}: {}", output_file.display(), e))?;

    tracing::info!(
        "Wrote {} replay frames to {}",
        frames.len(),
        output_file.display()
    );

    Ok(frames.len())
}
