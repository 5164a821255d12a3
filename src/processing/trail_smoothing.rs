//! Gaze trail smoothing for replay
//!
//! Resamples a recorded session into fixed-rate frames and applies spring
//! smoothing so replayed gaze looks steady instead of jittery. Saccades,
//! the fast jumps between fixations, are detected by distance and snap
//! the spring instead of being chased.

use crate::processing::spring::{GazeSpring, SmoothingConfig};
use crate::stream::types::GazePoint;
use serde::{Deserialize, Serialize};

/// Nominal feed interval, used when points carry no timestamps.
pub const DEFAULT_SAMPLE_INTERVAL_MS: f64 = 50.0;

/// Jump distance in pixels treated as a saccade rather than pursuit.
pub const DEFAULT_SACCADE_THRESHOLD: f64 = 400.0;

/// One replay frame carrying both smoothed and raw coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothedGazeFrame {
    /// Smoothed X position
    pub x: f64,
    /// Smoothed Y position
    pub y: f64,
    /// Original raw X position
    pub raw_x: f64,
    /// Original raw Y position
    pub raw_y: f64,
    /// Time in milliseconds from session start
    pub time_ms: f64,
}

/// Whether the move between two samples is a saccade.
pub fn is_saccade(prev: &GazePoint, curr: &GazePoint, threshold_px: f64) -> bool {
    let dx = curr.x - prev.x;
    let dy = curr.y - prev.y;
    (dx * dx + dy * dy).sqrt() > threshold_px
}

/// Smooth a recorded gaze trail at the given output frame rate.
pub fn smooth_gaze_trail(
    points: &[GazePoint],
    config: &SmoothingConfig,
    output_fps: f64,
) -> Vec<SmoothedGazeFrame> {
    smooth_gaze_trail_with_threshold(points, config, output_fps, DEFAULT_SACCADE_THRESHOLD)
}

/// Smooth a recorded gaze trail with a custom saccade threshold.
pub fn smooth_gaze_trail_with_threshold(
    points: &[GazePoint],
    config: &SmoothingConfig,
    output_fps: f64,
    saccade_threshold: f64,
) -> Vec<SmoothedGazeFrame> {
    if points.is_empty() || output_fps <= 0.0 {
        return vec![];
    }

    let times = sample_times(points);
    let frame_duration_ms = 1000.0 / output_fps;
    let total_duration_ms = *times.last().unwrap_or(&0.0);

    // At least one frame for non-empty input.
    let frame_count = ((total_duration_ms / frame_duration_ms).ceil() as usize).max(1);

    let mut result = Vec::with_capacity(frame_count);
    let mut spring = GazeSpring::new(points[0].x, points[0].y);
    let mut raw_index = 0;
    let mut last_raw = points[0].clone();

    for frame in 0..frame_count {
        let frame_time_ms = frame as f64 * frame_duration_ms;

        // Advance to the raw sample current at this frame time.
        while raw_index + 1 < points.len() && times[raw_index + 1] <= frame_time_ms {
            raw_index += 1;
        }
        let raw = &points[raw_index];

        if is_saccade(&last_raw, raw, saccade_threshold) {
            spring.reset(raw.x, raw.y);
        } else {
            let dt = frame_duration_ms / 1000.0;
            spring.step(raw.x, raw.y, config, dt);
        }
        last_raw = raw.clone();

        let (smooth_x, smooth_y) = spring.position();
        result.push(SmoothedGazeFrame {
            x: smooth_x,
            y: smooth_y,
            raw_x: raw.x,
            raw_y: raw.y,
            time_ms: frame_time_ms,
        });
    }

    result
}

/// Per-point times in milliseconds relative to the first sample.
///
/// Feed timestamps are used when every point carries one and the sequence
/// never runs backwards; otherwise times are synthesized at the nominal
/// feed interval.
fn sample_times(points: &[GazePoint]) -> Vec<f64> {
    let from_feed: Option<Vec<f64>> = points
        .first()
        .and_then(|first| first.timestamp)
        .and_then(|base| {
            let mut times = Vec::with_capacity(points.len());
            let mut prev = base;
            for point in points {
                let ts = point.timestamp?;
                if ts < prev {
                    return None;
                }
                times.push((ts - base) as f64);
                prev = ts;
            }
            Some(times)
        });

    from_feed.unwrap_or_else(|| {
        (0..points.len())
            .map(|i| i as f64 * DEFAULT_SAMPLE_INTERVAL_MS)
            .collect()
    })
}
