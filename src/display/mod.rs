//! Display pipeline
//!
//! The gaze display controller and the renderer seams it drives: the
//! marker overlay, the heatmap sink, and the display-only camera preview.

pub mod controller;
pub mod heatmap;
pub mod overlay;
pub mod video;

pub use controller::GazeDisplayController;
pub use heatmap::{GridHeatmap, HeatmapSample, HeatmapSink};
pub use overlay::{GazeOverlay, PixelOverlay, MARKER_FILL, MARKER_RADIUS};
pub use video::{attach_preview, CameraInfo, VideoFeed};
