//! Gaze display controller
//!
//! Bridges the inbound point stream to two passive renderers, the marker
//! overlay and the heatmap sink, under control of a manual tracking
//! switch. Connection lifecycle events update the displayed status and
//! nothing else.

use crate::display::heatmap::{HeatmapSample, HeatmapSink};
use crate::display::overlay::GazeOverlay;
use crate::stream::source::{GazeStreamHandler, TrackerError};
use crate::stream::types::{ConnectionStatus, GazePoint};

/// Weight submitted to the heatmap per processed point.
const SAMPLE_VALUE: f64 = 1.0;

pub struct GazeDisplayController {
    tracking: bool,
    status: ConnectionStatus,
    history: Vec<GazePoint>,
    overlay: Box<dyn GazeOverlay>,
    heatmap: Box<dyn HeatmapSink>,
}

impl GazeDisplayController {
    /// Build a controller over its two renderers. Tracking starts off.
    pub fn new(overlay: Box<dyn GazeOverlay>, heatmap: Box<dyn HeatmapSink>) -> Self {
        Self {
            tracking: false,
            status: ConnectionStatus::Connecting,
            history: Vec::new(),
            overlay,
            heatmap,
        }
    }

    /// Turn tracking on. Points arriving from now on are processed.
    pub fn start(&mut self) {
        self.tracking = true;
        tracing::info!("Gaze tracking started");
    }

    /// Turn tracking off.
    ///
    /// Points arriving while off are dropped outright: not buffered, not
    /// replayed when tracking resumes.
    pub fn stop(&mut self) {
        self.tracking = false;
        tracing::info!("Gaze tracking stopped ({} points recorded)", self.history.len());
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Every point processed this session, in arrival order.
    pub fn history(&self) -> &[GazePoint] {
        &self.history
    }
}

impl GazeStreamHandler for GazeDisplayController {
    fn on_open(&mut self) {
        self.status = ConnectionStatus::Open;
        tracing::info!("Gaze feed connected");
    }

    fn on_point(&mut self, point: GazePoint) {
        if !self.tracking {
            return;
        }

        self.overlay.clear();
        self.overlay.draw_marker(point.x, point.y);
        self.heatmap.add(HeatmapSample {
            x: point.x,
            y: point.y,
            value: SAMPLE_VALUE,
        });
        self.history.push(point);
    }

    fn on_closed(&mut self) {
        self.status = ConnectionStatus::Closed;
        tracing::info!("Gaze feed disconnected");
    }

    fn on_error(&mut self, error: &TrackerError) {
        self.status = ConnectionStatus::Errored;
        tracing::warn!("Gaze feed error: {}", error);
    }
}
