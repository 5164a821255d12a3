//! Point source trait
//!
//! Defines the interface for gaze point sources (live socket, replay) and
//! the typed event-subscription interface their events are delivered to.

use crate::stream::types::GazePoint;
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while tracking
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Malformed gaze frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for tracking operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Subscriber for gaze stream events.
///
/// One callback per event kind, registered once when the source is built
/// and invoked synchronously in delivery order. Sources never reorder,
/// deduplicate, or buffer events.
pub trait GazeStreamHandler: Send {
    /// The connection came up.
    fn on_open(&mut self);

    /// One decoded point arrived.
    fn on_point(&mut self, point: GazePoint);

    /// The connection ended cleanly.
    fn on_closed(&mut self);

    /// The connection or decoding failed. Delivery stops after this.
    fn on_error(&mut self, error: &TrackerError);
}

/// Handler handle shared between a source and the host.
pub type SharedHandler = Arc<ParkingMutex<dyn GazeStreamHandler + Send>>;

/// Trait for gaze point sources
///
/// A source owns its transport and the handler registered at construction.
/// Running it delivers events until the feed ends, the host signals
/// shutdown, or an unrecoverable error occurs.
#[async_trait]
pub trait PointSource: Send {
    /// Get the source kind
    fn kind(&self) -> SourceKind;

    /// Deliver events to the registered handler until the source ends.
    ///
    /// A malformed frame or transport failure is reported through
    /// `on_error` and then returned; the source does not resume on its
    /// own afterwards.
    async fn run(&mut self) -> TrackerResult<()>;
}

/// Kinds of gaze point sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Live WebSocket feed
    WebSocket,
    /// In-memory frame replay
    Replay,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::WebSocket => write!(f, "websocket"),
            SourceKind::Replay => write!(f, "replay"),
        }
    }
}

/// Replays raw frames from memory into a handler.
///
/// Frames go through the same decoding path as the live feed, so a
/// recorded session replays with identical semantics, including the
/// halt-on-malformed-frame behavior.
pub struct ReplaySource {
    frames: Vec<String>,
    handler: SharedHandler,
}

impl ReplaySource {
    pub fn new(frames: Vec<String>, handler: SharedHandler) -> Self {
        Self { frames, handler }
    }
}

#[async_trait]
impl PointSource for ReplaySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Replay
    }

    async fn run(&mut self) -> TrackerResult<()> {
        let frames = std::mem::take(&mut self.frames);
        self.handler.lock().on_open();

        for frame in frames {
            match GazePoint::from_frame(&frame) {
                Ok(point) => self.handler.lock().on_point(point),
                Err(e) => {
                    let err = TrackerError::MalformedFrame(e);
                    self.handler.lock().on_error(&err);
                    return Err(err);
                }
            }
        }

        self.handler.lock().on_closed();
        Ok(())
    }
}
