//! Gaze feed transport
//!
//! Implements the inbound point stream: the live WebSocket source, an
//! in-memory replay source, and the typed event-subscription interface
//! their events are delivered to.

pub mod source;
pub mod types;
pub mod websocket;

pub use source::{
    GazeStreamHandler, PointSource, ReplaySource, SharedHandler, SourceKind, TrackerError,
    TrackerResult,
};
pub use types::{ConnectionStatus, GazePoint};
pub use websocket::WebSocketSource;
