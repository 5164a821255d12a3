//! Live WebSocket gaze feed
//!
//! Connects to the gaze feed endpoint and delivers decoded points to the
//! registered handler. The source carries no retry, backoff, or
//! reconnection policy; once it ends, point delivery stops until the host
//! runs a new source.

use crate::stream::source::{
    PointSource, SharedHandler, SourceKind, TrackerError, TrackerResult,
};
use crate::stream::types::GazePoint;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Text frame sent to the feed when the host shuts down gracefully.
const SHUTDOWN_FRAME: &str = "STOP";

pub struct WebSocketSource {
    url: String,
    handler: SharedHandler,
    shutdown: watch::Receiver<bool>,
}

impl WebSocketSource {
    /// Create a source for the given feed URL.
    ///
    /// The handler is registered once, here; the shutdown receiver lets
    /// the host end the session cleanly from another task.
    pub fn new(url: String, handler: SharedHandler, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            url,
            handler,
            shutdown,
        }
    }

    fn deliver_error(handler: &SharedHandler, err: TrackerError) -> TrackerError {
        handler.lock().on_error(&err);
        err
    }
}

#[async_trait]
impl PointSource for WebSocketSource {
    fn kind(&self) -> SourceKind {
        SourceKind::WebSocket
    }

    async fn run(&mut self) -> TrackerResult<()> {
        let handler = self.handler.clone();
        let mut shutdown = self.shutdown.clone();

        tracing::info!("Connecting to gaze feed at {}", self.url);

        let (ws, _) = match connect_async(self.url.as_str()).await {
            Ok(pair) => pair,
            Err(e) => {
                return Err(Self::deliver_error(&handler, TrackerError::Transport(e)));
            }
        };

        handler.lock().on_open();
        let (mut write, mut read) = ws.split();

        loop {
            tokio::select! {
                message = read.next() => {
                    match message {
                        Some(Ok(Message::Text(frame))) => {
                            match GazePoint::from_frame(&frame) {
                                Ok(point) => handler.lock().on_point(point),
                                Err(e) => {
                                    return Err(Self::deliver_error(
                                        &handler,
                                        TrackerError::MalformedFrame(e),
                                    ));
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            handler.lock().on_closed();
                            return Ok(());
                        }
                        Some(Ok(other)) => {
                            // The feed only speaks text frames; pings are
                            // answered by the transport itself.
                            tracing::trace!("Ignoring non-text frame: {:?}", other);
                        }
                        Some(Err(e)) => {
                            return Err(Self::deliver_error(&handler, TrackerError::Transport(e)));
                        }
                    }
                }
                changed = shutdown.changed() => {
                    // A dropped sender counts as a shutdown request.
                    if changed.is_err() || *shutdown.borrow() {
                        let _ = write.send(Message::Text(SHUTDOWN_FRAME.into())).await;
                        let _ = write.close().await;
                        handler.lock().on_closed();
                        tracing::info!("Gaze feed shut down by host");
                        return Ok(());
                    }
                }
            }
        }
    }
}
