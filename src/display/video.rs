//! Camera preview seam
//!
//! The webcam is a display-only collaborator: its frames go straight to
//! the host's viewer and are never read by the tracking pipeline. The
//! library ships no platform backend; hosts implement [`VideoFeed`] for
//! whatever capture layer they use.

use crate::stream::source::TrackerResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    pub id: String,
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            id: "user".to_string(),
            label: "User-facing camera".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Live video feed attached to a viewer for display.
pub trait VideoFeed: Send {
    fn info(&self) -> &CameraInfo;

    /// Begin delivering frames to the host's viewer.
    fn attach(&mut self) -> TrackerResult<()>;

    fn detach(&mut self);
}

/// Attach a preview feed, logging what came up.
///
/// A failure here is not recovered; the caller propagates it and the
/// session does not start.
pub fn attach_preview(feed: &mut dyn VideoFeed) -> TrackerResult<()> {
    feed.attach()?;
    let info = feed.info();
    tracing::info!(
        "Camera preview attached: {} ({}x{})",
        info.label,
        info.width,
        info.height
    );
    Ok(())
}
