//! Host command handlers
//!
//! Operations a frontend invokes against the running tracker, plus the
//! line dispatcher the bundled binary feeds from stdin.

pub mod replay;
pub mod tracking;

pub use replay::{export_replay, smooth_session};
pub use tracking::{
    dispatch_line, export_tracked_session, start_tracking, stop_tracking, tracking_status,
    update_settings, CommandOutcome, SharedController, StatusReport, TrackerHandle,
};
