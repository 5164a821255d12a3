//! Post-session processing
//!
//! Algorithms applied to a recorded gaze trail for replay and export,
//! currently spring smoothing with saccade handling.

pub mod spring;
pub mod trail_smoothing;

pub use spring::{AxisSpring, GazeSpring, SmoothingConfig};
pub use trail_smoothing::{smooth_gaze_trail, SmoothedGazeFrame};
