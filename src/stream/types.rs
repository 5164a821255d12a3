use serde::{Deserialize, Serialize};

/// A single reported gaze coordinate.
///
/// One point is decoded from each inbound text frame. The feed may attach
/// a server-side timestamp; everything else it sends is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl GazePoint {
    /// Decode a point from a raw text frame.
    ///
    /// Frames missing `x` or `y`, or carrying non-numeric coordinates,
    /// are malformed. Unknown fields are dropped during decoding.
    pub fn from_frame(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }
}

/// Connection state of the gaze feed, surfaced for display only.
///
/// Status never gates point processing; the tracking switch does that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connecting,
    Open,
    Closed,
    Errored,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connecting => write!(f, "connecting"),
            ConnectionStatus::Open => write!(f, "connected"),
            ConnectionStatus::Closed => write!(f, "disconnected"),
            ConnectionStatus::Errored => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal_frame() {
        let point = GazePoint::from_frame(r#"{"x": 100.0, "y": 200.0}"#).unwrap();
        assert_eq!(point.x, 100.0);
        assert_eq!(point.y, 200.0);
        assert_eq!(point.timestamp, None);
    }

    #[test]
    fn test_decode_keeps_feed_timestamp() {
        let point =
            GazePoint::from_frame(r#"{"x": 12.5, "y": 30.25, "timestamp": 1700000000123}"#)
                .unwrap();
        assert_eq!(point.timestamp, Some(1_700_000_000_123));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let point =
            GazePoint::from_frame(r#"{"x": 1.0, "y": 2.0, "confidence": 0.9, "eye": "left"}"#)
                .unwrap();
        assert_eq!(point.x, 1.0);
        assert_eq!(point.y, 2.0);
    }

    #[test]
    fn test_decode_rejects_missing_coordinate() {
        assert!(GazePoint::from_frame(r#"{"x": 1.0}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_non_numeric_coordinate() {
        assert!(GazePoint::from_frame(r#"{"x": "wide", "y": 2.0}"#).is_err());
    }

    #[test]
    fn test_status_indicator_labels() {
        assert_eq!(ConnectionStatus::Open.to_string(), "connected");
        assert_eq!(ConnectionStatus::Closed.to_string(), "disconnected");
    }
}
