//! Error types for graph configuration and the surrounding plumbing.
//!
//! The coordinate and quantize math is total; only configuring a graph
//! (geometry, lane selection, config files) and process setup can fail.

use thiserror::Error;

/// Result type for ctrlgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Vertical geometry that would divide by zero or invert the axis.
    #[error("invalid graph geometry: height {height}, line width {line_width}, max value {max_value}")]
    InvalidGeometry {
        height: f64,
        line_width: f64,
        max_value: f64,
    },

    /// Unparseable lane selector such as `cc:300`.
    #[error("invalid lane '{0}': expected 'pitch' or 'cc:<0-127>'")]
    InvalidLane(String),

    /// Malformed colour string in the theme settings.
    #[error("invalid colour '{0}': expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger initialization failed")]
    Logger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GraphError::InvalidGeometry {
            height: 4.0,
            line_width: 2.0,
            max_value: 127.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid graph geometry: height 4, line width 2, max value 127"
        );
    }

    #[test]
    fn test_lane_error_display() {
        let err = GraphError::InvalidLane("cc:300".to_string());
        assert_eq!(
            err.to_string(),
            "invalid lane 'cc:300': expected 'pitch' or 'cc:<0-127>'"
        );
    }
}
