//! Error types for wifiscan-frame.

use thiserror::Error;

/// Errors that can occur while decoding a scan frame or loading decoder
/// configuration.
///
/// Malformed frames never produce an error on their own; the scanner degrades
/// to partial or empty results. The only decode-time failure is a name run
/// that is not valid UTF-8 under strict decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A name run is not valid UTF-8.
    #[error("invalid UTF-8 in name run at offset {offset} ({len} bytes)")]
    InvalidUtf8 {
        /// Byte offset of the run within the frame.
        offset: usize,
        /// Length of the run in bytes.
        len: usize,
    },

    /// Signal band bounds are inverted.
    #[error("invalid signal band: min {min_dbm} dBm is above max {max_dbm} dBm")]
    InvalidBand {
        /// Configured lower bound.
        min_dbm: i8,
        /// Configured upper bound.
        max_dbm: i8,
    },

    /// Configuration could not be read or parsed.
    #[error("invalid decoder configuration: {0}")]
    Config(String),
}

impl FrameError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        FrameError::Config(message.into())
    }
}

/// Result type alias for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;
