//! Fragmentation envelope detection.
//!
//! The device either sends scan records directly or wraps them in a
//! fragmentation envelope:
//!
//! ```text
//! +---------------+----------+-------------+----------------+---------+----------+
//! | frame-control | sequence | data-length | content-length | records | checksum |
//! |       1       |    1     |      1      |  2 (LE)        |   N     |    2     |
//! +---------------+----------+-------------+----------------+---------+----------+
//! ```
//!
//! A zero data-length byte marks a wrapped frame. This is an empirical rule
//! taken from observed device traffic, so detection sits behind the
//! [`EnvelopeDetector`] trait and can be replaced.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// How a frame was classified by envelope detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameFormat {
    /// Records wrapped in a fragmentation header and trailing checksum.
    Fragmented,
    /// Records with no envelope.
    Direct,
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameFormat::Fragmented => write!(f, "fragmented"),
            FrameFormat::Direct => write!(f, "direct"),
        }
    }
}

/// Half-open `[start, end)` range of a frame that holds records.
///
/// Short fragmented frames yield an inverted window (`end < start`); such a
/// window is empty and carries no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameWindow {
    /// First byte of record data.
    pub start: usize,
    /// One past the last byte of record data.
    pub end: usize,
}

impl FrameWindow {
    /// Create a window.
    pub fn new(start: usize, end: usize) -> Self {
        FrameWindow { start, end }
    }

    /// Window covering a whole frame.
    pub fn whole(frame: &[u8]) -> Self {
        FrameWindow::new(0, frame.len())
    }

    /// Number of bytes in the window, zero when inverted.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the window holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The window as a slice range, or `None` when empty or out of bounds
    /// for a frame of `frame_len` bytes.
    pub fn range(&self, frame_len: usize) -> Option<Range<usize>> {
        if self.is_empty() || self.end > frame_len {
            return None;
        }
        Some(self.start..self.end)
    }
}

impl fmt::Display for FrameWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Decides where the record data of a frame lives.
pub trait EnvelopeDetector: Send + Sync {
    /// Classify a frame and compute its record window.
    fn detect(&self, frame: &[u8]) -> (FrameFormat, FrameWindow);
}

/// Default detector: a frame of at least five bytes whose data-length byte
/// is zero is wrapped in the fragmentation envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataLengthDetector;

impl DataLengthDetector {
    /// Create the default detector.
    pub fn new() -> Self {
        DataLengthDetector
    }

    /// Check if a frame is wrapped in the fragmentation envelope.
    pub fn is_fragmented(frame: &[u8]) -> bool {
        frame.len() >= FRAGMENT_HEADER_SIZE
            && frame[FRAGMENT_DATA_LENGTH_OFFSET] == FRAGMENT_MARKER_DATA_LENGTH
    }
}

impl EnvelopeDetector for DataLengthDetector {
    fn detect(&self, frame: &[u8]) -> (FrameFormat, FrameWindow) {
        if Self::is_fragmented(frame) {
            // Inverted for 5- and 6-byte frames
            let end = frame.len() - FRAGMENT_CHECKSUM_SIZE;
            (FrameFormat::Fragmented, FrameWindow::new(FRAGMENT_HEADER_SIZE, end))
        } else {
            (FrameFormat::Direct, FrameWindow::whole(frame))
        }
    }
}

/// Header fields of a fragmented frame.
///
/// Only used for diagnostics: the record scanner never reads these values,
/// and the checksum is exposed but not verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentHeader {
    /// Frame control byte.
    pub frame_control: u8,
    /// Fragment sequence number.
    pub sequence: u8,
    /// Data length byte (zero for wrapped scan frames).
    pub data_length: u8,
    /// Total content length (little-endian on the wire).
    pub content_length: u16,
    /// Trailing checksum bytes, if the frame is long enough to carry them.
    pub checksum: Option<[u8; FRAGMENT_CHECKSUM_SIZE]>,
}

impl FragmentHeader {
    /// Parse the envelope fields of a frame.
    ///
    /// Returns `None` if the frame is too short to carry a header.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        if frame.len() < FRAGMENT_HEADER_SIZE {
            return None;
        }
        let checksum = if frame.len() >= FRAGMENT_HEADER_SIZE + FRAGMENT_CHECKSUM_SIZE {
            let tail = frame.len() - FRAGMENT_CHECKSUM_SIZE;
            Some([frame[tail], frame[tail + 1]])
        } else {
            None
        };
        Some(FragmentHeader {
            frame_control: frame[0],
            sequence: frame[1],
            data_length: frame[FRAGMENT_DATA_LENGTH_OFFSET],
            content_length: u16::from_le_bytes([frame[3], frame[4]]),
            checksum,
        })
    }
}
