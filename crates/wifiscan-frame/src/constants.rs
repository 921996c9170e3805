//! Frame format constants
//!
//! These constants describe the fragmentation envelope and the record
//! encoding used by the device when it reports WiFi scan results.

// ============================================================================
// Fragmentation Envelope
// ============================================================================

/// Size of the fragmentation header that prefixes wrapped frames.
///
/// Layout: `[frame-control][sequence][data-length][content-length:2]`.
pub const FRAGMENT_HEADER_SIZE: usize = 5;
/// Size of the checksum that trails wrapped frames. Skipped, never verified.
pub const FRAGMENT_CHECKSUM_SIZE: usize = 2;
/// Offset of the data-length byte inside the fragmentation header.
pub const FRAGMENT_DATA_LENGTH_OFFSET: usize = 2;
/// Data-length value that marks a frame as wrapped in the envelope.
pub const FRAGMENT_MARKER_DATA_LENGTH: u8 = 0;

// ============================================================================
// Record Encoding
// ============================================================================

/// Lowest byte accepted as printable name content (space).
pub const PRINTABLE_MIN: u8 = 0x20;
/// Highest byte accepted as printable name content (tilde).
pub const PRINTABLE_MAX: u8 = 0x7E;

/// Default lower bound of the plausible signal band, in dBm.
pub const DEFAULT_MIN_SIGNAL_DBM: i8 = -100;
/// Default upper bound of the plausible signal band, in dBm.
pub const DEFAULT_MAX_SIGNAL_DBM: i8 = -30;

/// Frames shorter than this carry no records.
pub const DEFAULT_MIN_FRAME_LEN: usize = 2;

/// Placeholder security label; the frame format does not encode security.
pub const SECURITY_UNKNOWN: &str = "Unknown";

/// Prefix of generated record identifiers.
pub const RECORD_ID_PREFIX: &str = "wifi";
