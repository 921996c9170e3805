//! WiFi Scan Frame Decoder
//!
//! This crate decodes the WiFi scan results an embedded device reports to its
//! host. A frame is a byte buffer holding a list of nearby networks, each
//! encoded as a signal-strength byte followed by the network name.
//!
//! # Frame Overview
//!
//! Frames arrive in one of two shapes:
//!
//! - **Direct**: the buffer is the record data itself
//! - **Fragmented**: the record data is wrapped in a 5-byte fragmentation
//!   header and followed by a 2-byte checksum (skipped, never verified)
//!
//! Records have no length field. Names are runs of printable ASCII, and the
//! boundary between a name and the next signal byte is found by checking
//! whether a non-printable byte reads as a plausible RSSI value (see
//! [`SignalBand`]).
//!
//! Decoding is best effort: malformed input yields partial or empty results,
//! never a panic.
//!
//! # Example
//!
//! ```rust
//! use wifiscan_frame::decode_networks;
//!
//! let frame = [
//!     0xC6, 0x48, 0x33, 0x43, 0x5F, 0x34, 0x30, 0x31, 0x07, 0xBD, 0x34, 0x30, 0x31, 0x34,
//! ];
//! let networks = decode_networks(&frame);
//! assert_eq!(networks[0].name, "H3C_401");
//! assert_eq!(networks[0].signal_strength_dbm, -58);
//! ```

mod config;
mod constants;
mod decoder;
mod envelope;
mod error;
mod record;
mod scanner;
mod signal;

pub use config::*;
pub use constants::*;
pub use decoder::*;
pub use envelope::*;
pub use error::*;
pub use record::*;
pub use scanner::*;
pub use signal::*;
