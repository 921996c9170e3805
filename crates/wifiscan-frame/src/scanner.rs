//! Record scanning.
//!
//! The record window is a concatenation of variable-length records with no
//! length prefix:
//!
//! ```text
//! +--------+-----------+--------+-----------+-----
//! | signal | name ...  | signal | name ...  | ...
//! |   1    | printable |   1    | printable |
//! +--------+-----------+--------+-----------+-----
//! ```
//!
//! The scanner reads a signal byte, collects the name run that follows it
//! and stops at the first byte [`SignalBand::is_record_boundary`] flags.
//! That byte is the next record's signal byte.

use log::{debug, trace};

use crate::config::{DecoderConfig, NameDecoding};
use crate::envelope::FrameWindow;
use crate::error::{FrameError, FrameResult};
use crate::record::NetworkRecord;
use crate::signal::{signed_dbm, SignalBand};

/// Result of scanning one record window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Records in the order they appear in the frame.
    pub records: Vec<NetworkRecord>,
    /// Number of scan loop iterations.
    pub iterations: usize,
    /// Signal bytes stepped over because no name followed them.
    pub skipped_bytes: usize,
}

/// Splits a record window into network records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordScanner {
    band: SignalBand,
    name_decoding: NameDecoding,
}

impl Default for RecordScanner {
    fn default() -> Self {
        Self::new(&DecoderConfig::default())
    }
}

impl RecordScanner {
    /// Create a scanner from decoder configuration.
    pub fn new(config: &DecoderConfig) -> Self {
        RecordScanner {
            band: config.signal_band,
            name_decoding: config.name_decoding,
        }
    }

    /// Scan the records inside `window`.
    ///
    /// Malformed data never fails the scan; it yields fewer records. The only
    /// error is a name run that is not valid UTF-8 under strict decoding.
    pub fn scan(&self, frame: &[u8], window: FrameWindow) -> FrameResult<ScanOutcome> {
        let mut outcome = ScanOutcome::default();
        let Some(range) = window.range(frame.len()) else {
            return Ok(outcome);
        };
        let base = range.start;
        let data = &frame[range];

        let mut offset = 0;
        while offset < data.len() {
            outcome.iterations += 1;
            let signal = signed_dbm(data[offset]);
            let name_start = self.name_start(data, offset);
            let name_end = self.name_end(data, name_start);

            if name_end == name_start {
                trace!(
                    "No name after signal byte 0x{:02X} at offset {}, skipping",
                    data[offset],
                    base + offset
                );
                outcome.skipped_bytes += 1;
                offset += 1;
                continue;
            }

            let name = self.decode_name(&data[name_start..name_end], base + name_start)?;
            debug!(
                "Found network \"{}\" ({} dBm) at offset {}",
                name,
                signal,
                base + offset
            );
            outcome.records.push(NetworkRecord::new(name, signal));
            offset = name_end;
        }

        Ok(outcome)
    }

    /// First byte of the name belonging to the signal byte at `signal_offset`.
    fn name_start(&self, data: &[u8], signal_offset: usize) -> usize {
        let start = signal_offset + 1;
        match data.get(start) {
            Some(&byte) if self.band.is_separator(byte) => start + 1,
            _ => start,
        }
    }

    /// One past the last byte of the name run starting at `start`.
    fn name_end(&self, data: &[u8], start: usize) -> usize {
        let mut end = start;
        while end < data.len() && !self.band.is_record_boundary(data, end) {
            end += 1;
        }
        end
    }

    fn decode_name(&self, bytes: &[u8], offset: usize) -> FrameResult<String> {
        match self.name_decoding {
            NameDecoding::Strict => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| FrameError::InvalidUtf8 {
                    offset,
                    len: bytes.len(),
                }),
            NameDecoding::Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}
