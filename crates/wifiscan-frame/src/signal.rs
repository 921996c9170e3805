//! Signal-strength decoding and the record boundary heuristic.
//!
//! Records carry no length field, so the scanner splits names from the
//! following signal byte by asking whether a non-printable byte looks like a
//! plausible RSSI value. All of that reasoning lives here so the band can be
//! tuned without touching the scan loop.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{FrameError, FrameResult};

/// Decode a raw byte as a two's-complement signal strength in dBm.
///
/// Values above 127 wrap to `raw - 256`, so `0xC6` is -58 dBm.
pub fn signed_dbm(raw: u8) -> i8 {
    raw as i8
}

/// Check if a byte is printable ASCII name content.
pub fn is_printable(byte: u8) -> bool {
    (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&byte)
}

/// Inclusive band of signal strengths considered plausible for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SignalBand {
    /// Weakest plausible signal, in dBm.
    pub min_dbm: i8,
    /// Strongest plausible signal, in dBm.
    pub max_dbm: i8,
}

impl Default for SignalBand {
    fn default() -> Self {
        SignalBand {
            min_dbm: DEFAULT_MIN_SIGNAL_DBM,
            max_dbm: DEFAULT_MAX_SIGNAL_DBM,
        }
    }
}

impl SignalBand {
    /// Create a band, rejecting inverted bounds.
    pub fn new(min_dbm: i8, max_dbm: i8) -> FrameResult<Self> {
        let band = SignalBand { min_dbm, max_dbm };
        band.validate()?;
        Ok(band)
    }

    /// Check that the band is not inverted.
    pub fn validate(&self) -> FrameResult<()> {
        if self.min_dbm > self.max_dbm {
            return Err(FrameError::InvalidBand {
                min_dbm: self.min_dbm,
                max_dbm: self.max_dbm,
            });
        }
        Ok(())
    }

    /// Check if a signal value falls inside the band.
    pub fn contains(&self, dbm: i8) -> bool {
        (self.min_dbm..=self.max_dbm).contains(&dbm)
    }

    /// Check if a raw byte reads as a plausible signal byte.
    pub fn is_plausible(&self, raw: u8) -> bool {
        self.contains(signed_dbm(raw))
    }

    /// Check if a byte right after a record's signal byte is a separator.
    ///
    /// A non-printable byte that reads as a plausible signal cannot start a
    /// name; the scanner steps over one such byte before the name run.
    pub fn is_separator(&self, raw: u8) -> bool {
        !is_printable(raw) && self.is_plausible(raw)
    }

    /// Decide whether the byte at `index` ends the current name run.
    ///
    /// Printable bytes always belong to the name. A non-printable byte is a
    /// boundary (and becomes the next record's signal byte) when it reads as
    /// a plausible signal itself, or when the byte after it does. Any other
    /// non-printable byte is kept in the name as encoding noise.
    ///
    /// `data` is the record window; `index` must be inside it.
    pub fn is_record_boundary(&self, data: &[u8], index: usize) -> bool {
        let byte = data[index];
        if is_printable(byte) {
            return false;
        }
        if self.is_plausible(byte) {
            return true;
        }
        data.get(index + 1)
            .is_some_and(|&next| self.is_plausible(next))
    }
}
