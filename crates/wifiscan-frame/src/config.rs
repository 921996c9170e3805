//! Decoder configuration.
//!
//! Configuration is passed explicitly to each [`FrameDecoder`](crate::FrameDecoder);
//! there is no process-wide decoder state. It can be loaded from YAML:
//!
//! ```yaml
//! signal-band:
//!   min-dbm: -100
//!   max-dbm: -30
//! name-decoding: strict
//! min-frame-len: 2
//! ```
//!
//! Missing keys take their default values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{FrameError, FrameResult};
use crate::signal::SignalBand;

/// How name runs are turned into strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameDecoding {
    /// Invalid UTF-8 fails the decode.
    #[default]
    Strict,
    /// Invalid sequences are replaced with U+FFFD.
    Lossy,
}

/// Tunable parameters of the frame decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DecoderConfig {
    /// Band used to recognise signal bytes between names.
    pub signal_band: SignalBand,
    /// Name decoding mode.
    pub name_decoding: NameDecoding,
    /// Frames shorter than this decode to no records.
    pub min_frame_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            signal_band: SignalBand::default(),
            name_decoding: NameDecoding::default(),
            min_frame_len: DEFAULT_MIN_FRAME_LEN,
        }
    }
}

impl DecoderConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> FrameResult<Self> {
        let config: DecoderConfig =
            serde_yaml::from_str(yaml).map_err(|e| FrameError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| FrameError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> FrameResult<()> {
        self.signal_band.validate()
    }

    /// Replace the signal band.
    pub fn with_signal_band(mut self, band: SignalBand) -> Self {
        self.signal_band = band;
        self
    }

    /// Replace the name decoding mode.
    pub fn with_name_decoding(mut self, mode: NameDecoding) -> Self {
        self.name_decoding = mode;
        self
    }
}
