//! Frame decoding entry points.

use std::fmt;

use log::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::envelope::{DataLengthDetector, EnvelopeDetector, FragmentHeader, FrameFormat, FrameWindow};
use crate::error::FrameResult;
use crate::record::NetworkRecord;
use crate::scanner::RecordScanner;

/// Everything learned while decoding one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Envelope classification.
    pub format: FrameFormat,
    /// Record window inside the frame.
    pub window: FrameWindow,
    /// Envelope fields, for fragmented frames.
    pub header: Option<FragmentHeader>,
    /// Decoded records in frame order.
    pub records: Vec<NetworkRecord>,
    /// Number of scan loop iterations.
    pub iterations: usize,
    /// Signal bytes stepped over because no name followed them.
    pub skipped_bytes: usize,
}

impl DecodeReport {
    fn empty(format: FrameFormat, window: FrameWindow, header: Option<FragmentHeader>) -> Self {
        DecodeReport {
            format,
            window,
            header,
            records: Vec::new(),
            iterations: 0,
            skipped_bytes: 0,
        }
    }
}

/// Decodes WiFi scan frames into network records.
///
/// A decoder holds no per-call state and can be shared between threads.
pub struct FrameDecoder {
    config: DecoderConfig,
    detector: Box<dyn EnvelopeDetector>,
}

impl fmt::Debug for FrameDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDecoder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        FrameDecoder {
            config: DecoderConfig::default(),
            detector: Box::new(DataLengthDetector::new()),
        }
    }
}

impl FrameDecoder {
    /// Create a decoder using the default envelope detector.
    ///
    /// Fails with [`FrameError::InvalidBand`](crate::FrameError::InvalidBand)
    /// if the configured signal band is inverted.
    pub fn new(config: DecoderConfig) -> FrameResult<Self> {
        Self::with_detector(config, DataLengthDetector::new())
    }

    /// Create a decoder with a custom envelope detector.
    pub fn with_detector(
        config: DecoderConfig,
        detector: impl EnvelopeDetector + 'static,
    ) -> FrameResult<Self> {
        config.validate()?;
        Ok(FrameDecoder {
            config,
            detector: Box::new(detector),
        })
    }

    /// Classify a frame and compute its record window.
    pub fn window(&self, frame: &[u8]) -> (FrameFormat, FrameWindow) {
        self.detector.detect(frame)
    }

    /// Decode a frame, returning an empty list on failure.
    ///
    /// Scan data from the device is noisy; a failed decode is logged and
    /// reported as "no networks found".
    pub fn decode(&self, frame: &[u8]) -> Vec<NetworkRecord> {
        self.decode_report(frame).records
    }

    /// Decode a frame, keeping the envelope details when decoding fails.
    ///
    /// On failure the report carries the detected format, window and header
    /// but no records.
    pub fn decode_report(&self, frame: &[u8]) -> DecodeReport {
        match self.try_decode(frame) {
            Ok(report) => report,
            Err(e) => {
                warn!("Failed to parse WiFi networks from payload: {}", e);
                let (format, window) = self.window(frame);
                DecodeReport::empty(format, window, Self::header(format, frame))
            }
        }
    }

    /// Decode a frame, surfacing name decoding failures.
    pub fn try_decode(&self, frame: &[u8]) -> FrameResult<DecodeReport> {
        trace!("Payload ({} bytes): {}", frame.len(), hex::encode(frame));

        let (format, window) = self.window(frame);
        let header = Self::header(format, frame);

        if frame.len() < self.config.min_frame_len {
            debug!("Payload too short for WiFi data ({} bytes)", frame.len());
            return Ok(DecodeReport::empty(format, window, header));
        }

        debug!(
            "{} frame, data section {} ({} bytes)",
            format,
            window,
            window.len()
        );
        let Some(range) = window.range(frame.len()) else {
            debug!("No data content in frame");
            return Ok(DecodeReport::empty(format, window, header));
        };
        trace!("Data section: {}", hex::encode(&frame[range]));

        let outcome = RecordScanner::new(&self.config).scan(frame, window)?;
        debug!("Parsed {} WiFi networks", outcome.records.len());

        Ok(DecodeReport {
            format,
            window,
            header,
            records: outcome.records,
            iterations: outcome.iterations,
            skipped_bytes: outcome.skipped_bytes,
        })
    }

    fn header(format: FrameFormat, frame: &[u8]) -> Option<FragmentHeader> {
        match format {
            FrameFormat::Fragmented => FragmentHeader::parse(frame),
            FrameFormat::Direct => None,
        }
    }
}

/// Decode a frame with the default configuration.
///
/// Never fails: malformed frames yield partial or empty results.
pub fn decode_networks(frame: &[u8]) -> Vec<NetworkRecord> {
    FrameDecoder::default().decode(frame)
}
