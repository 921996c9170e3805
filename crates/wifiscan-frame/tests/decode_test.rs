//! Integration tests for frame decoding.
//!
//! These tests drive the public API with captured and synthetic frames.

use std::sync::Arc;
use std::thread;

use wifiscan_frame::{
    decode_networks, signed_dbm, DataLengthDetector, DecoderConfig, EnvelopeDetector,
    FrameDecoder, FrameFormat, FrameWindow, NetworkRecord, SecurityKind,
};

/// Scan result captured from a device, sent without an envelope.
const DEVICE_CAPTURE: [u8; 14] = [
    0xC6, 0x48, 0x33, 0x43, 0x5F, 0x34, 0x30, 0x31, 0x07, 0xBD, 0x34, 0x30, 0x31, 0x34,
];

/// Wrap record data in a fragmentation envelope.
fn wrap(records: &[u8], sequence: u8) -> Vec<u8> {
    let mut frame = vec![0x02, sequence, 0x00];
    frame.extend_from_slice(&(records.len() as u16).to_le_bytes());
    frame.extend_from_slice(records);
    frame.extend_from_slice(&[0x5A, 0xA5]);
    frame
}

fn observations(records: &[NetworkRecord]) -> Vec<(i8, String)> {
    records
        .iter()
        .map(|r| (r.signal_strength_dbm, r.name.clone()))
        .collect()
}

/// Small deterministic generator so the sweep tests need no extra crates.
fn pseudo_random_frames(count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut state: u32 = 0x1234_5678;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    (0..count)
        .map(|_| {
            let len = next() as usize % (max_len + 1);
            (0..len).map(|_| next() as u8).collect()
        })
        .collect()
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_device_capture_direct() {
    let records = decode_networks(&DEVICE_CAPTURE);
    assert_eq!(
        observations(&records),
        vec![(-58, "H3C_401".to_string()), (7, "4014".to_string())]
    );
    for record in &records {
        assert_eq!(record.security_kind, SecurityKind::Unknown);
        assert_eq!(record.frequency_mhz, 0);
        assert_eq!(record.channel, 0);
    }
}

#[test]
fn test_device_capture_fragmented() {
    let frame = wrap(&DEVICE_CAPTURE, 1);
    let report = FrameDecoder::default()
        .try_decode(&frame)
        .expect("decode should succeed");
    assert_eq!(report.format, FrameFormat::Fragmented);
    assert_eq!(report.window, FrameWindow::new(5, 5 + DEVICE_CAPTURE.len()));
    assert_eq!(
        observations(&report.records),
        vec![(-58, "H3C_401".to_string()), (7, "4014".to_string())]
    );
}

#[test]
fn test_records_keep_frame_order() {
    let data = [
        0xB0, b'a', b'l', b'p', b'h', b'a', 0xC0, b'b', b'e', b't', b'a', 0xD0, b'g', b'a',
        b'm', b'm', b'a',
    ];
    let records = decode_networks(&data);
    assert_eq!(
        observations(&records),
        vec![
            (-80, "alpha".to_string()),
            (-64, "beta".to_string()),
            (-48, "gamma".to_string())
        ]
    );
}

// ============================================================================
// Envelope detection
// ============================================================================

#[test]
fn test_short_inputs_decode_to_nothing() {
    assert!(decode_networks(&[]).is_empty());
    for byte in 0..=255u8 {
        assert!(decode_networks(&[byte]).is_empty(), "byte 0x{:02X}", byte);
    }
}

#[test]
fn test_window_rule_over_many_frames() {
    let detector = DataLengthDetector::new();
    for frame in pseudo_random_frames(500, 24) {
        let (format, window) = detector.detect(&frame);
        if frame.len() >= 5 && frame[2] == 0 {
            assert_eq!(format, FrameFormat::Fragmented);
            assert_eq!(window, FrameWindow::new(5, frame.len() - 2));
        } else {
            assert_eq!(format, FrameFormat::Direct);
            assert_eq!(window, FrameWindow::new(0, frame.len()));
        }
    }
}

#[test]
fn test_checksum_bytes_are_not_parsed() {
    // The checksum would extend the name if it were part of the window
    let mut frame = wrap(&[0xC6, b'N', b'e', b't'], 0);
    let len = frame.len();
    frame[len - 2] = b'X';
    frame[len - 1] = b'Y';
    let records = decode_networks(&frame);
    assert_eq!(observations(&records), vec![(-58, "Net".to_string())]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_signed_decoding_examples() {
    assert_eq!(signed_dbm(0xC6), -58);
    assert_eq!(signed_dbm(0x07), 7);
    assert_eq!(signed_dbm(0x80), -128);
    assert_eq!(signed_dbm(0x7F), 127);
}

#[test]
fn test_scan_terminates_within_window_length() {
    let decoder = FrameDecoder::new(
        DecoderConfig::default().with_name_decoding(wifiscan_frame::NameDecoding::Lossy),
    )
    .expect("default band is valid");
    for frame in pseudo_random_frames(500, 64) {
        let report = decoder.try_decode(&frame).expect("lossy decode never fails");
        assert!(report.iterations <= report.window.len());
        assert!(report.records.len() <= report.window.len() / 2);
    }
}

#[test]
fn test_decoding_is_idempotent() {
    let decoder = FrameDecoder::default();
    let first = decoder.decode(&DEVICE_CAPTURE);
    let second = decoder.decode(&DEVICE_CAPTURE);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert!(a.same_observation(b));
        assert_ne!(a.identifier, b.identifier);
    }
}

#[test]
fn test_concurrent_decoding() {
    let decoder = Arc::new(FrameDecoder::default());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                let frame = wrap(&DEVICE_CAPTURE, i);
                decoder.decode(&frame)
            })
        })
        .collect();

    for handle in handles {
        let records = handle.join().expect("decoder thread panicked");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "H3C_401");
    }
}

#[test]
fn test_decoder_from_yaml_config() {
    let yaml = "signal-band:\n  min-dbm: -60\n  max-dbm: -30\nname-decoding: lossy\n";
    let config = DecoderConfig::from_yaml_str(yaml).expect("config should parse");
    let decoder = FrameDecoder::new(config).expect("config was validated on load");
    // 0xB0 (-80 dBm) is outside the narrowed band and stays in the name
    let data = [0xC6, b'a', 0xB0, b'b'];
    assert_eq!(
        observations(&decoder.decode(&data)),
        vec![(-58, "a\u{FFFD}b".to_string())]
    );
    let data = [0xC6, b'a', 0xD0, b'b'];
    assert_eq!(
        observations(&decoder.decode(&data)),
        vec![(-58, "a".to_string()), (-48, "b".to_string())]
    );
}
