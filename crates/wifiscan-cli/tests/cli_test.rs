//! Integration tests for the `wifiscan` binary.

use std::io::Write;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const BIN: &str = "wifiscan";
const DEVICE_CAPTURE: &str = "c6 48 33 43 5f 34 30 31 07 bd 34 30 31 34";

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_prints_help() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_decodes_payload_argument() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg(DEVICE_CAPTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("payload 1: 2 networks"))
        .stdout(predicate::str::contains("H3C_401"))
        .stdout(predicate::str::contains("4014"));
}

#[test]
fn test_decodes_payload_file() {
    let payloads = temp_file(&format!(
        "# two captures\n{}\n\n01 00 00 04 00 c6 4e 65 74 aa bb\n",
        DEVICE_CAPTURE
    ));
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--file")
        .arg(payloads.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("payload 1: 2 networks"))
        .stdout(predicate::str::contains("payload 2: 1 network"))
        .stdout(predicate::str::contains("Net"));
}

#[test]
fn test_reads_stdin() {
    assert_cmd::Command::cargo_bin(BIN)
        .unwrap()
        .args(["--file", "-", "--format", "json"])
        .write_stdin(format!("{}\n", DEVICE_CAPTURE))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signalStrengthDbm\":-58"));
}

#[test]
fn test_config_file() {
    let config = temp_file("name-decoding: lossy\n");
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .arg("c6 41 f0 42")
        .assert()
        .success()
        .stdout(predicate::str::contains("payload 1: 1 network"));
}

#[test]
fn test_invalid_config_fails() {
    let config = temp_file("signal-band:\n  min-dbm: -20\n  max-dbm: -90\n");
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .arg(DEVICE_CAPTURE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid signal band"));
}

#[test]
fn test_invalid_hex_fails() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("c6 xx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hex payload"));
}

#[test]
fn test_missing_file_fails() {
    Command::cargo_bin(BIN)
        .unwrap()
        .args(["--file", "/nonexistent/payloads.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_empty_result_is_success() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("c6")
        .assert()
        .success()
        .stdout(predicate::str::contains("payload 1: 0 networks"));
}
