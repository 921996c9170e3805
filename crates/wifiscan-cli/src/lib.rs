//! Command-line front end for the WiFi scan frame decoder.
//!
//! Payloads are given as hex strings, either on the command line or one per
//! line in a file (`-` for stdin). Each payload is decoded independently and
//! the discovered networks are printed as text or JSON.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wifiscan_frame::{
    DecodeReport, DecoderConfig, FragmentHeader, FrameDecoder, FrameError, FrameFormat,
    FrameWindow, NameDecoding, NetworkRecord, SignalBand,
};

/// Errors reported by the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// A payload file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A payload is not valid hex.
    #[error("invalid hex payload '{input}': {reason}")]
    InvalidHex {
        /// The offending payload text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Decoder configuration is invalid.
    #[error(transparent)]
    Config(#[from] FrameError),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Output format for decoded networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    Text,
    /// One JSON document per payload.
    Json,
}

/// Decode WiFi scan result frames reported by embedded devices.
#[derive(Debug, Parser)]
#[command(name = "wifiscan", version, about)]
pub struct Cli {
    /// Hex-encoded payloads, e.g. "c6 48 33 43 5f".
    #[arg(value_name = "PAYLOAD", required_unless_present = "file")]
    pub payloads: Vec<String>,

    /// Read hex payloads from a file, one per line ("-" for stdin).
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// YAML decoder configuration.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lower bound of the plausible signal band, in dBm.
    #[arg(long, value_name = "DBM", allow_hyphen_values = true)]
    pub min_dbm: Option<i8>,

    /// Upper bound of the plausible signal band, in dBm.
    #[arg(long, value_name = "DBM", allow_hyphen_values = true)]
    pub max_dbm: Option<i8>,

    /// Replace invalid UTF-8 in names instead of dropping the frame.
    #[arg(long)]
    pub lossy: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the detected frame format and record window.
    #[arg(long)]
    pub show_window: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log filter implied by the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Build the decoder configuration from the config file and overrides.
    pub fn decoder_config(&self) -> CliResult<DecoderConfig> {
        let mut config = match &self.config {
            Some(path) => DecoderConfig::from_file(path)?,
            None => DecoderConfig::default(),
        };

        let band = SignalBand {
            min_dbm: self.min_dbm.unwrap_or(config.signal_band.min_dbm),
            max_dbm: self.max_dbm.unwrap_or(config.signal_band.max_dbm),
        };
        band.validate()?;
        config.signal_band = band;

        if self.lossy {
            config.name_decoding = NameDecoding::Lossy;
        }
        Ok(config)
    }
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence over `default`.
///
/// Records emitted through the `log` facade by the decoder library are
/// forwarded to the same subscriber.
pub fn init_logging(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse a hex payload.
///
/// Bytes may be separated by whitespace, `:` or `,`, and each group may carry
/// a `0x` prefix. A group with an odd number of digits is left-padded, so
/// `"7 bd"` reads as `[0x07, 0xBD]`.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let mut bytes = Vec::new();
    for group in input
        .split(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .filter(|g| !g.is_empty())
    {
        let digits = group
            .strip_prefix("0x")
            .or_else(|| group.strip_prefix("0X"))
            .unwrap_or(group);
        let padded = if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };
        let decoded = hex::decode(&padded).map_err(|e| CliError::InvalidHex {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        bytes.extend_from_slice(&decoded);
    }
    Ok(bytes)
}

/// Read payload lines, skipping blank lines and `#` comments.
pub fn read_payload_lines(reader: impl BufRead, source: &str) -> CliResult<Vec<String>> {
    let mut payloads = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| CliError::Io {
            path: source.to_string(),
            source: e,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        payloads.push(line.to_string());
    }
    Ok(payloads)
}

fn read_payload_file(path: &Path) -> CliResult<Vec<String>> {
    if path == Path::new("-") {
        let stdin = io::stdin();
        return read_payload_lines(stdin.lock(), "<stdin>");
    }
    let file = File::open(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_payload_lines(BufReader::new(file), &path.display().to_string())
}

/// JSON document emitted per payload when the window is requested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadSummary<'a> {
    format: FrameFormat,
    window: FrameWindow,
    header: Option<&'a FragmentHeader>,
    networks: &'a [NetworkRecord],
}

fn write_report(
    out: &mut impl Write,
    index: usize,
    report: &DecodeReport,
    cli: &Cli,
) -> CliResult<()> {
    match cli.format {
        OutputFormat::Json => {
            let line = if cli.show_window {
                serde_json::to_string(&PayloadSummary {
                    format: report.format,
                    window: report.window,
                    header: report.header.as_ref(),
                    networks: &report.records,
                })?
            } else {
                serde_json::to_string(&report.records)?
            };
            writeln!(out, "{}", line)?;
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "payload {}: {} network{}",
                index + 1,
                report.records.len(),
                if report.records.len() == 1 { "" } else { "s" }
            )?;
            if cli.show_window {
                writeln!(
                    out,
                    "  format: {}, window {} ({} bytes)",
                    report.format,
                    report.window,
                    report.window.len()
                )?;
            }
            for record in &report.records {
                writeln!(
                    out,
                    "  {:>4} dBm  {:<32}  {}",
                    record.signal_strength_dbm,
                    record.name.escape_debug().to_string(),
                    record.security_kind
                )?;
            }
        }
    }
    Ok(())
}

/// Run the tool, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    let config = cli.decoder_config()?;
    debug!("Decoder configuration: {:?}", config);
    let decoder = FrameDecoder::new(config)?;

    let mut payloads = cli.payloads.clone();
    if let Some(path) = &cli.file {
        payloads.extend(read_payload_file(path)?);
    }

    for (index, text) in payloads.iter().enumerate() {
        let bytes = parse_hex(text)?;
        let report = decoder.decode_report(&bytes);
        info!(
            "Payload {}: {} bytes, {} networks",
            index + 1,
            bytes.len(),
            report.records.len()
        );
        write_report(out, index, &report, cli)?;
    }
    Ok(())
}
