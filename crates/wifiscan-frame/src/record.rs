//! Decoded network records.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::constants::*;

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a process-unique record identifier.
///
/// Format: `wifi_<unix-millis>_<sequence>`. The identifier only serves as a
/// list key for consumers and carries no meaning.
pub fn next_record_id() -> String {
    let sequence = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}_{}_{}",
        RECORD_ID_PREFIX,
        chrono::Utc::now().timestamp_millis(),
        sequence
    )
}

/// Security classification of a network.
///
/// The frame format carries no security information yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SecurityKind {
    /// Not reported by the device.
    #[default]
    Unknown,
}

impl fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityKind::Unknown => write!(f, "{}", SECURITY_UNKNOWN),
        }
    }
}

/// A nearby network reported in a scan frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    /// Unique list key, see [`next_record_id`].
    #[serde(rename = "id")]
    pub identifier: String,
    /// Network name (SSID).
    pub name: String,
    /// Security classification, always [`SecurityKind::Unknown`].
    pub security_kind: SecurityKind,
    /// Signal strength in dBm.
    pub signal_strength_dbm: i8,
    /// Frequency in MHz, always zero.
    #[serde(rename = "frequencyMHz")]
    pub frequency_mhz: u32,
    /// Channel number, always zero.
    pub channel: u16,
}

impl NetworkRecord {
    /// Create a record with a fresh identifier.
    pub fn new(name: impl Into<String>, signal_strength_dbm: i8) -> Self {
        NetworkRecord {
            identifier: next_record_id(),
            name: name.into(),
            security_kind: SecurityKind::Unknown,
            signal_strength_dbm,
            frequency_mhz: 0,
            channel: 0,
        }
    }

    /// Check if another record reports the same network and signal,
    /// ignoring the identifier.
    pub fn same_observation(&self, other: &NetworkRecord) -> bool {
        self.name == other.name && self.signal_strength_dbm == other.signal_strength_dbm
    }
}

impl fmt::Display for NetworkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({} dBm)", self.name, self.signal_strength_dbm)
    }
}
