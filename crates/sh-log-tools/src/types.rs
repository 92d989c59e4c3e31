//! Normalized log entry shape shared by every parser.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Log Format ────────────────────────────────────────────────

/// Supported log dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Squid proxy `access.log` (native format).
    Squid,
    /// DNS query logs: simple RFC 3339 lines or dnsmasq syslog lines.
    Dns,
    /// Generic CSV / firewall export with a header row.
    Csv,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squid => "squid",
            Self::Dns => "dns",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Log Entry ─────────────────────────────────────────────────

/// A single network event, normalized from any supported format.
///
/// `domain` is always lower-cased with any trailing root dot removed, and is
/// never empty: parsers drop lines that do not yield a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Event time (None if absent or unparseable).
    pub timestamp: Option<DateTime<Utc>>,
    /// Client identifier, usually an IP address.
    pub source_ip: String,
    /// Destination host.
    pub domain: String,
    /// Full request URL when the log carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP method when the log carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Status or action code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    /// Bytes transferred (0 when absent).
    #[serde(default)]
    pub bytes_sent: u64,
    /// Original raw line.
    pub raw: String,
    /// 1-based line (or CSV record) number in the source.
    pub line_number: usize,
    /// Format this entry was parsed from.
    pub format: LogFormat,
}

impl LogEntry {
    /// Build an entry with only the required fields set.
    pub fn new(
        format: LogFormat,
        source_ip: impl Into<String>,
        domain: impl Into<String>,
        raw: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            timestamp: None,
            source_ip: source_ip.into(),
            domain: domain.into(),
            url: None,
            method: None,
            status_code: None,
            bytes_sent: 0,
            raw: raw.into(),
            line_number,
            format,
        }
    }
}
