//! Per-format log parsers.
//!
//! Every parser turns raw lines into normalized [`LogEntry`] values and drops
//! lines it cannot understand. Only file-level failures (unreadable file,
//! CSV without a destination column) surface as errors.

pub mod csv;
pub mod dns;
pub mod squid;

use async_trait::async_trait;
use std::path::Path;

use crate::error::LogResult;
use crate::source::LogSource;
use crate::types::{LogEntry, LogFormat};

pub use self::csv::CsvParser;
pub use self::dns::DnsParser;
pub use self::squid::SquidParser;

/// A log dialect that can be parsed into normalized entries.
#[async_trait]
pub trait LogParser: Send + Sync {
    /// Short parser name (e.g., "squid").
    fn name(&self) -> &str;

    /// Format produced by this parser.
    fn format(&self) -> LogFormat;

    /// Parse already-read lines. Malformed lines are skipped.
    fn parse_lines(&self, lines: &[String]) -> LogResult<Vec<LogEntry>>;

    /// Read `path` from `source` and parse it.
    async fn parse(&self, path: &str, source: &dyn LogSource) -> LogResult<Vec<LogEntry>> {
        let lines = source.read_lines(path).await?;
        self.parse_lines(&lines)
    }
}

/// Parser implementation for a format.
pub fn parser_for(format: LogFormat) -> Box<dyn LogParser> {
    match format {
        LogFormat::Squid => Box::new(SquidParser),
        LogFormat::Dns => Box::new(DnsParser),
        LogFormat::Csv => Box::new(CsvParser),
    }
}

/// Guess the format of a log file from its name.
///
/// `.csv` files are CSV; names mentioning `dns`, `query` or `dnsmasq` are DNS
/// logs; everything else (including `squid`, `proxy` and `access.log`
/// names) is treated as a Squid access log.
pub fn detect_format(path: &str) -> LogFormat {
    let p = Path::new(path);
    let ext = p
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let base = p
        .file_name()
        .map(|b| b.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        return LogFormat::Csv;
    }
    if ["dns", "query", "dnsmasq"].iter().any(|k| base.contains(k)) {
        return LogFormat::Dns;
    }
    LogFormat::Squid
}

/// Lines the line-oriented parsers never look at: blanks and `#` comments.
pub(crate) fn is_skippable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}
