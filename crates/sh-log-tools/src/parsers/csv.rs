//! Generic CSV / firewall export parser.
//!
//! The header row is matched case-insensitively against known column names.
//! Only a destination-like column is required; every other column is
//! optional and left empty when missing.

use ::csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;

use super::LogParser;
use crate::domain::{extract_domain, normalize_domain};
use crate::error::{LogError, LogResult};
use crate::timestamp::parse_flexible_timestamp;
use crate::types::{LogEntry, LogFormat};

const TIMESTAMP_COLUMNS: &[&str] = &["timestamp", "time", "date", "datetime"];
const SOURCE_COLUMNS: &[&str] = &["source_ip", "src_ip", "src", "client_ip", "source"];
const DESTINATION_COLUMNS: &[&str] = &[
    "destination",
    "dst",
    "domain",
    "host",
    "url",
    "dest",
    "dst_host",
];
const BYTES_COLUMNS: &[&str] = &["bytes", "bytes_sent", "size", "content_length"];
const ACTION_COLUMNS: &[&str] = &["action", "status", "status_code", "result"];

/// Parser for CSV exports with a header row.
pub struct CsvParser;

impl LogParser for CsvParser {
    fn name(&self) -> &str {
        "csv"
    }

    fn format(&self) -> LogFormat {
        LogFormat::Csv
    }

    fn parse_lines(&self, lines: &[String]) -> LogResult<Vec<LogEntry>> {
        let content = lines.join("\n");
        parse_str(&content)
    }
}

/// Positional indices of the logical columns found in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub timestamp: Option<usize>,
    pub source: Option<usize>,
    pub destination: usize,
    pub bytes: Option<usize>,
    pub action: Option<usize>,
}

impl ColumnMap {
    /// Map a header row. Fails when no destination-like column exists.
    pub fn from_header(header: &StringRecord) -> LogResult<Self> {
        // Later duplicates overwrite earlier ones.
        let by_name: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, col)| (col.trim().to_lowercase(), i))
            .collect();

        let find = |names: &[&str]| names.iter().find_map(|n| by_name.get(*n).copied());

        let destination = find(DESTINATION_COLUMNS).ok_or_else(|| {
            LogError::Format("CSV missing required destination/domain column".into())
        })?;

        Ok(Self {
            timestamp: find(TIMESTAMP_COLUMNS),
            source: find(SOURCE_COLUMNS),
            destination,
            bytes: find(BYTES_COLUMNS),
            action: find(ACTION_COLUMNS),
        })
    }
}

/// Parse CSV text (header row plus data rows).
pub fn parse_str(content: &str) -> LogResult<Vec<LogEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => tracing::debug!(record = i + 1, error = %e, "skipping malformed csv record"),
        }
    }

    if records.len() < 2 {
        return Err(LogError::Format("CSV has no data rows".into()));
    }

    let columns = ColumnMap::from_header(&records[0])?;

    Ok(records[1..]
        .iter()
        .enumerate()
        .filter_map(|(i, row)| parse_row(row, &columns, i + 2))
        .collect())
}

/// Build an entry from one data row; rows without a destination are dropped.
pub fn parse_row(row: &StringRecord, columns: &ColumnMap, fallback_line: usize) -> Option<LogEntry> {
    let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::trim);

    let dest = cell(Some(columns.destination))?;
    let (domain, url) = if dest.contains("://") {
        (extract_domain(dest), Some(dest.to_string()))
    } else {
        (normalize_domain(dest), None)
    };
    if domain.is_empty() {
        return None;
    }

    let line_number = row
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback_line);
    let raw = row.iter().collect::<Vec<_>>().join(",");

    let mut entry = LogEntry::new(
        LogFormat::Csv,
        cell(columns.source).unwrap_or_default(),
        domain,
        raw,
        line_number,
    );
    entry.url = url;
    entry.timestamp = cell(columns.timestamp).and_then(parse_flexible_timestamp);
    entry.bytes_sent = cell(columns.bytes)
        .and_then(|b| b.parse().ok())
        .unwrap_or(0);
    entry.status_code = cell(columns.action)
        .filter(|s| !s.is_empty())
        .map(String::from);
    Some(entry)
}
