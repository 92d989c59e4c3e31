//! DNS query log parser.
//!
//! Two dialects are accepted, tried in order on every line:
//!
//! 1. Simple: `2025-06-10T08:30:00Z 192.168.1.50 api.openai.com A`
//! 2. dnsmasq via syslog: `Jun 10 08:30:00 gw dnsmasq[1234]: query[A] api.openai.com from 192.168.1.50`

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use super::{LogParser, is_skippable};
use crate::domain::normalize_domain;
use crate::error::LogResult;
use crate::timestamp::parse_syslog_timestamp;
use crate::types::{LogEntry, LogFormat};

const QUERY_MARKER: &str = "query[";

// Leading BSD syslog timestamp: Mmm dd HH:MM:SS
static RE_SYSLOG_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w{3}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})").unwrap());

/// Parser for DNS query logs.
pub struct DnsParser;

impl LogParser for DnsParser {
    fn name(&self) -> &str {
        "dns"
    }

    fn format(&self) -> LogFormat {
        LogFormat::Dns
    }

    fn parse_lines(&self, lines: &[String]) -> LogResult<Vec<LogEntry>> {
        Ok(entries(lines).collect())
    }
}

/// Lazily parse lines, skipping comments, blanks and unrecognized lines.
pub fn entries(lines: &[String]) -> impl Iterator<Item = LogEntry> + '_ {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| !is_skippable(l))
        .filter_map(|(i, line)| {
            let entry = parse_line(line, i + 1);
            if entry.is_none() {
                tracing::trace!(line_number = i + 1, "skipping unrecognized dns line");
            }
            entry
        })
}

/// Parse a line in either dialect, simple first.
pub fn parse_line(line: &str, line_number: usize) -> Option<LogEntry> {
    parse_simple(line, line_number).or_else(|| parse_dnsmasq(line, line_number))
}

/// `timestamp client domain [type]` with an RFC 3339 timestamp.
///
/// Longer lines are left to the dnsmasq dialect, which may also carry an
/// RFC 3339 prefix (rsyslog high-precision timestamps).
pub fn parse_simple(line: &str, line_number: usize) -> Option<LogEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(3..=4).contains(&fields.len()) {
        return None;
    }

    let ts = DateTime::parse_from_rfc3339(fields[0]).ok()?;
    let domain = normalize_domain(fields[2]);
    if domain.is_empty() {
        return None;
    }

    let mut entry = LogEntry::new(LogFormat::Dns, fields[1], domain, line, line_number);
    entry.timestamp = Some(ts.with_timezone(&Utc));
    Some(entry)
}

/// `... query[TYPE] domain from client`, timestamp taken from the syslog prefix.
///
/// The record type is ignored. An unparseable prefix leaves the timestamp
/// unset rather than rejecting the line.
pub fn parse_dnsmasq(line: &str, line_number: usize) -> Option<LogEntry> {
    let q_idx = line.find(QUERY_MARKER)?;
    let after_query = &line[q_idx..];
    let close = after_query.find("] ")?;
    let rest = &after_query[close + 2..];

    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() < 3 || parts[1] != "from" {
        return None;
    }

    let domain = normalize_domain(parts[0]);
    if domain.is_empty() {
        return None;
    }

    let mut entry = LogEntry::new(LogFormat::Dns, parts[2], domain, line, line_number);
    entry.timestamp = syslog_prefix_timestamp(&line[..q_idx]);
    Some(entry)
}

/// BSD syslog prefix, or a leading RFC 3339 token as written by rsyslog.
fn syslog_prefix_timestamp(prefix: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = RE_SYSLOG_PREFIX.captures(prefix) {
        return parse_syslog_timestamp(&caps[1]);
    }
    let first = prefix.split_whitespace().next()?;
    DateTime::parse_from_rfc3339(first)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
