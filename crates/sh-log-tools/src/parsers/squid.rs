//! Squid proxy `access.log` parser (native log format).
//!
//! `time elapsed client action/code size method URL ident hierarchy/from type`
//!
//! ```text
//! 1718000000.000    200 192.168.1.50 TCP_MISS/200 1500 GET https://api.openai.com/v1/chat/completions - DIRECT/api.openai.com text/html
//! ```

use chrono::{DateTime, Utc};

use super::{LogParser, is_skippable};
use crate::domain::extract_domain;
use crate::error::LogResult;
use crate::types::{LogEntry, LogFormat};

const MIN_FIELDS: usize = 8;

/// Parser for Squid access logs.
pub struct SquidParser;

impl LogParser for SquidParser {
    fn name(&self) -> &str {
        "squid"
    }

    fn format(&self) -> LogFormat {
        LogFormat::Squid
    }

    fn parse_lines(&self, lines: &[String]) -> LogResult<Vec<LogEntry>> {
        Ok(entries(lines).collect())
    }
}

/// Lazily parse lines, skipping comments, blanks and malformed lines.
pub fn entries(lines: &[String]) -> impl Iterator<Item = LogEntry> + '_ {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| !is_skippable(l))
        .filter_map(|(i, line)| {
            let entry = parse_line(line, i + 1);
            if entry.is_none() {
                tracing::trace!(line_number = i + 1, "skipping malformed squid line");
            }
            entry
        })
}

/// Parse a single access log line.
pub fn parse_line(line: &str, line_number: usize) -> Option<LogEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let timestamp = parse_unix_timestamp(fields[0])?;

    // TCP_MISS/200 -> "200"
    let status_code = fields[3]
        .split_once('/')
        .map(|(_, code)| code.to_string());

    let bytes_sent = fields[4].parse().unwrap_or(0);
    let method = fields[5];
    let target = fields[6];

    let domain = extract_domain(target);
    if domain.is_empty() {
        return None;
    }

    Some(LogEntry {
        timestamp: Some(timestamp),
        source_ip: fields[2].to_string(),
        domain,
        url: Some(target.to_string()),
        method: Some(method.to_string()),
        status_code,
        bytes_sent,
        raw: line.to_string(),
        line_number,
        format: LogFormat::Squid,
    })
}

/// `1718000000.123` -> whole seconds since the epoch; the fraction is dropped.
fn parse_unix_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let secs: f64 = s.parse().ok()?;
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENAI_LINE: &str = "1718000000.000 200 192.168.1.50 TCP_MISS/200 1500 GET https://api.openai.com/v1/chat/completions - DIRECT/api.openai.com text/html";

    #[test]
    fn parse_full_line() {
        let entry = parse_line(OPENAI_LINE, 1).unwrap();
        assert_eq!(entry.source_ip, "192.168.1.50");
        assert_eq!(entry.domain, "api.openai.com");
        assert_eq!(entry.status_code.as_deref(), Some("200"));
        assert_eq!(entry.bytes_sent, 1500);
        assert_eq!(entry.method.as_deref(), Some("GET"));
        assert_eq!(
            entry.url.as_deref(),
            Some("https://api.openai.com/v1/chat/completions")
        );
        assert_eq!(entry.timestamp.unwrap().timestamp(), 1_718_000_000);
        assert_eq!(entry.format, LogFormat::Squid);
        assert_eq!(entry.raw, OPENAI_LINE);
    }

    #[test]
    fn parse_connect_tunnel() {
        let line = "1718000100.250 5021 10.0.0.7 TCP_TUNNEL/200 4820 CONNECT Claude.AI:443 - HIER_DIRECT/160.79.104.10 -";
        let entry = parse_line(line, 1).unwrap();
        assert_eq!(entry.domain, "claude.ai");
        assert_eq!(entry.method.as_deref(), Some("CONNECT"));
        assert_eq!(entry.url.as_deref(), Some("Claude.AI:443"));
        // fractional seconds are truncated
        assert_eq!(entry.timestamp.unwrap().timestamp(), 1_718_000_100);
    }

    #[test]
    fn action_without_slash_has_no_status() {
        let line = "1718000000.000 10 10.0.0.1 TCP_DENIED 0 GET http://example.com/ - NONE/- -";
        let entry = parse_line(line, 1).unwrap();
        assert!(entry.status_code.is_none());
    }

    #[test]
    fn non_numeric_bytes_default_to_zero() {
        let line = "1718000000.000 10 10.0.0.1 TCP_MISS/200 - GET http://example.com/ - DIRECT/x -";
        assert_eq!(parse_line(line, 1).unwrap().bytes_sent, 0);
    }

    #[test]
    fn too_few_fields_rejected() {
        assert!(parse_line("1718000000.000 200 192.168.1.50 TCP_MISS/200 1500 GET", 1).is_none());
    }

    #[test]
    fn bad_timestamp_rejected() {
        let line = "yesterday 200 192.168.1.50 TCP_MISS/200 1500 GET https://api.openai.com/ - DIRECT/x text/html";
        assert!(parse_line(line, 1).is_none());
        let line = "NaN 200 192.168.1.50 TCP_MISS/200 1500 GET https://api.openai.com/ - DIRECT/x text/html";
        assert!(parse_line(line, 1).is_none());
    }

    #[test]
    fn entries_skips_noise_and_keeps_line_numbers() {
        let lines: Vec<String> = vec![
            "# squid log".into(),
            OPENAI_LINE.into(),
            "".into(),
            "garbage".into(),
            "1718000001.000 10 10.0.0.2 TCP_MISS/200 42 GET http://example.com/ - DIRECT/x -".into(),
        ];
        let parsed: Vec<LogEntry> = entries(&lines).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].line_number, 2);
        assert_eq!(parsed[1].line_number, 5);
        assert_eq!(parsed[1].domain, "example.com");
    }

    #[test]
    fn parser_trait_collects_entries() {
        let lines: Vec<String> = vec![OPENAI_LINE.into(), "bad line".into()];
        let parsed = SquidParser.parse_lines(&lines).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
