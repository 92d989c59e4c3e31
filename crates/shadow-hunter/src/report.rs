//! Render a scan summary as a table, JSON or CSV.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table, presets};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

use sh_analyzer::{Finding, Summary};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary with ranked users/services and findings.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
    /// One CSV row per finding.
    Csv,
}

/// Write the report for `summary` to `w`.
pub fn render(summary: &Summary, format: ReportFormat, w: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        ReportFormat::Table => render_table(summary, w),
        ReportFormat::Json => render_json(summary, w),
        ReportFormat::Csv => render_csv(summary, w),
    }
}

/// Write the report to a file, creating or truncating it.
pub fn write_to_file(summary: &Summary, format: ReportFormat, path: &str) -> anyhow::Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating output file {path}"))?;
    let mut w = std::io::BufWriter::new(file);
    render(summary, format, &mut w)?;
    w.flush()?;
    Ok(())
}

fn iso_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

// ── Table ─────────────────────────────────────────────────────

fn render_table(s: &Summary, w: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(w)?;
    writeln!(w, "  SHADOW AI HUNTER - Scan Results")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "  Logs scanned:    {}", s.total_logs_scanned)?;
    writeln!(w, "  AI hits found:   {}", s.total_findings)?;
    writeln!(w, "  Unique users:    {}", s.unique_users)?;
    writeln!(w, "  Unique services: {}", s.unique_services)?;
    writeln!(w, "{}", "=".repeat(60))?;

    if s.total_findings == 0 {
        writeln!(w, "\n  No shadow AI activity detected.")?;
        return Ok(());
    }

    writeln!(w, "\n  TOP USERS BY AI SERVICE HITS")?;
    writeln!(w, "{}", "-".repeat(40))?;
    writeln!(w, "{}", ranked_table(&s.top_users()))?;

    writeln!(w, "\n  TOP AI SERVICES DETECTED")?;
    writeln!(w, "{}", "-".repeat(40))?;
    writeln!(w, "{}", ranked_table(&s.top_services()))?;

    writeln!(w, "\n  DETAILED FINDINGS")?;
    writeln!(w, "{}", "-".repeat(90))?;
    writeln!(w, "{}", findings_table(&s.findings))?;
    writeln!(w)?;
    Ok(())
}

/// Borderless table; columns are separated by cell padding only.
fn plain_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

fn ranked_table(ranked: &[(&str, usize)]) -> Table {
    let mut table = plain_table();
    for (key, count) in ranked {
        table.add_row(vec![key.to_string(), format!("{count} hits")]);
    }
    table
}

fn findings_table(findings: &[Finding]) -> Table {
    let mut table = plain_table();
    table.set_header(vec!["TIMESTAMP", "SOURCE IP", "SERVICE", "CATEGORY", "DOMAIN"]);
    for f in findings {
        let ts = f
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        table.add_row(vec![
            ts,
            f.source_ip.clone(),
            f.service_name.clone(),
            f.category.clone(),
            f.domain.clone(),
        ]);
    }
    table
}

// ── JSON ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonReport<'a> {
    total_logs_scanned: usize,
    total_findings: usize,
    unique_users: usize,
    unique_services: usize,
    hits_by_user: &'a BTreeMap<String, usize>,
    hits_by_service: &'a BTreeMap<String, usize>,
    findings: Vec<JsonFinding<'a>>,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    timestamp: String,
    source_ip: &'a str,
    service_name: &'a str,
    category: &'a str,
    domain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<&'a str>,
    #[serde(skip_serializing_if = "is_zero")]
    bytes_sent: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl<'a> From<&'a Finding> for JsonFinding<'a> {
    fn from(f: &'a Finding) -> Self {
        Self {
            timestamp: iso_timestamp(f.timestamp),
            source_ip: &f.source_ip,
            service_name: &f.service_name,
            category: &f.category,
            domain: &f.domain,
            url: f.url.as_deref().filter(|s| !s.is_empty()),
            method: f.method.as_deref().filter(|s| !s.is_empty()),
            status_code: f.status_code.as_deref().filter(|s| !s.is_empty()),
            bytes_sent: f.bytes_sent,
        }
    }
}

fn render_json(s: &Summary, w: &mut dyn Write) -> anyhow::Result<()> {
    let report = JsonReport {
        total_logs_scanned: s.total_logs_scanned,
        total_findings: s.total_findings,
        unique_users: s.unique_users,
        unique_services: s.unique_services,
        hits_by_user: &s.by_user,
        hits_by_service: &s.by_service,
        findings: s.findings.iter().map(JsonFinding::from).collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}

// ── CSV ───────────────────────────────────────────────────────

const CSV_HEADER: [&str; 9] = [
    "timestamp",
    "source_ip",
    "service_name",
    "category",
    "domain",
    "url",
    "method",
    "status_code",
    "bytes_sent",
];

fn render_csv(s: &Summary, w: &mut dyn Write) -> anyhow::Result<()> {
    let mut cw = csv::Writer::from_writer(w);
    cw.write_record(CSV_HEADER)?;
    for f in &s.findings {
        let bytes = f.bytes_sent.to_string();
        let ts = iso_timestamp(f.timestamp);
        cw.write_record([
            ts.as_str(),
            f.source_ip.as_str(),
            f.service_name.as_str(),
            f.category.as_str(),
            f.domain.as_str(),
            f.url.as_deref().unwrap_or_default(),
            f.method.as_deref().unwrap_or_default(),
            f.status_code.as_deref().unwrap_or_default(),
            bytes.as_str(),
        ])?;
    }
    cw.flush()?;
    Ok(())
}
