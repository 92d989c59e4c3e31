//! Fold parsed log entries into shadow AI findings and hit counters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use sh_log_tools::LogEntry;

use crate::catalog::{AiService, Catalog};

/// A log entry that reached a tracked AI service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub timestamp: Option<DateTime<Utc>>,
    pub source_ip: String,
    pub service_name: String,
    pub category: String,
    pub domain: String,
    pub url: Option<String>,
    pub method: Option<String>,
    pub status_code: Option<String>,
    pub bytes_sent: u64,
}

impl Finding {
    fn new(entry: &LogEntry, service: &AiService) -> Self {
        Self {
            timestamp: entry.timestamp,
            source_ip: entry.source_ip.clone(),
            service_name: service.name.clone(),
            category: service.category.clone(),
            domain: entry.domain.clone(),
            url: entry.url.clone(),
            method: entry.method.clone(),
            status_code: entry.status_code.clone(),
            bytes_sent: entry.bytes_sent,
        }
    }
}

/// Aggregate view of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_logs_scanned: usize,
    pub total_findings: usize,
    pub unique_users: usize,
    pub unique_services: usize,
    /// Findings in input order.
    pub findings: Vec<Finding>,
    /// Source identifier → hit count.
    pub by_user: BTreeMap<String, usize>,
    /// Service name → hit count.
    pub by_service: BTreeMap<String, usize>,
}

impl Summary {
    /// Sources ranked by hit count (ties broken by name).
    pub fn top_users(&self) -> Vec<(&str, usize)> {
        ranked(&self.by_user)
    }

    /// Services ranked by hit count (ties broken by name).
    pub fn top_services(&self) -> Vec<(&str, usize)> {
        ranked(&self.by_service)
    }
}

fn ranked(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut sorted: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // BTreeMap iteration is already key-ordered; a stable sort keeps that for ties.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Match every entry against `catalog` in a single pass.
///
/// Entries without a match contribute only to `total_logs_scanned`.
pub fn analyze(catalog: &Catalog, entries: &[LogEntry]) -> Summary {
    let mut summary = Summary {
        total_logs_scanned: entries.len(),
        ..Default::default()
    };

    for entry in entries {
        let Some(service) = catalog.match_domain(&entry.domain) else {
            continue;
        };

        summary.findings.push(Finding::new(entry, service));
        *summary.by_user.entry(entry.source_ip.clone()).or_default() += 1;
        *summary.by_service.entry(service.name.clone()).or_default() += 1;
    }

    summary.total_findings = summary.findings.len();
    summary.unique_users = summary.by_user.len();
    summary.unique_services = summary.by_service.len();

    tracing::debug!(
        scanned = summary.total_logs_scanned,
        findings = summary.total_findings,
        "analysis complete"
    );
    summary
}
