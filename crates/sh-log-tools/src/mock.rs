//! In-memory log source serving canned Squid, DNS and CSV samples.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{LogError, LogResult};
use crate::source::LogSource;

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: BTreeMap<String, Vec<String>>,
    dirs: BTreeSet<String>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            dirs: BTreeSet::new(),
        }
    }

    /// Add a file with the given lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        self.files.insert(path.into(), lines);
    }

    /// Register a directory, which may stay empty.
    pub fn add_dir(&mut self, path: &str) {
        self.dirs.insert(path.trim_end_matches('/').to_string());
    }

    /// Squid access log at `/var/log/squid/access.log`: five valid lines
    /// (four AI destinations, one unrelated) plus noise.
    pub fn with_squid_sample() -> Self {
        let mut m = Self::new();
        m.add_squid_sample();
        m
    }

    /// DNS query log at `/var/log/dnsmasq.log` mixing both dialects.
    pub fn with_dns_sample() -> Self {
        let mut m = Self::new();
        m.add_dns_sample();
        m
    }

    /// Firewall export at `/exports/firewall.csv`.
    pub fn with_csv_sample() -> Self {
        let mut m = Self::new();
        m.add_csv_sample();
        m
    }

    /// All three samples at once.
    pub fn with_all_samples() -> Self {
        let mut m = Self::new();
        m.add_squid_sample();
        m.add_dns_sample();
        m.add_csv_sample();
        m
    }

    fn add_squid_sample(&mut self) {
        self.add_file(
            "/var/log/squid/access.log",
            vec![
                "# squid native access log".into(),
                "1718000000.000    200 192.168.1.50 TCP_MISS/200 1500 GET https://api.openai.com/v1/chat/completions - DIRECT/api.openai.com text/html".into(),
                "1718000005.120   5021 192.168.1.50 TCP_TUNNEL/200 4820 CONNECT claude.ai:443 - HIER_DIRECT/160.79.104.10 -".into(),
                "1718000010.000     88 192.168.1.77 TCP_MISS/200 912 GET http://www.example.com/index.html - DIRECT/93.184.216.34 text/html".into(),
                "".into(),
                "1718000015.000    301 192.168.1.77 TCP_MISS/200 20480 POST https://cdn.oaiusercontent.com/files/upload - DIRECT/1.2.3.4 application/json".into(),
                "this line is not a squid record".into(),
                "1718000020.000    150 10.0.0.12 TCP_DENIED/403 0 CONNECT gemini.google.com:443 - HIER_NONE/- -".into(),
            ],
        );
    }

    fn add_dns_sample(&mut self) {
        self.add_file(
            "/var/log/dnsmasq.log",
            vec![
                "2025-06-10T08:30:00Z 192.168.1.50 api.openai.com A".into(),
                "2025-06-10T08:30:02Z 192.168.1.51 www.github.com A".into(),
                "Jun 10 08:31:00 gw dnsmasq[812]: query[A] chat.deepseek.com from 192.168.1.51".into(),
                "Jun 10 08:31:00 gw dnsmasq[812]: forwarded chat.deepseek.com to 1.1.1.1".into(),
                "Jun 10 08:31:01 gw dnsmasq[812]: reply chat.deepseek.com is 104.18.2.1".into(),
                "Jun 10 08:32:44 gw dnsmasq[812]: query[AAAA] Perplexity.AI. from 192.168.1.52".into(),
            ],
        );
    }

    fn add_csv_sample(&mut self) {
        self.add_file(
            "/exports/firewall.csv",
            vec![
                "timestamp,src_ip,domain,bytes,status".into(),
                "2025-06-10,192.168.1.50,api.openai.com,1500,200".into(),
                "2025-06-10 09:00:00,192.168.1.60,huggingface.co,3300,200".into(),
                "2025-06-10T09:05:00Z,192.168.1.61,intranet.corp.local,120,200".into(),
                "06/10/2025 09:10:00,192.168.1.60,,0,200".into(),
                "10/Jun/2025:09:15:00 +0000,192.168.1.62,https://api.mistral.ai/v1/chat,800,allowed".into(),
            ],
        );
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LogError::NotFound(path.to_string()))
    }

    async fn list_dir(&self, dir: &str) -> LogResult<Vec<String>> {
        let dir = dir.trim_end_matches('/');
        let prefix = format!("{dir}/");
        let known = self.dirs.contains(dir)
            || self.dirs.iter().any(|d| d.starts_with(&prefix))
            || self.files.keys().any(|p| p.starts_with(&prefix));
        if !known {
            return Err(LogError::NotFound(dir.to_string()));
        }

        // Shallow: entries of nested directories are not listed.
        Ok(self
            .files
            .keys()
            .filter(|p| {
                p.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .cloned()
            .collect())
    }
}
