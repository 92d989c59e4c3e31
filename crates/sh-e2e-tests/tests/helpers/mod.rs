//! Shared test harness for E2E tests.
//!
//! Writes real log and catalog files into a temp directory and drives them
//! through the same code paths as the `shadow-hunter` binary.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

use sh_analyzer::Catalog;
use sh_log_tools::FileLogSource;
use shadow_hunter::config::Settings;
use shadow_hunter::report::ReportFormat;
use shadow_hunter::scan::{self, FormatChoice, ScanReport, ServicesSource, load_catalog};

pub const BASE_SERVICES: &str = r#"{
  "services": [
    {"name": "OpenAI", "category": "Chatbot", "domains": ["openai.com", "chatgpt.com"]},
    {"name": "OpenAI API", "category": "LLM API", "domains": ["api.openai.com"]},
    {"name": "Anthropic Claude", "category": "Chatbot", "domains": ["claude.ai", "anthropic.com"]},
    {"name": "DeepSeek", "category": "Chatbot", "domains": ["deepseek.com"]},
    {"name": "Hugging Face", "category": "Model Hosting", "domains": ["huggingface.co"]}
  ]
}"#;

pub const SQUID_LOG: &str = "\
# squid access log
1718000000.000    200 192.168.1.50 TCP_MISS/200 1500 GET https://api.openai.com/v1/chat/completions - DIRECT/api.openai.com text/html
1718000005.120   5021 192.168.1.50 TCP_TUNNEL/200 4820 CONNECT claude.ai:443 - HIER_DIRECT/160.79.104.10 -
1718000010.000     88 192.168.1.77 TCP_MISS/200 912 GET http://www.example.com/index.html - DIRECT/93.184.216.34 text/html
corrupted line
1718000015.000    301 192.168.1.77 TCP_MISS/200 20480 POST https://files.chatgpt.com/upload - DIRECT/1.2.3.4 application/json
";

pub const DNS_LOG: &str = "\
2025-06-10T08:30:00Z 192.168.1.50 api.openai.com A
2025-06-10T08:30:02Z 192.168.1.51 www.github.com A
Jun 10 08:31:00 gw dnsmasq[812]: query[A] chat.deepseek.com from 192.168.1.51
Jun 10 08:31:00 gw dnsmasq[812]: forwarded chat.deepseek.com to 1.1.1.1
";

pub const FIREWALL_CSV: &str = "\
timestamp,src_ip,domain,bytes,status
2025-06-10,192.168.1.50,api.openai.com,1500,200
2025-06-10 09:00:00,192.168.1.60,huggingface.co,3300,200
2025-06-10T09:05:00Z,192.168.1.61,intranet.corp.local,120,200
";

/// Temp workspace holding log files and catalogs for one test.
pub struct TestHarness {
    pub dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Harness pre-populated with `access.log`, `dnsmasq.log` and
    /// `firewall.csv` under `logs/`.
    pub fn with_sample_logs() -> Self {
        let h = Self::new();
        h.write("logs/access.log", SQUID_LOG);
        h.write("logs/dnsmasq.log", DNS_LOG);
        h.write("logs/firewall.csv", FIREWALL_CSV);
        h
    }

    /// Write `contents` to `rel` (relative to the temp dir) and return its path.
    pub fn write(&self, rel: &str, contents: &str) -> String {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, contents).expect("write file");
        path.to_string_lossy().into_owned()
    }

    pub fn path(&self, rel: &str) -> String {
        self.dir.path().join(rel).to_string_lossy().into_owned()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Base catalog written to disk and loaded, with an optional custom merge.
    pub fn catalog(&self, custom: Option<&str>) -> anyhow::Result<Catalog> {
        let base = self.write("ai_services.json", BASE_SERVICES);
        let custom_path = custom.map(|c| self.write("custom_services.json", c));
        load_catalog(&ServicesSource::File(base.into()), custom_path.as_deref())
    }

    pub fn settings(&self, files: &[&str], dirs: &[&str], format: FormatChoice) -> Settings {
        Settings {
            files: files.iter().map(|f| self.path(f)).collect(),
            dirs: dirs.iter().map(|d| self.path(d)).collect(),
            format,
            output: ReportFormat::Table,
            out: None,
            services: None,
            custom: None,
        }
    }

    /// Scan with real files through `FileLogSource`.
    pub async fn scan(&self, settings: &Settings, catalog: &Catalog) -> anyhow::Result<ScanReport> {
        scan::scan(settings, catalog, &FileLogSource).await
    }
}
