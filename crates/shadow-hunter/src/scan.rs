//! Scan pipeline: resolve the catalog, enumerate inputs, parse each file,
//! then analyze the concatenated entries.

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use sh_analyzer::{Catalog, Summary, analyze};
use sh_log_tools::{LogEntry, LogFormat, LogSource, detect_format, parser_for};

use crate::config::Settings;

const SERVICES_FILE_NAME: &str = "ai_services.json";

/// Format selection for input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatChoice {
    /// Guess per file from its name.
    #[default]
    Auto,
    Squid,
    Dns,
    Csv,
}

impl FormatChoice {
    /// Concrete format for `path`.
    pub fn resolve(self, path: &str) -> LogFormat {
        match self {
            Self::Auto => detect_format(path),
            Self::Squid => LogFormat::Squid,
            Self::Dns => LogFormat::Dns,
            Self::Csv => LogFormat::Csv,
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────

/// Where the base services catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServicesSource {
    File(PathBuf),
    Bundled,
}

/// Pick the base catalog: explicit path, then `ai_services.json` next to the
/// executable, then in `cwd`, then the bundled copy.
pub fn resolve_services(explicit: Option<&str>, exe_dir: Option<&Path>, cwd: &Path) -> ServicesSource {
    if let Some(path) = explicit {
        return ServicesSource::File(PathBuf::from(path));
    }

    exe_dir
        .into_iter()
        .chain(std::iter::once(cwd))
        .map(|dir| dir.join(SERVICES_FILE_NAME))
        .find(|candidate| candidate.is_file())
        .map(ServicesSource::File)
        .unwrap_or(ServicesSource::Bundled)
}

/// Load the base catalog and merge the optional custom one over it.
///
/// Any failure here aborts the run.
pub fn load_catalog(source: &ServicesSource, custom: Option<&str>) -> anyhow::Result<Catalog> {
    let mut catalog = match source {
        ServicesSource::File(path) => {
            let path = path.to_string_lossy();
            Catalog::load(&path).context("loading AI services database")?
        }
        ServicesSource::Bundled => {
            tracing::info!("no services file found, using bundled catalog");
            Catalog::bundled().context("loading bundled AI services database")?
        }
    };

    if let Some(custom) = custom {
        catalog
            .merge_file(custom)
            .context("loading custom domains")?;
    }

    tracing::info!(
        services = catalog.service_count(),
        domains = catalog.domain_count(),
        "AI services loaded"
    );
    Ok(catalog)
}

// ── Files ─────────────────────────────────────────────────────

/// Explicit files first (in the given order), then each directory's files.
pub async fn collect_files(
    files: &[String],
    dirs: &[String],
    source: &dyn LogSource,
) -> anyhow::Result<Vec<String>> {
    let mut all = files.to_vec();
    for dir in dirs {
        let listed = source
            .list_dir(dir)
            .await
            .with_context(|| format!("reading directory {dir}"))?;
        all.extend(listed);
    }
    Ok(all)
}

/// Outcome of parsing one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileScan {
    pub path: String,
    pub format: LogFormat,
    /// Number of entries parsed, or why the file was skipped.
    pub result: Result<usize, String>,
}

/// Entries from every readable file, in file then line order.
#[derive(Debug, Default)]
pub struct ParsedLogs {
    pub entries: Vec<LogEntry>,
    pub files: Vec<FileScan>,
}

/// Parse files one after another. A failing file is recorded and skipped.
pub async fn parse_files(paths: &[String], choice: FormatChoice, source: &dyn LogSource) -> ParsedLogs {
    let mut parsed = ParsedLogs::default();

    for path in paths {
        let format = choice.resolve(path);
        let parser = parser_for(format);
        tracing::info!(path = %path, format = %format, "parsing");

        let result = match parser.parse(path, source).await {
            Ok(entries) => {
                tracing::info!(path = %path, entries = entries.len(), "entries parsed");
                let count = entries.len();
                parsed.entries.extend(entries);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "skipping file");
                Err(e.to_string())
            }
        };

        parsed.files.push(FileScan {
            path: path.clone(),
            format,
            result,
        });
    }

    parsed
}

// ── Pipeline ──────────────────────────────────────────────────

/// Everything a run produces.
#[derive(Debug)]
pub struct ScanReport {
    pub summary: Summary,
    pub files: Vec<FileScan>,
}

/// Run a full scan with an already-loaded catalog.
pub async fn scan(settings: &Settings, catalog: &Catalog, source: &dyn LogSource) -> anyhow::Result<ScanReport> {
    let paths = collect_files(&settings.files, &settings.dirs, source).await?;
    if paths.is_empty() {
        anyhow::bail!("no log files found to scan");
    }

    tracing::info!(files = paths.len(), "scanning");
    let parsed = parse_files(&paths, settings.format, source).await;

    tracing::info!(entries = parsed.entries.len(), "analyzing for shadow AI activity");
    let summary = analyze(catalog, &parsed.entries);

    Ok(ScanReport {
        summary,
        files: parsed.files,
    })
}
