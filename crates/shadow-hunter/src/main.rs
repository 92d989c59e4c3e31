//! Shadow AI Hunter CLI.
//!
//! Loads the AI services catalog, parses the requested proxy/DNS/CSV logs
//! and reports which sources talked to which AI services.

use anyhow::Context;
use clap::{CommandFactory, Parser};

use sh_log_tools::FileLogSource;
use shadow_hunter::cli::{Cli, banner};
use shadow_hunter::config::{HunterConfig, Settings};
use shadow_hunter::logging::init_logging;
use shadow_hunter::report;
use shadow_hunter::scan::{self, load_catalog, resolve_services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = match &cli.config {
        Some(path) => HunterConfig::from_file(path).with_context(|| format!("loading config {path}"))?,
        None => HunterConfig::default(),
    };
    let settings = Settings::resolve(&cli, config);

    if settings.has_no_inputs() {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    if !cli.quiet {
        eprintln!("{}", banner());
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "shadow-hunter starting");

    // ── Catalog ─────────────────────────────────────────────────
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    let cwd = std::env::current_dir()?;
    let services = resolve_services(settings.services.as_deref(), exe_dir.as_deref(), &cwd);
    let catalog = load_catalog(&services, settings.custom.as_deref())?;

    // ── Scan ────────────────────────────────────────────────────
    let result = scan::scan(&settings, &catalog, &FileLogSource).await?;
    let summary = &result.summary;

    // ── Report ──────────────────────────────────────────────────
    match &settings.out {
        Some(path) => {
            report::write_to_file(summary, settings.output, path)
                .context("writing report")?;
            tracing::info!(path = %path, "report written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            report::render(summary, settings.output, &mut lock).context("generating report")?;
        }
    }

    if summary.total_findings > 0 {
        tracing::warn!(
            findings = summary.total_findings,
            users = summary.unique_users,
            "ALERT: shadow AI connections detected"
        );
    } else {
        tracing::info!("no shadow AI activity detected, clean scan");
    }

    Ok(())
}
