//! Command-line interface definition.

use clap::Parser;

use crate::report::ReportFormat;
use crate::scan::FormatChoice;

const BANNER: &str = r#"
 ____  _               _                    _    ___   _   _             _
/ ___|| |__   __ _  __| | _____      __    / \  |_ _| | | | |_   _ _ __ | |_ ___ _ __
\___ \| '_ \ / _` |/ _` |/ _ \ \ /\ / /   / _ \  | |  | |_| | | | | '_ \| __/ _ \ '__|
 ___) | | | | (_| | (_| | (_) \ V  V /   / ___ \ | |  |  _  | |_| | | | | ||  __/ |
|____/|_| |_|\__,_|\__,_|\___/ \_/\_/   /_/   \_\___| |_| |_|\__,_|_| |_|\__\___|_|
"#;

/// Scan proxy, DNS and firewall logs for connections to known AI services.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "shadow-hunter",
    version,
    about = "Detect unauthorized AI service usage in network logs",
    after_help = "Examples:\n  shadow-hunter --file /var/log/squid/access.log\n  shadow-hunter --dir /var/log/proxy/ --format squid --output json\n  shadow-hunter --file firewall.csv --output json --out report.json"
)]
pub struct Cli {
    /// Log file to scan (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Directory whose files should all be scanned (repeatable, not recursive)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dirs: Vec<String>,

    /// Log format; `auto` guesses from each file name [default: auto]
    #[arg(long, value_enum)]
    pub format: Option<FormatChoice>,

    /// Report format [default: table]
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<String>,

    /// AI services catalog (JSON); defaults to ai_services.json next to the binary,
    /// then in the working directory, then the bundled catalog
    #[arg(long, value_name = "FILE")]
    pub services: Option<String>,

    /// Additional services catalog merged over the base one
    #[arg(long, value_name = "FILE")]
    pub custom: Option<String>,

    /// TOML config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<String>,

    /// Suppress the banner
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Emit diagnostics as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

/// Startup banner with the crate version.
pub fn banner() -> String {
    format!(
        "{BANNER}\n  Shadow AI Hunter v{} - Detect unauthorized AI service usage\n",
        env!("CARGO_PKG_VERSION")
    )
}
