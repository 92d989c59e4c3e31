//! Scan settings from an optional TOML config file plus command-line flags.

use serde::Deserialize;

use crate::cli::Cli;
use crate::report::ReportFormat;
use crate::scan::FormatChoice;

/// Contents of a `--config` file. Every key is optional.
///
/// ```toml
/// services = "/etc/shadow-hunter/ai_services.json"
/// custom_services = "/etc/shadow-hunter/custom.json"
/// format = "auto"
/// output = "json"
/// log_paths = ["/var/log/squid/access.log"]
/// log_dirs = ["/var/log/dns"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HunterConfig {
    /// Base services catalog.
    pub services: Option<String>,
    /// Catalog merged over the base one.
    pub custom_services: Option<String>,
    /// Log format for every file.
    pub format: Option<FormatChoice>,
    /// Report format.
    pub output: Option<ReportFormat>,
    /// Log files scanned on every run.
    pub log_paths: Vec<String>,
    /// Directories scanned on every run.
    pub log_dirs: Vec<String>,
}

impl HunterConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
    pub format: FormatChoice,
    pub output: ReportFormat,
    pub out: Option<String>,
    pub services: Option<String>,
    pub custom: Option<String>,
}

impl Settings {
    /// Flags win over config values; file and directory lists are
    /// concatenated, config entries first.
    pub fn resolve(cli: &Cli, config: HunterConfig) -> Self {
        let mut files = config.log_paths;
        files.extend(cli.files.iter().cloned());
        let mut dirs = config.log_dirs;
        dirs.extend(cli.dirs.iter().cloned());

        Self {
            files,
            dirs,
            format: cli.format.or(config.format).unwrap_or_default(),
            output: cli.output.or(config.output).unwrap_or_default(),
            out: cli.out.clone(),
            services: cli.services.clone().or(config.services),
            custom: cli.custom.clone().or(config.custom_services),
        }
    }

    /// True when neither files nor directories were given.
    pub fn has_no_inputs(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
services = "/etc/shadow-hunter/ai_services.json"
custom_services = "/etc/shadow-hunter/custom.json"
format = "dns"
output = "csv"
log_paths = ["/var/log/dnsmasq.log"]
log_dirs = ["/var/log/dns"]
"#;
        let config: HunterConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.services.as_deref(), Some("/etc/shadow-hunter/ai_services.json"));
        assert_eq!(config.format, Some(FormatChoice::Dns));
        assert_eq!(config.output, Some(ReportFormat::Csv));
        assert_eq!(config.log_paths.len(), 1);
        assert_eq!(config.log_dirs, vec!["/var/log/dns"]);
    }

    #[test]
    fn deserialize_empty_config_uses_defaults() {
        let config: HunterConfig = toml::from_str("").unwrap();
        assert!(config.services.is_none());
        assert!(config.format.is_none());
        assert!(config.log_paths.is_empty());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<HunterConfig>("verbose = true").is_err());
        assert!(toml::from_str::<HunterConfig>("format = \"syslog\"").is_err());
    }

    #[test]
    fn resolve_defaults_without_config() {
        let cli = Cli {
            files: vec!["access.log".into()],
            ..Default::default()
        };
        let settings = Settings::resolve(&cli, HunterConfig::default());
        assert_eq!(settings.files, vec!["access.log"]);
        assert_eq!(settings.format, FormatChoice::Auto);
        assert_eq!(settings.output, ReportFormat::Table);
        assert!(settings.services.is_none());
        assert!(!settings.has_no_inputs());
    }

    #[test]
    fn resolve_cli_overrides_config() {
        let cli = Cli {
            files: vec!["extra.log".into()],
            output: Some(ReportFormat::Json),
            services: Some("cli.json".into()),
            ..Default::default()
        };
        let config = HunterConfig {
            services: Some("config.json".into()),
            custom_services: Some("custom.json".into()),
            format: Some(FormatChoice::Squid),
            output: Some(ReportFormat::Csv),
            log_paths: vec!["base.log".into()],
            log_dirs: vec![],
        };
        let settings = Settings::resolve(&cli, config);
        assert_eq!(settings.files, vec!["base.log", "extra.log"]);
        assert_eq!(settings.format, FormatChoice::Squid);
        assert_eq!(settings.output, ReportFormat::Json);
        assert_eq!(settings.services.as_deref(), Some("cli.json"));
        assert_eq!(settings.custom.as_deref(), Some("custom.json"));
    }

    #[test]
    fn no_inputs_detected() {
        let settings = Settings::resolve(&Cli::default(), HunterConfig::default());
        assert!(settings.has_no_inputs());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunter.toml");
        std::fs::write(&path, "output = \"json\"\n").unwrap();
        let config = HunterConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.output, Some(ReportFormat::Json));
        assert!(HunterConfig::from_file("/nonexistent/hunter.toml").is_err());
    }
}
