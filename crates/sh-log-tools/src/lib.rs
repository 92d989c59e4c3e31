//! Log parsing for Shadow AI Hunter.
//!
//! Normalizes Squid proxy access logs, DNS query logs (simple and dnsmasq
//! syslog dialects) and generic CSV/firewall exports into a single
//! [`LogEntry`] shape, behind a `LogSource` abstraction for testability.

pub mod domain;
pub mod error;
pub mod mock;
pub mod parsers;
pub mod source;
pub mod timestamp;
pub mod types;

// Re-export key types for convenience
pub use domain::{extract_domain, normalize_domain};
pub use error::{LogError, LogResult};
pub use mock::MockLogSource;
pub use parsers::{CsvParser, DnsParser, LogParser, SquidParser, detect_format, parser_for};
pub use source::{FileLogSource, LogSource};
pub use types::{LogEntry, LogFormat};
