//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so that reports written to stdout stay clean.
//! `RUST_LOG` overrides the default `info` filter.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    if json {
        builder.json().flatten_event(true).init();
    } else {
        builder.with_target(false).init();
    }
}
