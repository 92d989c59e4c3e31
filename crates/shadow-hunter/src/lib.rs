//! Shadow AI Hunter: find unsanctioned AI service usage in network logs.
//!
//! Wires the log parsers and the service catalog into a scan pipeline, and
//! renders the resulting summary as a table, JSON or CSV.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod scan;
