//! Shadow AI detection core.
//!
//! Loads the catalog of known AI services, resolves destinations against it
//! (exact match, then parent domains) and folds matched log entries into a
//! [`Summary`].

pub mod analyzer;
pub mod catalog;
pub mod error;

pub use analyzer::{Finding, Summary, analyze};
pub use catalog::{AiService, Catalog};
pub use error::{CatalogError, CatalogResult};
