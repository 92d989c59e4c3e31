//! Service catalog error types.

use thiserror::Error;

/// Errors raised while loading or merging a services catalog.
///
/// Both are fatal for a scan: nothing can be matched without a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading services file {path}: {message}")]
    Io { path: String, message: String },

    #[error("parsing services file {path}: {message}")]
    Format { path: String, message: String },
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
