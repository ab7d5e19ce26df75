//! Error types for source retrieval.

use thiserror::Error;

/// Errors that can occur when retrieving a source.
///
/// A missing source is not an error; fetchers report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    /// The origin failed for a reason other than the source being absent.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A path escapes the fetcher's root.
    #[error("refusing path outside the source root: {0}")]
    InvalidPath(String),
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;
