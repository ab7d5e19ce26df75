//! Error types for text source parsing.

use thiserror::Error;

/// Errors that can occur when preparing a parser.
///
/// Parsing itself never fails: malformed lines and groups are skipped.
#[derive(Debug, Error)]
pub enum Error {
    /// A directive pattern failed to compile.
    #[error("invalid directive pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for parser setup.
pub type Result<T> = std::result::Result<T, Error>;
