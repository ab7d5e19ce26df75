//! Error types for building the game database.

use thiserror::Error;

/// Errors that fail a whole build.
///
/// Anything recoverable (a missing relationship file, a corrupt map, a
/// dangling id) is absorbed during the build and never surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    /// A mandatory table could not be found.
    #[error("missing {table} table at {path}")]
    MissingSource { table: &'static str, path: String },

    /// A mandatory table could not be retrieved.
    #[error("failed to fetch {table} table")]
    Fetch {
        table: &'static str,
        #[source]
        source: almanac_fetch::Error,
    },

    /// A mandatory table could not be decoded.
    #[error("corrupt {table} table at {path}")]
    CorruptSource {
        table: &'static str,
        path: String,
        #[source]
        source: almanac_pub::Error,
    },

    /// Parser setup failed.
    #[error("{0}")]
    Parser(#[from] almanac_ini::Error),

    /// The build was abandoned before publishing.
    #[error("load cancelled")]
    Cancelled,

    /// The background load ended without reporting a result.
    #[error("load worker exited without a result")]
    Disconnected,
}

/// Result type for database builds.
pub type Result<T> = std::result::Result<T, Error>;
