//! Error types for pub table decoding.

use thiserror::Error;

use crate::PubKind;

/// Errors that can occur when decoding a pub table.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] almanac_common::Error),

    /// Wrong file signature for the requested table kind.
    #[error("invalid {kind} signature: got {actual:?}")]
    InvalidMagic { kind: PubKind, actual: Vec<u8> },

    /// The buffer ended inside a record.
    #[error("{kind} record {index} is truncated: {source}")]
    TruncatedRecord {
        kind: PubKind,
        index: usize,
        #[source]
        source: almanac_common::Error,
    },
}

/// Result type for pub table operations.
pub type Result<T> = std::result::Result<T, Error>;
