//! Error types for map decoding.

use thiserror::Error;

/// Errors that can occur when decoding a map file.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] almanac_common::Error),

    /// Wrong file signature.
    #[error("invalid EMF magic: got {0:?}")]
    InvalidMagic(Vec<u8>),

    /// File too short to contain the fixed header.
    #[error("map file too short: {0} bytes (need at least {min})", min = crate::NPC_COUNT_OFFSET + 1)]
    TooShort(usize),
}

/// Result type for map operations.
pub type Result<T> = std::result::Result<T, Error>;
