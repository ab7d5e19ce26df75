//! Per-source outcomes.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::Result;

/// What became of one optional source.
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T> {
    /// Retrieved and decoded.
    Present(T),
    /// Not found, or the origin could not deliver it.
    Absent,
    /// Retrieved but undecodable.
    Corrupt(String),
}

impl<T> Source<T> {
    /// Decode a fetch result, logging anything other than success.
    ///
    /// A retrieval failure counts as absent: optional sources never fail a
    /// build.
    pub fn decode<E: Display>(
        path: &str,
        fetched: Result<Option<Vec<u8>>>,
        decode: impl FnOnce(&[u8]) -> std::result::Result<T, E>,
    ) -> Self {
        match fetched {
            Ok(Some(bytes)) => match decode(&bytes) {
                Ok(value) => {
                    debug!(path, bytes = bytes.len(), "decoded source");
                    Self::Present(value)
                }
                Err(e) => {
                    warn!(path, error = %e, "skipping corrupt source");
                    Self::Corrupt(e.to_string())
                }
            },
            Ok(None) => {
                debug!(path, "source absent");
                Self::Absent
            }
            Err(e) => {
                warn!(path, error = %e, "source unavailable, treating as absent");
                Self::Absent
            }
        }
    }

    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Corrupt(_) => None,
        }
    }
}

/// Decode bytes as text, replacing invalid UTF-8.
pub fn text(bytes: &[u8]) -> std::result::Result<String, std::convert::Infallible> {
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn parse_number(bytes: &[u8]) -> std::result::Result<u32, String> {
        std::str::from_utf8(bytes)
            .map_err(|e| e.to_string())?
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| e.to_string())
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(Source::decode("a", Ok(Some(b"42".to_vec())), parse_number), Source::Present(42));
        assert_eq!(Source::decode("b", Ok(None), parse_number), Source::Absent);
        assert!(matches!(
            Source::decode("c", Ok(Some(b"x".to_vec())), parse_number),
            Source::Corrupt(_)
        ));

        let failed = Err(Error::InvalidPath("../d".into()));
        assert_eq!(Source::decode("d", failed, parse_number), Source::Absent);
    }

    #[test]
    fn test_present_and_lossy_text() {
        let corrupt: Source<Vec<u8>> = Source::Corrupt("bad".into());
        assert!(corrupt.present().is_none());
        assert_eq!(
            Source::decode("t", Ok(Some(b"hi\xff".to_vec())), text).present().as_deref(),
            Some("hi\u{fffd}")
        );
    }
}
