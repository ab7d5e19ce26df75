//! Binary reader for EO-encoded byte slices.
//!
//! This module provides [`EoReader`], a cursor-like type that reads EO numbers,
//! length-prefixed strings and fixed raw layouts from a byte slice without copying.

use zerocopy::FromBytes;

use crate::codec;
use crate::{Error, Result};

/// A reader over EO-encoded data.
///
/// # Example
///
/// ```
/// use almanac_common::EoReader;
///
/// let data = [0x0B, 0x02, 0x04, b'a', b'b', b'c'];
/// let mut reader = EoReader::new(&data);
///
/// assert_eq!(reader.read_short().unwrap(), 10 + 253);
/// assert_eq!(reader.read_prefixed_string().unwrap(), "abc");
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct EoReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> EoReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a one-byte EO number.
    #[inline]
    pub fn read_char(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| codec::decode_number(b) as u8)
    }

    /// Read a two-byte EO number.
    #[inline]
    pub fn read_short(&mut self) -> Result<u16> {
        self.read_bytes(2).map(|b| codec::decode_number(b) as u16)
    }

    /// Read a three-byte EO number.
    #[inline]
    pub fn read_three(&mut self) -> Result<u32> {
        self.read_bytes(3).map(codec::decode_number)
    }

    /// Read a four-byte EO number.
    #[inline]
    pub fn read_int(&mut self) -> Result<u32> {
        self.read_bytes(4).map(codec::decode_number)
    }

    /// Read a raw string of a specific length.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn read_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read a string prefixed by its one-byte EO-encoded length.
    pub fn read_prefixed_string(&mut self) -> Result<String> {
        let length = self.read_char()? as usize;
        self.read_string(length)
    }

    /// Read a fixed-size encoded string, dropping its `0xFF` padding.
    pub fn read_fixed_encoded_string(&mut self, length: usize) -> Result<String> {
        let mut bytes = self.read_bytes(length)?.to_vec();
        codec::decode_string(&mut bytes);

        if let Some(end) = memchr::memchr(0xFF, &bytes) {
            bytes.truncate(end);
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a raw layout using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.peek_bytes(expected.len()).map_err(|_| Error::InvalidMagic {
            expected: expected.to_vec(),
            actual: self.data[self.position.min(self.data.len())..].to_vec(),
        })?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        self.position += expected.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EoWriter;

    #[test]
    fn test_read_numbers() {
        let mut writer = EoWriter::new();
        writer.add_char(200);
        writer.add_short(5_000);
        writer.add_three(70_000);
        writer.add_int(20_000_000);
        let data = writer.into_bytes();

        let mut reader = EoReader::new(&data);
        assert_eq!(reader.read_char().unwrap(), 200);
        assert_eq!(reader.read_short().unwrap(), 5_000);
        assert_eq!(reader.read_three().unwrap(), 70_000);
        assert_eq!(reader.read_int().unwrap(), 20_000_000);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_fixed_encoded_string() {
        let mut writer = EoWriter::new();
        writer.add_fixed_encoded_string("Wise Man", 24);
        let data = writer.into_bytes();
        assert_eq!(data.len(), 24);

        let mut reader = EoReader::new(&data);
        assert_eq!(reader.read_fixed_encoded_string(24).unwrap(), "Wise Man");
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x03, 0x04];
        let reader = EoReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), &[0x03, 0x04]);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = EoReader::new(&data);

        assert!(matches!(reader.read_three(), Err(Error::UnexpectedEof { needed: 3, available: 2 })));
    }

    #[test]
    fn test_magic_mismatch() {
        let mut reader = EoReader::new(b"EIF");
        assert!(reader.expect_magic(b"ENF").is_err());

        let mut short = EoReader::new(b"E");
        assert!(matches!(short.expect_magic(b"EIF"), Err(Error::InvalidMagic { .. })));
    }
}
