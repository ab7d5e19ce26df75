//! EO-encoded byte buffer builder.

use crate::codec;

/// Builds an EO-encoded byte buffer.
///
/// This is the inverse of [`EoReader`](crate::EoReader): every `add_*` method
/// writes exactly what the matching `read_*` method consumes.
#[derive(Debug, Clone, Default)]
pub struct EoWriter {
    data: Vec<u8>,
}

impl EoWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append raw bytes unchanged.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a raw (unencoded) byte.
    pub fn add_byte(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Append a one-byte EO number.
    pub fn add_char(&mut self, value: u8) {
        self.data.push(codec::encode_number(u32::from(value))[0]);
    }

    /// Append a two-byte EO number.
    pub fn add_short(&mut self, value: u16) {
        self.data.extend_from_slice(&codec::encode_number(u32::from(value))[..2]);
    }

    /// Append a three-byte EO number.
    pub fn add_three(&mut self, value: u32) {
        self.data.extend_from_slice(&codec::encode_number(value)[..3]);
    }

    /// Append a four-byte EO number.
    pub fn add_int(&mut self, value: u32) {
        self.data.extend_from_slice(&codec::encode_number(value));
    }

    /// Append a string prefixed by its one-byte EO-encoded length.
    pub fn add_prefixed_string(&mut self, value: &str) {
        self.add_char(value.len() as u8);
        self.add_bytes(value.as_bytes());
    }

    /// Append an encoded string padded with `0xFF` to exactly `length` bytes.
    pub fn add_fixed_encoded_string(&mut self, value: &str, length: usize) {
        let mut bytes: Vec<u8> = value.bytes().take(length).collect();
        bytes.resize(length, 0xFF);
        codec::encode_string(&mut bytes);
        self.data.extend_from_slice(&bytes);
    }

    /// Consume the writer and return the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
