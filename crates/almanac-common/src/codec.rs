//! EO data encoding.
//!
//! Numbers are stored little-endian in base 253. Each byte holds one digit
//! offset by one, so that a zero digit is never written as a literal `0x00`.
//! Unused high digits are written as `254`, which also decodes to zero.
//!
//! Map names use a separate reversible cipher ([`decode_string`] /
//! [`encode_string`]) that flips printable characters and reverses the buffer.

/// Largest value + 1 that fits in one encoded byte.
pub const CHAR_MAX: u32 = 253;

/// Largest value + 1 that fits in two encoded bytes.
pub const SHORT_MAX: u32 = CHAR_MAX * CHAR_MAX;

/// Largest value + 1 that fits in three encoded bytes.
pub const THREE_MAX: u32 = SHORT_MAX * CHAR_MAX;

/// Largest value that fits in four encoded bytes.
pub const INT_MAX: u32 = THREE_MAX * CHAR_MAX - 1;

/// Decode up to four EO-encoded bytes into a number.
///
/// # Example
///
/// ```
/// use almanac_common::codec::decode_number;
///
/// assert_eq!(decode_number(&[1, 254]), 0);
/// assert_eq!(decode_number(&[11, 2]), 10 + 253);
/// ```
#[inline]
pub fn decode_number(bytes: &[u8]) -> u32 {
    let mut result = 0u32;
    let mut scale = 1u32;

    for &byte in bytes.iter().take(4) {
        let digit = match byte {
            254 => 0,
            0 => 127,
            b => u32::from(b) - 1,
        };
        result += digit * scale;
        scale = scale.saturating_mul(CHAR_MAX);
    }

    result
}

/// Encode a number into four EO bytes. Values above [`INT_MAX`] are clamped.
#[inline]
pub fn encode_number(value: u32) -> [u8; 4] {
    let mut value = value.min(INT_MAX);
    let mut out = [254u8; 4];

    for (slot, max) in [(3, THREE_MAX), (2, SHORT_MAX), (1, CHAR_MAX)] {
        if value >= max {
            out[slot] = (value / max + 1) as u8;
            value %= max;
        }
    }
    out[0] = (value + 1) as u8;

    out
}

/// Flip printable characters in place. Applying it twice restores the input.
fn invert_characters(buf: &mut [u8]) {
    let mut flippy = buf.len() % 2 == 1;

    for c in buf.iter_mut() {
        let pivot = if flippy {
            match *c {
                0x22..=0x4F => 0x71,
                0x50..=0x7D => 0xCD,
                _ => 0,
            }
        } else {
            match *c {
                0x22..=0x7D => 0x9F,
                _ => 0,
            }
        };

        if pivot != 0 {
            *c = pivot - *c;
        }
        flippy = !flippy;
    }
}

/// Decode an encoded string buffer in place.
pub fn decode_string(buf: &mut [u8]) {
    invert_characters(buf);
    buf.reverse();
}

/// Encode a plain string buffer in place.
pub fn encode_string(buf: &mut [u8]) {
    buf.reverse();
    invert_characters(buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode_number(&[1]), 0);
        assert_eq!(decode_number(&[254]), 0);
        assert_eq!(decode_number(&[101]), 100);
        assert_eq!(decode_number(&[1, 2]), 253);
        assert_eq!(decode_number(&[1, 1, 2]), SHORT_MAX);
        assert_eq!(decode_number(&[0]), 127);
    }

    #[test]
    fn test_encode_matches_decode() {
        for value in [0, 1, 252, 253, 254, 64_008, 64_009, 1_000_000, THREE_MAX, INT_MAX] {
            let bytes = encode_number(value);
            assert_eq!(decode_number(&bytes), value, "value {value}");
        }
    }

    #[test]
    fn test_encode_small_value_pads_with_254() {
        assert_eq!(encode_number(5), [6, 254, 254, 254]);
    }

    #[test]
    fn test_encode_clamps_overflow() {
        assert_eq!(decode_number(&encode_number(u32::MAX)), INT_MAX);
    }

    #[test]
    fn test_string_cipher_is_reversible() {
        let mut buf = b"Aeven Town".to_vec();
        encode_string(&mut buf);
        assert_ne!(buf, b"Aeven Town");
        decode_string(&mut buf);
        assert_eq!(buf, b"Aeven Town");
    }

    #[test]
    fn test_string_cipher_leaves_padding_alone() {
        let mut buf = vec![0xFF; 4];
        encode_string(&mut buf);
        assert_eq!(buf, vec![0xFF; 4]);
    }
}
