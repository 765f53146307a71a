//! Variable-length integer primitives. An integer is encoded as a sequence of 7-bit groups, least
//! significant group first, where every byte except the last carries the continuation bit `0x80`.
//! All functions here are pure and operate only on their explicit arguments; the decoder frames a
//! varint with `skip` first and only then reads its value with `decode`, which is why `decode`
//! walks its span from the last byte backward.

use crate::error::DecodeError;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Returns the number of bytes `encode` will emit for `value`.
pub fn length(mut value: u64) -> usize {
    let mut result = 1;
    while value >= CONTINUATION as u64 {
        result += 1;
        value >>= 7;
    }
    result
}

/// Encodes `value` into the front of `buf` and returns the number of bytes written, which always
/// equals `length(value)`. Panics if `buf` is too small; callers size their buffers up front.
pub fn encode(buf: &mut [u8], mut value: u64) -> usize {
    let mut pos = 0;
    while value >= CONTINUATION as u64 {
        buf[pos] = (value as u8 & PAYLOAD) | CONTINUATION;
        value >>= 7;
        pos += 1;
    }
    buf[pos] = value as u8;
    pos + 1
}

/// Decodes the varint occupying exactly `span`, accumulating 7 bits per byte from the last byte
/// backward. Spans whose value would not fit into 64 bits are rejected instead of shifting bits
/// out silently.
pub fn decode(span: &[u8]) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    for &byte in span.iter().rev() {
        if value >> 57 != 0 {
            return Err(DecodeError::Overflow);
        }
        value = value << 7 | (byte & PAYLOAD) as u64;
    }
    Ok(value)
}

/// Advances past one complete varint starting at `pos` and returns the position of the first byte
/// after it. Running out of buffer before a byte with a clear continuation bit is an error.
pub fn skip(buf: &[u8], mut pos: usize) -> Result<usize, DecodeError> {
    while pos < buf.len() {
        let byte = buf[pos];
        pos += 1;
        if byte & CONTINUATION == 0 {
            return Ok(pos);
        }
    }
    Err(DecodeError::Eof)
}

#[cfg(test)]
mod tests {
    use super::{length, encode, decode, skip};
    use crate::error::DecodeError;

    #[test]
    fn roundtrip_long() {
        // choose large prime number to make this test terminate in acceptable time
        for value in (0..u64::MAX).step_by(3_203_431_780_337) {
            assert_roundtrip(value);
        }
    }

    #[test]
    fn group_boundaries() {
        for value in [0, 1, 0x7f, 0x80, 0x3fff, 0x4000, 0x1f_ffff, 0x20_0000, u32::MAX as u64, u64::MAX] {
            assert_roundtrip(value);
        }
        assert_eq!(1, length(0x7f));
        assert_eq!(2, length(0x80));
        assert_eq!(10, length(u64::MAX));
    }

    #[test]
    fn last_byte_terminates() {
        let mut buf = [0u8; 10];
        for value in [0x80u64, 0x4000, u64::MAX] {
            let count = encode(&mut buf, value);
            assert_eq!(0, buf[count - 1] & 0x80);
            for byte in &buf[..count - 1] {
                assert_eq!(0x80, byte & 0x80);
            }
        }
    }

    #[test]
    fn skip_finds_boundary() {
        let mut buf = [0u8; 12];
        let count = encode(&mut buf, 0x4000);
        buf[count] = 0x2a;
        assert_eq!(Ok(count), skip(&buf[..count + 1], 0));
    }

    #[test]
    fn skip_rejects_truncation() {
        // continuation bit set on every byte, terminator never arrives
        let buf = [0x80u8, 0xff, 0x83];
        assert_eq!(Err(DecodeError::Eof), skip(&buf, 0));
        assert_eq!(Err(DecodeError::Eof), skip(&[], 0));
    }

    #[test]
    fn rejects_overflow() {
        // eleven payload groups exceed the 64 bit range
        let buf = [0xffu8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        assert_eq!(Err(DecodeError::Overflow), decode(&buf));
        // ten groups fit exactly when the most significant one is a single bit
        let buf = [0xffu8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        assert_eq!(Ok(u64::MAX), decode(&buf));
    }

    fn assert_roundtrip(value: u64) {
        let mut buf = [0u8; 10];
        let count = encode(&mut buf, value);
        assert_eq!(length(value), count);
        assert_eq!(Ok(count), skip(&buf[..count], 0));
        assert_eq!(Ok(value), decode(&buf[..count]));
    }
}
