// Unsigned LEB128-style varints: 7 data bits per byte, high bit set on every
// byte except the last, least-significant group first.

use super::error::CodecError;

/// Longest encoding of a `u64` (ceil(64 / 7)).
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const DATA_MASK: u8 = 0x7F;

/// Number of bytes `value` encodes to.
#[inline]
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Encode `value` into a fresh buffer. `0` encodes as a single zero byte.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(value));
    encode_varint_into(value, &mut out);
    out
}

/// Append the encoding of `value` to `out`. Returns the number of bytes written.
pub fn encode_varint_into(mut value: u64, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    while value >= CONTINUATION as u64 {
        out.push((value as u8) | CONTINUATION);
        value >>= 7;
    }
    out.push(value as u8);
    out.len() - start
}

/// Encode `value` into a stack buffer. Returns the buffer and the number of
/// leading bytes used.
pub fn encode_varint_array(mut value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut n = 0;
    while value >= CONTINUATION as u64 {
        buf[n] = (value as u8) | CONTINUATION;
        value >>= 7;
        n += 1;
    }
    buf[n] = value as u8;
    (buf, n + 1)
}

/// Decode one varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Trailing bytes after
/// the terminating byte are left untouched.
///
/// # Errors
/// - [`CodecError::Truncated`] if `bytes` ends (or is empty) before a byte
///   without the continuation bit.
/// - [`CodecError::Overflow`] if the encoding carries more than 64 bits.
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            // 10th byte may only contribute bit 63
            return Err(CodecError::Overflow);
        }
        value |= ((byte & DATA_MASK) as u64) << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(CodecError::Truncated {
        consumed: bytes.len(),
    })
}
