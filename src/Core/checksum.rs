// CRC-32C (Castagnoli) integrity codes for envelopes.

/// CRC-32C of `bytes`.
#[inline]
pub fn checksum(bytes: &[u8]) -> u32 {
    crc32c::crc32c(bytes)
}

/// Continue a running CRC-32C over another span, so a checksum over several
/// discontiguous fields needs no intermediate buffer.
#[inline]
pub fn checksum_append(crc: u32, bytes: &[u8]) -> u32 {
    crc32c::crc32c_append(crc, bytes)
}

/// Recompute and compare.
#[inline]
pub fn verify(bytes: &[u8], expected: u32) -> bool {
    checksum(bytes) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // Standard CRC-32C check value
        assert_eq!(checksum(b"123456789"), 0xE306_9283);
    }

    #[test]
    fn append_equals_contiguous() {
        let whole = checksum(b"hello world");
        let split = checksum_append(checksum(b"hello "), b"world");
        assert_eq!(whole, split);
        assert!(verify(b"hello world", split));
        assert!(!verify(b"hello World", split));
    }
}
