// Envelope: the unit moved through the transport.
//
// Wire frame (all fixed-width integers little-endian):
// [seq_no:8][ts_mono_ns:8][schema_ver:4][source_id:4][payload_len:varint][payload:N][checksum:4]

use crate::Core::checksum::checksum_append;
use crate::Core::error::{CodecError, EnvelopeError};
use crate::Core::varint::{decode_varint, encode_varint_into, varint_len};

/// Size of the fixed header fields covered by the checksum.
pub const FIXED_HEADER_SIZE: usize = 8 + 8 + 4 + 4;

/// Size of the trailing checksum.
pub const CHECKSUM_SIZE: usize = 4;

/// Largest payload accepted when decoding a frame (1MB).
pub const MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

/// A self-describing, checksummed message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Envelope {
    /// Strictly increasing per producer; used to spot gaps and reordering.
    pub seq_no: u64,
    /// Monotonic clock reading at creation.
    pub ts_mono_ns: u64,
    /// Payload layout version.
    pub schema_ver: u32,
    /// Originating producer.
    pub source_id: u32,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
    /// CRC-32C over the fixed fields followed by the payload.
    pub checksum: u32,
}

impl Envelope {
    /// Build an unsealed envelope (checksum 0). Call [`seal`](Self::seal)
    /// before handing it to a transport.
    pub fn new(seq_no: u64, ts_mono_ns: u64, schema_ver: u32, source_id: u32, payload: Vec<u8>) -> Self {
        Self {
            seq_no,
            ts_mono_ns,
            schema_ver,
            source_id,
            payload,
            checksum: 0,
        }
    }

    fn fixed_header(&self) -> [u8; FIXED_HEADER_SIZE] {
        let mut buf = [0u8; FIXED_HEADER_SIZE];
        buf[0..8].copy_from_slice(&self.seq_no.to_le_bytes());
        buf[8..16].copy_from_slice(&self.ts_mono_ns.to_le_bytes());
        buf[16..20].copy_from_slice(&self.schema_ver.to_le_bytes());
        buf[20..24].copy_from_slice(&self.source_id.to_le_bytes());
        buf
    }

    /// CRC-32C over the fixed fields and payload, ignoring the stored checksum.
    pub fn compute_checksum(&self) -> u32 {
        let crc = checksum_append(0, &self.fixed_header());
        checksum_append(crc, &self.payload)
    }

    /// Store the current checksum. Returns it for convenience.
    pub fn seal(&mut self) -> u32 {
        self.checksum = self.compute_checksum();
        self.checksum
    }

    /// Builder-style [`seal`](Self::seal).
    pub fn sealed(mut self) -> Self {
        self.seal();
        self
    }

    /// Whether the stored checksum matches the contents.
    pub fn verify(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    /// Like [`verify`](Self::verify) but reports the mismatch.
    pub fn check(&self) -> Result<(), EnvelopeError> {
        let actual = self.compute_checksum();
        if actual != self.checksum {
            return Err(EnvelopeError::ChecksumMismatch {
                seq_no: self.seq_no,
                expected: self.checksum,
                actual,
            });
        }
        Ok(())
    }

    /// Length of this envelope's wire frame.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_SIZE + varint_len(self.payload.len() as u64) + self.payload.len() + CHECKSUM_SIZE
    }

    /// Serialize the frame, stored checksum included as-is.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }

    /// Append the frame to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.reserve(self.encoded_len());
        out.extend_from_slice(&self.fixed_header());
        encode_varint_into(self.payload.len() as u64, out);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.checksum.to_le_bytes());
    }

    /// Parse one frame from the front of `data` and verify its checksum.
    ///
    /// Returns the envelope and the number of bytes consumed.
    ///
    /// # Errors
    /// - `InsufficientData` if the frame is incomplete
    /// - `Codec` if the payload length prefix overflows
    /// - `PayloadTooLarge` if the declared payload exceeds [`MAX_PAYLOAD_SIZE`]
    /// - `ChecksumMismatch` if the frame was corrupted
    pub fn decode(data: &[u8]) -> Result<(Self, usize), EnvelopeError> {
        if data.len() < FIXED_HEADER_SIZE {
            return Err(EnvelopeError::InsufficientData {
                needed: FIXED_HEADER_SIZE + 1 + CHECKSUM_SIZE,
                have: data.len(),
            });
        }

        let seq_no = u64::from_le_bytes(le_array(&data[0..8]));
        let ts_mono_ns = u64::from_le_bytes(le_array(&data[8..16]));
        let schema_ver = u32::from_le_bytes(le_array(&data[16..20]));
        let source_id = u32::from_le_bytes(le_array(&data[20..24]));

        let (payload_len, prefix_len) = match decode_varint(&data[FIXED_HEADER_SIZE..]) {
            Ok(decoded) => decoded,
            Err(CodecError::Truncated { .. }) => {
                return Err(EnvelopeError::InsufficientData {
                    needed: data.len() + 1,
                    have: data.len(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        if payload_len > MAX_PAYLOAD_SIZE as u64 {
            return Err(EnvelopeError::PayloadTooLarge {
                size: payload_len as usize,
            });
        }
        let payload_len = payload_len as usize;

        let payload_start = FIXED_HEADER_SIZE + prefix_len;
        let total = payload_start + payload_len + CHECKSUM_SIZE;
        if data.len() < total {
            return Err(EnvelopeError::InsufficientData {
                needed: total,
                have: data.len(),
            });
        }

        let payload = data[payload_start..payload_start + payload_len].to_vec();
        let checksum = u32::from_le_bytes(le_array(&data[total - CHECKSUM_SIZE..total]));

        let envelope = Self {
            seq_no,
            ts_mono_ns,
            schema_ver,
            source_id,
            payload,
            checksum,
        };
        envelope.check()?;
        Ok((envelope, total))
    }
}

#[inline]
fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}
