// Error types for the codec, envelope and configuration layers.
//
// Full buffers and empty lanes are not errors; they surface as `Err(value)` /
// `None` from the transport and scheduler.

/// Varint decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Input ended while the last byte still had its continuation bit set.
    #[error("truncated varint: input exhausted after {consumed} bytes")]
    Truncated {
        /// Bytes read before running out of input.
        consumed: usize,
    },

    /// The encoded value does not fit in 64 bits.
    #[error("varint overflows u64")]
    Overflow,
}

/// Envelope framing and integrity errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// Not enough bytes to parse the frame.
    #[error("insufficient data: need {needed} bytes, have {have}")]
    InsufficientData {
        /// Minimum bytes required.
        needed: usize,
        /// Bytes available.
        have: usize,
    },

    /// Payload length exceeds [`MAX_PAYLOAD_SIZE`](crate::Structs::MAX_PAYLOAD_SIZE).
    #[error("payload too large: {size} bytes")]
    PayloadTooLarge {
        /// Declared or actual payload size.
        size: usize,
    },

    /// The payload length prefix is malformed.
    #[error("bad payload length prefix: {0}")]
    Codec(#[from] CodecError),

    /// The envelope was corrupted in transit and must not be delivered.
    #[error("checksum mismatch on seq {seq_no}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// Sequence number as carried by the (corrupt) envelope.
        seq_no: u64,
        /// Checksum carried by the envelope.
        expected: u32,
        /// Checksum recomputed by the receiver.
        actual: u32,
    },
}

/// Invalid construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Ring buffers need at least two slots (one is always kept free).
    #[error("ring buffer capacity must be at least 2, got {0}")]
    InvalidCapacity(usize),

    /// A scheduler needs at least one lane.
    #[error("scheduler must have at least one lane")]
    NoLanes,
}

/// Rejected job submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedError {
    #[error("lane {lane} out of range (scheduler has {lanes} lanes)")]
    InvalidLane { lane: usize, lanes: usize },
}
