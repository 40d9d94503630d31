// Job: a schedulable unit of work, and its compact varint payload form
// [lane:varint][deadline_ns:varint][id:varint].

use crate::Core::error::CodecError;
use crate::Core::varint::{decode_varint, encode_varint_into, varint_len};

/// A unit of work held by a [`LaneScheduler`](crate::Sched::LaneScheduler).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Job {
    /// Lane index; must be below the scheduler's lane count.
    pub lane: usize,
    /// Service no later than this monotonic timestamp.
    pub deadline_ns: u64,
    /// Tracing / dedup identifier. Not used for ordering.
    pub id: u64,
}

impl Job {
    pub fn new(lane: usize, deadline_ns: u64, id: u64) -> Self {
        Self {
            lane,
            deadline_ns,
            id,
        }
    }

    pub fn encoded_len(&self) -> usize {
        varint_len(self.lane as u64) + varint_len(self.deadline_ns) + varint_len(self.id)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }

    /// Append the varint form to `out`. Returns bytes written.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> usize {
        encode_varint_into(self.lane as u64, out)
            + encode_varint_into(self.deadline_ns, out)
            + encode_varint_into(self.id, out)
    }

    /// Decode a job from the front of `bytes`. Returns the job and bytes consumed.
    ///
    /// The lane is not range-checked here; the scheduler owns that decision.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), CodecError> {
        let (lane, a) = decode_varint(bytes)?;
        let (deadline_ns, b) = decode_varint(&bytes[a..]).map_err(|e| shift_truncation(e, a))?;
        let (id, c) = decode_varint(&bytes[a + b..]).map_err(|e| shift_truncation(e, a + b))?;
        let lane = usize::try_from(lane).map_err(|_| CodecError::Overflow)?;
        Ok((
            Self {
                lane,
                deadline_ns,
                id,
            },
            a + b + c,
        ))
    }
}

// Report truncation relative to the start of the whole job, not the field.
fn shift_truncation(err: CodecError, offset: usize) -> CodecError {
    match err {
        CodecError::Truncated { consumed } => CodecError::Truncated {
            consumed: consumed + offset,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_small_fields() {
        let job = Job::new(2, 1_000, 7);
        let bytes = job.encode();
        assert_eq!(bytes, vec![0x02, 0xE8, 0x07, 0x07]);
        assert_eq!(Job::decode(&bytes), Ok((job, 4)));
    }

    #[test]
    fn truncation_offset_covers_whole_job() {
        let bytes = Job::new(1, u64::MAX, 9).encode();
        // cut inside the deadline field
        let cut = &bytes[..5];
        assert_eq!(Job::decode(cut), Err(CodecError::Truncated { consumed: 5 }));
    }
}
