// src/SPSC/consumer.rs

use crate::Core::error::EnvelopeError;
use crate::SPSC::Buffer::RingBuffer;
use crate::Structs::Envelope;
use std::cell::Cell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// The read end of a ring buffer. One per ring; movable, not shareable.
pub struct Consumer<T> {
    buffer: Arc<RingBuffer<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(buffer: Arc<RingBuffer<T>>) -> Self {
        Self {
            buffer,
            _not_sync: PhantomData,
        }
    }

    /// Dequeue the oldest value if one is available. Never blocks.
    #[inline]
    pub fn pop(&self) -> Option<T> {
        // Safety: this handle is the ring's only consumer and is !Sync.
        unsafe { self.buffer.pop() }
    }

    /// Returns the underlying ring buffer (read-only accessors only)
    pub fn buffer(&self) -> &RingBuffer<T> {
        &self.buffer
    }

    /// Whether the producer handle has been dropped. Values it pushed before
    /// dropping can still be popped.
    pub fn is_producer_gone(&self) -> bool {
        Arc::strong_count(&self.buffer) == 1
    }
}

/// Counters kept by an [`EnvelopeConsumer`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiveStats {
    /// Envelopes that passed verification and were returned.
    pub delivered: u64,
    /// Envelopes dropped for a checksum mismatch.
    pub corrupt: u64,
    /// Sequence numbers skipped over (sum of gap widths).
    pub missing: u64,
    /// Envelopes whose `seq_no` was not above the last one seen from the same source.
    pub reordered: u64,
}

/// A consumer that verifies envelopes and tracks per-source sequencing.
pub struct EnvelopeConsumer {
    inner: Consumer<Envelope>,
    last_seq: HashMap<u32, u64>,
    stats: ReceiveStats,
}

impl EnvelopeConsumer {
    pub(crate) fn new(inner: Consumer<Envelope>) -> Self {
        Self {
            inner,
            last_seq: HashMap::new(),
            stats: ReceiveStats::default(),
        }
    }

    /// Receives the next envelope if one is available.
    ///
    /// # Returns
    /// * `Ok(Some(envelope))` for a verified envelope
    /// * `Ok(None)` if the buffer is empty
    /// * `Err(ChecksumMismatch)` if the popped envelope was corrupt; it has
    ///   been dropped and the caller may simply call `receive` again
    pub fn receive(&mut self) -> Result<Option<Envelope>, EnvelopeError> {
        let Some(envelope) = self.inner.pop() else {
            return Ok(None);
        };

        if let Err(e) = envelope.check() {
            self.stats.corrupt += 1;
            tracing::warn!(
                source_id = envelope.source_id,
                error = %e,
                "dropping corrupt envelope"
            );
            return Err(e);
        }

        self.track_sequence(&envelope);
        self.stats.delivered += 1;
        Ok(Some(envelope))
    }

    /// Pops until a verified envelope is found or the buffer is empty,
    /// dropping corrupt ones along the way.
    pub fn receive_valid(&mut self) -> Option<Envelope> {
        loop {
            match self.receive() {
                Ok(next) => return next,
                Err(_) => continue,
            }
        }
    }

    fn track_sequence(&mut self, envelope: &Envelope) {
        let seq_no = envelope.seq_no;
        let source_id = envelope.source_id;
        match self.last_seq.insert(source_id, seq_no) {
            Some(last) if seq_no <= last => {
                self.stats.reordered += 1;
                // keep the high-water mark
                self.last_seq.insert(source_id, last);
                tracing::debug!(source_id, seq_no, last, "out-of-order envelope");
            }
            Some(last) if seq_no - last > 1 => {
                let missing = seq_no - last - 1;
                self.stats.missing += missing;
                tracing::warn!(source_id, seq_no, last, missing, "sequence gap");
            }
            _ => {}
        }
    }

    /// Highest sequence number delivered from `source_id`, if any.
    pub fn last_seq(&self, source_id: u32) -> Option<u64> {
        self.last_seq.get(&source_id).copied()
    }

    pub fn stats(&self) -> ReceiveStats {
        self.stats
    }

    /// Returns the raw consumer handle
    pub fn raw(&self) -> &Consumer<Envelope> {
        &self.inner
    }
}
