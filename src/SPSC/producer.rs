// In src/SPSC/producer.rs
use crate::Core::clock::{Clock, MonotonicClock};
use crate::SPSC::Buffer::RingBuffer;
use crate::Structs::Envelope;
use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::Arc;

/// The write end of a ring buffer.
///
/// There is exactly one per ring. It can be moved to another thread but not
/// shared or cloned, which is what makes [`push`](Producer::push) safe.
pub struct Producer<T> {
    buffer: Arc<RingBuffer<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> Producer<T> {
    pub(crate) fn new(buffer: Arc<RingBuffer<T>>) -> Self {
        Self {
            buffer,
            _not_sync: PhantomData,
        }
    }

    /// Enqueue a value without blocking.
    ///
    /// # Returns
    /// * `Ok(())` once the value is visible to the consumer
    /// * `Err(value)` if the buffer is full; the caller decides whether to
    ///   retry, drop or back off
    #[inline]
    pub fn push(&self, value: T) -> Result<(), T> {
        // Safety: this handle is the ring's only producer and is !Sync.
        unsafe { self.buffer.push(value) }
    }

    /// Returns the underlying ring buffer (read-only accessors only)
    pub fn buffer(&self) -> &RingBuffer<T> {
        &self.buffer
    }

    /// Whether the consumer handle has been dropped.
    pub fn is_consumer_gone(&self) -> bool {
        Arc::strong_count(&self.buffer) == 1
    }
}

/// A producer that builds, stamps and seals envelopes before pushing them.
///
/// Sequence numbers start at 1 and advance only on a successful push, so a
/// rejected envelope can be resent without leaving a gap.
pub struct EnvelopeProducer<C: Clock = MonotonicClock> {
    inner: Producer<Envelope>,
    clock: C,
    source_id: u32,
    schema_ver: u32,
    next_seq: u64,
}

impl EnvelopeProducer<MonotonicClock> {
    pub(crate) fn new(inner: Producer<Envelope>, source_id: u32, schema_ver: u32) -> Self {
        Self::with_clock(inner, source_id, schema_ver, MonotonicClock)
    }
}

impl<C: Clock> EnvelopeProducer<C> {
    pub(crate) fn with_clock(inner: Producer<Envelope>, source_id: u32, schema_ver: u32, clock: C) -> Self {
        Self {
            inner,
            clock,
            source_id,
            schema_ver,
            next_seq: 1,
        }
    }

    /// Swap the clock used for `ts_mono_ns` stamps.
    pub fn into_clock<D: Clock>(self, clock: D) -> EnvelopeProducer<D> {
        EnvelopeProducer {
            inner: self.inner,
            clock,
            source_id: self.source_id,
            schema_ver: self.schema_ver,
            next_seq: self.next_seq,
        }
    }

    /// Sends a payload as the next envelope in sequence.
    ///
    /// # Returns
    /// * `Ok(seq_no)` of the envelope that was pushed
    /// * `Err(envelope)` if the buffer is full; resend it with
    ///   [`send_envelope`](Self::send_envelope) to keep its sequence number
    pub fn send<P: Into<Vec<u8>>>(&mut self, payload: P) -> Result<u64, Envelope> {
        let envelope = Envelope::new(
            self.next_seq,
            self.clock.now_ns(),
            self.schema_ver,
            self.source_id,
            payload.into(),
        )
        .sealed();
        self.send_envelope(envelope)
    }

    /// Push an already sealed envelope.
    ///
    /// On success the counter moves past `seq_no`, so later [`send`](Self::send)
    /// calls keep numbering strictly increasing.
    pub fn send_envelope(&mut self, envelope: Envelope) -> Result<u64, Envelope> {
        let seq_no = envelope.seq_no;
        match self.inner.push(envelope) {
            Ok(()) => {
                self.next_seq = self.next_seq.max(seq_no.saturating_add(1));
                tracing::trace!(seq_no, source_id = self.source_id, "envelope pushed");
                Ok(seq_no)
            }
            Err(envelope) => {
                tracing::trace!(seq_no, source_id = self.source_id, "transport full");
                Err(envelope)
            }
        }
    }

    /// Sequence number the next [`send`](Self::send) will use.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Returns the source ID stamped on every envelope
    pub fn source_id(&self) -> u32 {
        self.source_id
    }

    pub fn schema_ver(&self) -> u32 {
        self.schema_ver
    }

    /// Returns the raw producer handle
    pub fn raw(&self) -> &Producer<Envelope> {
        &self.inner
    }
}
