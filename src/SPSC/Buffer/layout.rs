use crossbeam_utils::CachePadded;
use std::sync::atomic::AtomicUsize;

/// The pair of cursors that drive one ring buffer.
///
/// Each cursor has exactly one writer: the producer owns `head`, the consumer
/// owns `tail`. Both are kept in `0..capacity`. Padding keeps them on
/// separate cache lines so the two sides do not false-share.
#[repr(C)]
pub struct Cursors {
    /// Next slot the producer writes. Stored with Release after the slot
    /// has been written; the consumer loads it with Acquire.
    pub head: CachePadded<AtomicUsize>,

    /// Next slot the consumer reads. Stored with Release after the value has
    /// been moved out; the producer loads it with Acquire.
    pub tail: CachePadded<AtomicUsize>,
}

impl Cursors {
    pub fn new() -> Self {
        Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
        }
    }
}

impl Default for Cursors {
    fn default() -> Self {
        Self::new()
    }
}
