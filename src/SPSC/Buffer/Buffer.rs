// This is the fixed-capacity ring shared by exactly one producer and one consumer

use super::layout::Cursors;

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

/// Default number of slots when none is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A single slot in the ring buffer.
///
/// A slot holds an initialized value exactly when its index lies in
/// `tail..head` (modulo capacity).
pub struct Slot<T> {
    pub(crate) value: UnsafeCell<MaybeUninit<T>>,
}

/// A lock-free, single-producer, single-consumer (SPSC) ring buffer.
///
/// ### Concurrency Design:
/// - **Producer (push)**: reads its own `head` relaxed, checks `tail` with
///   Acquire to see whether `head + 1` would collide, writes the slot, then
///   publishes with a Release store of `head`.
/// - **Consumer (pop)**: reads its own `tail` relaxed, loads `head` with
///   Acquire, moves the value out, then frees the slot with a Release store
///   of `tail`.
///
/// One slot is always left empty so that `head == tail` means empty and
/// `head + 1 == tail` means full; the usable capacity is `capacity - 1`.
///
/// Nothing here stops two threads from pushing at once, which is why
/// [`push`](RingBuffer::push) and [`pop`](RingBuffer::pop) are `unsafe`.
/// Use [`split`](RingBuffer::split) for handles that enforce the roles.
pub struct RingBuffer<T> {
    /// Producer/consumer cursors.
    pub(crate) cursors: Cursors,

    /// Backing storage, `capacity` slots long.
    pub(crate) slots: Box<[Slot<T>]>,

    /// The capacity of the buffer (number of slots).
    pub(crate) capacity: usize,
}

// Values cross from the producer thread to the consumer thread, so `T: Send`
// is all that is required; slot access is serialized by the cursor protocol.
unsafe impl<T: Send> Send for RingBuffer<T> {}
unsafe impl<T: Send> Sync for RingBuffer<T> {}
