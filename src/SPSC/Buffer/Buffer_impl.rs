use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};
use std::sync::Arc;

use super::layout::Cursors;
use super::Buffer::{RingBuffer, Slot};
use crate::Core::error::ConfigError;
use crate::SPSC::{Consumer, Producer};

impl<T> RingBuffer<T> {
    /// Allocate a ring with `capacity` slots (`capacity - 1` usable).
    ///
    /// # Errors
    /// `ConfigError::InvalidCapacity` if `capacity < 2`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 2 {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        let slots = (0..capacity)
            .map(|_| Slot {
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect();
        Ok(Self {
            cursors: Cursors::new(),
            slots,
            capacity,
        })
    }

    /// Number of slots, including the one kept free.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most values the ring can hold at once.
    #[inline]
    pub fn usable_capacity(&self) -> usize {
        self.capacity - 1
    }

    #[inline]
    fn next(&self, index: usize) -> usize {
        let n = index + 1;
        if n == self.capacity {
            0
        } else {
            n
        }
    }

    /// Values currently stored. Only a snapshot while the other side runs.
    pub fn len(&self) -> usize {
        let head = self.cursors.head.load(Acquire);
        let tail = self.cursors.tail.load(Acquire);
        (head + self.capacity - tail) % self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.head.load(Acquire) == self.cursors.tail.load(Acquire)
    }

    pub fn is_full(&self) -> bool {
        self.next(self.cursors.head.load(Acquire)) == self.cursors.tail.load(Acquire)
    }

    /// Enqueue `value`. Returns it back in `Err` when the ring is full.
    ///
    /// # Safety
    /// Only one thread may act as producer at any time: no two `push` calls
    /// on the same ring may run concurrently.
    pub unsafe fn push(&self, value: T) -> Result<(), T> {
        let head = self.cursors.head.load(Relaxed);
        let next = self.next(head);
        if next == self.cursors.tail.load(Acquire) {
            // full
            return Err(value);
        }

        // The consumer never touches `head` before it is published.
        (*self.slots[head].value.get()).write(value);

        // Publish
        self.cursors.head.store(next, Release);
        Ok(())
    }

    /// Dequeue the oldest value, or `None` if the ring is empty.
    ///
    /// # Safety
    /// Only one thread may act as consumer at any time: no two `pop` calls
    /// on the same ring may run concurrently.
    pub unsafe fn pop(&self) -> Option<T> {
        let tail = self.cursors.tail.load(Relaxed);
        if tail == self.cursors.head.load(Acquire) {
            // empty
            return None;
        }

        let value = (*self.slots[tail].value.get()).assume_init_read();

        // free slot for the producer
        self.cursors.tail.store(self.next(tail), Release);
        Some(value)
    }

    /// Split the ring into its producer and consumer handles.
    pub fn split(self) -> (Producer<T>, Consumer<T>) {
        let shared = Arc::new(self);
        (Producer::new(Arc::clone(&shared)), Consumer::new(shared))
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        let head = *self.cursors.head.get_mut();
        let mut tail = *self.cursors.tail.get_mut();
        while tail != head {
            unsafe {
                self.slots[tail].value.get_mut().assume_init_drop();
            }
            tail = self.next(tail);
        }
    }
}
