use pb_agentcore::SPSC::Buffer::RingBuffer;
use pb_agentcore::{ChannelBuilder, ConfigError, Job};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn simple_push_pop() {
    let (tx, rx) = RingBuffer::new(16).unwrap().split();

    let payload = vec![1u8, 2, 3, 4];

    // Push
    assert!(tx.push(payload.clone()).is_ok());

    // Pop
    let result = rx.pop();
    assert_eq!(result, Some(payload));
    assert_eq!(rx.pop(), None);
}

#[test]
fn full_buffer_keeps_one_slot_free() {
    for capacity in [2usize, 3, 4, 7, 16, 100] {
        let (tx, rx) = RingBuffer::new(capacity).unwrap().split();

        // Fill buffer
        for i in 0..capacity - 1 {
            assert!(tx.push(i).is_ok(), "push {i} into cap {capacity}");
        }
        assert!(tx.buffer().is_full());
        assert_eq!(tx.buffer().len(), capacity - 1);

        // Next push should fail and hand the value back
        assert_eq!(tx.push(999), Err(999));
        assert_eq!(tx.buffer().len(), capacity - 1);

        // Pop one
        assert_eq!(rx.pop(), Some(0));

        // Push should succeed now
        assert!(tx.push(999).is_ok());
        assert_eq!(tx.push(1000), Err(1000));
    }
}

#[test]
fn capacity_below_two_is_rejected() {
    assert_eq!(RingBuffer::<u8>::new(0).err(), Some(ConfigError::InvalidCapacity(0)));
    assert_eq!(RingBuffer::<u8>::new(1).err(), Some(ConfigError::InvalidCapacity(1)));
    assert!(ChannelBuilder::new().with_capacity(1).build::<u8>().is_err());
}

#[test]
fn fifo_across_wraparound() {
    let (tx, rx) = ChannelBuilder::new().with_capacity(4).build::<u64>().unwrap();

    let mut expected = 0u64;
    let mut next = 0u64;
    // Interleave pushes and pops so the cursors wrap many times
    for round in 0..50 {
        let burst = round % 3 + 1;
        for _ in 0..burst {
            if tx.push(next).is_ok() {
                next += 1;
            }
        }
        while let Some(v) = rx.pop() {
            assert_eq!(v, expected);
            expected += 1;
        }
    }
    assert_eq!(expected, next);
    assert!(rx.buffer().is_empty());
}

#[test]
fn pushed_batch_pops_in_order() {
    let (tx, rx) = RingBuffer::new(64).unwrap().split();
    let values: Vec<u32> = (0..63).map(|_| fastrand::u32(..)).collect();
    for &v in &values {
        tx.push(v).unwrap();
    }
    let popped: Vec<u32> = std::iter::from_fn(|| rx.pop()).collect();
    assert_eq!(popped, values);
}

#[test]
fn jobs_move_through_the_ring() {
    let (tx, rx) = RingBuffer::new(8).unwrap().split();
    tx.push(Job::new(2, 50, 1)).unwrap();
    tx.push(Job::new(0, 10, 2)).unwrap();
    assert_eq!(rx.pop(), Some(Job::new(2, 50, 1)));
    assert_eq!(rx.pop(), Some(Job::new(0, 10, 2)));
}

#[test]
fn spsc_threads_preserve_order() {
    let capacity = 8;
    let total = 100_000u64;

    let (tx, rx) = ChannelBuilder::new().with_capacity(capacity).build::<u64>().unwrap();

    let p = thread::spawn(move || {
        for i in 0..total {
            let mut value = i;
            loop {
                match tx.push(value) {
                    Ok(()) => break,
                    Err(v) => {
                        value = v;
                        std::hint::spin_loop();
                    }
                }
            }
        }
    });

    let c = thread::spawn(move || {
        let mut count = 0;
        while count < total {
            if let Some(v) = rx.pop() {
                assert_eq!(v, count);
                count += 1;
            } else {
                std::hint::spin_loop();
            }
        }
        assert!(rx.pop().is_none());
    });

    p.join().unwrap();
    c.join().unwrap();
}

#[test]
fn heap_values_cross_threads_intact() {
    let (tx, rx) = RingBuffer::new(4).unwrap().split();

    let p = thread::spawn(move || {
        for i in 0..2_000u32 {
            let mut msg = vec![i as u8; (i % 64) as usize + 1];
            while let Err(back) = tx.push(msg) {
                msg = back;
                thread::yield_now();
            }
        }
    });

    let mut received = 0u32;
    while received < 2_000 {
        match rx.pop() {
            Some(msg) => {
                assert_eq!(msg.len(), (received % 64) as usize + 1);
                assert!(msg.iter().all(|&b| b == received as u8));
                received += 1;
            }
            None => thread::yield_now(),
        }
    }
    p.join().unwrap();
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn unread_values_are_dropped_with_the_ring() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let (tx, rx) = RingBuffer::new(8).unwrap().split();
        for _ in 0..5 {
            assert!(tx.push(DropCounter(drops.clone())).is_ok());
        }
        drop(rx.pop());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(!tx.is_consumer_gone());
        drop(rx);
        assert!(tx.is_consumer_gone());
    }
    assert_eq!(drops.load(Ordering::SeqCst), 5);
}

#[test]
fn raw_ring_push_pop() {
    let ring = RingBuffer::new(3).unwrap();
    assert_eq!(ring.capacity(), 3);
    assert_eq!(ring.usable_capacity(), 2);
    // Single thread plays both roles
    unsafe {
        assert!(ring.push('a').is_ok());
        assert!(ring.push('b').is_ok());
        assert_eq!(ring.push('c'), Err('c'));
        assert_eq!(ring.pop(), Some('a'));
        assert_eq!(ring.pop(), Some('b'));
        assert_eq!(ring.pop(), None);
    }
    println!("{:?}", ring);
}
