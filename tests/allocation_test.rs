// Allocation tracking test for the transport hot path
//
// Run dhat test:
//   cargo test --test allocation_test push_pop_jobs_allocates_nothing -- --nocapture

use pb_agentcore::{ChannelBuilder, Job};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[test]
#[serial_test::serial]
fn push_pop_jobs_allocates_nothing() {
    let _profiler = dhat::Profiler::new_heap();

    // Allocate after profiler starts - this should be tracked
    let capacity = 1024;
    let (tx, rx) = ChannelBuilder::new().with_capacity(capacity).build::<Job>().unwrap();

    let before = dhat::HeapStats::get();

    // Test push/pop operations
    for i in 0..10_000u64 {
        let job = Job::new((i % 3) as usize, i, i);
        while tx.push(job).is_err() {
            std::hint::spin_loop();
        }
        while rx.pop().is_none() {
            std::hint::spin_loop();
        }
    }

    let after = dhat::HeapStats::get();
    println!(
        "blocks before: {}, after: {}, bytes before: {}, after: {}",
        before.total_blocks, after.total_blocks, before.total_bytes, after.total_bytes
    );
    assert_eq!(after.total_blocks, before.total_blocks, "push/pop allocated on the heap");
}
