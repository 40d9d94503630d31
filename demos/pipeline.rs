// In demos/pipeline.rs
//
// Producer -> ring buffer -> verifying consumer -> lane scheduler -> drainer.
//
//   cargo run --example pipeline -- <num_jobs> [--auto-exit]
use pb_agentcore::Sched::{LANE_BACKGROUND, LANE_INTERACTIVE, LANE_NORMAL};
use pb_agentcore::{mono_now_ns, ChannelBuilder, Job, LaneScheduler};
use std::env;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <num_jobs> [--auto-exit]", args[0]);
        std::process::exit(1);
    }

    let num_jobs: u64 = args[1].parse()?;
    let auto_exit = args.get(2).map(|s| s == "--auto-exit").unwrap_or(false);

    let keep_alive = Arc::new(AtomicBool::new(true));
    let keep_alive_for_handler = Arc::clone(&keep_alive);

    // Handle Ctrl+C to stop all stages
    ctrlc::set_handler(move || {
        keep_alive_for_handler.store(false, Ordering::SeqCst);
    })?;

    let (mut producer, mut consumer) = ChannelBuilder::new()
        .with_capacity(256)
        .with_source_id(7)
        .with_schema_ver(1)
        .build_envelope_channel()?;
    let scheduler = Arc::new(LaneScheduler::default());
    let drained = Arc::new(AtomicU64::new(0));

    let start = Instant::now();

    // Producer: one envelope per job, deadlines spread over the next 50ms
    let alive = Arc::clone(&keep_alive);
    let producer_thread = thread::spawn(move || {
        let lanes = [LANE_INTERACTIVE, LANE_NORMAL, LANE_BACKGROUND];
        let mut sent = 0u64;
        while sent < num_jobs && alive.load(Ordering::Relaxed) {
            let job = Job::new(
                lanes[(sent % 3) as usize],
                mono_now_ns() + spread_ns(sent),
                sent,
            );
            let mut pending = producer.send(job.encode());
            while let Err(envelope) = pending {
                if !alive.load(Ordering::Relaxed) {
                    return sent;
                }
                // Buffer full, retry
                thread::sleep(Duration::from_micros(10));
                pending = producer.send_envelope(envelope);
            }
            sent += 1;
        }
        sent
    });

    // Consumer: verify, decode, schedule
    let alive = Arc::clone(&keep_alive);
    let sched = Arc::clone(&scheduler);
    let consumer_thread = thread::spawn(move || {
        let mut scheduled = 0u64;
        while scheduled < num_jobs && alive.load(Ordering::Relaxed) {
            match consumer.receive() {
                Ok(Some(envelope)) => match Job::decode(&envelope.payload) {
                    Ok((job, _)) => {
                        if let Err(e) = sched.try_schedule(job) {
                            tracing::warn!(seq_no = envelope.seq_no, error = %e, "rejected job");
                        }
                        scheduled += 1;
                    }
                    Err(e) => tracing::warn!(seq_no = envelope.seq_no, error = %e, "bad job payload"),
                },
                Ok(None) => thread::sleep(Duration::from_micros(50)),
                // already logged and dropped by the consumer
                Err(_) => {}
            }
        }
        consumer.stats()
    });

    // Drainer: serve due jobs, interactive lane first
    let alive = Arc::clone(&keep_alive);
    let sched = Arc::clone(&scheduler);
    let count = Arc::clone(&drained);
    let drainer_thread = thread::spawn(move || {
        let mut late = 0u64;
        while count.load(Ordering::Relaxed) < num_jobs && alive.load(Ordering::Relaxed) {
            let now = mono_now_ns();
            let mut served = 0;
            for lane in 0..sched.lane_count() {
                for job in sched.drain_due(lane, now, 64) {
                    if now.saturating_sub(job.deadline_ns) > 5_000_000 {
                        late += 1;
                    }
                    served += 1;
                }
            }
            count.fetch_add(served, Ordering::Relaxed);
            if served == 0 {
                thread::sleep(Duration::from_micros(200));
            }
        }
        late
    });

    let sent = producer_thread.join().map_err(|_| "producer thread panicked")?;
    let stats = consumer_thread.join().map_err(|_| "consumer thread panicked")?;
    let late = drainer_thread.join().map_err(|_| "drainer thread panicked")?;

    let elapsed = start.elapsed();
    tracing::info!(
        sent,
        delivered = stats.delivered,
        corrupt = stats.corrupt,
        missing = stats.missing,
        drained = drained.load(Ordering::Relaxed),
        late,
        ?elapsed,
        "pipeline finished"
    );
    println!(
        "Throughput: {:.2} jobs/sec",
        sent as f64 / elapsed.as_secs_f64()
    );

    if !auto_exit {
        println!("Press Ctrl+C to exit...");
        while keep_alive.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(100));
        }
    }
    println!("Shutting down; {} jobs left in scheduler", scheduler.len());

    Ok(())
}

// Deterministic spread in 0..50ms
fn spread_ns(i: u64) -> u64 {
    (i.wrapping_mul(2_654_435_761) % 50) * 1_000_000
}
