use std::fmt;
use crate::Sched::LaneScheduler;
use crate::SPSC::Buffer::RingBuffer;
use crate::SPSC::{EnvelopeConsumer, EnvelopeProducer};
use crate::Core::clock::Clock;

/// Debug function for RingBuffer
///
/// Shows capacity and a snapshot of the fill level without touching any
/// slot contents, so `T` need not be `Debug`.
pub fn debug_ring_buffer<T>(buffer: &RingBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingBuffer")
        .field("capacity", &buffer.capacity())
        .field("len", &buffer.len())
        .finish_non_exhaustive()
}

/// Debug function for EnvelopeProducer
pub fn debug_envelope_producer<C: Clock>(producer: &EnvelopeProducer<C>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EnvelopeProducer")
        .field("source_id", &producer.source_id())
        .field("schema_ver", &producer.schema_ver())
        .field("next_seq", &producer.next_seq())
        .field("buffer", producer.raw().buffer())
        .finish()
}

/// Debug function for EnvelopeConsumer
pub fn debug_envelope_consumer(consumer: &EnvelopeConsumer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EnvelopeConsumer")
        .field("stats", &consumer.stats())
        .field("buffer", consumer.raw().buffer())
        .finish()
}

/// Debug function for LaneScheduler
///
/// Shows the number of pending jobs and the earliest deadline per lane.
/// Each lane is locked briefly in turn, so the result is not an atomic
/// snapshot across lanes.
pub fn debug_lane_scheduler(scheduler: &LaneScheduler, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lanes: Vec<(usize, Option<u64>)> = (0..scheduler.lane_count())
        .map(|lane| (scheduler.lane_len(lane), scheduler.peek_deadline(lane)))
        .collect();
    f.debug_struct("LaneScheduler")
        .field("lanes", &lanes)
        .finish()
}
