// Module naming follows project convention (SPSC = Single-Producer Single-Consumer)
#![allow(non_snake_case)]

pub mod Core;
pub mod Debug;
pub mod SPSC;
pub mod Sched;
pub mod Structs;
pub mod ffi;

pub use Core::clock::{mono_now_ns, Clock, ManualClock, MonotonicClock};
pub use Core::error::{CodecError, ConfigError, EnvelopeError, SchedError};
pub use Sched::{LaneScheduler, SchedulerConfig};
pub use Structs::{Envelope, Job};
pub use SPSC::Buffer::RingBuffer;
pub use SPSC::{ChannelBuilder, Consumer, EnvelopeConsumer, EnvelopeProducer, Producer, ReceiveStats};
