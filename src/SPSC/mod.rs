mod builder;
mod consumer;
mod debug;
mod producer;

pub use builder::ChannelBuilder;
pub use consumer::{Consumer, EnvelopeConsumer, ReceiveStats};
pub use producer::{EnvelopeProducer, Producer};

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod layout;
    pub use Buffer::{RingBuffer, Slot, DEFAULT_CAPACITY}; // re-export for stable path
}
