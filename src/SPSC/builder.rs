use super::{Consumer, EnvelopeConsumer, EnvelopeProducer, Producer};
use crate::Core::error::ConfigError;
use crate::SPSC::Buffer::{RingBuffer, DEFAULT_CAPACITY};

/// Configures and creates SPSC channels.
#[derive(Clone, Debug)]
pub struct ChannelBuilder {
    capacity: usize,
    source_id: u32,
    schema_ver: u32,
}

impl Default for ChannelBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY, // 1024 slots
            source_id: 0,
            schema_ver: 1,
        }
    }
}

impl ChannelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots; one stays free, so `capacity - 1` values fit.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Source ID stamped on every envelope (envelope channels only).
    pub fn with_source_id(mut self, source_id: u32) -> Self {
        self.source_id = source_id;
        self
    }

    /// Schema version stamped on every envelope (envelope channels only).
    pub fn with_schema_ver(mut self, schema_ver: u32) -> Self {
        self.schema_ver = schema_ver;
        self
    }

    /// Build a raw channel for any value type.
    pub fn build<T>(self) -> Result<(Producer<T>, Consumer<T>), ConfigError> {
        let ring = RingBuffer::new(self.capacity)?;
        tracing::debug!(capacity = self.capacity, "created spsc channel");
        Ok(ring.split())
    }

    /// Build an envelope channel whose producer stamps, sequences and seals
    /// every message and whose consumer verifies them.
    pub fn build_envelope_channel(self) -> Result<(EnvelopeProducer, EnvelopeConsumer), ConfigError> {
        let (source_id, schema_ver) = (self.source_id, self.schema_ver);
        let (producer, consumer) = self.build()?;
        Ok((
            EnvelopeProducer::new(producer, source_id, schema_ver),
            EnvelopeConsumer::new(consumer),
        ))
    }
}
