use super::Buffer::RingBuffer;
use super::{EnvelopeConsumer, EnvelopeProducer};
use crate::Core::clock::Clock;
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_ring_buffer(self, f)
    }
}

impl<C: Clock> fmt::Debug for EnvelopeProducer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_envelope_producer(self, f)
    }
}

impl fmt::Debug for EnvelopeConsumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_envelope_consumer(self, f)
    }
}
