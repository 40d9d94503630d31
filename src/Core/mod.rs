pub mod checksum;
pub mod clock;
pub mod error;
pub mod varint;

pub use checksum::{checksum, checksum_append, verify};
pub use clock::{mono_now_ns, Clock, ManualClock, MonotonicClock};
pub use error::{CodecError, ConfigError, EnvelopeError, SchedError};
pub use varint::{decode_varint, encode_varint, encode_varint_into, varint_len, MAX_VARINT_LEN};
