pub mod Envelope_Structs;
pub mod Job_Structs;

pub use Envelope_Structs::{Envelope, CHECKSUM_SIZE, FIXED_HEADER_SIZE, MAX_PAYLOAD_SIZE}; // re-export for stable path
pub use Job_Structs::Job;
