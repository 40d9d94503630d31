// C ABI for native agents: clock, checksum, varint codec and the lane scheduler.

use crate::Core::checksum::checksum;
use crate::Core::clock::mono_now_ns;
use crate::Core::error::CodecError;
use crate::Core::varint::{decode_varint, encode_varint_array, varint_len};
use crate::Sched::LaneScheduler;
use crate::Structs::Job;
use std::ptr;

// Error codes
pub const PB_SUCCESS: i32 = 0;
pub const PB_ERROR_NULL_POINTER: i32 = -1;
pub const PB_ERROR_BUFFER_TOO_SMALL: i32 = -2;
pub const PB_ERROR_EMPTY: i32 = -3;
pub const PB_ERROR_TRUNCATED: i32 = -4;
pub const PB_ERROR_OVERFLOW: i32 = -5;
pub const PB_ERROR_INVALID_LANE: i32 = -6;

/// Job as seen from C.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PbJob {
    pub deadline_ns: u64,
    pub id: u64,
    pub lane: u32,
    pub _reserved: u32,
}

impl From<Job> for PbJob {
    fn from(job: Job) -> Self {
        Self {
            deadline_ns: job.deadline_ns,
            id: job.id,
            lane: job.lane as u32,
            _reserved: 0,
        }
    }
}

/// Handle to a scheduler instance (opaque pointer)
pub struct SchedulerHandle {
    inner: LaneScheduler,
}

// -----------------------------------------------------------------------------
// Utilities
// -----------------------------------------------------------------------------

/// Monotonic clock in nanoseconds.
#[no_mangle]
pub extern "C" fn pb_mono_now_ns() -> u64 {
    mono_now_ns()
}

/// CRC-32C of `len` bytes at `data`, written to `*out_crc`.
///
/// A NULL `data` is accepted only with `len == 0` (the empty span).
///
/// # Returns
/// * 0 on success, PB_ERROR_NULL_POINTER on a NULL `out_crc` or NULL `data` with `len > 0`.
#[no_mangle]
pub extern "C" fn pb_crc32c(data: *const u8, len: usize, out_crc: *mut u32) -> i32 {
    if out_crc.is_null() || (data.is_null() && len > 0) {
        return PB_ERROR_NULL_POINTER;
    }
    let slice: &[u8] = if len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(data, len) }
    };
    unsafe { *out_crc = checksum(slice) };
    PB_SUCCESS
}

/// Encode `value` as a varint.
///
/// # Arguments
/// * `out_buf` - Destination buffer; 10 bytes always suffice.
/// * `out_len` - Input: size of buf, Output: bytes written (or needed).
///
/// # Returns
/// * 0 on success, PB_ERROR_BUFFER_TOO_SMALL if `*out_len` is too small.
#[no_mangle]
pub extern "C" fn pb_varint_encode(value: u64, out_buf: *mut u8, out_len: *mut usize) -> i32 {
    if out_buf.is_null() || out_len.is_null() {
        return PB_ERROR_NULL_POINTER;
    }

    let needed = varint_len(value);
    let max_len = unsafe { *out_len };
    unsafe { *out_len = needed };
    if needed > max_len {
        return PB_ERROR_BUFFER_TOO_SMALL;
    }

    let (encoded, _) = encode_varint_array(value);
    unsafe {
        ptr::copy_nonoverlapping(encoded.as_ptr(), out_buf, needed);
    }
    PB_SUCCESS
}

/// Decode a varint from `len` bytes at `data`.
///
/// # Returns
/// * 0 on success with `*out_value` and `*out_used` set.
/// * PB_ERROR_TRUNCATED if the input ends mid-varint.
/// * PB_ERROR_OVERFLOW if the value does not fit in 64 bits.
#[no_mangle]
pub extern "C" fn pb_varint_decode(
    data: *const u8,
    len: usize,
    out_value: *mut u64,
    out_used: *mut usize,
) -> i32 {
    if out_value.is_null() || out_used.is_null() || (data.is_null() && len > 0) {
        return PB_ERROR_NULL_POINTER;
    }

    let slice: &[u8] = if data.is_null() {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(data, len) }
    };

    match decode_varint(slice) {
        Ok((value, used)) => {
            unsafe {
                *out_value = value;
                *out_used = used;
            }
            PB_SUCCESS
        }
        Err(CodecError::Truncated { consumed }) => {
            unsafe { *out_used = consumed };
            PB_ERROR_TRUNCATED
        }
        Err(CodecError::Overflow) => PB_ERROR_OVERFLOW,
    }
}

// -----------------------------------------------------------------------------
// Scheduler API
// -----------------------------------------------------------------------------

/// Create a new scheduler with `lanes` lanes.
///
/// # Returns
/// * Pointer to `SchedulerHandle`, or NULL if `lanes` is 0.
#[no_mangle]
pub extern "C" fn pb_scheduler_new(lanes: u32) -> *mut SchedulerHandle {
    match LaneScheduler::new(lanes as usize) {
        Ok(scheduler) => Box::into_raw(Box::new(SchedulerHandle { inner: scheduler })),
        Err(e) => {
            tracing::error!(error = %e, "pb_scheduler_new failed");
            ptr::null_mut()
        }
    }
}

/// Schedule a job.
///
/// # Returns
/// * 0 on success, PB_ERROR_INVALID_LANE if `lane` is out of range.
#[no_mangle]
pub extern "C" fn pb_scheduler_schedule(
    handle: *const SchedulerHandle,
    lane: u32,
    deadline_ns: u64,
    id: u64,
) -> i32 {
    if handle.is_null() {
        return PB_ERROR_NULL_POINTER;
    }

    let scheduler = unsafe { &(*handle).inner };
    match scheduler.try_schedule(Job::new(lane as usize, deadline_ns, id)) {
        Ok(()) => PB_SUCCESS,
        Err(_) => PB_ERROR_INVALID_LANE,
    }
}

/// Poll the earliest-deadline job from `lane`.
///
/// # Returns
/// * 0 on success with `*out_job` filled.
/// * PB_ERROR_EMPTY if the lane has no jobs.
/// * PB_ERROR_INVALID_LANE if `lane` is out of range.
#[no_mangle]
pub extern "C" fn pb_scheduler_poll_ready(
    handle: *const SchedulerHandle,
    lane: u32,
    out_job: *mut PbJob,
) -> i32 {
    if handle.is_null() || out_job.is_null() {
        return PB_ERROR_NULL_POINTER;
    }

    let scheduler = unsafe { &(*handle).inner };
    if lane as usize >= scheduler.lane_count() {
        return PB_ERROR_INVALID_LANE;
    }

    match scheduler.poll_ready(lane as usize) {
        Some(job) => {
            unsafe { *out_job = PbJob::from(job) };
            PB_SUCCESS
        }
        None => PB_ERROR_EMPTY,
    }
}

/// Free a scheduler handle.
#[no_mangle]
pub extern "C" fn pb_scheduler_free(handle: *mut SchedulerHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle); // Dropped automatically
        }
    }
}
