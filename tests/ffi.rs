use pb_agentcore::ffi::*;
use std::ptr;

#[test]
fn clock_and_checksum() {
    let a = pb_mono_now_ns();
    let b = pb_mono_now_ns();
    assert!(b >= a);

    let data = b"123456789";
    let mut crc = 0u32;
    assert_eq!(pb_crc32c(data.as_ptr(), data.len(), &mut crc), PB_SUCCESS);
    assert_eq!(crc, 0xE306_9283);
    assert_eq!(pb_crc32c(ptr::null(), 0, &mut crc), PB_SUCCESS);
    assert_eq!(crc, 0);
}

#[test]
fn checksum_rejects_null_data_with_length() {
    let mut crc = 0xDEAD_BEEFu32;
    assert_eq!(pb_crc32c(ptr::null(), 16, &mut crc), PB_ERROR_NULL_POINTER);
    assert_eq!(crc, 0xDEAD_BEEF);

    let data = b"123456789";
    assert_eq!(
        pb_crc32c(data.as_ptr(), data.len(), ptr::null_mut()),
        PB_ERROR_NULL_POINTER
    );
}

#[test]
fn varint_encode_decode() {
    let mut buf = [0u8; 10];
    let mut len = buf.len();
    assert_eq!(pb_varint_encode(300, buf.as_mut_ptr(), &mut len), PB_SUCCESS);
    assert_eq!(len, 2);
    assert_eq!(&buf[..2], &[0xAC, 0x02]);

    let mut value = 0u64;
    let mut used = 0usize;
    assert_eq!(pb_varint_decode(buf.as_ptr(), len, &mut value, &mut used), PB_SUCCESS);
    assert_eq!((value, used), (300, 2));

    // too-small buffer reports the size needed
    let mut small = [0u8; 1];
    let mut small_len = small.len();
    assert_eq!(
        pb_varint_encode(u64::MAX, small.as_mut_ptr(), &mut small_len),
        PB_ERROR_BUFFER_TOO_SMALL
    );
    assert_eq!(small_len, 10);

    let mut max = [0u8; 10];
    let mut max_len = max.len();
    assert_eq!(pb_varint_encode(u64::MAX, max.as_mut_ptr(), &mut max_len), PB_SUCCESS);
    assert_eq!(max_len, 10);
    assert_eq!(&max[..9], &[0xFF; 9]);
    assert_eq!(max[9], 0x01);

    let truncated = [0x80u8, 0x80];
    assert_eq!(
        pb_varint_decode(truncated.as_ptr(), truncated.len(), &mut value, &mut used),
        PB_ERROR_TRUNCATED
    );
    assert_eq!(used, 2);

    let overflow = [0xFFu8; 11];
    assert_eq!(
        pb_varint_decode(overflow.as_ptr(), overflow.len(), &mut value, &mut used),
        PB_ERROR_OVERFLOW
    );
    assert_eq!(
        pb_varint_decode(ptr::null(), 0, ptr::null_mut(), &mut used),
        PB_ERROR_NULL_POINTER
    );
}

#[test]
fn scheduler_handle_lifecycle() {
    assert!(pb_scheduler_new(0).is_null());

    let handle = pb_scheduler_new(3);
    assert!(!handle.is_null());

    assert_eq!(pb_scheduler_schedule(handle, 1, 300, 3), PB_SUCCESS);
    assert_eq!(pb_scheduler_schedule(handle, 1, 100, 1), PB_SUCCESS);
    assert_eq!(pb_scheduler_schedule(handle, 3, 100, 9), PB_ERROR_INVALID_LANE);

    let mut job = PbJob::default();
    assert_eq!(pb_scheduler_poll_ready(handle, 0, &mut job), PB_ERROR_EMPTY);
    assert_eq!(pb_scheduler_poll_ready(handle, 5, &mut job), PB_ERROR_INVALID_LANE);
    assert_eq!(pb_scheduler_poll_ready(handle, 1, &mut job), PB_SUCCESS);
    assert_eq!((job.lane, job.deadline_ns, job.id), (1, 100, 1));
    assert_eq!(pb_scheduler_poll_ready(handle, 1, &mut job), PB_SUCCESS);
    assert_eq!(job.id, 3);
    assert_eq!(pb_scheduler_poll_ready(handle, 1, &mut job), PB_ERROR_EMPTY);

    assert_eq!(pb_scheduler_schedule(ptr::null(), 0, 0, 0), PB_ERROR_NULL_POINTER);
    pb_scheduler_free(handle);
    pb_scheduler_free(ptr::null_mut());
}
