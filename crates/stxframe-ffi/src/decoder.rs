use stxframe::FrameDecoder;

use crate::error::{self, FfiError};
use crate::types::{CallbackSink, DecoderHandle, StxDecoderHandle, StxPacketFn, StxResult};

fn with_decoder_mut<T>(
    handle: StxDecoderHandle,
    on_error: T,
    f: impl FnOnce(&mut DecoderHandle) -> T,
) -> T {
    if handle.is_null() {
        let _ = error::set_invalid_argument(FfiError::Null("decoder handle"));
        return on_error;
    }

    let decoder_handle = {
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { &mut *(handle as *mut DecoderHandle) }
    };

    f(decoder_handle)
}

/// Convert a byte pointer + length into a slice.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
unsafe fn bytes_arg<'a>(data: *const u8, len: usize, name: &'static str) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        let _ = error::set_invalid_argument(FfiError::NullWithLength(name));
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Create a decoder that reports its payload to `callback` with `ctx`.
///
/// Returns null if `callback` is null.
///
/// # Safety
/// `ctx` is passed back to `callback` untouched and must remain valid until
/// `stx_decoder_destroy` returns.
#[no_mangle]
pub unsafe extern "C" fn stx_decoder_create(
    callback: StxPacketFn,
    ctx: *mut std::ffi::c_void,
) -> StxDecoderHandle {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        error::clear_error_state();

        let Some(callback) = callback else {
            let _ = error::set_invalid_argument(FfiError::Null("callback"));
            return std::ptr::null_mut();
        };

        let handle = DecoderHandle {
            decoder: FrameDecoder::new(CallbackSink { callback, ctx }),
        };
        Box::into_raw(Box::new(handle)) as StxDecoderHandle
    })
}

/// Feed raw encoded bytes to a decoder.
///
/// Faults are not reported here; query them with `stx_decoder_check`.
///
/// # Safety
/// `decoder` must be a handle returned by `stx_decoder_create`. If `len > 0`, `data` must be
/// non-null and readable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn stx_decoder_write_bytes(
    decoder: StxDecoderHandle,
    len: usize,
    data: *const u8,
) -> StxResult {
    crate::ffi_boundary(StxResult::Internal, || {
        error::clear_error_state();

        let bytes = {
            // SAFETY: We validate pointer/length pairing in helper.
            match unsafe { bytes_arg(data, len, "data") } {
                Some(v) => v,
                None => return StxResult::InvalidArgument,
            }
        };

        with_decoder_mut(decoder, StxResult::InvalidArgument, |handle| {
            handle.decoder.feed(bytes);
            StxResult::Ok
        })
    })
}

/// Report whether the decoder has faulted.
///
/// Returns `STX_OK` for a healthy decoder, or the fault code with the last error set to its
/// description.
///
/// # Safety
/// `decoder` must be a handle returned by `stx_decoder_create`.
#[no_mangle]
pub unsafe extern "C" fn stx_decoder_check(decoder: StxDecoderHandle) -> StxResult {
    crate::ffi_boundary(StxResult::Internal, || {
        error::clear_error_state();

        with_decoder_mut(
            decoder,
            StxResult::InvalidArgument,
            |handle| match handle.decoder.fault() {
                Some(fault) => error::map_fault(&fault),
                None => StxResult::Ok,
            },
        )
    })
}

/// True if a payload is ready for delivery. False for a null handle.
///
/// # Safety
/// `decoder` must be null or a handle returned by `stx_decoder_create`.
#[no_mangle]
pub unsafe extern "C" fn stx_decoder_is_complete(decoder: StxDecoderHandle) -> bool {
    crate::ffi_boundary(false, || {
        with_decoder_mut(decoder, false, |handle| handle.decoder.is_complete())
    })
}

/// True if the decoder has faulted. False for a null handle.
///
/// # Safety
/// `decoder` must be null or a handle returned by `stx_decoder_create`.
#[no_mangle]
pub unsafe extern "C" fn stx_decoder_is_invalid(decoder: StxDecoderHandle) -> bool {
    crate::ffi_boundary(false, || {
        with_decoder_mut(decoder, false, |handle| handle.decoder.is_invalid())
    })
}

/// Deliver the payload, if complete, to the callback and free the decoder.
///
/// # Safety
/// `decoder` must be null or a handle returned by `stx_decoder_create` that has not been
/// destroyed. The handle is invalid once this returns.
#[no_mangle]
pub unsafe extern "C" fn stx_decoder_destroy(decoder: StxDecoderHandle) {
    crate::ffi_boundary((), || {
        if decoder.is_null() {
            return;
        }

        let handle = {
            // SAFETY: Caller guarantees this handle was allocated by stx_decoder_create.
            unsafe { Box::from_raw(decoder as *mut DecoderHandle) }
        };
        handle.decoder.finish();
    });
}
