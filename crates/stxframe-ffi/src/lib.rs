//! stxframe-ffi: C-ABI exports for the stxframe decoder.

mod decoder;
mod error;
mod types;

use std::panic::AssertUnwindSafe;

pub use decoder::{
    stx_decoder_check, stx_decoder_create, stx_decoder_destroy, stx_decoder_is_complete,
    stx_decoder_is_invalid, stx_decoder_write_bytes,
};
pub use types::{
    StxDecoderHandle, StxPacketFn, StxResult, STX_ERR_INTERNAL, STX_ERR_INVALID_ARGUMENT,
    STX_ERR_MALFORMED_ESCAPE, STX_ERR_OVERFLOW, STX_MAX_PAYLOAD, STX_OK,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn stx_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}
