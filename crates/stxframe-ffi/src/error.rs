use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use stxframe::FrameFault;

use crate::types::StxResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

/// Argument validation failures at the C boundary.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FfiError {
    #[error("{0} cannot be null")]
    Null(&'static str),

    #[error("{0} cannot be null when len > 0")]
    NullWithLength(&'static str),
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let message = message.into();
    let sanitized = message.replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_invalid_argument(err: FfiError) -> StxResult {
    set_error_message(err.to_string());
    StxResult::InvalidArgument
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_fault(fault: &FrameFault) -> StxResult {
    set_error_message(fault.to_string());
    match fault {
        FrameFault::Overflow { .. } => StxResult::Overflow,
        FrameFault::MalformedEscape { .. } => StxResult::MalformedEscape,
    }
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
