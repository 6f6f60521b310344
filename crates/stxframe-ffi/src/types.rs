use std::ffi::c_void;

use stxframe::{FrameDecoder, PacketSink};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StxResult {
    Ok = 0,
    InvalidArgument = 1,
    Overflow = 2,
    MalformedEscape = 3,
    Internal = 99,
}

#[allow(dead_code)]
pub const STX_OK: StxResult = StxResult::Ok;
#[allow(dead_code)]
pub const STX_ERR_INVALID_ARGUMENT: StxResult = StxResult::InvalidArgument;
#[allow(dead_code)]
pub const STX_ERR_OVERFLOW: StxResult = StxResult::Overflow;
#[allow(dead_code)]
pub const STX_ERR_MALFORMED_ESCAPE: StxResult = StxResult::MalformedEscape;
#[allow(dead_code)]
pub const STX_ERR_INTERNAL: StxResult = StxResult::Internal;

#[allow(dead_code)]
pub const STX_MAX_PAYLOAD: usize = stxframe::DEFAULT_CAPACITY;

/// Packet callback: `(ctx, data_length, data)`.
pub type StxPacketFn = Option<unsafe extern "C" fn(ctx: *mut c_void, len: usize, data: *const u8)>;

pub type StxDecoderHandle = *mut c_void;

/// Forwards the decoded payload to a C callback along with the caller's context pointer.
pub(crate) struct CallbackSink {
    pub(crate) callback: unsafe extern "C" fn(*mut c_void, usize, *const u8),
    pub(crate) ctx: *mut c_void,
}

impl PacketSink for CallbackSink {
    fn deliver(&mut self, payload: &[u8]) {
        // SAFETY: The callback and context were supplied together by the caller at
        // creation, and `payload` stays valid for the duration of the call.
        unsafe { (self.callback)(self.ctx, payload.len(), payload.as_ptr()) }
    }
}

pub(crate) struct DecoderHandle {
    pub(crate) decoder: FrameDecoder<CallbackSink>,
}
