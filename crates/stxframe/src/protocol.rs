//! Wire-level byte values.
//!
//! A frame is opened by [`STX`] and closed by [`ETX`]. Any marker that occurs
//! inside the payload is sent as [`DLE`] followed by its escaped form.

/// Start of frame.
pub const STX: u8 = 0x02;

/// End of frame.
pub const ETX: u8 = 0x03;

/// Data link escape. The following byte is an escaped marker.
pub const DLE: u8 = 0x10;

/// Escaped form of [`STX`].
pub const STX_ESCAPED: u8 = 0x22;

/// Escaped form of [`ETX`].
pub const ETX_ESCAPED: u8 = 0x23;

/// Escaped form of [`DLE`].
pub const DLE_ESCAPED: u8 = 0x30;

/// Maps the byte following a [`DLE`] to the literal payload byte it stands for.
///
/// Returns `None` for anything other than the three escaped forms.
pub fn unescape(byte: u8) -> Option<u8> {
    match byte {
        STX_ESCAPED => Some(STX),
        ETX_ESCAPED => Some(ETX),
        DLE_ESCAPED => Some(DLE),
        _ => None,
    }
}

/// Returns true if the byte has framing meaning and cannot appear literally in a payload.
pub fn is_marker(byte: u8) -> bool {
    matches!(byte, STX | ETX | DLE)
}

/// Returns a human-readable name for a byte value.
pub fn marker_name(byte: u8) -> &'static str {
    match byte {
        STX => "STX",
        ETX => "ETX",
        DLE => "DLE",
        _ => "DATA",
    }
}
