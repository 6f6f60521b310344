/// Faults that leave a decoder permanently invalid until it is reset.
///
/// These are recorded as decoder state, never returned from `feed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameFault {
    /// A payload byte arrived while the buffer was already full.
    #[error("payload exceeds decoder capacity ({capacity} bytes)")]
    Overflow { capacity: usize },

    /// The byte following an escape marker is not a recognized escaped form.
    #[error("invalid byte 0x{byte:02x} after escape marker")]
    MalformedEscape { byte: u8 },
}
