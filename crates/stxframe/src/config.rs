/// Default payload capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 512;

/// Configuration for a [`FrameDecoder`](crate::FrameDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of decoded payload bytes held by the decoder. Default: 512.
    ///
    /// Storage is allocated once at construction and never grows. Feeding a byte
    /// while the buffer is full faults the decoder.
    pub capacity: usize,
}

impl DecoderConfig {
    /// Returns a copy of this configuration with a different capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
