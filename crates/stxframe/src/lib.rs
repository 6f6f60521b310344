//! Streaming decoder for STX/ETX delimited frames with DLE byte stuffing.
//!
//! Raw bytes arrive in chunks of any size and are unframed byte by byte:
//! ```text
//! ┌───────┬──────────────────────────────┬───────┐
//! │ STX   │ Payload (DLE-stuffed)        │ ETX   │
//! │ 0x02  │ 0x02 → 10 22                 │ 0x03  │
//! │       │ 0x03 → 10 23                 │       │
//! │       │ 0x10 → 10 30                 │       │
//! └───────┴──────────────────────────────┴───────┘
//! ```
//!
//! Bytes before the first STX are discarded. A second STX before the matching ETX
//! abandons the partial frame. A malformed escape, or a payload that outgrows the
//! decoder's capacity, faults the decoder; a faulted decoder delivers nothing.
//!
//! ```
//! use stxframe::FrameDecoder;
//!
//! let mut payloads = Vec::new();
//! let mut decoder = FrameDecoder::new(|payload: &[u8]| payloads.push(payload.to_vec()));
//! decoder.feed(&[0x02, 0xFF, 0x10]);
//! decoder.feed(&[0x22, 0x03]);
//! drop(decoder.finish());
//!
//! assert_eq!(payloads, vec![vec![0xFF, 0x02]]);
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod protocol;
pub mod sink;

pub use config::{DecoderConfig, DEFAULT_CAPACITY};
pub use decoder::{DecoderState, FrameDecoder};
pub use error::FrameFault;
pub use protocol::{DLE, DLE_ESCAPED, ETX, ETX_ESCAPED, STX, STX_ESCAPED};
pub use sink::{ContextSink, PacketSink};
