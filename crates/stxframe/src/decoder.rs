use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::error::FrameFault;
use crate::protocol::{self, DLE, ETX, STX};
use crate::sink::{ContextSink, PacketSink};

/// Coarse position of a decoder in the incoming byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No frame open and no payload ready.
    Idle,
    /// A start marker was seen and payload bytes are accumulating.
    InFrame,
    /// A frame was closed and its payload is ready for delivery.
    Closed,
    /// A fault was recorded. Further input is ignored until [`FrameDecoder::reset`].
    Faulted,
}

/// Push-style decoder for STX/ETX framed, DLE-stuffed byte streams.
///
/// Bytes may be fed in chunks of any size; a frame, or an escape sequence, can be
/// split across calls. The decoded payload is handed to the sink once, when the
/// decoder is [finished](FrameDecoder::finish), and only if a frame was closed
/// cleanly.
///
/// Payload storage is allocated once with the configured capacity and never grows.
pub struct FrameDecoder<S> {
    buf: BytesMut,
    capacity: usize,
    resync_mark: usize,
    frame_open: bool,
    complete: bool,
    escape_pending: bool,
    fault: Option<FrameFault>,
    sink: S,
}

impl<S: PacketSink> FrameDecoder<S> {
    /// Create a decoder with the default configuration.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, DecoderConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(sink: S, config: DecoderConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.capacity),
            capacity: config.capacity,
            resync_mark: 0,
            frame_open: false,
            complete: false,
            escape_pending: false,
            fault: None,
            sink,
        }
    }

    /// Decode a chunk of raw bytes.
    ///
    /// Bytes are processed strictly in order. Once the decoder has faulted this is a
    /// no-op.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.fault.is_some() {
                return;
            }
            self.step(byte);
        }
    }

    /// Deliver the payload, if complete, and release the decoder.
    ///
    /// The sink is invoked at most once. It is handed back so callers can recover
    /// whatever state it accumulated.
    pub fn finish(self) -> S {
        let Self {
            buf,
            complete,
            mut sink,
            ..
        } = self;

        debug!(delivered = complete, len = buf.len(), "decoder finished");
        if complete {
            sink.deliver(&buf);
        }

        sink
    }

    fn step(&mut self, byte: u8) {
        if self.escape_pending {
            self.escape_pending = false;
            match protocol::unescape(byte) {
                Some(literal) => self.store(literal),
                None => self.set_fault(FrameFault::MalformedEscape { byte }),
            }
            return;
        }

        if self.buf.len() >= self.capacity {
            debug!(marker = protocol::marker_name(byte), "byte arrived with buffer full");
            self.set_fault(FrameFault::Overflow {
                capacity: self.capacity,
            });
            return;
        }

        // Noise ahead of the first start marker is discarded.
        if !self.frame_open && byte != STX {
            return;
        }
        let was_open = self.frame_open;
        self.frame_open = true;

        match byte {
            ETX => {
                self.complete = true;
                self.frame_open = false;
                self.resync_mark = self.buf.len();
                trace!(
                    marker = protocol::marker_name(byte),
                    len = self.buf.len(),
                    "frame closed"
                );
            }
            STX => {
                if was_open {
                    trace!(
                        marker = protocol::marker_name(byte),
                        discarded = self.buf.len() - self.resync_mark,
                        "frame reopened before close"
                    );
                } else {
                    trace!(
                        marker = protocol::marker_name(byte),
                        offset = self.resync_mark,
                        "frame opened"
                    );
                }
                self.complete = false;
                self.buf.truncate(self.resync_mark);
            }
            DLE => self.escape_pending = true,
            _ => self.store(byte),
        }
    }

    fn store(&mut self, byte: u8) {
        if self.buf.len() >= self.capacity {
            self.set_fault(FrameFault::Overflow {
                capacity: self.capacity,
            });
            return;
        }
        self.buf.put_u8(byte);
    }

    fn set_fault(&mut self, fault: FrameFault) {
        match fault {
            FrameFault::Overflow { capacity } => {
                debug!(capacity, len = self.buf.len(), "decoder faulted: overflow");
            }
            FrameFault::MalformedEscape { byte } => {
                debug!(byte, len = self.buf.len(), "decoder faulted: malformed escape");
            }
        }
        self.fault = Some(fault);
        self.complete = false;
    }
}

impl<C, F> FrameDecoder<ContextSink<C, F>>
where
    F: FnMut(&mut C, usize, &[u8]),
{
    /// Create a decoder whose sink is `callback`, invoked as `(context, length, bytes)`.
    pub fn with_context(context: C, callback: F) -> Self {
        Self::new(ContextSink::new(context, callback))
    }
}

impl<S> FrameDecoder<S> {
    /// True once a fault has been recorded.
    pub fn is_invalid(&self) -> bool {
        self.fault.is_some()
    }

    /// True if a closed payload is ready for delivery.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// True between a start marker and its matching end marker.
    pub fn is_frame_open(&self) -> bool {
        self.frame_open
    }

    /// True if the last byte consumed was an escape marker.
    pub fn is_escape_pending(&self) -> bool {
        self.escape_pending
    }

    /// The recorded fault, if any.
    pub fn fault(&self) -> Option<FrameFault> {
        self.fault
    }

    /// Current state of the decoder.
    pub fn state(&self) -> DecoderState {
        if self.fault.is_some() {
            DecoderState::Faulted
        } else if self.frame_open {
            DecoderState::InFrame
        } else if self.complete {
            DecoderState::Closed
        } else {
            DecoderState::Idle
        }
    }

    /// The payload that would be delivered now, if complete.
    pub fn packet(&self) -> Option<&[u8]> {
        self.complete.then_some(&self.buf[..])
    }

    /// Number of decoded bytes currently buffered.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if no decoded bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum payload size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard buffered bytes and clear every flag, including a recorded fault.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.resync_mark = 0;
        self.frame_open = false;
        self.complete = false;
        self.escape_pending = false;
        self.fault = None;
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S> std::fmt::Debug for FrameDecoder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDecoder")
            .field("state", &self.state())
            .field("len", &self.buf.len())
            .field("capacity", &self.capacity)
            .field("resync_mark", &self.resync_mark)
            .field("escape_pending", &self.escape_pending)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}
