//! Delivery of decoded payloads.

/// Receives the decoded payload when a decoder is finished.
///
/// A decoder calls [`deliver`](PacketSink::deliver) at most once in its lifetime,
/// and only if it holds a complete payload.
pub trait PacketSink {
    /// Called with the decoded payload. Its length is `payload.len()`.
    fn deliver(&mut self, payload: &[u8]);
}

impl<F> PacketSink for F
where
    F: FnMut(&[u8]),
{
    fn deliver(&mut self, payload: &[u8]) {
        self(payload)
    }
}

/// A sink made of an opaque context value and a callback taking
/// `(context, length, bytes)`.
pub struct ContextSink<C, F> {
    context: C,
    callback: F,
}

impl<C, F> ContextSink<C, F>
where
    F: FnMut(&mut C, usize, &[u8]),
{
    /// Pair a context value with the callback that receives it.
    pub fn new(context: C, callback: F) -> Self {
        Self { context, callback }
    }
}

impl<C, F> ContextSink<C, F> {
    /// Borrow the context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutably borrow the context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consume the sink and return the context.
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C, F> PacketSink for ContextSink<C, F>
where
    F: FnMut(&mut C, usize, &[u8]),
{
    fn deliver(&mut self, payload: &[u8]) {
        (self.callback)(&mut self.context, payload.len(), payload);
    }
}

impl<C: std::fmt::Debug, F> std::fmt::Debug for ContextSink<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextSink")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
