use std::io;
use thiserror::Error;

/// Failures of the length-prefixed frame layer. Every variant is fatal for
/// the connection it occurred on and for nothing else.
#[derive(Error, Debug)]
pub enum FramingError {
    #[error("Cannot read frame length prefix: {0}")]
    PrefixRead(#[source] io::Error),

    #[error("Connection closed inside length prefix ({received} of {expected} bytes)")]
    TruncatedPrefix { expected: usize, received: usize },

    #[error("Cannot read frame payload: {0}")]
    PayloadRead(#[source] io::Error),

    #[error("Short read: frame advertised {expected} bytes, connection closed after {received}")]
    ShortRead { expected: usize, received: usize },

    #[error("Frame of {len} bytes exceeds maximum of {max} bytes")]
    FrameTooLarge { len: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Failed to accept connection: {0}")]
    ListenerAccept(#[source] io::Error),

    #[error("Handoff queue saturated for {timeout_ms}ms, event dropped")]
    HandoffSaturated { timeout_ms: u64 },

    #[error("Handoff channel closed")]
    HandoffClosed,

    #[error("Metrics error: {0}")]
    Metrics(String),
}

impl IngestError {
    /// Errors after which the connection that produced them must be closed.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(self, IngestError::Framing(_) | IngestError::HandoffClosed)
    }
}
