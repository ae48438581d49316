//! Protocol error handling
//!
//! Typed errors for decoding inbound frames. Decode failures are never
//! fatal: the controller drops the offending frame and keeps the
//! connection open.

use thiserror::Error;

/// Errors that can occur while decoding an inbound frame
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Frame is not a recognized sync event shape
    #[error("Failed to decode sync event: {0}")]
    Decode(#[from] serde_json::Error),

    /// Frame kind the protocol does not carry (binary, ping payloads, ...)
    #[error("Unsupported frame kind: {0}")]
    UnsupportedFrame(&'static str),
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
