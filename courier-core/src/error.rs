//! Error types for Courier.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`EnvelopeError`] - Wire codec failures
//! - [`TransportError`] - Failures reported by the outbound transport hook
//! - [`SendError`] - Errors while handing an envelope to the transport
//! - [`RequestError`] - Errors while awaiting a request's reply

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the envelope codec.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// An inbound chunk could not be decoded as an envelope.
    #[error("malformed envelope: {0}")]
    Decode(#[source] serde_json::Error),

    /// An outbound envelope could not be serialized.
    #[error("unencodable envelope: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A failure reported by the transport's send hook.
///
/// The dispatcher never retries a rejected frame; the error is surfaced to
/// whichever caller triggered the send.
#[derive(Error, Debug)]
#[error("transport rejected outbound frame")]
pub struct TransportError {
    #[source]
    source: BoxError,
}

impl TransportError {
    /// Wrap a transport-specific failure.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Errors that can occur while sending a message.
#[derive(Error, Debug)]
pub enum SendError {
    /// The outbound envelope could not be encoded.
    #[error("outbound envelope could not be encoded")]
    Encode(#[from] EnvelopeError),

    /// The transport's send hook reported a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors that can occur while awaiting a request's reply.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The outbound request could not be sent.
    #[error(transparent)]
    Send(#[from] SendError),

    /// The pending reply slot was dropped before a reply arrived.
    #[error("pending request was abandoned before a reply arrived")]
    Abandoned,
}
