//! # courier-core
//!
//! Data model and contracts for the Courier message dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! transports and handler libraries that don't need the full `courier`
//! dispatcher.
//!
//! # Pieces
//!
//! - [`Payload`] / [`Scalar`] - the structured value a message may carry,
//!   modelled as a sum type the codec matches exhaustively
//! - [`Envelope`] - the `{action, payload}` wire structure
//! - [`Handler`] / [`DynHandler`] - the callback contract, with [`Reply`]
//!   and [`IntoReply`] describing what happens to a handler's result
//! - [`Transport`] - the byte-delivery collaborator at the seam
//!
//! # Error Types
//!
//! - [`EnvelopeError`] - Wire codec failures
//! - [`SendError`] / [`RequestError`] - Outbound operation failures
//! - [`TransportError`] - Failures reported by the transport's send hook

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod envelope;
mod error;
mod handler;
mod payload;
mod reply;
mod transport;

// Re-exports
pub use envelope::Envelope;
pub use error::{BoxError, EnvelopeError, RequestError, SendError, TransportError};
pub use handler::{DynHandler, Handler};
pub use payload::{Payload, Scalar};
pub use reply::{IntoReply, Reply};
pub use transport::{InboundCallback, Transport};
