//! # courier - Action-Addressed Message Dispatcher
//!
//! `courier` layers a bidirectional message dispatcher over an arbitrary
//! byte-oriented [`Transport`]. A process registers handlers keyed by a
//! string "action"; inbound serialized messages fan out to every handler
//! registered for that action, and a handler's non-empty reply is sent back
//! out under the same action. A one-shot [`Dispatcher::request`] helper
//! correlates an outbound message with the next inbound message for the
//! same action.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::{Dispatcher, Payload};
//!
//! let dispatcher = Dispatcher::new(transport);
//!
//! dispatcher.on("status", |_payload| async move {
//!     Some(Payload::from([("healthy", true)]))
//! });
//!
//! let reply = dispatcher.request("status", None).await?;
//! ```
//!
//! What the dispatcher does **not** do: guarantee delivery, order messages
//! across independent actions, persist missed messages, or time out pending
//! requests. See [`Dispatcher`] for the full contract.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;
mod registry;
pub mod testing;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use registry::RegistrationId;

pub use courier_core::{
    // Error types
    BoxError,
    // Handler contract
    DynHandler,
    // Wire structure
    Envelope,
    EnvelopeError,
    Handler,
    InboundCallback,
    IntoReply,
    // Payload model
    Payload,
    Reply,
    RequestError,
    Scalar,
    SendError,
    // Transport seam
    Transport,
    TransportError,
};
