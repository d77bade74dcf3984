//! Transport collaborator contract.

use std::sync::Arc;

use crate::error::TransportError;

/// The inbound callback a dispatcher installs with its transport.
///
/// The transport must invoke it exactly once per received raw chunk, in the
/// order chunks are received.
pub type InboundCallback = Box<dyn Fn(&[u8]) + Send + Sync>;

/// A byte-oriented duplex transport the dispatcher is layered over.
///
/// How bytes physically move is the collaborator's concern; the dispatcher
/// only subscribes for inbound chunks and hands off encoded frames.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Transport`",
    label = "missing `Transport` implementation",
    note = "A transport must accept an inbound callback and deliver outbound frames."
)]
pub trait Transport: Send + Sync + 'static {
    /// Install the inbound callback.
    ///
    /// A dispatcher calls this exactly once, at construction time.
    fn subscribe(&self, callback: InboundCallback);

    /// Hand opaque encoded bytes to the remote side.
    ///
    /// A reported failure is surfaced to the caller that triggered the
    /// send; the dispatcher never retries.
    fn transmit(&self, frame: &[u8]) -> Result<(), TransportError>;
}

// Allow tests (and callers generally) to keep a handle to their transport
// while the dispatcher owns another.
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn subscribe(&self, callback: InboundCallback) {
        (**self).subscribe(callback)
    }

    fn transmit(&self, frame: &[u8]) -> Result<(), TransportError> {
        (**self).transmit(frame)
    }
}
