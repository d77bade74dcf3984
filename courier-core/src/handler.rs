//! # Handler contract
//!
//! A handler is a function registered under an action name and invoked once
//! per inbound message for that action. Its business logic is opaque to the
//! dispatcher; the only thing inspected is its resolved [`Reply`].
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|payload| async move { payload }`, or any async
//!    closure whose output converts via [`IntoReply`]
//! 2. **Struct implementation**: `impl Handler for MyHandler`
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses native `async fn` for zero-cost static dispatch. The
//! registry stores handlers through the object-safe [`DynHandler`] twin; a
//! blanket impl bridges the two.

use std::{future::Future, pin::Pin};

use crate::error::BoxError;
use crate::payload::Payload;
use crate::reply::{IntoReply, Reply};

/// A registered callback for one action.
///
/// Handlers may suspend; each invocation runs as its own task, so a slow or
/// failing handler never blocks siblings registered under the same action.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle dispatched payloads",
    label = "missing `Handler` implementation",
    note = "Use an async closure taking `Option<Payload>`, or implement `Handler` directly."
)]
pub trait Handler: Send + Sync + 'static {
    /// Called once per inbound message under the handler's action.
    fn handle(
        &self,
        payload: Option<Payload>,
    ) -> impl Future<Output = Result<Reply, BoxError>> + Send;
}

/// Object-safe version of [`Handler`] for storage in the registry.
pub trait DynHandler: Send + Sync + 'static {
    /// Called once per inbound message (dynamic dispatch version).
    fn handle_dyn(
        &self,
        payload: Option<Payload>,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, BoxError>> + Send + '_>>;
}

// Blanket implementation: any Handler implements DynHandler automatically.
impl<T: Handler> DynHandler for T {
    fn handle_dyn(
        &self,
        payload: Option<Payload>,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, BoxError>> + Send + '_>> {
        Box::pin(self.handle(payload))
    }
}

// Blanket impl for async closures
impl<F, Fut, R> Handler for F
where
    F: Fn(Option<Payload>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoReply,
{
    async fn handle(&self, payload: Option<Payload>) -> Result<Reply, BoxError> {
        (self)(payload).await.into_reply()
    }
}
