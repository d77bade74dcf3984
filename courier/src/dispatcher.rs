//! The dispatcher: registry, gate, and dispatch loop over one transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use courier_core::{
    DynHandler, Envelope, Handler, Payload, Reply, RequestError, SendError, Transport,
};

use crate::registry::{Registry, RegistrationId};

/// A bidirectional, action-addressed message dispatcher.
///
/// Constructed over a [`Transport`], a dispatcher routes each inbound chunk
/// to every handler registered for the chunk's action, sends handler
/// replies back out, and correlates [`request`](Dispatcher::request) calls
/// with the next inbound message for the same action.
///
/// `Dispatcher` is a cheaply cloneable handle; clones share one registry.
/// Distinct dispatchers never share registries.
///
/// # Quick Start
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(transport);
///
/// let id = dispatcher.on("greet", |payload: Option<Payload>| async move {
///     Some(Payload::from([("hello", true)]))
/// });
///
/// dispatcher.send("greet", Some(Payload::from([("name", "ada")])))?;
/// dispatcher.off("greet", &id);
/// ```
///
/// # The enabled gate
///
/// While disabled, inbound chunks are ignored before any decode attempt and
/// [`send`](Dispatcher::send) is a no-op. Toggling back on restores normal
/// behavior with all registrations intact.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    enabled: AtomicBool,
    transport: Arc<dyn Transport>,
    registry: Mutex<Registry>,
}

/// Builder carrying construction options for a [`Dispatcher`].
pub struct DispatcherBuilder<T> {
    transport: T,
    enabled: bool,
}

impl<T: Transport> DispatcherBuilder<T> {
    /// Set the initial enabled flag (defaults to `true`).
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build the dispatcher, installing its inbound callback with the
    /// transport. This subscription happens exactly once per dispatcher.
    pub fn build(self) -> Dispatcher {
        let inner = Arc::new(Inner {
            enabled: AtomicBool::new(self.enabled),
            transport: Arc::new(self.transport),
            registry: Mutex::new(Registry::default()),
        });
        // The callback holds a weak reference: registrations stop being
        // referenced once the last dispatcher handle is dropped, even if
        // the transport outlives it.
        let weak = Arc::downgrade(&inner);
        inner.transport.subscribe(Box::new(move |chunk: &[u8]| {
            if let Some(inner) = weak.upgrade() {
                Inner::deliver(&inner, chunk);
            }
        }));
        Dispatcher { inner }
    }
}

impl Dispatcher {
    /// Construct an enabled dispatcher over `transport`.
    pub fn new(transport: impl Transport) -> Self {
        Self::builder(transport).build()
    }

    /// Start building a dispatcher with non-default options.
    pub fn builder<T: Transport>(transport: T) -> DispatcherBuilder<T> {
        DispatcherBuilder {
            transport,
            enabled: true,
        }
    }

    /// Register `handler` under `action`.
    ///
    /// Never overwrites or removes any other live registration, including
    /// ones already present under the same action. After the handler
    /// completes, a non-empty [`Reply`] is sent back out under the same
    /// action; reply-send failures are logged, not raised.
    ///
    /// An empty `action` is accepted but can never match inbound traffic,
    /// since action-less chunks are dropped before lookup.
    ///
    /// Returns the token to pass to [`off`](Dispatcher::off).
    pub fn on<H: Handler>(&self, action: &str, handler: H) -> RegistrationId {
        self.inner.registry().register(action, Arc::new(handler))
    }

    /// Remove exactly the `(action, id)` registration.
    ///
    /// Silently does nothing if the action or id does not exist.
    pub fn off(&self, action: &str, id: &RegistrationId) {
        self.inner.registry().deregister(action, id);
    }

    /// Encode `{action, payload}` and hand the bytes to the transport.
    ///
    /// A no-op while disabled. An absent payload encodes as an absent
    /// field. Transport failures are surfaced, never retried.
    pub fn send(
        &self,
        action: &str,
        payload: impl Into<Option<Payload>>,
    ) -> Result<(), SendError> {
        self.inner.send(action, payload.into())
    }

    /// Send a message and await the next inbound message for `action`.
    ///
    /// The transient reply slot is queued *before* the outbound send is
    /// issued, so even a transport that echoes synchronously cannot race
    /// past it. The slot is consumed by the first matching inbound message
    /// and never fires again.
    ///
    /// Correlation is by action name only; with several requests
    /// outstanding on one action, each inbound message resolves exactly one
    /// pending request in registration order, not necessarily the one
    /// logically matching it. This mirrors the wire protocol, which carries
    /// no correlation id.
    ///
    /// There is no built-in timeout: if the peer never responds, the future
    /// pends forever. Callers needing one should race this against a timer.
    pub async fn request(
        &self,
        action: &str,
        payload: impl Into<Option<Payload>>,
    ) -> Result<Option<Payload>, RequestError> {
        let reply = self.inner.registry().enqueue_waiter(action);
        self.inner.send(action, payload.into())?;
        reply.await.map_err(|_| RequestError::Abandoned)
    }

    /// Toggle the gate at any time during the dispatcher's lifetime.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether the dispatcher currently processes traffic.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled()
    }
}

impl Inner {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn send(&self, action: &str, payload: Option<Payload>) -> Result<(), SendError> {
        if !self.enabled() {
            return Ok(());
        }
        let frame = Envelope::new(action, payload).encode()?;
        self.transport.transmit(&frame)?;
        Ok(())
    }

    /// Inbound dispatch, invoked once per raw chunk from the transport.
    fn deliver(inner: &Arc<Inner>, chunk: &[u8]) {
        if !inner.enabled() {
            return;
        }
        let envelope = match Envelope::decode(chunk) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    raw = %String::from_utf8_lossy(chunk),
                    "dropping undecodable inbound chunk"
                );
                return;
            }
        };
        if !envelope.is_actionable() {
            return;
        }
        let Envelope { action, payload } = envelope;

        // One lock acquisition: hand the payload to the oldest pending
        // request for this action, then snapshot the handlers to invoke.
        let handlers = {
            let mut registry = inner.registry();
            registry.resolve_waiter(&action, &payload);
            registry.snapshot(&action)
        };

        // Fan out. Each invocation is its own task: a handler that fails
        // or never completes cannot block siblings or later messages, and
        // each handler's reply-send happens after that handler alone
        // resolves.
        for handler in handlers {
            let inner = Arc::clone(inner);
            let action = action.clone();
            let payload = payload.clone();
            tokio::spawn(async move {
                match handler.handle_dyn(payload).await {
                    Ok(Reply::Send(value)) => {
                        if let Err(err) = inner.send(&action, Some(value)) {
                            tracing::warn!(%action, error = %err, "reply send failed");
                        }
                    }
                    Ok(Reply::None) => {}
                    Err(err) => {
                        tracing::error!(%action, error = %err, "handler failed");
                    }
                }
            });
        }
    }
}
