//! Action-keyed registry of handlers and pending request waiters.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use courier_core::{DynHandler, Payload};
use rand::Rng;
use tokio::sync::oneshot;

/// Opaque token identifying one live handler registration.
///
/// Combines epoch millis, the action name, and a random suffix. Returned by
/// registration so the caller can later deregister exactly that handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationId(String);

impl RegistrationId {
    fn generate(action: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(rand::distributions::Alphanumeric)
            .take(7)
            .map(char::from)
            .collect();
        Self(format!("{millis}_{action}_{suffix}"))
    }

    /// The token's textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) type Waiter = oneshot::Sender<Option<Payload>>;

/// Two-level mapping `action → (id → handler)`, plus a FIFO queue of
/// pending request waiters per action.
///
/// Actions whose last handler was removed are pruned from the outer map;
/// lookups on a missing action behave exactly like lookups on an empty one.
#[derive(Default)]
pub(crate) struct Registry {
    handlers: HashMap<String, HashMap<RegistrationId, Arc<dyn DynHandler>>>,
    pending: HashMap<String, VecDeque<Waiter>>,
}

impl Registry {
    /// Store a handler under a fresh id, never displacing a live one.
    pub(crate) fn register(
        &mut self,
        action: &str,
        handler: Arc<dyn DynHandler>,
    ) -> RegistrationId {
        let slots = self.handlers.entry(action.to_owned()).or_default();
        let mut id = RegistrationId::generate(action);
        while slots.contains_key(&id) {
            id = RegistrationId::generate(action);
        }
        slots.insert(id.clone(), handler);
        id
    }

    /// Remove exactly the `(action, id)` entry; no-op if absent.
    pub(crate) fn deregister(&mut self, action: &str, id: &RegistrationId) {
        if let Some(slots) = self.handlers.get_mut(action) {
            slots.remove(id);
            if slots.is_empty() {
                self.handlers.remove(action);
            }
        }
    }

    /// All handlers currently registered under `action`.
    pub(crate) fn snapshot(&self, action: &str) -> Vec<Arc<dyn DynHandler>> {
        self.handlers
            .get(action)
            .map(|slots| slots.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Queue a reply slot for a pending request on `action`.
    pub(crate) fn enqueue_waiter(&mut self, action: &str) -> oneshot::Receiver<Option<Payload>> {
        let (tx, rx) = oneshot::channel();
        self.pending.entry(action.to_owned()).or_default().push_back(tx);
        rx
    }

    /// Resolve the oldest still-pending waiter for `action` with the
    /// arrived payload. Waiters whose caller has gone away are discarded in
    /// favor of the next one.
    pub(crate) fn resolve_waiter(&mut self, action: &str, payload: &Option<Payload>) {
        let Some(queue) = self.pending.get_mut(action) else {
            return;
        };
        while let Some(waiter) = queue.pop_front() {
            if waiter.send(payload.clone()).is_ok() {
                break;
            }
        }
        if queue.is_empty() {
            self.pending.remove(action);
        }
    }
}
