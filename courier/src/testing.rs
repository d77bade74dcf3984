//! Testing utilities for Courier.
//!
//! This module provides test doubles for exercising a
//! [`Dispatcher`](crate::Dispatcher) without a real transport:
//!
//! - [`ManualTransport`]: records outbound frames and delivers inbound
//!   chunks only on demand
//! - [`RecordingHandler`]: a handler that records every payload it receives

use std::sync::{Arc, Mutex};

use courier_core::{
    BoxError, Envelope, Handler, InboundCallback, Payload, Reply, Transport, TransportError,
};

// ============================================================================
// Manual Transport
// ============================================================================

/// A transport operated by hand from test code.
///
/// Nothing is ever re-delivered automatically, so echo scenarios stay
/// finite: outbound frames are captured, and test code chooses which bytes
/// to feed back in via [`deliver`](ManualTransport::deliver).
///
/// # Example
///
/// ```rust,ignore
/// let transport = ManualTransport::new();
/// let dispatcher = Dispatcher::new(transport.clone());
///
/// dispatcher.send("echo", Some(Payload::from([("x", 5)])))?;
/// let frame = transport.sent().remove(0);
/// transport.deliver(&frame); // loop it back, exactly once
/// ```
#[derive(Default)]
pub struct ManualTransport {
    callback: Mutex<Option<InboundCallback>>,
    sent: Mutex<Vec<Vec<u8>>>,
    refuse: Mutex<bool>,
}

impl ManualTransport {
    /// Create a shared transport double.
    ///
    /// Returned in an [`Arc`] so the test keeps a handle while the
    /// dispatcher owns another.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Feed one raw chunk to the subscribed dispatcher, if any.
    pub fn deliver(&self, chunk: &[u8]) {
        let callback = self.callback.lock().unwrap();
        if let Some(callback) = callback.as_ref() {
            callback(chunk);
        }
    }

    /// Encode an envelope and feed it in as one inbound chunk.
    pub fn deliver_envelope(&self, action: &str, payload: Option<Payload>) {
        let frame = Envelope::new(action, payload).encode().unwrap();
        self.deliver(&frame);
    }

    /// All frames transmitted so far.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    /// All transmitted frames, decoded.
    pub fn sent_envelopes(&self) -> Vec<Envelope> {
        self.sent()
            .iter()
            .map(|frame| Envelope::decode(frame).unwrap())
            .collect()
    }

    /// Number of frames transmitted so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Make subsequent `transmit` calls fail (or succeed again).
    pub fn refuse_sends(&self, refuse: bool) {
        *self.refuse.lock().unwrap() = refuse;
    }
}

impl Transport for ManualTransport {
    fn subscribe(&self, callback: InboundCallback) {
        *self.callback.lock().unwrap() = Some(callback);
    }

    fn transmit(&self, frame: &[u8]) -> Result<(), TransportError> {
        if *self.refuse.lock().unwrap() {
            return Err(TransportError::new("transport refused the frame"));
        }
        self.sent.lock().unwrap().push(frame.to_vec());
        Ok(())
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// How a [`RecordingHandler`] answers each message.
enum ReplyMode {
    Silent,
    Canned(Payload),
    Echo,
}

/// A handler that records every payload it receives.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// dispatcher and inspect the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// dispatcher.on("sync", recorder.clone());
///
/// transport.deliver_envelope("sync", Some(Payload::from(1)));
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingHandler {
    received: Arc<Mutex<Vec<Option<Payload>>>>,
    mode: Arc<ReplyMode>,
}

impl RecordingHandler {
    /// A recorder that never replies.
    pub fn new() -> Self {
        Self::with_mode(ReplyMode::Silent)
    }

    /// A recorder that answers every message with `reply`.
    pub fn with_reply(reply: Payload) -> Self {
        Self::with_mode(ReplyMode::Canned(reply))
    }

    /// A recorder that answers every message with its own payload.
    pub fn echoing() -> Self {
        Self::with_mode(ReplyMode::Echo)
    }

    fn with_mode(mode: ReplyMode) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            mode: Arc::new(mode),
        }
    }

    /// Get a clone of the recorded payloads.
    pub fn received(&self) -> Vec<Option<Payload>> {
        self.received.lock().unwrap().clone()
    }

    /// Number of invocations so far.
    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHandler {
    fn clone(&self) -> Self {
        Self {
            received: self.received.clone(),
            mode: self.mode.clone(),
        }
    }
}

impl Handler for RecordingHandler {
    async fn handle(&self, payload: Option<Payload>) -> Result<Reply, BoxError> {
        self.received.lock().unwrap().push(payload.clone());
        Ok(match &*self.mode {
            ReplyMode::Silent => Reply::None,
            ReplyMode::Canned(value) => Reply::Send(value.clone()),
            ReplyMode::Echo => match payload {
                Some(value) => Reply::Send(value),
                None => Reply::None,
            },
        })
    }
}
