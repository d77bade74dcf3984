//! The `{action, payload}` wire structure.

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;
use crate::payload::Payload;

/// The wire representation of one message.
///
/// An envelope is immutable once encoded, and encoding/decoding round-trips
/// the payload structure exactly.
///
/// Two decode-side conventions keep benign chunks distinguishable from
/// malformed ones:
///
/// - a chunk that decodes but carries no `action` field yields an empty
///   action string (see [`Envelope::is_actionable`]) rather than an error;
/// - an absent payload and a present-but-`null` payload both yield `None`,
///   so receivers treat the two uniformly.
///
/// Unknown extra fields on the wire are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The action name identifying the message's topic.
    #[serde(default)]
    pub action: String,

    /// Optional structured payload. Absent payloads encode as an absent
    /// field, never as `"payload": null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Envelope {
    /// Build an envelope for the given action.
    pub fn new(action: impl Into<String>, payload: Option<Payload>) -> Self {
        Self {
            action: action.into(),
            payload,
        }
    }

    /// Serialize to wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).map_err(EnvelopeError::Encode)
    }

    /// Deserialize from wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(bytes).map_err(EnvelopeError::Decode)
    }

    /// Whether this envelope names an action at all.
    ///
    /// A non-actionable envelope is a benign no-op for the dispatcher, not
    /// an error condition.
    pub fn is_actionable(&self) -> bool {
        !self.action.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Scalar;

    #[test]
    fn round_trips_action_and_payload() {
        let envelope = Envelope::new(
            "sync",
            Some(Payload::from([
                ("count", Payload::from(3)),
                ("tags", Payload::from(vec![Scalar::from("a"), Scalar::from("b")])),
                ("meta", Payload::from([("ok", true)])),
            ])),
        );
        let bytes = envelope.encode().unwrap();
        assert_eq!(Envelope::decode(&bytes).unwrap(), envelope);
    }

    #[test]
    fn absent_payload_omits_the_field() {
        let bytes = Envelope::new("ping", None).encode().unwrap();
        assert_eq!(bytes, br#"{"action":"ping"}"#);
        assert_eq!(Envelope::decode(&bytes).unwrap().payload, None);
    }

    #[test]
    fn null_payload_decodes_as_absent() {
        let envelope = Envelope::decode(br#"{"action":"ping","payload":null}"#).unwrap();
        assert_eq!(envelope.payload, None);
    }

    #[test]
    fn missing_action_is_not_a_decode_error() {
        let envelope = Envelope::decode(br#"{"payload":{"x":1}}"#).unwrap();
        assert!(!envelope.is_actionable());
        assert!(envelope.payload.is_some());
    }

    #[test]
    fn undecodable_bytes_are_malformed() {
        assert!(matches!(
            Envelope::decode(b"not an envelope"),
            Err(EnvelopeError::Decode(_))
        ));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let envelope = Envelope::decode(br#"{"action":"a","extra":42}"#).unwrap();
        assert_eq!(envelope.action, "a");
    }
}
