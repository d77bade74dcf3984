//! Inbound routing, fan-out, and the auto-reply path.

use courier::testing::{ManualTransport, RecordingHandler};
use courier::{Dispatcher, Envelope, Payload, Reply, SendError};

mod common;

#[tokio::test]
async fn fan_out_invokes_every_handler_exactly_once() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    let first = RecordingHandler::new();
    let second = RecordingHandler::new();
    dispatcher.on("sync", first.clone());
    dispatcher.on("sync", second.clone());

    transport.deliver_envelope("sync", Some(Payload::from([("seq", 1)])));
    common::settle().await;

    assert_eq!(first.received(), vec![Some(Payload::from([("seq", 1)]))]);
    assert_eq!(second.received(), vec![Some(Payload::from([("seq", 1)]))]);
}

#[tokio::test]
async fn off_removes_only_the_named_registration() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    let kept = RecordingHandler::new();
    let removed = RecordingHandler::new();
    dispatcher.on("sync", kept.clone());
    let id = dispatcher.on("sync", removed.clone());

    dispatcher.off("sync", &id);
    transport.deliver_envelope("sync", None);
    common::settle().await;

    assert_eq!(kept.count(), 1);
    assert_eq!(removed.count(), 0);
}

#[tokio::test]
async fn off_with_unknown_action_or_id_is_harmless() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    let handler = RecordingHandler::new();
    let id = dispatcher.on("sync", handler.clone());

    dispatcher.off("no-such-action", &id);
    dispatcher.off("sync", &dispatcher.on("other", RecordingHandler::new()));

    transport.deliver_envelope("sync", None);
    common::settle().await;
    assert_eq!(handler.count(), 1);
}

#[tokio::test]
async fn replying_handler_causes_exactly_one_outbound_send() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    dispatcher.on("query", RecordingHandler::with_reply(Payload::from([("answer", 42)])));
    dispatcher.on("query", RecordingHandler::new()); // silent sibling

    transport.deliver_envelope("query", None);
    common::settle().await;

    let envelopes = transport.sent_envelopes();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(
        envelopes[0],
        Envelope::new("query", Some(Payload::from([("answer", 42)])))
    );
}

#[tokio::test]
async fn failing_handler_does_not_block_siblings_or_later_messages() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    dispatcher.on("sync", |_payload: Option<Payload>| async move {
        Err::<Reply, std::io::Error>(std::io::Error::other("boom"))
    });
    let survivor = RecordingHandler::new();
    dispatcher.on("sync", survivor.clone());

    transport.deliver_envelope("sync", None);
    transport.deliver_envelope("sync", None);
    common::settle().await;

    assert_eq!(survivor.count(), 2);
}

#[tokio::test]
async fn undecodable_chunk_is_contained() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    let handler = RecordingHandler::new();
    dispatcher.on("sync", handler.clone());

    transport.deliver(b"not an envelope {");
    common::settle().await;
    assert_eq!(handler.count(), 0);

    // The registry is untouched: the next well-formed chunk dispatches.
    transport.deliver_envelope("sync", None);
    common::settle().await;
    assert_eq!(handler.count(), 1);
}

#[tokio::test]
async fn chunks_without_action_or_without_listeners_are_ignored() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    let handler = RecordingHandler::new();
    dispatcher.on("sync", handler.clone());

    transport.deliver(br#"{"payload":{"x":1}}"#);
    transport.deliver(br#"{"action":"","payload":{"x":1}}"#);
    transport.deliver_envelope("unheard-of", Some(Payload::from(1)));
    common::settle().await;

    assert_eq!(handler.count(), 0);
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn transport_failure_surfaces_to_the_sender() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    transport.refuse_sends(true);
    let result = dispatcher.send("sync", None);
    assert!(matches!(result, Err(SendError::Transport(_))));

    transport.refuse_sends(false);
    assert!(dispatcher.send("sync", None).is_ok());
}

#[tokio::test]
async fn echo_round_trip_through_a_single_shot_loopback() {
    let transport = ManualTransport::new();
    let dispatcher = Dispatcher::new(transport.clone());

    let echo = RecordingHandler::echoing();
    dispatcher.on("echo", echo.clone());

    dispatcher
        .send("echo", Some(Payload::from([("x", 5)])))
        .unwrap();
    assert_eq!(transport.sent_count(), 1);

    // Loop the frame back by hand, exactly once; a transport that rewired
    // sends to inbound automatically would echo forever here.
    let frame = transport.sent().remove(0);
    transport.deliver(&frame);
    common::settle().await;

    assert_eq!(echo.received(), vec![Some(Payload::from([("x", 5)]))]);
    let envelopes = transport.sent_envelopes();
    assert_eq!(envelopes.len(), 2);
    assert_eq!(
        envelopes[1],
        Envelope::new("echo", Some(Payload::from([("x", 5)])))
    );
}
