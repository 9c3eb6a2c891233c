//! Tests for the client facade

use std::sync::{Arc, Mutex};

use chatwire_core::*;

fn collector() -> (Arc<Mutex<Vec<ChatEvent>>>, Arc<dyn EventHandler>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let handler = Arc::new(CallbackHandler::new(move |event| {
        sink.lock().unwrap().push(event);
    }));
    (events, handler)
}

fn state_changes(events: &Arc<Mutex<Vec<ChatEvent>>>) -> Vec<ConnectionState> {
    events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            ChatEvent::StateChanged { state } => Some(state.clone()),
            _ => None,
        })
        .collect()
}

fn connected_client() -> ChatClient<MockTransport> {
    let mut client = ChatClient::new(
        MockTransport::new(),
        ClientConfig::for_url("ws://localhost:9999"),
        Credential::new("test-token"),
    );
    client.connect().unwrap();
    client.process_events().unwrap();
    assert_eq!(client.state(), ConnectionState::Connected);
    client
}

#[test]
fn test_send_while_idle_fails_not_connected() {
    let mut client = ChatClient::new(
        MockTransport::new(),
        ClientConfig::default(),
        Credential::new("test-token"),
    );

    let result = client.send_message("hi", "u1");
    assert!(matches!(result, Err(ClientError::NotConnected)));
    assert!(client.transport().written_frames().is_empty());

    let result = client.load_history();
    assert!(matches!(result, Err(ClientError::NotConnected)));
    assert!(client.transport().written_frames().is_empty());
}

#[test]
fn test_open_event_enables_sending() {
    let mut client = connected_client();
    assert!(client.is_send_capable());

    client.send_message("hi", "u1").unwrap();

    let frames = client.transport().written_frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].contains("\"action\":\"sendmessage\""));
    assert!(frames[0].contains("\"data\":\"hi\""));
    assert!(frames[0].contains("\"userId\":\"u1\""));
    assert!(frames[0].contains(client.transaction_id()));
}

#[test]
fn test_load_history_frame() {
    let mut client = connected_client();
    client.load_history().unwrap();

    let frames = client.transport().written_frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].contains("\"action\":\"load\""));
    assert!(frames[0].contains("\"transactionID\""));
}

#[test]
fn test_connect_is_idempotent() {
    let mut client = ChatClient::new(
        MockTransport::new(),
        ClientConfig::default(),
        Credential::new("test-token"),
    );

    client.connect().unwrap();
    client.connect().unwrap();
    assert_eq!(client.transport().connect_calls(), 1);

    client.process_events().unwrap();
    client.connect().unwrap();
    assert_eq!(client.transport().connect_calls(), 1);
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn test_connect_failure_surfaces_as_failed_state() {
    let mut transport = MockTransport::new();
    transport.inject_connect_error(NetworkError::ConnectionFailed("refused".into()));

    let (events, handler) = collector();
    let mut client = ChatClient::new(transport, ClientConfig::default(), Credential::new("t"));
    client.add_event_handler(handler);

    let result = client.connect();
    assert!(result.is_err());
    assert!(matches!(client.state(), ConnectionState::Failed { .. }));

    let states = state_changes(&events);
    assert_eq!(states.len(), 2);
    assert_eq!(states[0], ConnectionState::Connecting);
    assert!(matches!(states[1], ConnectionState::Failed { .. }));
}

#[test]
fn test_state_events_published_in_order() {
    let (events, handler) = collector();
    let mut client = ChatClient::new(
        MockTransport::new(),
        ClientConfig::default(),
        Credential::new("test-token"),
    );
    client.add_event_handler(handler);

    client.connect().unwrap();
    client.process_events().unwrap();

    let states = state_changes(&events);
    assert_eq!(
        states,
        vec![ConnectionState::Connecting, ConnectionState::Connected]
    );
}

#[test]
fn test_inbound_message_appends_to_log() {
    let (events, handler) = collector();
    let mut client = connected_client();
    client.add_event_handler(handler);

    client.transport_mut().queue_event(TransportEvent::Text(
        r#"{"data":"hello","userID":"u2","createdDatetime":"2020-12-05 10:00:00"}"#.into(),
    ));
    client.process_events().unwrap();

    assert_eq!(client.messages(), ["hello"]);
    assert!(events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, ChatEvent::MessageAppended { text } if text == "hello")));
}

#[test]
fn test_malformed_frame_leaves_log_and_state_untouched() {
    let (events, handler) = collector();
    let mut client = connected_client();
    client.add_event_handler(handler);

    client
        .transport_mut()
        .queue_event(TransportEvent::Text(r#"{"userID":"u2"}"#.into()));
    client.process_events().unwrap();

    assert!(client.messages().is_empty());
    assert_eq!(client.state(), ConnectionState::Connected);
    assert!(client.is_send_capable());
    assert!(events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, ChatEvent::DecodeFailed { .. })));
}

#[test]
fn test_bad_timestamp_frame_is_dropped() {
    let mut client = connected_client();

    client.transport_mut().queue_event(TransportEvent::Text(
        r#"{"data":"x","userID":"u","createdDatetime":"2021-13-40 99:99:99"}"#.into(),
    ));
    client.process_events().unwrap();

    assert!(client.messages().is_empty());
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn test_inert_events_have_no_side_effects() {
    let mut client = connected_client();

    for event in [
        TransportEvent::Binary(vec![1, 2, 3]),
        TransportEvent::Ping(vec![]),
        TransportEvent::Pong(vec![]),
        TransportEvent::ViabilityChanged(false),
        TransportEvent::ReconnectSuggested(true),
    ] {
        client.transport_mut().queue_event(event);
    }
    let handled = client.process_events().unwrap();

    assert_eq!(handled, 5);
    assert!(client.messages().is_empty());
    assert_eq!(client.state(), ConnectionState::Connected);
    assert!(client.is_send_capable());
}

#[test]
fn test_peer_close_disables_sending() {
    let mut client = connected_client();

    client.transport_mut().queue_event(TransportEvent::Disconnected {
        reason: "server restart".into(),
        code: 1012,
    });
    client.process_events().unwrap();

    assert!(!client.is_send_capable());
    let result = client.send_message("late", "u1");
    assert!(matches!(result, Err(ClientError::NotConnected)));
}

#[test]
fn test_disconnect_twice_is_single_terminal_transition() {
    let (events, handler) = collector();
    let mut client = connected_client();
    client.add_event_handler(handler);

    client.disconnect().unwrap();
    client.disconnect().unwrap();

    let states = state_changes(&events);
    assert_eq!(states, vec![ConnectionState::Cancelled]);
    assert_eq!(client.transport().disconnect_calls(), 1);
}

#[test]
fn test_no_events_delivered_after_disconnect() {
    let (events, handler) = collector();
    let mut client = connected_client();
    client.add_event_handler(handler);

    // Events already in flight when the user disconnects.
    client.transport_mut().queue_event(TransportEvent::Text(
        r#"{"data":"late","userID":"u","createdDatetime":"2020-12-05 10:00:00"}"#.into(),
    ));
    client.transport_mut().queue_event(TransportEvent::Error("late error".into()));

    client.disconnect().unwrap();
    client.process_events().unwrap();

    assert_eq!(client.state(), ConnectionState::Cancelled);
    assert!(client.messages().is_empty());
    let states = state_changes(&events);
    assert_eq!(states, vec![ConnectionState::Cancelled]);
}

#[test]
fn test_buffer_policy_flushes_in_order_on_connect() {
    let mut config = ClientConfig::default();
    config.offline_send = OfflineSendPolicy::Buffer { max_queued: 8 };

    let mut client = ChatClient::new(
        MockTransport::new(),
        config,
        Credential::new("test-token"),
    );

    client.send_message("first", "u1").unwrap();
    client.send_message("second", "u1").unwrap();
    assert!(client.transport().written_frames().is_empty());

    client.connect().unwrap();
    client.process_events().unwrap();

    let frames = client.transport().written_frames();
    assert_eq!(frames.len(), 2);
    assert!(frames[0].contains("\"data\":\"first\""));
    assert!(frames[1].contains("\"data\":\"second\""));
}

#[test]
fn test_buffer_policy_bounds_queue() {
    let mut config = ClientConfig::default();
    config.offline_send = OfflineSendPolicy::Buffer { max_queued: 1 };

    let mut client = ChatClient::new(
        MockTransport::new(),
        config,
        Credential::new("test-token"),
    );

    client.send_message("first", "u1").unwrap();
    let result = client.send_message("second", "u1");
    assert!(matches!(result, Err(ClientError::InvalidState(_))));
}

#[test]
fn test_transaction_id_rotates_per_connect() {
    let mut client = ChatClient::new(
        MockTransport::new(),
        ClientConfig::default(),
        Credential::new("test-token"),
    );
    let before = client.transaction_id().to_string();

    client.connect().unwrap();
    client.process_events().unwrap();
    let session_a = client.transaction_id().to_string();
    assert_ne!(before, session_a);

    client.disconnect().unwrap();
    client.connect().unwrap();
    assert_ne!(session_a, client.transaction_id());
}

#[test]
fn test_credential_never_reaches_the_wire_log() {
    let mut client = connected_client();
    client.send_message("hi", "u1").unwrap();
    client.load_history().unwrap();

    for frame in client.transport().written_frames() {
        assert!(!frame.contains("test-token"));
    }
    assert!(!format!("{:?}", Credential::new("s3cret")).contains("s3cret"));
}
