//! Tests for the client event system

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chatwire_core::*;

#[test]
fn test_callback_handler() {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();

    let handler = CallbackHandler::new(move |_event| {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });

    handler.on_event(ChatEvent::MessageAppended { text: "hi".into() });
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_event_dispatcher_add_and_clear() {
    let mut dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);

    dispatcher.add_handler(Arc::new(CallbackHandler::new(|_| {})));
    dispatcher.add_handler(Arc::new(CallbackHandler::new(|_| {})));
    assert_eq!(dispatcher.handler_count(), 2);

    dispatcher.clear_handlers();
    assert_eq!(dispatcher.handler_count(), 0);
}

#[test]
fn test_dispatch_reaches_all_handlers() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = EventDispatcher::new();

    for _ in 0..3 {
        let count_clone = count.clone();
        dispatcher.add_handler(Arc::new(CallbackHandler::new(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        })));
    }

    dispatcher.dispatch(ChatEvent::StateChanged {
        state: ConnectionState::Connecting,
    });
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_event_variants_carry_payloads() {
    let event = ChatEvent::StateChanged {
        state: ConnectionState::Connected,
    };
    assert!(matches!(event, ChatEvent::StateChanged { .. }));

    let event = ChatEvent::DecodeFailed {
        error: "bad timestamp".into(),
    };
    assert!(matches!(event, ChatEvent::DecodeFailed { .. }));
}
