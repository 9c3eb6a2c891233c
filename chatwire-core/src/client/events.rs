//! Event System
//!
//! Subscription mechanism for client observers. A presentation layer
//! registers handlers and reacts to state and log changes without
//! polling; nothing here depends on any particular UI framework.

use std::sync::Arc;

use crate::network::ConnectionState;

/// Events published by the chat client.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The connection state changed.
    StateChanged {
        /// The new connection state.
        state: ConnectionState,
    },

    /// A decoded message was appended to the message log.
    MessageAppended {
        /// The message text.
        text: String,
    },

    /// An inbound frame failed to decode and was dropped.
    ///
    /// The connection and the message log are unaffected.
    DecodeFailed {
        /// Error description.
        error: String,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive chat events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: ChatEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(ChatEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(ChatEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(ChatEvent) + Send + Sync,
{
    fn on_event(&self, event: ChatEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: ChatEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
