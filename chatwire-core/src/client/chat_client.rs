// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat Client Facade
//!
//! Public entry point: owns the transport, the connection state machine,
//! and the message log, and publishes state/log changes to subscribers.
//!
//! # Example
//!
//! ```ignore
//! use chatwire_core::{ChatClient, ClientConfig, Credential, MockTransport};
//!
//! let config = ClientConfig::for_url("wss://chat.example.com/prod");
//! let credential = Credential::new(std::env::var("CHATWIRE_TOKEN")?);
//! let mut client = ChatClient::new(MockTransport::new(), config, credential);
//!
//! client.connect()?;
//! client.process_events()?;
//! client.send_message("hello", "user001")?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::network::{
    Connection, ConnectionState, Credential, OfflineSendPolicy, Transport, TransportEvent,
};
use crate::protocol::{InboundEnvelope, OutboundIntent};

use super::config::ClientConfig;
use super::error::{ClientError, ClientResult};
use super::events::{ChatEvent, EventDispatcher, EventHandler};

/// Ordered, append-only log of decoded message texts.
///
/// Grows monotonically for the lifetime of the client; there is no
/// eviction in this core.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<String>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        MessageLog::default()
    }

    /// Returns the messages in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn append(&mut self, text: String) {
        self.entries.push(text);
    }
}

/// The chat client.
///
/// Exactly one logical connection per instance. All mutation happens
/// through `&mut self`; transport events are pumped and applied in
/// arrival order by [`process_events`](ChatClient::process_events), so
/// state and log never see concurrent mutation. Callers driving the
/// client from multiple threads wrap it in their own mutex.
pub struct ChatClient<T: Transport> {
    transport: T,
    config: ClientConfig,
    credential: Credential,
    connection: Connection,
    log: MessageLog,
    events: EventDispatcher,
    /// Session correlation token attached to outbound envelopes.
    /// Regenerated per connect; never matched against responses.
    transaction_id: String,
    /// Frames queued under the buffer offline-send policy.
    outbox: Vec<String>,
    /// Set once `disconnect` completes; late transport events are
    /// swallowed so subscribers see nothing after the terminal transition.
    closing: bool,
}

impl<T: Transport> ChatClient<T> {
    /// Creates a new client.
    ///
    /// The credential is attached to every connection attempt and never
    /// logged or exposed through the message log.
    pub fn new(transport: T, config: ClientConfig, credential: Credential) -> Self {
        let connection = Connection::new(config.reconnect.clone());

        ChatClient {
            transport,
            config,
            credential,
            connection,
            log: MessageLog::new(),
            events: EventDispatcher::new(),
            transaction_id: Uuid::new_v4().to_string(),
            outbox: Vec::new(),
            closing: false,
        }
    }

    /// Adds an event handler.
    pub fn add_event_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.events.add_handler(handler);
    }

    /// Opens the connection.
    ///
    /// Idempotent while already `Connecting` or `Connected`: the
    /// underlying transport is not opened a second time. Completion is
    /// observed via a `StateChanged { Connected }` event, not the return
    /// value.
    pub fn connect(&mut self) -> ClientResult<()> {
        if !self.connection.begin_connect() {
            return Ok(());
        }

        self.closing = false;
        self.transaction_id = Uuid::new_v4().to_string();
        self.publish_state(ConnectionState::Connecting);
        info!(url = %self.config.transport.url, "connecting");

        if let Err(e) = self.transport.connect(&self.config.transport, &self.credential) {
            warn!(error = %e, "connect attempt failed");
            if let Some(state) = self
                .connection
                .apply(&TransportEvent::Error(e.to_string()))
            {
                self.publish_state(state);
            }
            return Err(e.into());
        }

        Ok(())
    }

    /// Closes the connection.
    ///
    /// Safe from any state; a no-op when never connected or already
    /// terminal, so calling it twice produces exactly one terminal
    /// transition. After it returns, subscribers observe no further
    /// transitions.
    pub fn disconnect(&mut self) -> ClientResult<()> {
        if self.closing {
            return Ok(());
        }

        let _ = self.transport.disconnect();
        self.closing = true;

        if let Some(state) = self.connection.cancel() {
            info!("disconnected");
            self.publish_state(state);
        }

        Ok(())
    }

    /// Sends a chat message.
    ///
    /// Only valid while send-capable; otherwise the offline-send policy
    /// applies (`NotConnected` under `Drop`). Fire-and-forget: a
    /// successful return does not imply delivery.
    pub fn send_message(&mut self, text: &str, user_id: &str) -> ClientResult<()> {
        let intent = OutboundIntent::send_message(text, user_id, &self.transaction_id);
        self.dispatch_intent(&intent)
    }

    /// Requests the message history from the relay.
    pub fn load_history(&mut self) -> ClientResult<()> {
        let intent = OutboundIntent::load_history(&self.transaction_id);
        self.dispatch_intent(&intent)
    }

    /// Pumps pending transport events through the dispatch, in arrival
    /// order. Returns the number of events consumed.
    pub fn process_events(&mut self) -> ClientResult<usize> {
        // Nothing to pump before the first connect, and nothing after a
        // local disconnect: the terminal transition has already been
        // delivered and late transport events must stay invisible.
        if self.closing || matches!(self.connection.state(), ConnectionState::Idle) {
            return Ok(0);
        }

        let mut handled = 0;
        while let Some(event) = self.transport.poll_event()? {
            handled += 1;
            self.handle_event(event);
        }

        Ok(handled)
    }

    /// Reports the backoff delay before the next reconnect attempt, per
    /// the configured policy. The caller waits, then calls
    /// [`connect`](ChatClient::connect) again.
    pub fn next_reconnect_delay(&mut self) -> Option<Duration> {
        self.connection.next_reconnect_delay()
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.connection.state().clone()
    }

    /// Returns true while sends are permitted.
    pub fn is_send_capable(&self) -> bool {
        self.connection.is_send_capable()
    }

    /// Returns the decoded messages in insertion order.
    pub fn messages(&self) -> &[String] {
        self.log.as_slice()
    }

    /// Returns the session transaction identifier.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Transport adapter dispatch: one exhaustive match over the external
    /// transport's event surface. Inert variants are explicit no-op arms.
    fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected { ref headers } => {
                debug!(header_count = headers.len(), "transport open");
                if let Some(state) = self.connection.apply(&event) {
                    self.publish_state(state);
                }
                self.flush_outbox();
            }
            TransportEvent::Disconnected { .. }
            | TransportEvent::Error(_)
            | TransportEvent::Cancelled => {
                if let Some(state) = self.connection.apply(&event) {
                    self.publish_state(state);
                }
            }
            TransportEvent::Text(frame) => self.handle_text(&frame),
            // Inert paths: acknowledged, no state transition, no log
            // mutation.
            TransportEvent::Binary(data) => {
                debug!(len = data.len(), "ignoring binary frame");
            }
            TransportEvent::Ping(_) => {}
            TransportEvent::Pong(_) => {}
            TransportEvent::ViabilityChanged(_) => {}
            TransportEvent::ReconnectSuggested(_) => {}
        }
    }

    /// Decodes one inbound text frame. Failures are logged and dropped;
    /// they never affect connection state or other messages.
    fn handle_text(&mut self, frame: &str) {
        match InboundEnvelope::decode(frame, &self.config.wire_time) {
            Ok(envelope) => {
                debug!(user_id = %envelope.user_id, "message received");
                self.log.append(envelope.data.clone());
                self.events.dispatch(ChatEvent::MessageAppended {
                    text: envelope.data,
                });
            }
            Err(e) => {
                warn!(error = %e, "dropping undecodable frame");
                self.events.dispatch(ChatEvent::DecodeFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    fn dispatch_intent(&mut self, intent: &OutboundIntent) -> ClientResult<()> {
        let frame = intent
            .to_json()
            .map_err(|e| ClientError::Encode(e.to_string()))?;

        if self.connection.is_send_capable() {
            self.transport.write_text(&frame)?;
            debug!(action = intent.action(), "sent frame");
            return Ok(());
        }

        match self.config.offline_send {
            OfflineSendPolicy::Drop => Err(ClientError::NotConnected),
            OfflineSendPolicy::Buffer { max_queued } => {
                if self.outbox.len() >= max_queued {
                    Err(ClientError::InvalidState("offline buffer full".into()))
                } else {
                    debug!(action = intent.action(), queued = self.outbox.len() + 1,
                        "buffered frame while offline");
                    self.outbox.push(frame);
                    Ok(())
                }
            }
        }
    }

    /// Flushes frames buffered while offline, in order. A frame that
    /// fails to write goes back to the front of the queue.
    fn flush_outbox(&mut self) {
        let mut pending = std::mem::take(&mut self.outbox);
        while !pending.is_empty() && self.connection.is_send_capable() {
            let frame = pending.remove(0);
            if let Err(e) = self.transport.write_text(&frame) {
                warn!(error = %e, "flush interrupted");
                pending.insert(0, frame);
                break;
            }
        }
        self.outbox = pending;
    }

    fn publish_state(&self, state: ConnectionState) {
        self.events.dispatch(ChatEvent::StateChanged { state });
    }
}
