//! Chatwire Core Library
//!
//! Persistent, single-connection real-time chat client: maintains one
//! logical connection to a relay, serializes outbound intents into tagged
//! JSON envelopes, decodes inbound envelopes into typed events, and
//! publishes state and message-log changes to subscribers.

pub mod client;
pub mod network;
pub mod protocol;

pub use client::{
    CallbackHandler, ChatClient, ChatEvent, ClientConfig, ClientError, ClientResult,
    EventDispatcher, EventHandler, MessageLog,
};
pub use network::{
    Connection, ConnectionState, Credential, MockTransport, NetworkError, OfflineSendPolicy,
    ReconnectPolicy, Transport, TransportConfig, TransportEvent, TransportResult,
};
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use network::WebSocketTransport;
pub use protocol::{DecodeError, InboundEnvelope, OutboundIntent, WireTimestampFormat};
