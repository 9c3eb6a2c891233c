// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network + Transport Layer
//!
//! The single logical connection to the chat relay.
//!
//! # Architecture
//!
//! - **Transport trait**: platform-agnostic interface over the external
//!   streaming-socket library, delivering [`TransportEvent`]s in order
//! - **Connection state machine**: lifecycle, send-capability, and the
//!   named reconnect/offline-send policies
//! - **WebSocket transport**: tungstenite implementation for production
//! - **Mock transport**: scripted implementation for tests

#[cfg(feature = "testing")]
pub mod connection;
#[cfg(not(feature = "testing"))]
mod connection;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod mock;
#[cfg(not(feature = "testing"))]
mod mock;

#[cfg(feature = "testing")]
pub mod transport;
#[cfg(not(feature = "testing"))]
mod transport;

#[cfg(all(
    feature = "testing",
    any(feature = "network-native-tls", feature = "network-rustls")
))]
pub mod websocket;
#[cfg(all(
    not(feature = "testing"),
    any(feature = "network-native-tls", feature = "network-rustls")
))]
mod websocket;

// Error types
pub use error::NetworkError;

// Transport abstraction
pub use transport::{
    Credential, Transport, TransportConfig, TransportEvent, TransportResult,
    DEFAULT_CONTENT_TYPE,
};

// Connection state machine
pub use connection::{Connection, ConnectionState, OfflineSendPolicy, ReconnectPolicy};

// Mock transport for testing
pub use mock::MockTransport;

// WebSocket transport for production
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use websocket::WebSocketTransport;
