//! Transport Trait
//!
//! Platform-agnostic abstraction over the external streaming-socket
//! library. The transport owns the raw connection; everything above it
//! consumes the [`TransportEvent`] stream in arrival order.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::NetworkError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, NetworkError>;

/// Default content type attached to connection requests.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// An opaque bearer token attached to every connection attempt.
///
/// The token is injected at runtime (from a secret store, environment, or
/// keychain); there is no default value anywhere in this crate. `Debug`
/// and `Display` redact, and the backing memory is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Wraps a bearer token supplied by the caller.
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    /// Exposes the raw token for header construction only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Configuration for transport connections.
///
/// The credential is deliberately not part of the config so that configs
/// can be logged and serialized freely.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Endpoint URL (`ws://` or `wss://`).
    pub url: String,
    /// Content type header attached to the connection request.
    pub content_type: String,
    /// Bounded wait for the connection handshake, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read/write timeout in milliseconds. Reads returning within this
    /// window without data produce no event.
    pub io_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            url: String::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            connect_timeout_ms: 5_000,
            io_timeout_ms: 30_000,
        }
    }
}

impl TransportConfig {
    /// Creates a config for the given endpoint with default timeouts.
    pub fn for_url(url: &str) -> Self {
        TransportConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }
}

/// Events delivered by the transport, in arrival order.
///
/// This mirrors the external library's callback surface one-to-one so the
/// dispatch above it can match exhaustively. Several variants are inert
/// by design (keep-alive and transport-health chatter): they must be
/// acknowledged but produce no state transition and no log mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is open and negotiated. Carries response headers.
    Connected { headers: Vec<(String, String)> },
    /// The peer closed the connection.
    Disconnected { reason: String, code: u16 },
    /// A text frame arrived.
    Text(String),
    /// A binary frame arrived. Inert: this protocol is text-only.
    Binary(Vec<u8>),
    /// Keep-alive ping. The transport answers it itself; inert above.
    Ping(Vec<u8>),
    /// Keep-alive pong. Inert.
    Pong(Vec<u8>),
    /// Transport viability changed. Inert.
    ViabilityChanged(bool),
    /// The transport suggests reconnecting. Inert; reconnection is an
    /// explicit policy, never implicit.
    ReconnectSuggested(bool),
    /// The connection attempt was cancelled.
    Cancelled,
    /// A connection-level error occurred.
    Error(String),
}

/// Transport trait for the underlying full-duplex streaming connection.
///
/// # Synchronous Interface
///
/// This trait uses synchronous methods and a single-owner `&mut self`
/// discipline. All events are delivered sequentially through
/// [`poll_event`](Transport::poll_event); no callback re-entrancy exists,
/// so connection state and the message log above never see concurrent
/// mutation.
pub trait Transport: Send {
    /// Opens the underlying connection, attaching the credential and the
    /// configured content type to the request.
    ///
    /// Idempotent while already open. Success means the handshake
    /// completed; a [`TransportEvent::Connected`] event follows from
    /// `poll_event`.
    fn connect(&mut self, config: &TransportConfig, credential: &Credential)
        -> TransportResult<()>;

    /// Closes the underlying connection.
    ///
    /// Safe to call in any state, including mid-handshake.
    fn disconnect(&mut self) -> TransportResult<()>;

    /// Writes one text frame to the outbound stream.
    ///
    /// Fire-and-forget: completion of the write does not imply delivery.
    fn write_text(&mut self, frame: &str) -> TransportResult<()>;

    /// Returns the next pending event, or `Ok(None)` when no event is
    /// available within the io timeout.
    fn poll_event(&mut self) -> TransportResult<Option<TransportEvent>>;

    /// Returns true while the underlying connection is open.
    fn is_open(&self) -> bool;
}
