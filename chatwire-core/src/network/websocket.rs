// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebSocket Transport
//!
//! Real transport implementation using tungstenite. Supports both
//! native-tls and rustls TLS backends. Translates tungstenite messages
//! into [`TransportEvent`]s; keep-alive pings are answered here and still
//! surfaced as inert events so the dispatch above stays auditable.

use std::collections::VecDeque;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

#[cfg(all(feature = "network-native-tls", not(feature = "network-rustls")))]
use native_tls::TlsConnector;

#[cfg(feature = "network-rustls")]
use rustls::pki_types::ServerName;
#[cfg(feature = "network-rustls")]
use std::sync::Arc;

use tungstenite::client::IntoClientRequest;
use tungstenite::http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::error::NetworkError;
use super::transport::{
    Credential, Transport, TransportConfig, TransportEvent, TransportResult,
};

/// Close code reported when the peer sent no close frame.
const CLOSE_CODE_NO_STATUS: u16 = 1005;

/// WebSocket transport for the chat relay.
///
/// Supports both ws:// (plaintext) and wss:// (TLS) connections.
pub struct WebSocketTransport {
    socket: Option<WebSocket<MaybeTlsStream<TcpStream>>>,
    pending: VecDeque<TransportEvent>,
    open: bool,
}

impl WebSocketTransport {
    /// Creates a new WebSocket transport.
    pub fn new() -> Self {
        WebSocketTransport {
            socket: None,
            pending: VecDeque::new(),
            open: false,
        }
    }

    /// Parses a WebSocket URL into host and port.
    fn parse_url(url: &str) -> Result<(String, u16, bool), NetworkError> {
        let is_tls = url.starts_with("wss://");
        let url_without_scheme = url
            .strip_prefix("wss://")
            .or_else(|| url.strip_prefix("ws://"))
            .ok_or_else(|| {
                NetworkError::InvalidUrl("expected ws:// or wss:// scheme".into())
            })?;

        let host_port = url_without_scheme
            .split('/')
            .next()
            .unwrap_or(url_without_scheme);

        let (host, port) = if let Some(colon_pos) = host_port.rfind(':') {
            let host = &host_port[..colon_pos];
            let port_str = &host_port[colon_pos + 1..];
            let port: u16 = port_str
                .parse()
                .map_err(|_| NetworkError::InvalidUrl(format!("invalid port: {}", port_str)))?;
            (host.to_string(), port)
        } else {
            let default_port = if is_tls { 443 } else { 80 };
            (host_port.to_string(), default_port)
        };

        Ok((host, port, is_tls))
    }

    /// Opens a TCP stream within the bounded connect timeout.
    fn connect_tcp(addr: &str, timeout_ms: u64) -> Result<TcpStream, NetworkError> {
        let socket_addr = addr
            .to_socket_addrs()
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?
            .next()
            .ok_or_else(|| NetworkError::ConnectionFailed(format!("no address for {}", addr)))?;

        TcpStream::connect_timeout(&socket_addr, Duration::from_millis(timeout_ms)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                NetworkError::Timeout
            } else {
                NetworkError::ConnectionFailed(e.to_string())
            }
        })
    }

    /// Create a TLS stream using native-tls
    #[cfg(all(feature = "network-native-tls", not(feature = "network-rustls")))]
    fn create_tls_stream(
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<MaybeTlsStream<TcpStream>, NetworkError> {
        let connector = TlsConnector::new()
            .map_err(|e| NetworkError::ConnectionFailed(format!("TLS error: {}", e)))?;
        let tls_stream = connector
            .connect(host, tcp_stream)
            .map_err(|e| NetworkError::ConnectionFailed(format!("TLS handshake failed: {}", e)))?;
        Ok(MaybeTlsStream::NativeTls(tls_stream))
    }

    /// Create a TLS stream using rustls
    #[cfg(feature = "network-rustls")]
    fn create_tls_stream(
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<MaybeTlsStream<TcpStream>, NetworkError> {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let server_name: ServerName<'_> = host
            .try_into()
            .map_err(|_| NetworkError::ConnectionFailed(format!("invalid server name: {}", host)))?;

        let tls_conn = rustls::ClientConnection::new(Arc::new(config), server_name.to_owned())
            .map_err(|e| NetworkError::ConnectionFailed(format!("TLS setup failed: {}", e)))?;

        let tls_stream = rustls::StreamOwned::new(tls_conn, tcp_stream);
        Ok(MaybeTlsStream::Rustls(tls_stream))
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for WebSocketTransport {
    fn connect(
        &mut self,
        config: &TransportConfig,
        credential: &Credential,
    ) -> TransportResult<()> {
        if self.open {
            return Ok(());
        }

        let (host, port, is_tls) = Self::parse_url(&config.url)?;
        let addr = format!("{}:{}", host, port);

        let tcp_stream = Self::connect_tcp(&addr, config.connect_timeout_ms)?;

        tcp_stream
            .set_read_timeout(Some(Duration::from_millis(config.io_timeout_ms)))
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;
        tcp_stream
            .set_write_timeout(Some(Duration::from_millis(config.io_timeout_ms)))
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;

        let stream: MaybeTlsStream<TcpStream> = if is_tls {
            Self::create_tls_stream(&host, tcp_stream)?
        } else {
            MaybeTlsStream::Plain(tcp_stream)
        };

        // Upgrade request carrying the bearer credential and content type.
        let mut request = config.url.as_str().into_client_request().map_err(|e| {
            NetworkError::InvalidUrl(format!("invalid WebSocket request: {}", e))
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| NetworkError::ConnectionFailed("credential not header-safe".into()))?;
        auth.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, auth);

        let content_type = HeaderValue::from_str(&config.content_type).map_err(|_| {
            NetworkError::ConnectionFailed("content type not header-safe".into())
        })?;
        request.headers_mut().insert(CONTENT_TYPE, content_type);

        let (socket, response) = tungstenite::client(request, stream).map_err(|e| {
            NetworkError::ConnectionFailed(format!("WebSocket handshake failed: {}", e))
        })?;

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        self.socket = Some(socket);
        self.open = true;
        self.pending.push_back(TransportEvent::Connected { headers });

        Ok(())
    }

    fn disconnect(&mut self) -> TransportResult<()> {
        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close(None); // Ignore errors on close
        }
        self.open = false;
        Ok(())
    }

    fn write_text(&mut self, frame: &str) -> TransportResult<()> {
        let socket = self.socket.as_mut().ok_or(NetworkError::NotConnected)?;

        socket.send(Message::Text(frame.to_string())).map_err(|e| {
            if matches!(
                e,
                tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
            ) {
                self.open = false;
                NetworkError::ConnectionClosed
            } else {
                NetworkError::SendFailed(e.to_string())
            }
        })?;

        socket
            .flush()
            .map_err(|e| NetworkError::SendFailed(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn poll_event(&mut self) -> TransportResult<Option<TransportEvent>> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }

        let socket = self.socket.as_mut().ok_or(NetworkError::NotConnected)?;

        // Close already surfaced; nothing more will arrive.
        if !self.open {
            return Ok(None);
        }

        match socket.read() {
            Ok(Message::Text(frame)) => Ok(Some(TransportEvent::Text(frame))),
            Ok(Message::Binary(data)) => Ok(Some(TransportEvent::Binary(data))),
            Ok(Message::Ping(data)) => {
                // Answer the keep-alive, then surface the inert event.
                let _ = socket.send(Message::Pong(data.clone()));
                Ok(Some(TransportEvent::Ping(data)))
            }
            Ok(Message::Pong(data)) => Ok(Some(TransportEvent::Pong(data))),
            Ok(Message::Close(frame)) => {
                self.open = false;
                let (reason, code) = match frame {
                    Some(f) => (f.reason.into_owned(), u16::from(f.code)),
                    None => (String::new(), CLOSE_CODE_NO_STATUS),
                };
                Ok(Some(TransportEvent::Disconnected { reason, code }))
            }
            Ok(Message::Frame(_)) => {
                // Raw frames shouldn't reach here
                Ok(None)
            }
            Err(tungstenite::Error::Io(ref e))
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                // No message within the io timeout
                Ok(None)
            }
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                if self.open {
                    self.open = false;
                    Ok(Some(TransportEvent::Disconnected {
                        reason: "connection closed".into(),
                        code: CLOSE_CODE_NO_STATUS,
                    }))
                } else {
                    Err(NetworkError::ConnectionClosed)
                }
            }
            Err(e) => {
                self.open = false;
                Ok(Some(TransportEvent::Error(e.to_string())))
            }
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

// INLINE_TEST_REQUIRED: Tests private parse_url function for URL parsing logic
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_wss() {
        let (host, port, is_tls) = WebSocketTransport::parse_url("wss://chat.example.com").unwrap();
        assert_eq!(host, "chat.example.com");
        assert_eq!(port, 443);
        assert!(is_tls);
    }

    #[test]
    fn test_parse_url_ws() {
        let (host, port, is_tls) = WebSocketTransport::parse_url("ws://localhost:8080").unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 8080);
        assert!(!is_tls);
    }

    #[test]
    fn test_parse_url_with_path() {
        let (host, port, is_tls) =
            WebSocketTransport::parse_url("wss://chat.example.com:9000/prod").unwrap();
        assert_eq!(host, "chat.example.com");
        assert_eq!(port, 9000);
        assert!(is_tls);
    }

    #[test]
    fn test_parse_url_invalid_scheme() {
        let result = WebSocketTransport::parse_url("http://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_new_transport_not_open() {
        let transport = WebSocketTransport::new();
        assert!(!transport.is_open());
    }

    #[test]
    fn test_write_without_connect_fails() {
        let mut transport = WebSocketTransport::new();
        let result = transport.write_text("{\"action\":\"load\"}");
        assert!(matches!(result, Err(NetworkError::NotConnected)));
    }

    #[test]
    fn test_poll_without_connect_fails() {
        let mut transport = WebSocketTransport::new();
        let result = transport.poll_event();
        assert!(matches!(result, Err(NetworkError::NotConnected)));
    }

    #[test]
    fn test_disconnect_when_not_connected_ok() {
        let mut transport = WebSocketTransport::new();
        assert!(transport.disconnect().is_ok());
        assert!(!transport.is_open());
    }
}
