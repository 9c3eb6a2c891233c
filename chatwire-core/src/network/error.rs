// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Error Types

use thiserror::Error;

/// Errors from the transport layer.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// Could not establish a connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection was closed by the peer.
    #[error("Connection closed")]
    ConnectionClosed,

    /// The connection attempt exceeded its bounded wait.
    #[error("Connection timeout")]
    Timeout,

    /// An operation required an open connection.
    #[error("Transport not connected")]
    NotConnected,

    /// A write to the outbound stream failed.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Reading from the inbound stream failed.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// The endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
