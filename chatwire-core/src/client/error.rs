// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Error Types
//!
//! Unified error type for the client facade.

use thiserror::Error;

use crate::network::NetworkError;
use crate::protocol::DecodeError;

/// Unified error type for client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// A send was attempted while not send-capable (under the `Drop`
    /// offline-send policy).
    #[error("not connected")]
    NotConnected,

    /// An inbound frame failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An outbound intent failed to serialize.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid operation in current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
