// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Codec Error Types

use thiserror::Error;

/// Errors produced while decoding an inbound frame.
///
/// Decode failures are isolated per frame: the caller logs and drops the
/// frame without touching connection state or the message log.
#[derive(Error, Debug, Clone)]
pub enum DecodeError {
    /// The frame is not valid JSON or a required field is absent.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The `createdDatetime` field does not match the configured wire format.
    #[error("bad timestamp: {0}")]
    BadTimestamp(String),
}
