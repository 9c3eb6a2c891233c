// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inbound Envelope Decoding
//!
//! Server-originated text frames carry `{"data":...,"userID":...,
//! "createdDatetime":...}`. Decoding is pure: a failure returns an error
//! and nothing else happens.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::error::DecodeError;
use super::timestamp::WireTimestampFormat;

/// Wire shape of an inbound frame, before timestamp validation.
#[derive(Debug, Deserialize)]
struct RawInbound {
    data: String,
    #[serde(rename = "userID")]
    user_id: String,
    #[serde(rename = "createdDatetime")]
    created_datetime: String,
}

/// A decoded server-originated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEnvelope {
    /// Message text.
    pub data: String,
    /// Author identifier.
    pub user_id: String,
    /// Creation time, validated against the configured wire format.
    pub created_at: DateTime<FixedOffset>,
}

impl InboundEnvelope {
    /// Decodes a raw text frame.
    ///
    /// Returns [`DecodeError::MalformedPayload`] when the JSON shape is
    /// wrong or a required field is missing, and
    /// [`DecodeError::BadTimestamp`] when `createdDatetime` does not
    /// match the configured format.
    pub fn decode(raw: &str, wire_time: &WireTimestampFormat) -> Result<Self, DecodeError> {
        let frame: RawInbound = serde_json::from_str(raw)
            .map_err(|e| DecodeError::MalformedPayload(e.to_string()))?;

        let created_at = wire_time.parse(&frame.created_datetime)?;

        Ok(InboundEnvelope {
            data: frame.data,
            user_id: frame.user_id,
            created_at,
        })
    }
}
