// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outbound Intent Types
//!
//! Each user action maps to exactly one wire envelope, tagged by a fixed
//! `action` discriminant. Intents are immutable once constructed and are
//! consumed by the codec immediately.

use serde::Serialize;

/// An outbound application intent.
///
/// Serializes directly into the wire envelope:
///
/// - `SendMessage` → `{"action":"sendmessage","data":...,"userId":...,"transactionID":...}`
/// - `LoadHistory` → `{"action":"load","transactionID":...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
pub enum OutboundIntent {
    /// Post a chat message.
    #[serde(rename = "sendmessage")]
    SendMessage {
        /// Message text.
        data: String,
        /// Author identifier.
        #[serde(rename = "userId")]
        user_id: String,
        /// Session correlation token. Generated but not matched against
        /// responses; sends are fire-and-forget.
        #[serde(rename = "transactionID")]
        transaction_id: String,
    },

    /// Request the message history from the relay.
    #[serde(rename = "load")]
    LoadHistory {
        #[serde(rename = "transactionID")]
        transaction_id: String,
    },
}

impl OutboundIntent {
    /// Creates a `sendmessage` intent.
    pub fn send_message(data: &str, user_id: &str, transaction_id: &str) -> Self {
        OutboundIntent::SendMessage {
            data: data.to_string(),
            user_id: user_id.to_string(),
            transaction_id: transaction_id.to_string(),
        }
    }

    /// Creates a `load` intent.
    pub fn load_history(transaction_id: &str) -> Self {
        OutboundIntent::LoadHistory {
            transaction_id: transaction_id.to_string(),
        }
    }

    /// Returns the wire discriminant for this intent.
    pub fn action(&self) -> &'static str {
        match self {
            OutboundIntent::SendMessage { .. } => "sendmessage",
            OutboundIntent::LoadHistory { .. } => "load",
        }
    }

    /// Encodes the intent into its wire envelope.
    ///
    /// Serialization of these string-only shapes cannot fail in practice;
    /// the error is still propagated rather than unwrapped.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
