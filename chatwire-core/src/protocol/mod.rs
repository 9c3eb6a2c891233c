// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Envelope Codec
//!
//! Wire protocol for the chat relay. Outbound application intents are
//! serialized into JSON envelopes tagged by an `action` discriminant;
//! inbound frames are decoded into typed envelopes with strict timestamp
//! validation. Encoding and decoding are pure functions with no access to
//! connection state or the message log.

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod inbound;
#[cfg(not(feature = "testing"))]
mod inbound;

#[cfg(feature = "testing")]
pub mod intent;
#[cfg(not(feature = "testing"))]
mod intent;

#[cfg(feature = "testing")]
pub mod timestamp;
#[cfg(not(feature = "testing"))]
mod timestamp;

// Error types
pub use error::DecodeError;

// Inbound envelope
pub use inbound::InboundEnvelope;

// Outbound intents
pub use intent::OutboundIntent;

// Wire timestamp configuration
pub use timestamp::WireTimestampFormat;
