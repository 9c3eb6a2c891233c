// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Facade
//!
//! High-level API for the chat client.
//!
//! # Overview
//!
//! The facade coordinates:
//! - Connection lifecycle (connect, disconnect, reconnect policy)
//! - Outbound intents (send message, load history)
//! - The in-memory message log
//! - Event publication to subscribers
//!
//! # Module Structure
//!
//! - [`error`] - Error types for the client layer
//! - [`config`] - Configuration types
//! - [`events`] - Event system for subscribers
//! - [`chat_client`] - The client facade and message log

#[cfg(feature = "testing")]
pub mod chat_client;
#[cfg(not(feature = "testing"))]
mod chat_client;

#[cfg(feature = "testing")]
pub mod config;
#[cfg(not(feature = "testing"))]
mod config;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod events;
#[cfg(not(feature = "testing"))]
mod events;

// Error types
pub use error::{ClientError, ClientResult};

// Configuration
pub use config::ClientConfig;

// Events
pub use events::{CallbackHandler, ChatEvent, EventDispatcher, EventHandler};

// Facade
pub use chat_client::{ChatClient, MessageLog};
