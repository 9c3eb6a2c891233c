// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Connection State Machine
//!
//! Tracks the lifecycle of the single logical connection. Transitions are
//! driven exclusively by transport events; the machine owns the derived
//! send-capable flag and the reconnection policy, and holds no queue of
//! unsent messages.

use std::time::Duration;

use tracing::debug;

use super::transport::TransportEvent;

/// Connection lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Initial state, before the first connect.
    Idle,
    /// Connection attempt in progress.
    Connecting,
    /// Connected and send-capable.
    Connected,
    /// The peer closed the connection.
    Disconnected { reason: String, code: u16 },
    /// A connection-level error occurred.
    Failed { error: String },
    /// The connection was cancelled locally.
    Cancelled,
}

impl ConnectionState {
    /// Returns true for states a connection does not leave on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConnectionState::Disconnected { .. }
                | ConnectionState::Failed { .. }
                | ConnectionState::Cancelled
        )
    }
}

/// Reconnection policy, layered on top of `Disconnected`/`Failed`
/// transitions. Never implicit: the machine only reports when and how
/// long to wait; the caller schedules the actual reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReconnectPolicy {
    /// No automatic reconnection.
    #[default]
    None,
    /// Exponential backoff, capped at `max_attempts` tries.
    ExponentialBackoff {
        /// Base delay for the first attempt, in milliseconds.
        base_delay_ms: u64,
        /// Maximum attempts before giving up.
        max_attempts: u32,
    },
}

/// Policy for sends attempted while not send-capable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OfflineSendPolicy {
    /// Fail the send with `NotConnected`. Nothing reaches the transport.
    #[default]
    Drop,
    /// Queue up to `max_queued` frames and flush them in order on the
    /// next transition into `Connected`.
    Buffer { max_queued: usize },
}

/// The connection state machine.
pub struct Connection {
    state: ConnectionState,
    send_capable: bool,
    reconnect: ReconnectPolicy,
    reconnect_attempt: u32,
}

impl Connection {
    /// Creates a machine in `Idle` with the given reconnect policy.
    pub fn new(reconnect: ReconnectPolicy) -> Self {
        Connection {
            state: ConnectionState::Idle,
            send_capable: false,
            reconnect,
            reconnect_attempt: 0,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Returns true while sends are permitted.
    pub fn is_send_capable(&self) -> bool {
        self.send_capable
    }

    /// Marks the start of a connection attempt.
    ///
    /// Returns false without transitioning when already `Connecting` or
    /// `Connected`, making connect idempotent for the caller.
    pub fn begin_connect(&mut self) -> bool {
        if matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Connected
        ) {
            return false;
        }
        self.state = ConnectionState::Connecting;
        true
    }

    /// Applies a lifecycle transport event.
    ///
    /// Returns the new state when a transition occurred. Inert events
    /// (text, binary, keep-alive, viability, reconnect-suggestion) return
    /// `None` and change nothing; text frames are the codec's concern,
    /// not the state machine's.
    pub fn apply(&mut self, event: &TransportEvent) -> Option<ConnectionState> {
        let next = match event {
            TransportEvent::Connected { .. } => {
                self.reconnect_attempt = 0;
                ConnectionState::Connected
            }
            TransportEvent::Disconnected { reason, code } => ConnectionState::Disconnected {
                reason: reason.clone(),
                code: *code,
            },
            TransportEvent::Error(error) => ConnectionState::Failed {
                error: error.clone(),
            },
            TransportEvent::Cancelled => ConnectionState::Cancelled,
            TransportEvent::Text(_)
            | TransportEvent::Binary(_)
            | TransportEvent::Ping(_)
            | TransportEvent::Pong(_)
            | TransportEvent::ViabilityChanged(_)
            | TransportEvent::ReconnectSuggested(_) => return None,
        };

        self.transition(next)
    }

    /// Records a locally requested cancellation.
    ///
    /// No-op when already terminal or never connected, so a second
    /// disconnect produces no second transition.
    pub fn cancel(&mut self) -> Option<ConnectionState> {
        if self.state.is_terminal() || self.state == ConnectionState::Idle {
            return None;
        }
        self.transition(ConnectionState::Cancelled)
    }

    /// Reports the delay before the next reconnect attempt, consuming one
    /// attempt from the budget.
    ///
    /// Returns `None` when the policy is `None`, the budget is exhausted,
    /// or the connection ended in `Cancelled` (a local disconnect never
    /// auto-reconnects).
    pub fn next_reconnect_delay(&mut self) -> Option<Duration> {
        if !matches!(
            self.state,
            ConnectionState::Disconnected { .. } | ConnectionState::Failed { .. }
        ) {
            return None;
        }

        match self.reconnect {
            ReconnectPolicy::None => None,
            ReconnectPolicy::ExponentialBackoff {
                base_delay_ms,
                max_attempts,
            } => {
                if self.reconnect_attempt >= max_attempts {
                    return None;
                }
                let delay_ms = base_delay_ms * (1 << self.reconnect_attempt.min(6));
                self.reconnect_attempt += 1;
                Some(Duration::from_millis(delay_ms))
            }
        }
    }

    /// Returns the current reconnect attempt count.
    pub fn reconnect_attempt(&self) -> u32 {
        self.reconnect_attempt
    }

    // Every transition leaving Connected flips send_capable in the same
    // call, before the new state becomes observable.
    fn transition(&mut self, next: ConnectionState) -> Option<ConnectionState> {
        if self.state == next {
            return None;
        }
        self.send_capable = next == ConnectionState::Connected;
        debug!(from = ?self.state, to = ?next, "connection transition");
        self.state = next;
        Some(self.state.clone())
    }
}
