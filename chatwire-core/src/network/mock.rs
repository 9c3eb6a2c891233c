// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Transport
//!
//! In-memory transport for tests: scripted event queue, captured outbound
//! frames, and failure injection. Connecting queues a `Connected` event by
//! default so tests can drive the full open path; disable it to script the
//! handshake by hand.

use std::collections::VecDeque;

use super::error::NetworkError;
use super::transport::{
    Credential, Transport, TransportConfig, TransportEvent, TransportResult,
};

/// Mock transport for testing.
pub struct MockTransport {
    open: bool,
    emit_connect_event: bool,
    events: VecDeque<TransportEvent>,
    written: Vec<String>,
    connect_error: Option<NetworkError>,
    write_error: Option<NetworkError>,
    connect_calls: u32,
    disconnect_calls: u32,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        MockTransport {
            open: false,
            emit_connect_event: true,
            events: VecDeque::new(),
            written: Vec::new(),
            connect_error: None,
            write_error: None,
            connect_calls: 0,
            disconnect_calls: 0,
        }
    }

    /// Creates a mock that does not queue a `Connected` event on connect.
    pub fn without_connect_event() -> Self {
        MockTransport {
            emit_connect_event: false,
            ..Self::new()
        }
    }

    /// Queues an event for delivery via `poll_event`.
    pub fn queue_event(&mut self, event: TransportEvent) {
        self.events.push_back(event);
    }

    /// Returns the text frames written so far.
    pub fn written_frames(&self) -> &[String] {
        &self.written
    }

    /// Makes the next connect attempt fail with the given error.
    pub fn inject_connect_error(&mut self, error: NetworkError) {
        self.connect_error = Some(error);
    }

    /// Makes the next write fail with the given error.
    pub fn inject_write_error(&mut self, error: NetworkError) {
        self.write_error = Some(error);
    }

    /// Returns how many times `connect` was invoked.
    pub fn connect_calls(&self) -> u32 {
        self.connect_calls
    }

    /// Returns how many times `disconnect` was invoked.
    pub fn disconnect_calls(&self) -> u32 {
        self.disconnect_calls
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn connect(
        &mut self,
        _config: &TransportConfig,
        _credential: &Credential,
    ) -> TransportResult<()> {
        self.connect_calls += 1;

        if let Some(error) = self.connect_error.take() {
            return Err(error);
        }

        self.open = true;
        if self.emit_connect_event {
            self.events
                .push_back(TransportEvent::Connected { headers: vec![] });
        }
        Ok(())
    }

    fn disconnect(&mut self) -> TransportResult<()> {
        self.disconnect_calls += 1;
        self.open = false;
        Ok(())
    }

    fn write_text(&mut self, frame: &str) -> TransportResult<()> {
        if !self.open {
            return Err(NetworkError::NotConnected);
        }
        if let Some(error) = self.write_error.take() {
            return Err(error);
        }
        self.written.push(frame.to_string());
        Ok(())
    }

    fn poll_event(&mut self) -> TransportResult<Option<TransportEvent>> {
        Ok(self.events.pop_front())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
