// SPDX-FileCopyrightText: 2026 Chatwire Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Configuration

use crate::network::{OfflineSendPolicy, ReconnectPolicy, TransportConfig};
use crate::protocol::WireTimestampFormat;

/// Configuration for a chat client.
///
/// Everything the original sample hard-coded is a parameter here: the
/// endpoint, the content type, the connect timeout, the wire timestamp
/// format and offset, and the two behavior policies. The credential is
/// separate (see [`Credential`](crate::network::Credential)) and is never
/// part of this struct.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Transport settings (endpoint, headers, timeouts).
    pub transport: TransportConfig,
    /// Parse rules for inbound `createdDatetime` fields.
    pub wire_time: WireTimestampFormat,
    /// Reconnection policy. Defaults to none.
    pub reconnect: ReconnectPolicy,
    /// Behavior for sends attempted while not send-capable.
    /// Defaults to drop-and-report.
    pub offline_send: OfflineSendPolicy,
}

impl ClientConfig {
    /// Creates a config for the given endpoint with default policies.
    pub fn for_url(url: &str) -> Self {
        ClientConfig {
            transport: TransportConfig::for_url(url),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sample_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.transport.connect_timeout_ms, 5_000);
        assert_eq!(config.transport.content_type, "application/json; charset=utf-8");
        assert_eq!(config.wire_time.utc_offset_secs, 9 * 3600);
        assert_eq!(config.reconnect, ReconnectPolicy::None);
        assert_eq!(config.offline_send, OfflineSendPolicy::Drop);
    }
}
