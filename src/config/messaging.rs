//! Messaging configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Topic namespace and status cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Prefix of every topic, e.g. `/beamershutter`.
    pub namespace: String<32>,

    /// Minimum spacing of motion status reports.
    pub status_interval_ms: u32,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            namespace: String::try_from("/beamershutter").unwrap_or_default(),
            status_interval_ms: 1000,
        }
    }
}
