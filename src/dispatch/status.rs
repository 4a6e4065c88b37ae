//! Outbound JSON status payloads.

use heapless::String;
use serde::Serialize;

use crate::error::DispatchError;

/// Largest encoded status payload.
pub const STATUS_CAPACITY: usize = 128;

/// Position report, published periodically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionStatus {
    /// Position of the last completed move, in millimeters.
    pub current_position: f32,
    /// Whether the rig is homed.
    pub axis_homed: bool,
}

/// Network identity, published once per connection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NetworkStatus {
    /// Local address.
    pub ip: String<16>,
    /// Hardware address.
    pub mac: String<18>,
    /// Default gateway.
    pub gateway: String<16>,
    /// Name server.
    pub dns: String<16>,
}

/// JSON-encode a status payload into `buf`, returning the encoded length.
pub fn encode<T: Serialize>(status: &T, buf: &mut [u8]) -> Result<usize, DispatchError> {
    serde_json_core::to_slice(status, buf).map_err(|_| DispatchError::Encode)
}

/// Paces motion status reports.
#[derive(Debug, Clone, Copy)]
pub struct StatusReporter {
    interval_ms: u32,
    last_report_ms: u64,
}

impl StatusReporter {
    /// Report at most once per `interval_ms`.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_report_ms: 0,
        }
    }

    /// Report spacing.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Whether a report is due at `now_ms`. Marks it sent if so.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_report_ms) > u64::from(self.interval_ms) {
            self.last_report_ms = now_ms;
            true
        } else {
            false
        }
    }
}
