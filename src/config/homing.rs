//! Homing configuration from TOML.

use serde::Deserialize;

use super::units::{Millimeters, StepsPerSec};

/// Direction in which the limit switches are mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum HomeDirection {
    /// Switches sit at the low end of travel.
    #[default]
    Negative,
    /// Switches sit at the high end of travel.
    Positive,
}

impl HomeDirection {
    /// Get the sign multiplier toward home.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            HomeDirection::Negative => -1.0,
            HomeDirection::Positive => 1.0,
        }
    }
}

/// Parameters of the three-phase homing protocol.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    /// Side of travel the switches are on.
    pub direction: HomeDirection,

    /// Distance bound of every phase. Defaults to the axis length.
    pub travel_mm: Option<Millimeters>,

    /// Coarse seek and back-off run at `max_speed / coarse_speed_divisor`.
    pub coarse_speed_divisor: u16,

    /// Fine seek runs at `max_speed / fine_speed_divisor`.
    pub fine_speed_divisor: u16,

    /// Pause after a successful coarse seek.
    pub seek_settle_ms: u32,

    /// Pause after a successful back-off.
    pub backoff_settle_ms: u32,

    /// Pause after a successful fine seek.
    pub fine_settle_ms: u32,

    /// Pause between failed attempts.
    pub retry_delay_ms: u32,

    /// Give up after this many attempts. Unbounded when unset.
    pub max_attempts: Option<u32>,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            direction: HomeDirection::Negative,
            travel_mm: None,
            coarse_speed_divisor: 2,
            fine_speed_divisor: 4,
            seek_settle_ms: 100,
            backoff_settle_ms: 100,
            fine_settle_ms: 25,
            retry_delay_ms: 500,
            max_attempts: None,
        }
    }
}

impl HomingConfig {
    /// Travel bound for each phase.
    pub fn travel(&self, axis_length: Millimeters) -> Millimeters {
        self.travel_mm.unwrap_or(axis_length)
    }

    /// Coarse seek and back-off speed.
    pub fn coarse_speed(&self, max_speed: StepsPerSec) -> StepsPerSec {
        StepsPerSec(max_speed.0 / self.coarse_speed_divisor.max(1) as f32)
    }

    /// Fine seek speed.
    pub fn fine_speed(&self, max_speed: StepsPerSec) -> StepsPerSec {
        StepsPerSec(max_speed.0 / self.fine_speed_divisor.max(1) as f32)
    }
}
