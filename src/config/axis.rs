//! Per-axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Wiring and scale of one linear axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable label (X, Y, Z, A, ...).
    pub name: String<16>,

    /// STEP output pin number.
    pub step_pin: u8,

    /// DIR output pin number.
    pub dir_pin: u8,

    /// Limit switch input pin number.
    pub limit_pin: u8,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Limit switch reads low when triggered (pull-up wiring).
    #[serde(default = "default_limit_active_low")]
    pub limit_active_low: bool,

    /// Steps per millimeter for this axis, overriding the rig-wide scale.
    #[serde(default)]
    pub steps_per_mm: Option<f32>,
}

fn default_limit_active_low() -> bool {
    true
}

impl AxisConfig {
    /// Create an axis with default polarity and the rig-wide scale.
    pub fn new(name: &str, step_pin: u8, dir_pin: u8, limit_pin: u8) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            step_pin,
            dir_pin,
            limit_pin,
            invert_direction: false,
            limit_active_low: true,
            steps_per_mm: None,
        }
    }

    /// Pins used by this axis, in STEP, DIR, LIMIT order.
    pub fn pins(&self) -> [u8; 3] {
        [self.step_pin, self.dir_pin, self.limit_pin]
    }
}
