//! Rig-wide drive configuration from TOML.

use serde::Deserialize;

use super::units::{Microsteps, Millimeters, StepsPerSec, StepsPerSecSquared};

/// Drive parameters shared by every axis of the rig.
///
/// Speeds and accelerations are given in full steps and scaled by the
/// microstep divisor, so changing `microsteps` keeps the physical motion
/// unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Microstep setting of every driver.
    pub microsteps: Microsteps,

    /// Full steps per millimeter of linear travel.
    pub full_steps_per_mm: f32,

    /// Operating speed in full steps per second.
    #[serde(rename = "max_speed_full_steps_per_sec")]
    pub max_speed: f32,

    /// Acceleration in full steps per second squared.
    #[serde(rename = "max_acceleration_full_steps_per_sec2")]
    pub max_acceleration: f32,

    /// Usable travel of each axis; moves are clamped into `[0, axis_length]`.
    pub axis_length_mm: Millimeters,

    /// Pin number of the shared driver enable line.
    pub enable_pin: u8,

    /// Enable line energizes the drivers when low.
    pub enable_active_low: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            microsteps: Microsteps::SIXTEENTH,
            full_steps_per_mm: 25.0,
            max_speed: 300.0,
            max_acceleration: 150.0,
            axis_length_mm: Millimeters(180.0),
            enable_pin: 12,
            enable_active_low: true,
        }
    }
}

impl RigConfig {
    /// Microsteps per millimeter.
    pub fn steps_per_mm(&self) -> f32 {
        self.full_steps_per_mm * self.microsteps.factor()
    }

    /// Operating speed in microsteps per second.
    pub fn max_speed_steps(&self) -> StepsPerSec {
        StepsPerSec(self.max_speed * self.microsteps.factor())
    }

    /// Acceleration in microsteps per second squared.
    pub fn max_acceleration_steps(&self) -> StepsPerSecSquared {
        StepsPerSecSquared(self.max_acceleration * self.microsteps.factor())
    }
}
