//! Travel window of a homed axis.

use super::units::Millimeters;

/// Allowed absolute positions in millimeters after homing.
///
/// Move targets outside the window are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TravelLimits {
    /// Lowest reachable position (the homed zero).
    pub min: Millimeters,
    /// Highest reachable position.
    pub max: Millimeters,
}

impl TravelLimits {
    /// Window `[0, axis_length]`.
    pub fn from_axis_length(axis_length: Millimeters) -> Self {
        Self {
            min: Millimeters(0.0),
            max: axis_length,
        }
    }

    /// Clamp a requested position into the window.
    pub fn clamp(&self, target: Millimeters) -> Millimeters {
        target.clamp(self.min, self.max)
    }
}
