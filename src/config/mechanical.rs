//! Mechanical constraints derived from rig and axis configuration.

use super::axis::AxisConfig;
use super::rig::RigConfig;
use super::units::{Millimeters, Steps, StepsPerSec, StepsPerSecSquared};

/// Derived per-axis parameters used for motion planning.
///
/// Computed once at initialization.
#[derive(Debug, Clone)]
pub struct MechanicalConstraints {
    /// Microsteps per millimeter of travel.
    pub steps_per_mm: f32,

    /// Operating speed in steps per second.
    pub max_speed: StepsPerSec,

    /// Acceleration in steps per second squared.
    pub max_acceleration: StepsPerSecSquared,
}

impl MechanicalConstraints {
    /// Compute constraints for one axis.
    pub fn from_config(rig: &RigConfig, axis: &AxisConfig) -> Self {
        let steps_per_mm = axis.steps_per_mm.unwrap_or_else(|| rig.steps_per_mm());

        Self {
            steps_per_mm,
            max_speed: rig.max_speed_steps(),
            max_acceleration: rig.max_acceleration_steps(),
        }
    }

    /// Convert millimeters to steps.
    #[inline]
    pub fn mm_to_steps(&self, mm: Millimeters) -> Steps {
        Steps::from_mm(mm, self.steps_per_mm)
    }
}
