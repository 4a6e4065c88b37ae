//! Per-axis capabilities consumed by the homing and move logic.
//!
//! Neither trait blocks: every call returns promptly so a caller can
//! interleave progress across axes by round-robin polling.

use crate::config::units::{Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
use crate::error::MotorError;

/// Motion-profile generator and step emitter for one axis.
pub trait MotionAxis {
    /// Cruise speed used by the next `setup_*_move`.
    fn set_speed(&mut self, speed: StepsPerSec);

    /// Ramp rate used by the next `setup_*_move`.
    fn set_acceleration(&mut self, acceleration: StepsPerSecSquared);

    /// Plan a move to an absolute position, converted by the axis's own scale.
    fn setup_absolute_move(&mut self, target: Millimeters) -> Result<(), MotorError>;

    /// Plan a move relative to the current position.
    fn setup_relative_move(&mut self, delta: Millimeters) -> Result<(), MotorError>;

    /// Emit at most one step pulse if one is due.
    ///
    /// Returns `true` when the move is already complete and no step was
    /// taken, `false` while motion is still pending.
    fn tick(&mut self) -> Result<bool, MotorError>;

    /// Check whether the planned move has finished.
    fn is_motion_complete(&self) -> bool;

    /// Redefine the current position. Any pending motion is dropped.
    fn set_current_position(&mut self, steps: Steps);

    /// Current position in steps.
    fn current_position(&self) -> Steps;
}

/// Debounced limit switch input.
pub trait LimitSensor {
    /// `true` while the switch is active.
    fn is_triggered(&mut self) -> bool;
}
