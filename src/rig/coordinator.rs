//! Clamped, barrier-synchronized absolute moves.

use embedded_hal::digital::OutputPin;

use crate::config::units::Millimeters;
use crate::config::{RigConfig, TravelLimits};
use crate::error::MotorError;
use crate::motor::EnableLine;

use super::capability::{LimitSensor, MotionAxis};
use super::state::RigState;

/// Moves every axis to the same absolute position.
///
/// Unlike homing there is no early exit: all axes are ticked each pass until
/// every one of them reports completion.
#[derive(Debug, Clone, Copy)]
pub struct MoveCoordinator {
    limits: TravelLimits,
}

impl MoveCoordinator {
    /// Coordinator for the given travel window.
    pub fn new(limits: TravelLimits) -> Self {
        Self { limits }
    }

    /// Coordinator for `[0, axis_length]`.
    pub fn from_config(rig: &RigConfig) -> Self {
        Self::new(TravelLimits::from_axis_length(rig.axis_length_mm))
    }

    /// Travel window targets are clamped into.
    #[inline]
    pub fn limits(&self) -> TravelLimits {
        self.limits
    }

    /// Target a request resolves to.
    #[inline]
    pub fn clamp(&self, requested: Millimeters) -> Millimeters {
        self.limits.clamp(requested)
    }

    /// Move all axes to the clamped target and record it as the rig position.
    ///
    /// The rig must be homed; [`RigController`](super::RigController) gates
    /// this. Returns the target actually applied.
    pub(crate) fn move_to<M, L, P, const N: usize>(
        &self,
        state: &mut RigState<M, L, N>,
        enable: &mut EnableLine<P>,
        requested: Millimeters,
    ) -> Result<Millimeters, MotorError>
    where
        M: MotionAxis,
        L: LimitSensor,
        P: OutputPin,
    {
        debug_assert!(state.is_homed());

        let target = self.clamp(requested);
        debug!("move requested {} mm, clamped to {} mm", requested.0, target.0);

        for axis in state.axes_mut().iter_mut() {
            axis.motion_mut().setup_absolute_move(target)?;
        }

        enable.assert()?;
        let stepped = Self::step_to_barrier(state);
        let released = enable.release();
        stepped?;
        released?;

        state.set_current_position(target);
        Ok(target)
    }

    fn step_to_barrier<M, L, const N: usize>(state: &mut RigState<M, L, N>) -> Result<(), MotorError>
    where
        M: MotionAxis,
        L: LimitSensor,
    {
        while !state
            .axes()
            .iter()
            .all(|axis| axis.motion().is_motion_complete())
        {
            for axis in state.axes_mut().iter_mut() {
                axis.motion_mut().tick()?;
            }
        }
        Ok(())
    }
}
