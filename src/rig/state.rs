//! Rig lifecycle phases and homed/position state.

use crate::config::units::Millimeters;

use super::axis::Axis;
use super::capability::{LimitSensor, MotionAxis};

/// Lifecycle phase of the rig.
///
/// `Homing` and `Moving` are only observable from inside the run-to-completion
/// calls that enter them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RigPhase {
    /// Positions are not referenced to the limit switches.
    #[default]
    Unhomed,
    /// A homing attempt is running.
    Homing,
    /// Zeroed and idle. Moves are accepted.
    Homed,
    /// A synchronized move is running.
    Moving,
}

impl RigPhase {
    /// Get the phase name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            RigPhase::Unhomed => "Unhomed",
            RigPhase::Homing => "Homing",
            RigPhase::Homed => "Homed",
            RigPhase::Moving => "Moving",
        }
    }
}

/// Homed flag, last commanded position and the axes themselves.
///
/// `homed` is set by the homing sequencer only. `current_position` is set by
/// the move coordinator only, after a completed move on a homed rig.
pub struct RigState<M, L, const N: usize>
where
    M: MotionAxis,
    L: LimitSensor,
{
    homed: bool,
    current_position: Millimeters,
    axes: [Axis<M, L>; N],
}

impl<M, L, const N: usize> RigState<M, L, N>
where
    M: MotionAxis,
    L: LimitSensor,
{
    /// Fresh, unhomed state at position zero.
    pub fn new(axes: [Axis<M, L>; N]) -> Self {
        Self {
            homed: false,
            current_position: Millimeters(0.0),
            axes,
        }
    }

    /// Whether the last homing attempt succeeded.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Position of the last completed move.
    #[inline]
    pub fn current_position(&self) -> Millimeters {
        self.current_position
    }

    /// All axes, in declaration order.
    #[inline]
    pub fn axes(&self) -> &[Axis<M, L>; N] {
        &self.axes
    }

    #[inline]
    pub(crate) fn axes_mut(&mut self) -> &mut [Axis<M, L>; N] {
        &mut self.axes
    }

    #[inline]
    pub(crate) fn set_homed(&mut self, homed: bool) {
        self.homed = homed;
    }

    #[inline]
    pub(crate) fn set_current_position(&mut self, position: Millimeters) {
        self.current_position = position;
    }
}
