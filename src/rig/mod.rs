//! Multi-axis homing and synchronized moves.
//!
//! The rig is a fixed set of axes sharing one enable line. [`RigController`]
//! owns them together with the homed flag and the last commanded position,
//! and runs homing ([`HomingSequencer`]) and moves ([`MoveCoordinator`]) as
//! blocking, run-to-completion calls.

mod axis;
mod capability;
mod controller;
mod coordinator;
mod homing;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use axis::{Axis, AxisId};
pub use capability::{LimitSensor, MotionAxis};
pub use controller::{IgnoreReason, MoveOutcome, RigController};
pub use coordinator::MoveCoordinator;
pub use homing::{HomingPhase, HomingSequencer, RetryPolicy};
pub use state::{RigPhase, RigState};
