//! Concrete axis hardware.
//!
//! Stepper driver over STEP/DIR pins, limit switch input, shared enable line
//! and the clocks used to schedule steps.

mod builder;
pub mod clock;
mod driver;
mod enable;
mod limit_switch;
mod position;

pub use builder::StepperAxisBuilder;
pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use driver::StepperAxis;
pub use enable::EnableLine;
pub use limit_switch::LimitSwitch;
pub use position::Position;
