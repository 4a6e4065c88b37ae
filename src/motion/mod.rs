//! Motion module for rig-motion.
//!
//! Provides trapezoidal profile calculation and step sequencing for the
//! concrete axis driver.

mod executor;
mod profile;

pub use executor::MotionExecutor;
pub use profile::{Direction, MotionPhase, MotionProfile};
