//! # rig-motion
//!
//! Limit-switch homing and synchronized absolute moves for a multi-axis
//! stepper rig, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Three-phase homing**: coarse seek, back-off and fine seek, each bounded
//!   by travel distance so a dead switch can never hang the rig
//! - **Barrier-synchronized moves**: every axis is driven to the same clamped
//!   absolute target before the call returns
//! - **Shared enable line**: drivers are energized only while axes step
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/enable, `InputPin` for
//!   limit switches, `DelayNs` for settle pauses
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Rig, homing and axis wiring from TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rig_motion::{Axis, AxisId, CommandDispatcher, EnableLine, LimitSwitch, RigController};
//! use rig_motion::motor::{StdClock, StepperAxisBuilder};
//!
//! let config = rig_motion::load_config("rig.toml")?;
//! let clock = StdClock::new();
//!
//! let x = StepperAxisBuilder::new()
//!     .from_config(&config, "X")?
//!     .step_pin(x_step)
//!     .dir_pin(x_dir)
//!     .clock(&clock)
//!     .build()?;
//!
//! let axes = [Axis::new(AxisId(0), "X", x, LimitSwitch::new(x_limit, true)), /* ... */];
//! let enable = EnableLine::new(enable_pin, config.rig.enable_active_low)?;
//! let mut rig = RigController::from_config(&config, axes, enable, delay)?;
//! let dispatcher = CommandDispatcher::from_config(&config.messaging)?;
//!
//! // For every inbound message
//! dispatcher.handle(&mut rig, topic, payload)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod dispatch;
pub mod error;
pub mod motion;
pub mod motor;
pub mod rig;

// Re-exports for ergonomic API
pub use config::{validate_config, SystemConfig};
pub use dispatch::{CommandDispatcher, DispatchOutcome, MessageBus};
pub use error::{Error, Result};
pub use motor::{EnableLine, LimitSwitch, StepperAxis};
pub use rig::{
    Axis, AxisId, HomingSequencer, LimitSensor, MotionAxis, MoveCoordinator, RigController,
    RigPhase,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microsteps, Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
