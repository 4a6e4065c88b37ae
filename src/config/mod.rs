//! Configuration module for rig-motion.
//!
//! Provides types for loading and validating rig, axis, homing and messaging
//! configuration from TOML files (with `std` feature) or pre-built values.

mod axis;
mod homing;
mod limits;
mod mechanical;
mod messaging;
mod rig;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use homing::{HomeDirection, HomingConfig};
pub use limits::TravelLimits;
pub use mechanical::MechanicalConstraints;
pub use messaging::MessagingConfig;
pub use rig::RigConfig;
pub use system::{SystemConfig, MAX_AXES};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
