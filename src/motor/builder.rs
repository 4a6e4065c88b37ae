//! Builder pattern for StepperAxis.

use embedded_hal::digital::OutputPin;

use crate::config::{AxisConfig, MechanicalConstraints, RigConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result};

use super::clock::Clock;
use super::driver::StepperAxis;

/// Builder for creating StepperAxis instances.
pub struct StepperAxisBuilder<STEP, DIR, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    CLOCK: Clock,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    clock: Option<CLOCK>,
    name: Option<heapless::String<16>>,
    invert_direction: bool,
    constraints: Option<MechanicalConstraints>,
}

impl<STEP, DIR, CLOCK> Default for StepperAxisBuilder<STEP, DIR, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    CLOCK: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, CLOCK> StepperAxisBuilder<STEP, DIR, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    CLOCK: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            clock: None,
            name: None,
            invert_direction: false,
            constraints: None,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the step scheduling clock.
    pub fn clock(mut self, clock: CLOCK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set mechanical constraints directly.
    pub fn constraints(mut self, constraints: MechanicalConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Configure from the rig-wide drive settings and one axis entry.
    pub fn from_axis_config(mut self, rig: &RigConfig, axis: &AxisConfig) -> Self {
        self.name = Some(axis.name.clone());
        self.invert_direction = axis.invert_direction;
        self.constraints = Some(MechanicalConstraints::from_config(rig, axis));
        self
    }

    /// Configure from SystemConfig by axis key.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(&config.rig, axis))
    }

    /// Build the StepperAxis.
    ///
    /// # Errors
    ///
    /// Returns an error if pins, clock or constraints are missing.
    pub fn build(self) -> Result<StepperAxis<STEP, DIR, CLOCK>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingField("step_pin")))?;
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;
        let clock = self
            .clock
            .ok_or(Error::Config(ConfigError::MissingField("clock")))?;
        let constraints = self
            .constraints
            .ok_or(Error::Config(ConfigError::MissingField("constraints")))?;

        let name = self.name.unwrap_or_default();

        debug!(
            "axis {=str}: {=f32} steps/mm, {=f32} steps/s",
            name.as_str(),
            constraints.steps_per_mm,
            constraints.max_speed.0
        );

        Ok(StepperAxis::new(
            step_pin,
            dir_pin,
            clock,
            constraints,
            name,
            self.invert_direction,
        ))
    }
}
