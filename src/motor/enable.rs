//! Shared driver enable line.

use embedded_hal::digital::OutputPin;

use crate::error::MotorError;

/// Enable line shared by every stepper driver on the rig.
///
/// Drivers only hold torque while the line is asserted. The line is released
/// as soon as it is wrapped so the motors start out de-energized.
pub struct EnableLine<PIN>
where
    PIN: OutputPin,
{
    pin: PIN,
    active_low: bool,
    asserted: bool,
}

impl<PIN> EnableLine<PIN>
where
    PIN: OutputPin,
{
    /// Wrap an output pin and drive it to the released level.
    pub fn new(pin: PIN, active_low: bool) -> Result<Self, MotorError> {
        let mut line = Self {
            pin,
            active_low,
            asserted: true,
        };
        line.release()?;
        Ok(line)
    }

    /// Energize the drivers.
    pub fn assert(&mut self) -> Result<(), MotorError> {
        self.drive(true)?;
        self.asserted = true;
        Ok(())
    }

    /// De-energize the drivers.
    pub fn release(&mut self) -> Result<(), MotorError> {
        self.drive(false)?;
        self.asserted = false;
        Ok(())
    }

    /// Whether the drivers are currently energized.
    #[inline]
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Release the pin.
    pub fn into_inner(self) -> PIN {
        self.pin
    }

    fn drive(&mut self, active: bool) -> Result<(), MotorError> {
        let high = active != self.active_low;
        if high {
            self.pin.set_high().map_err(|_| MotorError::PinError)
        } else {
            self.pin.set_low().map_err(|_| MotorError::PinError)
        }
    }
}
