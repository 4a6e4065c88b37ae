//! Limit switch input.

use embedded_hal::digital::InputPin;

use crate::rig::LimitSensor;

/// Mechanical limit switch on a digital input.
///
/// The switch is considered triggered when the pin reads its active level.
/// A failed read is reported as triggered so a broken input never lets an
/// axis run past its switch.
pub struct LimitSwitch<PIN>
where
    PIN: InputPin,
{
    pin: PIN,
    active_low: bool,
}

impl<PIN> LimitSwitch<PIN>
where
    PIN: InputPin,
{
    /// Wrap an input pin.
    ///
    /// `active_low` is true for pull-up wiring where the switch shorts to ground.
    pub fn new(pin: PIN, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Whether the switch reads low when active.
    #[inline]
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// Release the pin.
    pub fn into_inner(self) -> PIN {
        self.pin
    }
}

impl<PIN> LimitSensor for LimitSwitch<PIN>
where
    PIN: InputPin,
{
    fn is_triggered(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };

        match level {
            Ok(active) => active,
            Err(_) => {
                warn!("limit switch read failed, treating as triggered");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    /// Input that fails every read.
    struct BrokenPin;

    impl embedded_hal::digital::ErrorType for BrokenPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    #[test]
    fn test_active_low_polarity() {
        let expectations = [
            Transaction::get(State::High),
            Transaction::get(State::Low),
        ];
        let pin = PinMock::new(&expectations);
        let mut done = pin.clone();
        let mut switch = LimitSwitch::new(pin, true);

        assert!(!switch.is_triggered());
        assert!(switch.is_triggered());

        done.done();
    }

    #[test]
    fn test_active_high_polarity() {
        let expectations = [
            Transaction::get(State::High),
            Transaction::get(State::Low),
        ];
        let pin = PinMock::new(&expectations);
        let mut done = pin.clone();
        let mut switch = LimitSwitch::new(pin, false);

        assert!(switch.is_triggered());
        assert!(!switch.is_triggered());

        done.done();
    }

    #[test]
    fn test_read_error_counts_as_triggered() {
        let mut switch = LimitSwitch::new(BrokenPin, true);
        assert!(switch.is_triggered());

        let mut switch = LimitSwitch::new(BrokenPin, false);
        assert!(switch.is_triggered());
    }
}
