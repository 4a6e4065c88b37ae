//! Simulated axes, switches and pins for unit tests.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::config::units::{Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
use crate::error::MotorError;

use super::axis::{Axis, AxisId};
use super::capability::{LimitSensor, MotionAxis};

pub const STEPS_PER_MM: f32 = 10.0;

/// Axis that moves one step per tick along a shared physical coordinate.
pub struct SimAxis<'a> {
    physical: &'a Cell<i64>,
    origin: i64,
    target: i64,
    energized: &'a Cell<bool>,
    steps_until_fault: &'a Cell<Option<u32>>,
    pub speed: StepsPerSec,
    pub acceleration: StepsPerSecSquared,
    pub last_absolute_target: Option<Millimeters>,
    pub steps_while_disabled: u32,
}

impl<'a> SimAxis<'a> {
    pub fn new(
        physical: &'a Cell<i64>,
        energized: &'a Cell<bool>,
        steps_until_fault: &'a Cell<Option<u32>>,
    ) -> Self {
        Self {
            physical,
            origin: 0,
            target: physical.get(),
            energized,
            steps_until_fault,
            speed: StepsPerSec(0.0),
            acceleration: StepsPerSecSquared(0.0),
            last_absolute_target: None,
            steps_while_disabled: 0,
        }
    }

    fn to_steps(mm: Millimeters) -> i64 {
        Steps::from_mm(mm, STEPS_PER_MM).0
    }
}

impl MotionAxis for SimAxis<'_> {
    fn set_speed(&mut self, speed: StepsPerSec) {
        self.speed = speed;
    }

    fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) {
        self.acceleration = acceleration;
    }

    fn setup_absolute_move(&mut self, target: Millimeters) -> Result<(), MotorError> {
        self.last_absolute_target = Some(target);
        self.target = self.origin + Self::to_steps(target);
        Ok(())
    }

    fn setup_relative_move(&mut self, delta: Millimeters) -> Result<(), MotorError> {
        self.target = self.physical.get() + Self::to_steps(delta);
        Ok(())
    }

    fn tick(&mut self) -> Result<bool, MotorError> {
        let now = self.physical.get();
        if now == self.target {
            return Ok(true);
        }
        match self.steps_until_fault.get() {
            Some(0) => return Err(MotorError::PinError),
            Some(n) => self.steps_until_fault.set(Some(n - 1)),
            None => {}
        }
        if !self.energized.get() {
            self.steps_while_disabled += 1;
        }
        self.physical.set(now + (self.target - now).signum());
        Ok(false)
    }

    fn is_motion_complete(&self) -> bool {
        self.physical.get() == self.target
    }

    fn set_current_position(&mut self, steps: Steps) {
        self.origin = self.physical.get() - steps.0;
        self.target = self.physical.get();
    }

    fn current_position(&self) -> Steps {
        Steps(self.physical.get() - self.origin)
    }
}

/// Switch that closes at or below `trip_at` and reopens `hysteresis` steps above it.
///
/// With `breaks_on_release` set, the switch never closes again once it has
/// reopened.
pub struct SimSwitch<'a> {
    physical: &'a Cell<i64>,
    trip_at: Option<i64>,
    hysteresis: i64,
    breaks_on_release: &'a Cell<bool>,
    triggered: bool,
    broken: bool,
}

impl<'a> SimSwitch<'a> {
    pub fn new(
        physical: &'a Cell<i64>,
        trip_at: Option<i64>,
        hysteresis: i64,
        breaks_on_release: &'a Cell<bool>,
    ) -> Self {
        Self {
            physical,
            trip_at,
            hysteresis,
            breaks_on_release,
            triggered: false,
            broken: false,
        }
    }
}

impl LimitSensor for SimSwitch<'_> {
    fn is_triggered(&mut self) -> bool {
        if self.broken {
            return false;
        }
        if let Some(trip_at) = self.trip_at {
            let now = self.physical.get();
            if now <= trip_at {
                self.triggered = true;
            } else if now >= trip_at + self.hysteresis && self.triggered {
                self.triggered = false;
                self.broken = self.breaks_on_release.get();
            }
        }
        self.triggered
    }
}

/// Active-low enable pin mirrored into a shared flag.
pub struct RecordingPin<'a> {
    pub energized: &'a Cell<bool>,
    pub assertions: u32,
}

impl ErrorType for RecordingPin<'_> {
    type Error = Infallible;
}

impl OutputPin for RecordingPin<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.energized.set(true);
        self.assertions += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.energized.set(false);
        Ok(())
    }
}

/// Delay that only accumulates the requested time.
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// Physical state of a simulated four-axis rig.
pub struct Bench {
    pub positions: [Cell<i64>; 4],
    pub energized: Cell<bool>,
    /// Steps each axis takes before its STEP pin fails. `None` never fails.
    pub steps_until_fault: [Cell<Option<u32>>; 4],
    /// Switches that stay open for good after their first release.
    pub breaks_on_release: [Cell<bool>; 4],
}

impl Bench {
    /// Every carriage starts `start_mm` above its switch.
    pub fn new(start_mm: f32) -> Self {
        let start = (start_mm * STEPS_PER_MM) as i64;
        Self {
            positions: core::array::from_fn(|_| Cell::new(start)),
            energized: Cell::new(false),
            steps_until_fault: core::array::from_fn(|_| Cell::new(None)),
            breaks_on_release: core::array::from_fn(|_| Cell::new(false)),
        }
    }

    /// Switches at physical zero with 2 mm of hysteresis. `None` never trips.
    pub fn axes(&self, switches: [Option<i64>; 4]) -> [Axis<SimAxis<'_>, SimSwitch<'_>>; 4] {
        const NAMES: [&str; 4] = ["X", "Y", "Z", "A"];
        core::array::from_fn(|i| {
            Axis::new(
                AxisId(i as u8),
                NAMES[i],
                SimAxis::new(&self.positions[i], &self.energized, &self.steps_until_fault[i]),
                SimSwitch::new(&self.positions[i], switches[i], 20, &self.breaks_on_release[i]),
            )
        })
    }

    pub fn enable_pin(&self) -> RecordingPin<'_> {
        RecordingPin {
            energized: &self.energized,
            assertions: 0,
        }
    }
}
