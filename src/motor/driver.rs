//! Stepper axis driver.
//!
//! Generic over embedded-hal 1.0 output pins and a [`Clock`]. Steps are
//! emitted from [`MotionAxis::tick`] only when due, so one control loop can
//! drive several axes at once.

use embedded_hal::digital::OutputPin;

use crate::config::units::{Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
use crate::config::MechanicalConstraints;
use crate::error::MotorError;
use crate::motion::{Direction, MotionExecutor, MotionPhase, MotionProfile};
use crate::rig::MotionAxis;

use super::clock::Clock;
use super::position::Position;

/// Stepper axis driven through STEP/DIR pins.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `CLOCK`: Time source used to schedule steps
pub struct StepperAxis<STEP, DIR, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    CLOCK: Clock,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = positive, unless inverted).
    dir_pin: DIR,

    /// Time source for step scheduling.
    clock: CLOCK,

    /// Current absolute position.
    position: Position,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Mechanical constraints from configuration.
    constraints: MechanicalConstraints,

    /// Axis name for logging/debugging.
    name: heapless::String<16>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Cruise speed for the next move.
    speed: StepsPerSec,

    /// Ramp rate for the next move.
    acceleration: StepsPerSecSquared,

    /// Motion executor for current move (if any).
    executor: Option<MotionExecutor>,

    /// Clock time at which the next step is due.
    next_step_at_us: u64,
}

impl<STEP, DIR, CLOCK> StepperAxis<STEP, DIR, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    CLOCK: Clock,
{
    /// Create an idle axis at position zero running at its configured maximums.
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        clock: CLOCK,
        constraints: MechanicalConstraints,
        name: heapless::String<16>,
        invert_direction: bool,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            clock,
            position: Position::new(constraints.steps_per_mm),
            current_direction: None,
            speed: constraints.max_speed,
            acceleration: constraints.max_acceleration,
            constraints,
            name,
            invert_direction,
            executor: None,
            next_step_at_us: 0,
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get current position in millimeters.
    #[inline]
    pub fn position_mm(&self) -> Millimeters {
        self.position.mm()
    }

    /// Get the mechanical constraints.
    #[inline]
    pub fn constraints(&self) -> &MechanicalConstraints {
        &self.constraints
    }

    /// Cruise speed the next move will use.
    #[inline]
    pub fn speed(&self) -> StepsPerSec {
        self.speed
    }

    /// Get current motion phase.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.executor
            .as_ref()
            .map(|e| e.phase())
            .unwrap_or(MotionPhase::Complete)
    }

    /// Steps left in the current move.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.executor
            .as_ref()
            .map(|e| e.steps_remaining())
            .unwrap_or(0)
    }

    /// Release the pins and clock.
    pub fn release(self) -> (STEP, DIR, CLOCK) {
        (self.step_pin, self.dir_pin, self.clock)
    }

    fn start_move(&mut self, delta_steps: i64) -> Result<(), MotorError> {
        if self.speed.0 <= 0.0 {
            return Err(MotorError::NotConfigured);
        }

        let profile =
            MotionProfile::symmetric_trapezoidal(delta_steps, self.speed.0, self.acceleration.0);

        if !profile.is_zero() {
            self.set_direction(profile.direction)?;
        }

        self.executor = Some(MotionExecutor::new(profile));
        self.next_step_at_us = self.clock.now_us();
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), MotorError> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Positive => !self.invert_direction,
            Direction::Negative => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }
}

impl<STEP, DIR, CLOCK> MotionAxis for StepperAxis<STEP, DIR, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    CLOCK: Clock,
{
    fn set_speed(&mut self, speed: StepsPerSec) {
        self.speed = speed;
    }

    fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) {
        self.acceleration = acceleration;
    }

    fn setup_absolute_move(&mut self, target: Millimeters) -> Result<(), MotorError> {
        let delta = self.position.steps_to(target);
        self.start_move(delta)
    }

    fn setup_relative_move(&mut self, delta: Millimeters) -> Result<(), MotorError> {
        let delta = self.constraints.mm_to_steps(delta);
        self.start_move(delta.0)
    }

    fn tick(&mut self) -> Result<bool, MotorError> {
        let executor = match self.executor.as_mut() {
            Some(executor) if !executor.is_complete() => executor,
            _ => return Ok(true),
        };

        let now = self.clock.now_us();
        if now < self.next_step_at_us {
            return Ok(false);
        }

        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.step_pin.set_low().map_err(|_| MotorError::PinError)?;

        self.position.move_steps(executor.profile().direction.sign());
        let interval_us = executor.interval_us();
        executor.advance();
        self.next_step_at_us = now.saturating_add(u64::from(interval_us));

        Ok(false)
    }

    fn is_motion_complete(&self) -> bool {
        self.executor
            .as_ref()
            .map(|e| e.is_complete())
            .unwrap_or(true)
    }

    fn set_current_position(&mut self, steps: Steps) {
        self.position.set_steps(steps);
        self.executor = None;
    }

    fn current_position(&self) -> Steps {
        self.position.steps()
    }
}
