//! Rig controller: owns the rig state and gates operations on it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Millimeters;
use crate::config::SystemConfig;
use crate::error::{ConfigError, Error, HomingError, MotorError, Result};
use crate::motor::EnableLine;

use super::axis::Axis;
use super::capability::{LimitSensor, MotionAxis};
use super::coordinator::MoveCoordinator;
use super::homing::{HomingSequencer, RetryPolicy};
use super::state::{RigPhase, RigState};

/// Why a request was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// Moves are only accepted once the rig is homed.
    NotHomed,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// Every axis reached the (clamped) target.
    Completed {
        /// Position applied to every axis.
        target: Millimeters,
    },
    /// Nothing moved.
    Ignored(IgnoreReason),
}

/// Single owner of the rig's axes, enable line and homed/position state.
///
/// `home` and `move_to` run to completion before returning. There is no way
/// to cancel either once started.
pub struct RigController<M, L, P, D, const N: usize>
where
    M: MotionAxis,
    L: LimitSensor,
    P: OutputPin,
    D: DelayNs,
{
    state: RigState<M, L, N>,
    enable: EnableLine<P>,
    delay: D,
    sequencer: HomingSequencer,
    coordinator: MoveCoordinator,
    retry: RetryPolicy,
    phase: RigPhase,
}

impl<M, L, P, D, const N: usize> RigController<M, L, P, D, N>
where
    M: MotionAxis,
    L: LimitSensor,
    P: OutputPin,
    D: DelayNs,
{
    /// Assemble a controller from prepared parts. The rig starts unhomed.
    pub fn new(
        axes: [Axis<M, L>; N],
        enable: EnableLine<P>,
        delay: D,
        sequencer: HomingSequencer,
        coordinator: MoveCoordinator,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            state: RigState::new(axes),
            enable,
            delay,
            sequencer,
            coordinator,
            retry,
            phase: RigPhase::Unhomed,
        }
    }

    /// Assemble a controller whose homing, travel and retry settings come from
    /// configuration.
    ///
    /// Every axis is set to the configured operating speed and acceleration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration declares a different number of
    /// axes than provided.
    pub fn from_config(
        config: &SystemConfig,
        mut axes: [Axis<M, L>; N],
        enable: EnableLine<P>,
        delay: D,
    ) -> Result<Self> {
        if config.axis_count() != N {
            return Err(Error::Config(ConfigError::AxisCountMismatch {
                configured: config.axis_count(),
                provided: N,
            }));
        }

        let speed = config.rig.max_speed_steps();
        let acceleration = config.rig.max_acceleration_steps();
        for axis in axes.iter_mut() {
            let motion = axis.motion_mut();
            motion.set_speed(speed);
            motion.set_acceleration(acceleration);
        }

        Ok(Self::new(
            axes,
            enable,
            delay,
            HomingSequencer::from_config(&config.homing, &config.rig),
            MoveCoordinator::from_config(&config.rig),
            RetryPolicy::from_config(&config.homing),
        ))
    }

    /// Run a single homing attempt.
    ///
    /// On failure the rig is left unhomed and the caller decides whether to
    /// try again.
    pub fn home(&mut self) -> core::result::Result<(), HomingError> {
        self.phase = RigPhase::Homing;
        let result = self
            .sequencer
            .run(&mut self.state, &mut self.enable, &mut self.delay);
        self.phase = if result.is_ok() {
            RigPhase::Homed
        } else {
            RigPhase::Unhomed
        };
        result
    }

    /// Home, retrying after the policy's delay until an attempt succeeds.
    ///
    /// Returns the number of attempts used. With a bounded policy, gives up
    /// with [`HomingError::RetriesExhausted`] and leaves the rig unhomed.
    pub fn home_with_retry(&mut self) -> core::result::Result<u32, HomingError> {
        let mut attempts: u32 = 0;
        self.phase = RigPhase::Homing;

        loop {
            attempts = attempts.saturating_add(1);
            match self
                .sequencer
                .run(&mut self.state, &mut self.enable, &mut self.delay)
            {
                Ok(()) => {
                    self.phase = RigPhase::Homed;
                    return Ok(attempts);
                }
                Err(err) => {
                    warn!("homing attempt {} failed", attempts);
                    if !self.retry.allows_retry(attempts) {
                        error!("homing gave up after {} attempts", attempts);
                        self.phase = RigPhase::Unhomed;
                        return Err(HomingError::RetriesExhausted {
                            attempts,
                            last: err.failure(),
                        });
                    }
                    self.delay.delay_ms(self.retry.delay_ms);
                }
            }
        }
    }

    /// Move every axis to `requested`, clamped into the travel window.
    ///
    /// Ignored, with no axis or position change, while the rig is unhomed.
    /// A failed move leaves the axes somewhere short of the target, so the
    /// rig drops back to unhomed and has to be homed again.
    pub fn move_to(&mut self, requested: Millimeters) -> core::result::Result<MoveOutcome, MotorError> {
        if !self.state.is_homed() {
            debug!("move to {} mm ignored: not homed", requested.0);
            return Ok(MoveOutcome::Ignored(IgnoreReason::NotHomed));
        }

        self.phase = RigPhase::Moving;
        let result = self
            .coordinator
            .move_to(&mut self.state, &mut self.enable, requested);

        match result {
            Ok(target) => {
                self.phase = RigPhase::Homed;
                Ok(MoveOutcome::Completed { target })
            }
            Err(err) => {
                error!("move to {} mm aborted, rig needs homing", requested.0);
                self.state.set_homed(false);
                self.phase = RigPhase::Unhomed;
                Err(err)
            }
        }
    }

    /// Current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> RigPhase {
        self.phase
    }

    /// Whether the rig is homed.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.state.is_homed()
    }

    /// Position of the last completed move.
    #[inline]
    pub fn current_position(&self) -> Millimeters {
        self.state.current_position()
    }

    /// Rig state, including the axes.
    #[inline]
    pub fn state(&self) -> &RigState<M, L, N> {
        &self.state
    }

    /// Shared enable line.
    #[inline]
    pub fn enable(&self) -> &EnableLine<P> {
        &self.enable
    }

    /// Delay provider used for settle and retry pauses.
    #[inline]
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Homing parameters.
    #[inline]
    pub fn sequencer(&self) -> &HomingSequencer {
        &self.sequencer
    }

    /// Move parameters.
    #[inline]
    pub fn coordinator(&self) -> &MoveCoordinator {
        &self.coordinator
    }

    /// Homing retry policy.
    #[inline]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}
