//! Three-phase limit-switch homing.
//!
//! Every phase is a bounded relative move of the configured travel. An axis
//! drops out of a phase as soon as its switch reaches the phase's goal state,
//! and the phase ends once no remaining axis has steps left. A switch that
//! never changes therefore costs at most one full travel, never a hang.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Millimeters, Steps, StepsPerSec};
use crate::config::{HomeDirection, HomingConfig, RigConfig};
use crate::error::{HomingError, MotorError};
use crate::motor::EnableLine;

use super::capability::{LimitSensor, MotionAxis};
use super::state::RigState;

/// Phases of one homing attempt, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPhase {
    /// Fast approach until every switch closes.
    Seek,
    /// Reverse until every switch opens again.
    Backoff,
    /// Slow approach until every switch closes.
    FineSeek,
}

impl HomingPhase {
    /// All phases in order.
    pub const ALL: [HomingPhase; 3] = [HomingPhase::Seek, HomingPhase::Backoff, HomingPhase::FineSeek];

    /// Whether an axis with the given switch reading still has to step.
    #[inline]
    fn in_scope(self, triggered: bool) -> bool {
        match self {
            HomingPhase::Seek | HomingPhase::FineSeek => !triggered,
            HomingPhase::Backoff => triggered,
        }
    }

    fn failure(self) -> HomingError {
        match self {
            HomingPhase::Seek => HomingError::SeekFailure,
            HomingPhase::Backoff => HomingError::BackoffFailure,
            HomingPhase::FineSeek => HomingError::FineSeekFailure,
        }
    }
}

/// Drives every axis through seek, back-off and fine seek to a common zero.
#[derive(Debug, Clone)]
pub struct HomingSequencer {
    direction: HomeDirection,
    travel: Millimeters,
    coarse_speed: StepsPerSec,
    fine_speed: StepsPerSec,
    full_speed: StepsPerSec,
    seek_settle_ms: u32,
    backoff_settle_ms: u32,
    fine_settle_ms: u32,
}

impl HomingSequencer {
    /// Derive phase speeds and the travel bound from configuration.
    pub fn from_config(homing: &HomingConfig, rig: &RigConfig) -> Self {
        let full_speed = rig.max_speed_steps();
        Self {
            direction: homing.direction,
            travel: homing.travel(rig.axis_length_mm),
            coarse_speed: homing.coarse_speed(full_speed),
            fine_speed: homing.fine_speed(full_speed),
            full_speed,
            seek_settle_ms: homing.seek_settle_ms,
            backoff_settle_ms: homing.backoff_settle_ms,
            fine_settle_ms: homing.fine_settle_ms,
        }
    }

    /// Distance bound of every phase.
    #[inline]
    pub fn travel(&self) -> Millimeters {
        self.travel
    }

    /// Speed and relative distance of a phase.
    pub fn phase_motion(&self, phase: HomingPhase) -> (StepsPerSec, Millimeters) {
        let toward_home = self.travel * self.direction.sign();
        match phase {
            HomingPhase::Seek => (self.coarse_speed, toward_home),
            HomingPhase::Backoff => (self.coarse_speed, -toward_home),
            HomingPhase::FineSeek => (self.fine_speed, toward_home),
        }
    }

    fn settle_ms(&self, phase: HomingPhase) -> u32 {
        match phase {
            HomingPhase::Seek => self.seek_settle_ms,
            HomingPhase::Backoff => self.backoff_settle_ms,
            HomingPhase::FineSeek => self.fine_settle_ms,
        }
    }

    /// Run one homing attempt to completion.
    ///
    /// `homed` is cleared as soon as the attempt starts and set again only if
    /// all three phases succeed, at which point every axis sits at position
    /// zero with full operating speed restored. Does not retry.
    pub fn run<M, L, P, D, const N: usize>(
        &self,
        state: &mut RigState<M, L, N>,
        enable: &mut EnableLine<P>,
        delay: &mut D,
    ) -> Result<(), HomingError>
    where
        M: MotionAxis,
        L: LimitSensor,
        P: OutputPin,
        D: DelayNs,
    {
        state.set_homed(false);

        for phase in HomingPhase::ALL {
            debug!("homing phase {} started", phase);
            self.run_phase(phase, state, enable)?;
            debug!("homing phase {} done", phase);
            delay.delay_ms(self.settle_ms(phase));
        }

        for axis in state.axes_mut().iter_mut() {
            let motion = axis.motion_mut();
            motion.set_current_position(Steps(0));
            motion.set_speed(self.full_speed);
        }
        state.set_homed(true);

        info!("homing complete");
        Ok(())
    }

    fn run_phase<M, L, P, const N: usize>(
        &self,
        phase: HomingPhase,
        state: &mut RigState<M, L, N>,
        enable: &mut EnableLine<P>,
    ) -> Result<(), HomingError>
    where
        M: MotionAxis,
        L: LimitSensor,
        P: OutputPin,
    {
        let (speed, distance) = self.phase_motion(phase);
        for axis in state.axes_mut().iter_mut() {
            let motion = axis.motion_mut();
            motion.set_speed(speed);
            motion.setup_relative_move(distance)?;
        }

        enable.assert()?;
        let stepped = Self::step_phase(phase, state);
        let released = enable.release();
        stepped?;
        released?;

        let reached = state.axes_mut().iter_mut().all(|axis| {
            let triggered = axis.is_triggered();
            !phase.in_scope(triggered)
        });

        if reached {
            Ok(())
        } else {
            let err = phase.failure();
            warn!("homing phase {} failed", phase);
            Err(err)
        }
    }

    /// Round-robin tick every in-scope axis until none has work left.
    fn step_phase<M, L, const N: usize>(
        phase: HomingPhase,
        state: &mut RigState<M, L, N>,
    ) -> Result<(), MotorError>
    where
        M: MotionAxis,
        L: LimitSensor,
    {
        loop {
            let mut pending = false;
            for axis in state.axes_mut().iter_mut() {
                let triggered = axis.is_triggered();
                if phase.in_scope(triggered) && !axis.motion_mut().tick()? {
                    pending = true;
                }
            }
            if !pending {
                return Ok(());
            }
        }
    }
}

/// How a caller repeats failed homing attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Pause between attempts.
    pub delay_ms: u32,
    /// Give up after this many attempts. `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever with a fixed pause.
    pub const fn unbounded(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            max_attempts: None,
        }
    }

    /// Retry at most `max_attempts` times in total.
    pub const fn bounded(delay_ms: u32, max_attempts: u32) -> Self {
        Self {
            delay_ms,
            max_attempts: Some(max_attempts),
        }
    }

    /// Read the policy from homing configuration.
    pub fn from_config(config: &HomingConfig) -> Self {
        Self {
            delay_ms: config.retry_delay_ms,
            max_attempts: config.max_attempts,
        }
    }

    /// Whether another attempt is allowed after `attempts` failures.
    #[inline]
    pub fn allows_retry(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(500)
    }
}
