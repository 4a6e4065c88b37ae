//! Motion execution - walks a profile one step at a time.

use super::profile::{MotionPhase, MotionProfile};

/// Runtime state during motion execution.
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// The computed profile being executed.
    profile: MotionProfile,

    /// Number of steps already issued.
    current_step: u32,
}

impl MotionExecutor {
    /// Create a new executor for a motion profile.
    pub fn new(profile: MotionProfile) -> Self {
        Self {
            profile,
            current_step: 0,
        }
    }

    /// Check if motion is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_step >= self.profile.total_steps
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.profile.total_steps.saturating_sub(self.current_step)
    }

    /// Get the current phase.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.profile.phase_at(self.current_step)
    }

    /// Wait in microseconds after issuing the current step.
    #[inline]
    pub fn interval_us(&self) -> u32 {
        self.profile.interval_us_at(self.current_step)
    }

    /// Get the motion profile.
    #[inline]
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Record one issued step.
    ///
    /// Returns `true` if more steps remain.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.current_step += 1;
        !self.is_complete()
    }
}
