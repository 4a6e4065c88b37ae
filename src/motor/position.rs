//! Position tracking for linear axes.

use crate::config::units::{Millimeters, Steps};

/// Axis position tracker.
///
/// Maintains absolute position in steps and provides millimeter conversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Current position in steps (from origin)
    steps: Steps,
    /// Steps per millimeter for conversions
    steps_per_mm: f32,
}

impl Position {
    /// Create a new position tracker at the origin.
    #[inline]
    pub fn new(steps_per_mm: f32) -> Self {
        Self {
            steps: Steps::default(),
            steps_per_mm,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Get current position in millimeters.
    #[inline]
    pub fn mm(&self) -> Millimeters {
        self.steps.to_mm(self.steps_per_mm)
    }

    /// Set position in steps.
    #[inline]
    pub fn set_steps(&mut self, steps: Steps) {
        self.steps = steps;
    }

    /// Move by a number of steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps = Steps(self.steps.0 + delta);
    }

    /// Get steps per millimeter conversion factor.
    #[inline]
    pub fn steps_per_mm(&self) -> f32 {
        self.steps_per_mm
    }

    /// Signed steps needed to reach an absolute target.
    #[inline]
    pub fn steps_to(&self, target: Millimeters) -> i64 {
        Steps::from_mm(target, self.steps_per_mm).0 - self.steps.0
    }
}
