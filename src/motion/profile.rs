//! Motion profile calculation.
//!
//! Symmetric trapezoidal profiles: ramp up at a constant acceleration, cruise,
//! ramp down at the same rate. Short moves collapse into a triangle.

use libm::sqrtf;

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing step count.
    Positive,
    /// Decreasing step count.
    Negative,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Accelerating from rest toward cruise speed.
    Accelerating,
    /// Moving at constant cruise speed.
    Cruising,
    /// Decelerating from cruise speed to rest.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Computed motion profile for one move.
#[derive(Debug, Clone)]
pub struct MotionProfile {
    /// Total steps to move (absolute value).
    pub total_steps: u32,

    /// Direction of motion.
    pub direction: Direction,

    /// Steps spent ramping up.
    pub accel_steps: u32,

    /// Steps spent ramping down.
    pub decel_steps: u32,

    /// Cruise speed in steps/sec.
    pub cruise_speed: f32,

    /// Ramp rate in steps/sec². Zero means no ramp.
    pub acceleration: f32,
}

impl MotionProfile {
    /// Create a symmetric trapezoidal motion profile.
    ///
    /// # Arguments
    ///
    /// * `total_steps` - Signed step count (positive or negative direction)
    /// * `max_speed` - Cruise speed in steps/sec
    /// * `acceleration` - Ramp rate in steps/sec²; `0.0` moves at cruise speed throughout
    pub fn symmetric_trapezoidal(total_steps: i64, max_speed: f32, acceleration: f32) -> Self {
        let direction = Direction::from_steps(total_steps);
        let steps = u32::try_from(total_steps.unsigned_abs()).unwrap_or(u32::MAX);

        if steps == 0 || max_speed <= 0.0 {
            return Self::zero();
        }

        if acceleration <= 0.0 {
            return Self {
                total_steps: steps,
                direction,
                accel_steps: 0,
                decel_steps: 0,
                cruise_speed: max_speed,
                acceleration: 0.0,
            };
        }

        // Distance to reach cruise speed from rest: v² / 2a
        let ramp_distance = (max_speed * max_speed) / (2.0 * acceleration);

        let (accel_steps, decel_steps) = if 2.0 * ramp_distance >= steps as f32 {
            // Triangle: never reaches cruise speed
            let accel_steps = steps / 2;
            (accel_steps, steps - accel_steps)
        } else {
            let ramp = ramp_distance as u32;
            (ramp, ramp)
        };

        Self {
            total_steps: steps,
            direction,
            accel_steps,
            decel_steps,
            cruise_speed: max_speed,
            acceleration,
        }
    }

    /// Create a zero-length profile (no motion).
    pub fn zero() -> Self {
        Self {
            total_steps: 0,
            direction: Direction::Positive,
            accel_steps: 0,
            decel_steps: 0,
            cruise_speed: 0.0,
            acceleration: 0.0,
        }
    }

    /// Check if this is a zero-length profile.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// Signed step displacement of the whole move.
    #[inline]
    pub fn displacement(&self) -> i64 {
        self.total_steps as i64 * self.direction.sign()
    }

    /// Get the phase at a given step number.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            MotionPhase::Complete
        } else if step < self.accel_steps {
            MotionPhase::Accelerating
        } else if step >= self.total_steps - self.decel_steps {
            MotionPhase::Decelerating
        } else {
            MotionPhase::Cruising
        }
    }

    /// Speed in steps/sec while issuing step `step`.
    ///
    /// Limited by the distance covered so far (ramp up), the distance left
    /// (ramp down) and the cruise speed.
    pub fn speed_at(&self, step: u32) -> f32 {
        if step >= self.total_steps {
            return 0.0;
        }
        if self.acceleration <= 0.0 {
            return self.cruise_speed;
        }

        let covered = (step + 1) as f32;
        let remaining = (self.total_steps - step) as f32;
        let ramp_up = sqrtf(2.0 * self.acceleration * covered);
        let ramp_down = sqrtf(2.0 * self.acceleration * remaining);

        self.cruise_speed.min(ramp_up).min(ramp_down)
    }

    /// Wait in microseconds between step `step` and the next one.
    pub fn interval_us_at(&self, step: u32) -> u32 {
        let speed = self.speed_at(step);
        if speed > 0.0 {
            (1_000_000.0 / speed) as u32
        } else {
            u32::MAX
        }
    }
}
