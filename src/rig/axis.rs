//! One driven axis of the rig.

use heapless::String;

use super::capability::{LimitSensor, MotionAxis};

/// Index of an axis within the rig, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisId(pub u8);

impl AxisId {
    /// Position of the axis in the rig's axis array.
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// An axis owns its motion generator and its limit sensor.
///
/// Axes share nothing but the enable line, which lives in the controller.
pub struct Axis<M, L>
where
    M: MotionAxis,
    L: LimitSensor,
{
    id: AxisId,
    name: String<16>,
    motion: M,
    sensor: L,
}

impl<M, L> Axis<M, L>
where
    M: MotionAxis,
    L: LimitSensor,
{
    /// Pair a motion generator with its limit sensor.
    pub fn new(id: AxisId, name: &str, motion: M, sensor: L) -> Self {
        Self {
            id,
            name: String::try_from(name).unwrap_or_default(),
            motion,
            sensor,
        }
    }

    /// Axis index.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Axis label.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Motion generator.
    #[inline]
    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Motion generator, mutably.
    #[inline]
    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    /// Limit sensor.
    #[inline]
    pub fn sensor(&self) -> &L {
        &self.sensor
    }

    /// Sample the limit sensor.
    #[inline]
    pub fn is_triggered(&mut self) -> bool {
        self.sensor.is_triggered()
    }

    /// Take the axis apart.
    pub fn into_parts(self) -> (M, L) {
        (self.motion, self.sensor)
    }
}
