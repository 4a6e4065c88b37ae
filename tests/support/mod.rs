//! Simulated rig hardware for integration tests.
//!
//! Each carriage is a shared step counter. STEP pulses move it in the
//! direction last written to its DIR pin, and its limit switch reads the
//! counter back with a little hysteresis, like a real lever switch.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use rig_motion::dispatch::MessageBus;
use rig_motion::motor::Clock;
use rig_motion::{
    Axis, AxisId, CommandDispatcher, EnableLine, LimitSwitch, RigController, StepperAxis,
    SystemConfig,
};
use rig_motion::motor::StepperAxisBuilder;

/// Steps per millimeter of [`TEST_CONFIG`].
pub const STEPS_PER_MM: i64 = 10;

/// Reference wiring with a coarse scale so simulations stay short.
pub const TEST_CONFIG: &str = r#"
[rig]
microsteps = 1
full_steps_per_mm = 10.0
max_speed_full_steps_per_sec = 300.0
max_acceleration_full_steps_per_sec2 = 150.0
axis_length_mm = 180.0

[messaging]
namespace = "/beamershutter"

[axes.x]
name = "X"
step_pin = 26
dir_pin = 16
limit_pin = 13

[axes.y]
name = "Y"
step_pin = 25
dir_pin = 27
limit_pin = 5

[axes.z]
name = "Z"
step_pin = 17
dir_pin = 14
limit_pin = 23

[axes.a]
name = "A"
step_pin = 19
dir_pin = 18
limit_pin = 4
"#;

/// Clock that moves forward every time it is read.
pub struct TickingClock {
    now_us: Cell<u64>,
    step_us: u64,
}

impl TickingClock {
    pub fn new(step_us: u64) -> Self {
        Self {
            now_us: Cell::new(0),
            step_us,
        }
    }
}

impl Clock for TickingClock {
    fn now_us(&self) -> u64 {
        let now = self.now_us.get() + self.step_us;
        self.now_us.set(now);
        now
    }
}

/// Physical carriage of one axis.
#[derive(Default)]
pub struct Carriage {
    pub position: Cell<i64>,
    pub positive: Cell<bool>,
    pub steps_while_disabled: Cell<u32>,
}

pub struct StepPin {
    carriage: Rc<Carriage>,
    energized: Rc<Cell<bool>>,
    high: bool,
}

impl ErrorType for StepPin {
    type Error = Infallible;
}

impl OutputPin for StepPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            if !self.energized.get() {
                let missed = self.carriage.steps_while_disabled.get();
                self.carriage.steps_while_disabled.set(missed + 1);
            }
            let delta = if self.carriage.positive.get() { 1 } else { -1 };
            self.carriage.position.set(self.carriage.position.get() + delta);
        }
        self.high = true;
        Ok(())
    }
}

pub struct DirPin {
    carriage: Rc<Carriage>,
}

impl ErrorType for DirPin {
    type Error = Infallible;
}

impl OutputPin for DirPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.carriage.positive.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.carriage.positive.set(true);
        Ok(())
    }
}

/// Active-low switch closing at or below `trip_at`.
pub struct LimitPin {
    carriage: Rc<Carriage>,
    trip_at: Option<i64>,
    hysteresis: i64,
    closed: bool,
}

impl LimitPin {
    fn sample(&mut self) -> bool {
        if let Some(trip_at) = self.trip_at {
            let position = self.carriage.position.get();
            if position <= trip_at {
                self.closed = true;
            } else if position >= trip_at + self.hysteresis {
                self.closed = false;
            }
        }
        self.closed
    }
}

impl ErrorType for LimitPin {
    type Error = Infallible;
}

impl InputPin for LimitPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.sample())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.sample())
    }
}

/// Active-low enable output that logs every level it is driven to.
pub struct EnablePin {
    energized: Rc<Cell<bool>>,
    pub log: Rc<RefCell<Vec<bool>>>,
}

impl ErrorType for EnablePin {
    type Error = Infallible;
}

impl OutputPin for EnablePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.energized.set(true);
        self.log.borrow_mut().push(true);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.energized.set(false);
        self.log.borrow_mut().push(false);
        Ok(())
    }
}

/// Delay that records instead of sleeping.
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

pub type SimAxis<'a> = StepperAxis<StepPin, DirPin, &'a TickingClock>;
pub type SimRig<'a> = RigController<SimAxis<'a>, LimitSwitch<LimitPin>, EnablePin, RecordingDelay, 4>;

/// Four carriages, one enable line and the clock driving them.
pub struct Bench {
    pub config: SystemConfig,
    pub clock: TickingClock,
    pub carriages: [Rc<Carriage>; 4],
    pub energized: Rc<Cell<bool>>,
    pub enable_log: Rc<RefCell<Vec<bool>>>,
}

impl Bench {
    /// Carriages start `start_mm` above their switches.
    pub fn new(start_mm: i64) -> Self {
        let config = rig_motion::parse_config(TEST_CONFIG).expect("test config parses");
        let carriages = std::array::from_fn(|_| {
            let carriage = Carriage::default();
            carriage.position.set(start_mm * STEPS_PER_MM);
            Rc::new(carriage)
        });

        Self {
            config,
            clock: TickingClock::new(100),
            carriages,
            energized: Rc::new(Cell::new(false)),
            enable_log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Physical carriage positions in steps.
    pub fn positions(&self) -> [i64; 4] {
        std::array::from_fn(|i| self.carriages[i].position.get())
    }

    /// Steps issued while the drivers were de-energized, over all axes.
    pub fn steps_while_disabled(&self) -> u32 {
        self.carriages
            .iter()
            .map(|c| c.steps_while_disabled.get())
            .sum()
    }

    /// Build a controller. Switches sit at physical zero with 2 mm of
    /// hysteresis; `None` is a switch that never closes.
    pub fn rig(&self, switches: [Option<i64>; 4]) -> SimRig<'_> {
        let names: Vec<&str> = self.config.axis_names().collect();

        let axes = std::array::from_fn(|i| {
            let carriage = &self.carriages[i];
            let motion = StepperAxisBuilder::new()
                .from_config(&self.config, names[i])
                .expect("axis is configured")
                .step_pin(StepPin {
                    carriage: carriage.clone(),
                    energized: self.energized.clone(),
                    high: false,
                })
                .dir_pin(DirPin {
                    carriage: carriage.clone(),
                })
                .clock(&self.clock)
                .build()
                .expect("axis builds");
            let limit = LimitSwitch::new(
                LimitPin {
                    carriage: carriage.clone(),
                    trip_at: switches[i],
                    hysteresis: 2 * STEPS_PER_MM,
                    closed: false,
                },
                true,
            );
            Axis::new(AxisId(i as u8), names[i], motion, limit)
        });

        let enable = EnableLine::new(
            EnablePin {
                energized: self.energized.clone(),
                log: self.enable_log.clone(),
            },
            self.config.rig.enable_active_low,
        )
        .expect("enable line");

        RigController::from_config(&self.config, axes, enable, RecordingDelay::default())
            .expect("controller builds")
    }

    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::from_config(&self.config.messaging).expect("dispatcher builds")
    }
}

/// Message bus that keeps everything it is asked to do.
#[derive(Default)]
pub struct RecordingBus {
    pub subscribed: Vec<String>,
    pub published: Vec<(String, String)>,
}

impl MessageBus for RecordingBus {
    type Error = Infallible;

    fn subscribe(&mut self, topic: &str) -> Result<(), Infallible> {
        self.subscribed.push(topic.to_string());
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Infallible> {
        self.published
            .push((topic.to_string(), String::from_utf8_lossy(payload).into_owned()));
        Ok(())
    }
}
