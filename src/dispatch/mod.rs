//! Message-driven command intake and status publishing.
//!
//! The transport itself stays outside the crate behind [`MessageBus`]. A
//! [`CommandDispatcher`] maps inbound messages onto [`RigController`] calls
//! and paces outbound status reports.

mod command;
mod status;
mod topics;

pub use command::Command;
pub use status::{encode, MotionStatus, NetworkStatus, StatusReporter, STATUS_CAPACITY};
pub use topics::{Topic, Topics, TOPIC_CAPACITY};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Millimeters;
use crate::config::MessagingConfig;
use crate::error::{ConfigError, DispatchError, Error, Result};
use crate::rig::{IgnoreReason, LimitSensor, MotionAxis, MoveOutcome, RigController};

/// Publish/subscribe transport.
pub trait MessageBus {
    /// Transport failure.
    type Error;

    /// Start receiving messages on `topic`.
    fn subscribe(&mut self, topic: &str) -> core::result::Result<(), Self::Error>;

    /// Send `payload` on `topic`.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> core::result::Result<(), Self::Error>;
}

/// What a handled command did.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// Every axis moved to `target`.
    Moved {
        /// Clamped position applied to every axis.
        target: Millimeters,
    },
    /// Homing succeeded.
    Homed {
        /// Attempts it took.
        attempts: u32,
    },
    /// The command was dropped without effect.
    Ignored(IgnoreReason),
}

/// Routes inbound messages to the rig and reports its status.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    topics: Topics,
    reporter: StatusReporter,
}

impl CommandDispatcher {
    /// Dispatcher for the given topics and report pacing.
    pub fn new(topics: Topics, reporter: StatusReporter) -> Self {
        Self { topics, reporter }
    }

    /// Dispatcher for the configured namespace and status interval.
    pub fn from_config(config: &MessagingConfig) -> core::result::Result<Self, ConfigError> {
        Ok(Self::new(
            Topics::from_config(config)?,
            StatusReporter::new(config.status_interval_ms),
        ))
    }

    /// Topic names in use.
    #[inline]
    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Decode and execute one inbound message.
    ///
    /// Blocks until the resulting move or homing run is finished. Homing
    /// follows the controller's retry policy. A move while unhomed is dropped
    /// and reported only through the returned outcome.
    pub fn handle<M, L, P, D, const N: usize>(
        &self,
        controller: &mut RigController<M, L, P, D, N>,
        topic: &str,
        payload: &[u8],
    ) -> Result<DispatchOutcome>
    where
        M: MotionAxis,
        L: LimitSensor,
        P: OutputPin,
        D: DelayNs,
    {
        let command = match Command::parse(&self.topics, topic, payload) {
            Ok(command) => command,
            Err(err) => {
                warn!("dropping message on {=str}", topic);
                return Err(Error::Dispatch(err));
            }
        };

        match command {
            Command::MoveTo(requested) => match controller.move_to(requested)? {
                MoveOutcome::Completed { target } => {
                    info!("moved to {} mm", target.0);
                    Ok(DispatchOutcome::Moved { target })
                }
                MoveOutcome::Ignored(reason) => {
                    info!("move ignored: {}", reason);
                    Ok(DispatchOutcome::Ignored(reason))
                }
            },
            Command::Home => {
                let attempts = controller.home_with_retry()?;
                info!("homed after {} attempts", attempts);
                Ok(DispatchOutcome::Homed { attempts })
            }
        }
    }

    /// Subscribe to the command topics and announce the network identity.
    ///
    /// Call on every (re)connection.
    pub fn on_connected<B>(
        &self,
        bus: &mut B,
        network: &NetworkStatus,
    ) -> core::result::Result<(), DispatchError>
    where
        B: MessageBus,
    {
        for topic in self.topics.subscriptions() {
            bus.subscribe(topic).map_err(|_| DispatchError::Publish)?;
        }

        let mut buf = [0u8; STATUS_CAPACITY];
        let len = encode(network, &mut buf)?;
        bus.publish(self.topics.network_status.as_str(), &buf[..len])
            .map_err(|_| DispatchError::Publish)
    }

    /// Publish the motion status if the report interval has elapsed.
    ///
    /// Returns whether a report was sent.
    pub fn poll_status<M, L, P, D, B, const N: usize>(
        &mut self,
        now_ms: u64,
        controller: &RigController<M, L, P, D, N>,
        bus: &mut B,
    ) -> core::result::Result<bool, DispatchError>
    where
        M: MotionAxis,
        L: LimitSensor,
        P: OutputPin,
        D: DelayNs,
        B: MessageBus,
    {
        if !self.reporter.poll(now_ms) {
            return Ok(false);
        }
        self.publish_status(controller, bus)?;
        Ok(true)
    }

    /// Publish the motion status now.
    pub fn publish_status<M, L, P, D, B, const N: usize>(
        &self,
        controller: &RigController<M, L, P, D, N>,
        bus: &mut B,
    ) -> core::result::Result<(), DispatchError>
    where
        M: MotionAxis,
        L: LimitSensor,
        P: OutputPin,
        D: DelayNs,
        B: MessageBus,
    {
        let status = MotionStatus {
            current_position: controller.current_position().0,
            axis_homed: controller.is_homed(),
        };

        let mut buf = [0u8; STATUS_CAPACITY];
        let len = encode(&status, &mut buf)?;
        bus.publish(self.topics.motion_status.as_str(), &buf[..len])
            .map_err(|_| DispatchError::Publish)
    }
}
