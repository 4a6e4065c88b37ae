//! Namespace-prefixed topic names.

use core::fmt::Write;

use heapless::String;

use crate::config::MessagingConfig;
use crate::error::ConfigError;

/// Maximum length of a full topic name.
pub const TOPIC_CAPACITY: usize = 64;

/// Full topic name.
pub type Topic = String<TOPIC_CAPACITY>;

/// The four topics the rig uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    /// Inbound absolute move target.
    pub move_to: Topic,
    /// Inbound homing request.
    pub home: Topic,
    /// Outbound network status.
    pub network_status: Topic,
    /// Outbound motion status.
    pub motion_status: Topic,
}

impl Topics {
    /// Build every topic under `namespace`.
    pub fn new(namespace: &str) -> Result<Self, ConfigError> {
        if namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }

        Ok(Self {
            move_to: join(namespace, "/move")?,
            home: join(namespace, "/home")?,
            network_status: join(namespace, "/wifi_status")?,
            motion_status: join(namespace, "/motion_status")?,
        })
    }

    /// Topics for the configured namespace.
    pub fn from_config(config: &MessagingConfig) -> Result<Self, ConfigError> {
        Self::new(config.namespace.as_str())
    }

    /// Topics the rig subscribes to.
    pub fn subscriptions(&self) -> [&str; 2] {
        [self.move_to.as_str(), self.home.as_str()]
    }
}

fn join(namespace: &str, suffix: &str) -> Result<Topic, ConfigError> {
    let mut topic = Topic::new();
    write!(topic, "{}{}", namespace, suffix).map_err(|_| {
        let mut msg = String::new();
        let _ = write!(msg, "topic too long for namespace {}", namespace);
        ConfigError::ParseError(msg)
    })?;
    Ok(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace() {
        let topics = Topics::from_config(&MessagingConfig::default()).unwrap();

        assert_eq!(topics.move_to.as_str(), "/beamershutter/move");
        assert_eq!(topics.home.as_str(), "/beamershutter/home");
        assert_eq!(topics.network_status.as_str(), "/beamershutter/wifi_status");
        assert_eq!(topics.motion_status.as_str(), "/beamershutter/motion_status");
    }

    #[test]
    fn test_empty_namespace() {
        assert_eq!(Topics::new(""), Err(ConfigError::EmptyNamespace));
    }

    #[test]
    fn test_namespace_too_long() {
        let long = "/abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghij";
        assert!(matches!(Topics::new(long), Err(ConfigError::ParseError(_))));
    }
}
