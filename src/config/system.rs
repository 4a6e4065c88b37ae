//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::homing::HomingConfig;
use super::messaging::MessagingConfig;
use super::rig::RigConfig;

/// Maximum number of axes a configuration may declare.
pub const MAX_AXES: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Drive parameters shared by every axis.
    #[serde(default)]
    pub rig: RigConfig,

    /// Homing protocol parameters.
    #[serde(default)]
    pub homing: HomingConfig,

    /// Topic namespace and status cadence.
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Named axes, in declaration order.
    #[serde(default = "default_axes")]
    pub axes: FnvIndexMap<String<16>, AxisConfig, MAX_AXES>,
}

fn default_axes() -> FnvIndexMap<String<16>, AxisConfig, MAX_AXES> {
    let mut axes = FnvIndexMap::new();
    for axis in [
        AxisConfig::new("X", 26, 16, 13),
        AxisConfig::new("Y", 25, 27, 5),
        AxisConfig::new("Z", 17, 14, 23),
        AxisConfig::new("A", 19, 18, 4),
    ] {
        let key = axis.name.clone();
        let _ = axes.insert(key, axis);
    }
    axes
}

impl SystemConfig {
    /// Get an axis configuration by key.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis keys in declaration order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }

    /// Number of configured axes.
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            rig: RigConfig::default(),
            homing: HomingConfig::default(),
            messaging: MessagingConfig::default(),
            axes: default_axes(),
        }
    }
}
