//! Configuration validation.

use heapless::Vec;

use crate::error::{ConfigError, Error, Result};

use super::system::MAX_AXES;
use super::{AxisConfig, HomingConfig, MessagingConfig, RigConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Drive parameters are positive
/// - Homing travel and speed divisors are usable
/// - At least one axis is configured and every per-axis scale is positive
/// - No pin is assigned twice
/// - The topic namespace is not empty
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_rig(&config.rig)?;
    validate_homing(&config.homing, &config.rig)?;
    validate_messaging(&config.messaging)?;

    if config.axes.is_empty() {
        return Err(Error::Config(ConfigError::NoAxes));
    }

    for axis in config.axes.values() {
        validate_axis(axis)?;
    }

    validate_pins(config)
}

fn validate_rig(rig: &RigConfig) -> Result<()> {
    if !is_positive(rig.full_steps_per_mm) {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm(rig.full_steps_per_mm)));
    }

    if !is_positive(rig.max_speed) {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(rig.max_speed)));
    }

    if !is_positive(rig.max_acceleration) {
        return Err(Error::Config(ConfigError::InvalidMaxAcceleration(
            rig.max_acceleration,
        )));
    }

    if !is_positive(rig.axis_length_mm.0) {
        return Err(Error::Config(ConfigError::InvalidAxisLength(rig.axis_length_mm.0)));
    }

    Ok(())
}

fn validate_homing(homing: &HomingConfig, rig: &RigConfig) -> Result<()> {
    let travel = homing.travel(rig.axis_length_mm);
    if !is_positive(travel.0) {
        return Err(Error::Config(ConfigError::InvalidHomingTravel(travel.0)));
    }

    for divisor in [homing.coarse_speed_divisor, homing.fine_speed_divisor] {
        if divisor == 0 {
            return Err(Error::Config(ConfigError::InvalidSpeedDivisor(divisor)));
        }
    }

    Ok(())
}

fn validate_messaging(messaging: &MessagingConfig) -> Result<()> {
    if messaging.namespace.trim().is_empty() {
        return Err(Error::Config(ConfigError::EmptyNamespace));
    }
    Ok(())
}

fn validate_axis(axis: &AxisConfig) -> Result<()> {
    if let Some(scale) = axis.steps_per_mm {
        if !is_positive(scale) {
            return Err(Error::Config(ConfigError::InvalidStepsPerMm(scale)));
        }
    }
    Ok(())
}

// NaN compares false against everything, so test for the good case.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_pins(config: &SystemConfig) -> Result<()> {
    let mut seen: Vec<u8, { MAX_AXES * 3 + 1 }> = Vec::new();

    let axis_pins = config.axes.values().flat_map(|axis| axis.pins());
    for pin in core::iter::once(config.rig.enable_pin).chain(axis_pins) {
        if seen.contains(&pin) {
            return Err(Error::Config(ConfigError::DuplicatePin(pin)));
        }
        // Capacity covers every pin a valid config can declare.
        let _ = seen.push(pin);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Millimeters;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SystemConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut config = SystemConfig::default();
        config.homing.fine_speed_divisor = 0;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSpeedDivisor(0)))
        ));
    }

    #[test]
    fn test_negative_axis_length_rejected() {
        let mut config = SystemConfig::default();
        config.rig.axis_length_mm = Millimeters(-1.0);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidAxisLength(_)))
        ));
    }

    #[test]
    fn test_nan_axis_length_rejected() {
        let mut config = SystemConfig::default();
        config.rig.axis_length_mm = Millimeters(f32::NAN);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidAxisLength(_)))
        ));
    }

    #[test]
    fn test_non_finite_drive_parameters_rejected() {
        let mut config = SystemConfig::default();
        config.rig.max_speed = f32::INFINITY;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
        ));

        let mut config = SystemConfig::default();
        config.rig.max_acceleration = f32::NAN;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMaxAcceleration(_)))
        ));

        let mut config = SystemConfig::default();
        config.rig.full_steps_per_mm = f32::NAN;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidStepsPerMm(_)))
        ));
    }

    #[test]
    fn test_nan_homing_travel_rejected() {
        let mut config = SystemConfig::default();
        config.homing.travel_mm = Some(Millimeters(f32::NAN));

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidHomingTravel(_)))
        ));
    }

    #[test]
    fn test_nan_axis_scale_rejected() {
        let mut config = SystemConfig::default();
        if let Some(axis) = config.axes.values_mut().next() {
            axis.steps_per_mm = Some(f32::NAN);
        }

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidStepsPerMm(_)))
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_nan_from_toml_rejected() {
        use crate::config::parse_config;

        assert!(parse_config("[rig]\naxis_length_mm = nan\n").is_err());
        assert!(parse_config("[homing]\ntravel_mm = nan\n").is_err());
    }

    #[test]
    fn test_enable_pin_collision() {
        let mut config = SystemConfig::default();
        // X limit pin is 13
        config.rig.enable_pin = 13;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicatePin(13)))
        ));
    }

    #[test]
    fn test_empty_axes_rejected() {
        let mut config = SystemConfig::default();
        config.axes.clear();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::NoAxes))
        ));
    }
}
