//! Error types for rig-motion.
//!
//! Provides unified error handling across configuration, axis hardware,
//! homing and command dispatch.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all rig-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis hardware error
    Motor(MotorError),
    /// Homing sequence failure
    Homing(HomingError),
    /// Inbound command or status publishing error
    Dispatch(DispatchError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// No axes configured
    NoAxes,
    /// Configured axis count differs from the axes handed to the rig
    AxisCountMismatch {
        /// Number of configured axes
        configured: usize,
        /// Number of axes the rig was built with
        provided: usize,
    },
    /// Invalid steps per millimeter (must be > 0)
    InvalidStepsPerMm(f32),
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Invalid max acceleration (must be > 0)
    InvalidMaxAcceleration(f32),
    /// Invalid axis length (must be > 0)
    InvalidAxisLength(f32),
    /// Invalid homing travel distance (must be > 0)
    InvalidHomingTravel(f32),
    /// Invalid homing speed divisor (must be >= 1)
    InvalidSpeedDivisor(u16),
    /// Topic namespace is empty
    EmptyNamespace,
    /// The same pin number is assigned twice
    DuplicatePin(u8),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis hardware errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Axis was asked to move before speed/acceleration were configured
    NotConfigured,
}

/// Homing sequence failures.
///
/// The first three map one-to-one onto the homing phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// Not all axes reached their limit switch within the coarse-seek travel bound
    SeekFailure,
    /// Not all axes cleared their limit switch within the back-off travel bound
    BackoffFailure,
    /// Not all axes re-reached their limit switch during the fine seek
    FineSeekFailure,
    /// A pin operation failed while stepping
    Hardware(MotorError),
    /// Bounded retry policy gave up
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Failure of the final attempt
        last: HomingFailure,
    },
}

/// Failure kind of a single homing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingFailure {
    /// Coarse seek did not reach every switch
    Seek,
    /// Back-off did not clear every switch
    Backoff,
    /// Fine seek did not reach every switch
    FineSeek,
    /// Pin failure
    Hardware,
}

/// Command dispatch errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Payload could not be parsed as a position
    InvalidPayload(heapless::String<32>),
    /// Topic is not one of the rig's command topics
    UnknownTopic(heapless::String<64>),
    /// Status payload did not fit the output buffer
    Encode,
    /// The message bus refused a publish or subscribe
    Publish,
}

impl HomingError {
    /// Classify this error as the failure kind of one attempt.
    pub fn failure(&self) -> HomingFailure {
        match self {
            HomingError::SeekFailure => HomingFailure::Seek,
            HomingError::BackoffFailure => HomingFailure::Backoff,
            HomingError::FineSeekFailure => HomingFailure::FineSeek,
            HomingError::Hardware(_) => HomingFailure::Hardware,
            HomingError::RetriesExhausted { last, .. } => *last,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
            Error::Dispatch(e) => write!(f, "Dispatch error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::NoAxes => write!(f, "No axes configured"),
            ConfigError::AxisCountMismatch { configured, provided } => {
                write!(f, "{} axes configured, {} provided", configured, provided)
            }
            ConfigError::InvalidStepsPerMm(v) => write!(f, "Invalid steps per mm: {}. Must be > 0", v),
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::InvalidMaxAcceleration(v) => write!(f, "Invalid max acceleration: {}. Must be > 0", v),
            ConfigError::InvalidAxisLength(v) => write!(f, "Invalid axis length: {}. Must be > 0", v),
            ConfigError::InvalidHomingTravel(v) => write!(f, "Invalid homing travel: {}. Must be > 0", v),
            ConfigError::InvalidSpeedDivisor(v) => write!(f, "Invalid homing speed divisor: {}. Must be >= 1", v),
            ConfigError::EmptyNamespace => write!(f, "Topic namespace must not be empty"),
            ConfigError::DuplicatePin(pin) => write!(f, "Pin {} is assigned more than once", pin),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::NotConfigured => write!(f, "Axis speed or acceleration not configured"),
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::SeekFailure => write!(f, "homing failed: towards limit switch"),
            HomingError::BackoffFailure => write!(f, "homing failed: back-off limit switch"),
            HomingError::FineSeekFailure => write!(f, "homing failed: towards limit switch (slower)"),
            HomingError::Hardware(e) => write!(f, "homing failed: {}", e),
            HomingError::RetriesExhausted { attempts, last } => {
                write!(f, "homing gave up after {} attempts (last: {:?})", attempts, last)
            }
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidPayload(p) => write!(f, "Invalid position payload: '{}'", p),
            DispatchError::UnknownTopic(t) => write!(f, "Unknown topic: '{}'", t),
            DispatchError::Encode => write!(f, "Status payload exceeds buffer"),
            DispatchError::Publish => write!(f, "Message bus rejected the operation"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

impl From<DispatchError> for Error {
    fn from(e: DispatchError) -> Self {
        Error::Dispatch(e)
    }
}

impl From<MotorError> for HomingError {
    fn from(e: MotorError) -> Self {
        HomingError::Hardware(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

#[cfg(feature = "std")]
impl std::error::Error for DispatchError {}
