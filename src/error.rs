//! Error types.
//!
//! Device errors never escape a control tick: callers log them and fall back to
//! a neutral value. Configuration errors are reported once, before the loop
//! starts.

use thiserror::Error;

/// A failure reported by an input or actuator device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The device is not plugged in or the radio link dropped.
    #[error("device disconnected")]
    Disconnected,

    /// The device on a smart port rejected the request.
    #[error("port {port}: {message}")]
    Port { port: u8, message: String },

    /// The controller rejected a read.
    #[error("controller: {0}")]
    Controller(String),
}

/// A [`TeleopConfig`](crate::config::TeleopConfig) that cannot drive the robot safely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,

    #[error("switch cooldown must not be negative (got {0})")]
    NegativeCooldown(i32),

    #[error("chaos intensity must be within 0..=127 (got {0})")]
    IntensityOutOfRange(i32),

    #[error("lift tolerance must be positive (got {0})")]
    NonPositiveTolerance(f64),

    #[error("lift full extension ({full}) must exceed its tolerance ({tolerance})")]
    ExtensionWithinTolerance { full: f64, tolerance: f64 },

    #[error("lift max velocity must be within 1..=127 (got {0})")]
    VelocityOutOfRange(i32),

    #[error("report interval must be greater than zero")]
    ZeroReportInterval,

    #[error("button {0:?} is bound to more than one mechanism")]
    DuplicateBinding(crate::peripherals::controller::ControllerButton),
}
