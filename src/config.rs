//! Driver-control configuration.
//!
//! The defaults reproduce the competition robot: a 20 ms tick, a 25-tick
//! style-switch cooldown, a Ludicrous drift step of 5, and a lift that
//! extends to 40 degrees with 5 degrees of tolerance.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use firebrand::config::TeleopConfig;
//!
//! let config = TeleopConfig {
//!     tick_period: Duration::from_millis(10),
//!     ..TeleopConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::{
    error::ConfigError,
    opcontrol::{
        lift::{LiftBindings, REPORT_INTERVAL},
        ludicrous::LU_FLAME_INTENSITY,
        mode::SWITCH_COOLDOWN,
    },
    peripherals::{MAX_COMMAND, controller::ControllerButton},
};

/// Default control tick.
pub const LOOPRATE: Duration = Duration::from_millis(20);

/// Geometry and speed limits of the lift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftConfig {
    /// Motor position at full extension, in degrees.
    pub full_extension: f64,
    /// How close to a seek target counts as arrived, in degrees.
    pub tolerance:      f64,
    /// Speed for manual drive and seeks, in command units.
    pub max_velocity:   i32,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            full_extension: 40.0,
            tolerance:      5.0,
            max_velocity:   MAX_COMMAND,
        }
    }
}

/// Which controller buttons operate what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBindings {
    /// Held together to cycle the drive style.
    pub mode_combo: [ControllerButton; 4],
    pub lift:       LiftBindings,
    pub claw_open:  ControllerButton,
    pub claw_close: ControllerButton,
}

impl Default for ButtonBindings {
    fn default() -> Self {
        Self {
            mode_combo: [
                ControllerButton::ButtonL1,
                ControllerButton::ButtonL2,
                ControllerButton::ButtonR1,
                ControllerButton::ButtonR2,
            ],
            lift:       LiftBindings::default(),
            claw_open:  ControllerButton::ButtonA,
            claw_close: ControllerButton::ButtonY,
        }
    }
}

/// Everything the control loop needs to know besides the hardware.
#[derive(Debug, Clone, PartialEq)]
pub struct TeleopConfig {
    pub tick_period:     Duration,
    /// Ticks during which the style combo is ignored after a switch.
    pub switch_cooldown: i32,
    /// Largest per-tick drift step in Ludicrous mode.
    pub chaos_intensity: i32,
    /// Root seed for Ludicrous drift.
    pub seed:            u64,
    /// Ticks between lift position reports.
    pub report_interval: u32,
    pub lift:            LiftConfig,
    pub bindings:        ButtonBindings,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            tick_period:     LOOPRATE,
            switch_cooldown: SWITCH_COOLDOWN,
            chaos_intensity: LU_FLAME_INTENSITY,
            seed:            0x8059_f1a3_e5ee_d000,
            report_interval: REPORT_INTERVAL,
            lift:            LiftConfig::default(),
            bindings:        ButtonBindings::default(),
        }
    }
}

impl TeleopConfig {
    /// Checks that the configuration is safe to run.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.switch_cooldown < 0 {
            return Err(ConfigError::NegativeCooldown(self.switch_cooldown));
        }
        if !(0..=MAX_COMMAND).contains(&self.chaos_intensity) {
            return Err(ConfigError::IntensityOutOfRange(self.chaos_intensity));
        }
        if self.lift.tolerance.is_nan() || self.lift.tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveTolerance(self.lift.tolerance));
        }
        if !(self.lift.full_extension > self.lift.tolerance) {
            return Err(ConfigError::ExtensionWithinTolerance {
                full:      self.lift.full_extension,
                tolerance: self.lift.tolerance,
            });
        }
        if !(1..=MAX_COMMAND).contains(&self.lift.max_velocity) {
            return Err(ConfigError::VelocityOutOfRange(self.lift.max_velocity));
        }
        if self.report_interval == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }

        let lift = self.bindings.lift;
        let mechanisms = [
            lift.raise,
            lift.lower,
            lift.seek_up,
            lift.seek_down,
            self.bindings.claw_open,
            self.bindings.claw_close,
        ];
        for (i, button) in mechanisms.iter().enumerate() {
            if mechanisms[i + 1..].contains(button) {
                return Err(ConfigError::DuplicateBinding(*button));
            }
        }
        Ok(())
    }
}
