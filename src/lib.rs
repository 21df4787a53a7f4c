//! # Firebrand
//!
//! Firebrand is the driver-control core of a VEX V5 competition robot with a
//! four-motor differential drive, a double-reverse-four-bar lift and a
//! two-motor claw. It runs on [Vexide](https://vexide.dev) with the `vexide`
//! feature, and on a desktop against simulated devices without it.
//!
//! - **Drive**: stick input shaped by a sigmoid response curve, mixed as tank,
//!   arcade or Ludicrous (tank with a random drift on each side).
//! - **Style selection**: hold L1, L2, R1 and R2 together to cycle styles,
//!   with a cooldown so one long press switches once.
//! - **Lift**: manual raise/lower, plus one press to seek full extension or the bottom.
//! - **Claw**: open/close on two buttons.
//! - **Logging**: a console and SD-card logger built on the [`log`] facade.
//!
//! ## Quick Start
//!
//! ```
//! use firebrand::{
//!     config::TeleopConfig,
//!     drivetrain::Differential,
//!     opcontrol::teleop::{ControlLoop, Robot},
//!     sim::{SimDelay, SimDiagnostics, SimGamepad, SimMotor, TickLimit},
//! };
//!
//! let robot = Robot {
//!     gamepad:     Box::new(SimGamepad::default()),
//!     drivetrain:  Differential::new(
//!         [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!         [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!     ),
//!     lift:        [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!     claw:        [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!     delay:       Box::new(SimDelay::default()),
//!     diagnostics: Box::new(SimDiagnostics::default()),
//! };
//!
//! let mut teleop = ControlLoop::new(robot, TeleopConfig::default()).unwrap();
//! assert_eq!(teleop.run(&TickLimit::new(3)), 3);
//! ```
//!
//! ## Modules
//!
//! - [`opcontrol`]: Response curve, style selection, lift, claw and the control loop.
//! - [`drivetrain`]: Drive mixing and the four-motor differential.
//! - [`peripherals`]: The device traits the loop is written against.
//! - [`config`]: Tunables and button bindings.
//! - [`sim`]: Simulated devices.
//! - [`fs`]: Filesystem utilities including logging.

/// Tunables and button bindings.
///
/// Provides [`TeleopConfig`](config::TeleopConfig) with the competition
/// defaults, and its validation.
pub mod config;

/// Differential drivetrain control module.
///
/// Provides [`mix`](drivetrain::mix), which turns shaped stick input into
/// left/right commands for the current style, and the
/// [`Differential`](drivetrain::Differential) that applies them.
pub mod drivetrain;

/// Error types for device access and configuration.
pub mod error;

/// Filesystem utilities module.
///
/// Contains the logger that records style switches, lift reports and device
/// faults to the console and the V5 Brain's SD card.
pub mod fs;

/// Operator control module.
///
/// Everything that runs during the driver-controlled period.
pub mod opcontrol;

/// Device capability traits.
///
/// Provides [`Gamepad`](peripherals::Gamepad), [`Actuator`](peripherals::Actuator)
/// and the other seams between the control core and real or simulated hardware.
pub mod peripherals;

/// Simulated devices for tests and desktop runs.
pub mod sim;

/// V5 adapters for the device traits.
#[cfg(feature = "vexide")]
pub mod hardware;
