//! Driver control.
//!
//! This module holds every piece of the driver-controlled period: how stick
//! input is shaped, how the drive style is chosen, the Ludicrous drift, the
//! lift and claw mechanisms, and the loop that ties them together.
//!
//! # Features
//!
//! - **Response curve**: a sigmoid that flattens small stick deflections.
//! - **Drive styles**: tank, arcade and Ludicrous, cycled with a four-button combo.
//! - **Lift**: manual raise/lower plus one-press seeks to full extension or the bottom.
//! - **Claw**: two-button open/close.
//!
//! # Example
//!
//! ```ignore
//! use firebrand::{config::TeleopConfig, opcontrol::teleop::ControlLoop};
//!
//! let mut teleop = ControlLoop::new(robot, TeleopConfig::default())?;
//! teleop.run(&stop);
//! ```

/// Joystick response curve.
///
/// Provides [`shape`](curve::shape), backed by a precomputed sigmoid table.
pub mod curve;

/// Ludicrous-mode drift.
///
/// Provides the [`LudicrousPerturber`](ludicrous::LudicrousPerturber), a
/// bounded random walk applied to each drive side.
pub mod ludicrous;

/// Drive style selection.
///
/// Provides [`ControlStyle`](mode::ControlStyle) and the debounced
/// [`ModeSelector`](mode::ModeSelector).
pub mod mode;

/// Button-pair to motor mapping.
pub mod controller;

/// Lift state machine.
///
/// Provides the [`LiftController`](lift::LiftController), which combines
/// manual drive with automatic seeks to either end of travel.
pub mod lift;

/// Claw / intake control.
pub mod claw;

/// The driver-control loop.
///
/// Provides [`ControlLoop`](teleop::ControlLoop) and the
/// [`Robot`](teleop::Robot) device bundle it owns.
pub mod teleop;
