//! Hardware capabilities consumed by the driver-control core.
//!
//! The control loop never talks to a device directly. Everything it needs is
//! expressed as one of the traits below, so the same code drives a V5 robot
//! (see the `hardware` module, feature `vexide`) or the simulated devices in
//! [`sim`](crate::sim).
//!
//! | Trait | Capability |
//! | ----- | ---------- |
//! | [`Gamepad`] | Read analog axes and digital buttons. |
//! | [`Actuator`] | Command a velocity, command a move to an absolute position, read position. |
//! | [`Delay`] | Wait out the remainder of a control tick. |
//! | [`Diagnostics`] | Fire-and-forget text output. |
//! | [`StopSignal`] | Externally owned request to end the loop. |
//!
//! Commands are fire-and-forget. A device that fails to act is logged and
//! otherwise ignored; detecting a stuck mechanism is left to whoever owns the
//! loop.

/// Controller buttons, axes and the per-tick [`JoystickFrame`](controller::JoystickFrame).
pub mod controller;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use log::{debug, warn};

use crate::{
    error::DeviceError,
    peripherals::controller::{ControllerAxis, ControllerButton, JoystickFrame},
};

/// Largest magnitude of any axis reading or motor command.
pub const MAX_COMMAND: i32 = 127;

/// Saturates a command into `-127..=127`.
pub fn clamp_command(value: i32) -> i32 { value.clamp(-MAX_COMMAND, MAX_COMMAND) }

/// A single instruction for an [`Actuator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    /// Spin open-loop at a velocity in command units.
    Velocity(i32),
    /// Seek an absolute position in degrees, limited to `max_velocity` command units.
    MoveAbsolute { target: f64, max_velocity: i32 },
}

/// A source of controller input.
pub trait Gamepad {
    /// Reads an analog axis in `-127..=127`.
    fn read_axis(&self, axis: ControllerAxis) -> Result<i32, DeviceError>;

    /// Reads whether a digital button is held.
    fn read_button(&self, button: ControllerButton) -> Result<bool, DeviceError>;

    /// Samples every axis and button into a frame.
    ///
    /// Failed reads are replaced by neutral values (centered stick, released
    /// button) and reported with a single warning per sample.
    fn sample(&self) -> JoystickFrame {
        let mut frame = JoystickFrame::neutral();
        let mut failure = None;

        for axis in ControllerAxis::ALL {
            match self.read_axis(axis) {
                Ok(value) => frame.set_axis(axis, value),
                Err(e) => failure = Some(e),
            }
        }
        for button in ControllerButton::ALL {
            match self.read_button(button) {
                Ok(pressed) => frame.set_button(button, pressed),
                Err(e) => failure = Some(e),
            }
        }

        if let Some(e) = failure {
            warn!("Controller State Error: {}", e);
        }
        frame
    }
}

/// A motor, or anything else that can be driven like one.
pub trait Actuator {
    /// Spins at `velocity` command units (`-127..=127`).
    fn set_velocity(&mut self, velocity: i32) -> Result<(), DeviceError>;

    /// Starts moving toward `target` degrees at up to `max_velocity` command
    /// units. Completion is only observable through [`position`](Self::position).
    fn move_absolute(&mut self, target: f64, max_velocity: i32) -> Result<(), DeviceError>;

    /// Reads the encoder position in degrees.
    fn position(&self) -> Result<f64, DeviceError>;

    /// Issues a [`MotorCommand`], clamping any velocity first.
    fn command(&mut self, command: MotorCommand) -> Result<(), DeviceError> {
        match command {
            MotorCommand::Velocity(velocity) => self.set_velocity(clamp_command(velocity)),
            MotorCommand::MoveAbsolute {
                target,
                max_velocity,
            } => self.move_absolute(target, clamp_command(max_velocity)),
        }
    }
}

/// Issues `command` to every motor, logging failures instead of propagating them.
pub fn command_all(motors: &mut [Box<dyn Actuator>], command: MotorCommand) {
    for motor in motors.iter_mut() {
        motor.command(command).unwrap_or_else(|e| {
            warn!("Motor Command Error: {}", e);
        });
    }
}

/// Reads a motor position, treating a failed read as `0.0`.
pub fn position_or_zero(motor: &dyn Actuator) -> f64 {
    motor.position().unwrap_or_else(|e| {
        warn!("Error Getting Motor Encoder Position: {}", e);
        0.0
    })
}

/// Paces the control loop.
pub trait Delay {
    /// Blocks until one `period` has elapsed since the previous call returned.
    fn wait(&mut self, period: Duration);
}

/// Paces the control loop with [`std::thread::sleep`].
///
/// Time spent doing work during a tick is subtracted from the sleep, so the
/// loop keeps a steady rate as long as each tick finishes within its period.
#[derive(Debug)]
pub struct StdDelay {
    last: std::time::Instant,
}

impl StdDelay {
    pub fn new() -> Self {
        Self {
            last: std::time::Instant::now(),
        }
    }
}

impl Default for StdDelay {
    fn default() -> Self { Self::new() }
}

impl Delay for StdDelay {
    fn wait(&mut self, period: Duration) {
        let elapsed = self.last.elapsed();
        if let Some(remaining) = period.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
        self.last = std::time::Instant::now();
    }
}

/// A sink for short diagnostic lines, such as a controller or brain screen.
pub trait Diagnostics {
    /// Writes `text` at `row`/`col`. Fire-and-forget.
    fn report(&mut self, row: u8, col: u8, text: &str);
}

/// Sends diagnostic lines to the log at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, row: u8, col: u8, text: &str) {
        debug!("[{}:{}] {}", row, col, text);
    }
}

/// A request, owned outside the loop, to stop running.
///
/// Checked once per tick.
pub trait StopSignal {
    fn should_stop(&self) -> bool;
}

impl StopSignal for AtomicBool {
    fn should_stop(&self) -> bool { self.load(Ordering::Acquire) }
}

impl<S: StopSignal + ?Sized> StopSignal for Arc<S> {
    fn should_stop(&self) -> bool { (**self).should_stop() }
}
