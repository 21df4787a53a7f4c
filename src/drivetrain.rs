//! Differential drivetrain control.
//!
//! This module turns joystick input into left/right side commands and issues
//! them to a four-motor differential drivetrain (a front and a back motor on
//! each side).
//!
//! # Supported Drive Styles
//!
//! - **Tank**: Each joystick directly controls one side of the drivetrain.
//! - **Arcade**: The left stick's vertical axis is throttle, its horizontal axis steers.
//! - **Ludicrous**: Tank, with a random drift added to each side.
//!
//! Every stick value goes through the [response curve](crate::opcontrol::curve)
//! before mixing. Mixed commands are saturated to `-127..=127` before they
//! reach a motor.
//!
//! # Example
//!
//! ```
//! use firebrand::{
//!     drivetrain::{DriveCommand, Sticks, mix},
//!     opcontrol::{ludicrous::NoiseState, mode::ControlStyle},
//! };
//!
//! let sticks = Sticks {
//!     left_y:  100,
//!     right_y: 0,
//!     left_x:  30,
//! };
//! let command = mix(ControlStyle::Arcade, sticks, NoiseState::default());
//! assert_eq!(command, DriveCommand { left: 130, right: 70 });
//! assert_eq!(command.clamped(), DriveCommand { left: 127, right: 70 });
//! ```

use log::warn;

use crate::{
    opcontrol::{curve::shape, ludicrous::NoiseState, mode::ControlStyle},
    peripherals::{
        Actuator, MotorCommand, clamp_command,
        controller::{ControllerAxis, JoystickFrame},
    },
};

/// Curve-shaped stick values used for mixing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sticks {
    pub left_y:  i32,
    pub right_y: i32,
    pub left_x:  i32,
}

impl Sticks {
    /// Reads and shapes the drive axes of a frame.
    pub fn shaped(frame: &JoystickFrame) -> Self {
        Self {
            left_y:  shape(frame.axis(ControllerAxis::LeftY)),
            right_y: shape(frame.axis(ControllerAxis::RightY)),
            left_x:  shape(frame.axis(ControllerAxis::LeftX)),
        }
    }
}

/// A left/right command pair. May be out of range until [`clamped`](Self::clamped).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveCommand {
    pub left:  i32,
    pub right: i32,
}

impl DriveCommand {
    /// Saturates both sides into `-127..=127`.
    pub fn clamped(self) -> Self {
        Self {
            left:  clamp_command(self.left),
            right: clamp_command(self.right),
        }
    }
}

/// Mixes shaped sticks into side commands for `style`.
///
/// The result is not clamped: arcade mixing can exceed full scale, and the
/// caller saturates it with [`DriveCommand::clamped`]. In Ludicrous the drift
/// is added on the left and subtracted on the right, for both motors of a side.
pub fn mix(style: ControlStyle, sticks: Sticks, noise: NoiseState) -> DriveCommand {
    match style {
        ControlStyle::Tank => DriveCommand {
            left:  sticks.left_y,
            right: sticks.right_y,
        },
        ControlStyle::Arcade => DriveCommand {
            left:  sticks.left_y + sticks.left_x,
            right: sticks.left_y - sticks.left_x,
        },
        ControlStyle::Ludicrous => DriveCommand {
            left:  sticks.left_y + noise.left,
            right: sticks.right_y - noise.right,
        },
    }
}

/// A differential drivetrain with a front and a back motor per side.
///
/// Motors on opposite sides of the drivetrain typically need to spin in
/// opposite directions to move the robot forward; configure that in the
/// actuator itself.
pub struct Differential {
    /// Front and back motors on the left side.
    pub left:  [Box<dyn Actuator>; 2],
    /// Front and back motors on the right side.
    pub right: [Box<dyn Actuator>; 2],
}

impl Differential {
    /// Creates a new drivetrain with the provided left/right motor pairs.
    pub fn new(left: [Box<dyn Actuator>; 2], right: [Box<dyn Actuator>; 2]) -> Self {
        Self { left, right }
    }

    /// Saturates `command` and issues it: `left` to both left motors, `right`
    /// to both right motors.
    pub fn drive(&mut self, command: DriveCommand) {
        let command = command.clamped();
        for motor in self.left.iter_mut() {
            motor
                .command(MotorCommand::Velocity(command.left))
                .unwrap_or_else(|e| {
                    warn!("Left Drive Error: {}", e);
                });
        }
        for motor in self.right.iter_mut() {
            motor
                .command(MotorCommand::Velocity(command.right))
                .unwrap_or_else(|e| {
                    warn!("Right Drive Error: {}", e);
                });
        }
    }

    /// Commands zero velocity to all four motors.
    pub fn stop(&mut self) { self.drive(DriveCommand::default()); }
}
