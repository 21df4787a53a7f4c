//! V5 device adapters.
//!
//! Implements the capability traits from [`peripherals`](crate::peripherals)
//! for vexide's [`Controller`] and [`Motor`], so a [`Robot`](crate::opcontrol::teleop::Robot)
//! can be assembled straight from the brain's ports.
//!
//! # Example
//!
//! ```ignore
//! use firebrand::{
//!     drivetrain::Differential,
//!     opcontrol::teleop::Robot,
//!     peripherals::{LogDiagnostics, StdDelay},
//! };
//! use vexide::prelude::*;
//!
//! let robot = Robot {
//!     gamepad:     Box::new(Controller::new(ControllerId::Primary)),
//!     drivetrain:  Differential::new(
//!         [Box::new(Motor::new(peripherals.port_1, Gearset::Green, Direction::Forward)), ...],
//!         [Box::new(Motor::new(peripherals.port_2, Gearset::Green, Direction::Reverse)), ...],
//!     ),
//!     ...
//! };
//! ```

use log::warn;
use vexide::{
    controller::{ButtonState, ControllerState},
    math::Angle,
    prelude::{Controller, Motor},
    smart::SmartDevice,
};

use crate::{
    error::DeviceError,
    peripherals::{
        Actuator, Gamepad, MAX_COMMAND,
        controller::{ControllerAxis, ControllerButton, JoystickFrame},
    },
};

/// Motor voltage at full command.
const MAX_VOLTAGE: f64 = 12.0;

/// Profiled-move speed at full command, in RPM (green cartridge).
const MAX_RPM: f64 = 200.0;

/// Converts a vexide stick reading (`-1.0..=1.0`) to command units.
fn stick_to_command(value: f64) -> i32 { (value * MAX_COMMAND as f64).round() as i32 }

fn command_to_voltage(velocity: i32) -> f64 { velocity as f64 / MAX_COMMAND as f64 * MAX_VOLTAGE }

fn command_to_rpm(velocity: i32) -> i32 {
    (velocity.unsigned_abs() as f64 / MAX_COMMAND as f64 * MAX_RPM).round() as i32
}

fn button(state: &ControllerState, button: ControllerButton) -> ButtonState {
    match button {
        ControllerButton::ButtonA => state.button_a,
        ControllerButton::ButtonB => state.button_b,
        ControllerButton::ButtonX => state.button_x,
        ControllerButton::ButtonY => state.button_y,
        ControllerButton::ButtonUp => state.button_up,
        ControllerButton::ButtonDown => state.button_down,
        ControllerButton::ButtonLeft => state.button_left,
        ControllerButton::ButtonRight => state.button_right,
        ControllerButton::ButtonL1 => state.button_l1,
        ControllerButton::ButtonL2 => state.button_l2,
        ControllerButton::ButtonR1 => state.button_r1,
        ControllerButton::ButtonR2 => state.button_r2,
    }
}

fn axis(state: &ControllerState, axis: ControllerAxis) -> i32 {
    stick_to_command(match axis {
        ControllerAxis::LeftX => state.left_stick.x(),
        ControllerAxis::LeftY => state.left_stick.y(),
        ControllerAxis::RightX => state.right_stick.x(),
        ControllerAxis::RightY => state.right_stick.y(),
    })
}

fn controller_error(error: impl core::fmt::Display) -> DeviceError {
    DeviceError::Controller(error.to_string())
}

fn read_state(controller: &Controller) -> Result<ControllerState, DeviceError> {
    controller.state().map_err(controller_error)
}

impl Gamepad for Controller {
    fn read_axis(&self, stick: ControllerAxis) -> Result<i32, DeviceError> {
        Ok(axis(&read_state(self)?, stick))
    }

    fn read_button(&self, pressed: ControllerButton) -> Result<bool, DeviceError> {
        Ok(button(&read_state(self)?, pressed).is_pressed())
    }

    /// Reads the controller once per tick instead of once per input.
    fn sample(&self) -> JoystickFrame {
        let state = self.state().unwrap_or_else(|e| {
            warn!("Controller State Error: {}", e);
            ControllerState::default()
        });

        let mut frame = JoystickFrame::neutral();
        for stick in ControllerAxis::ALL {
            frame.set_axis(stick, axis(&state, stick));
        }
        for pressed in ControllerButton::ALL {
            frame.set_button(pressed, button(&state, pressed).is_pressed());
        }
        frame
    }
}

fn port_error(motor: &Motor, error: impl core::fmt::Display) -> DeviceError {
    DeviceError::Port {
        port:    motor.port_number(),
        message: error.to_string(),
    }
}

impl Actuator for Motor {
    fn set_velocity(&mut self, velocity: i32) -> Result<(), DeviceError> {
        Motor::set_voltage(self, command_to_voltage(velocity)).map_err(|e| port_error(self, e))
    }

    fn move_absolute(&mut self, target: f64, max_velocity: i32) -> Result<(), DeviceError> {
        Motor::set_position_target(self, Angle::from_degrees(target), command_to_rpm(max_velocity))
            .map_err(|e| port_error(self, e))
    }

    fn position(&self) -> Result<f64, DeviceError> {
        Motor::position(self)
            .map(|angle| angle.as_degrees())
            .map_err(|e| port_error(self, e))
    }
}
