//! Button-pair mapping for mechanisms.
//!
//! Many mechanisms on a competition robot are driven the same way: one
//! button runs them forward, another runs them backward, and with neither
//! held they rest. [`ControllerControl`] captures a [`JoystickFrame`] and maps
//! button pairs onto motor commands.
//!
//! # Example
//!
//! ```
//! use firebrand::{
//!     opcontrol::controller::ControllerControl,
//!     peripherals::controller::{ControllerButton, JoystickFrame},
//! };
//!
//! let frame = JoystickFrame::neutral().with_button(ControllerButton::ButtonR2, true);
//! let control = ControllerControl::new(&frame);
//!
//! // R1 runs forward, R2 runs backward.
//! let value = control.dual_button_value(
//!     ControllerButton::ButtonR1,
//!     ControllerButton::ButtonR2,
//!     127,
//!     -127,
//!     0,
//! );
//! assert_eq!(value, -127);
//! ```

use heapless::Vec;
use log::warn;

use crate::peripherals::{
    Actuator, MotorCommand,
    controller::{ControllerButton, JoystickFrame},
};

/// Controller input mapper for one tick.
#[derive(Debug, Clone, Copy)]
pub struct ControllerControl {
    /// The current state of all controller buttons and sticks.
    state: JoystickFrame,
}

impl ControllerControl {
    /// Captures the frame that all mappings in this tick will read.
    pub fn new(frame: &JoystickFrame) -> Self { Self { state: *frame } }

    /// Picks a power from two buttons. The high button wins if both are held.
    ///
    /// # Arguments
    ///
    /// * `button_high` - The button that selects `high_pwr`.
    /// * `button_low` - The button that selects `low_pwr`.
    /// * `passive_pwr` - The power when neither button is held.
    pub fn dual_button_value(
        &self,
        button_high: ControllerButton,
        button_low: ControllerButton,
        high_pwr: i32,
        low_pwr: i32,
        passive_pwr: i32,
    ) -> i32 {
        if self.state.pressed(button_high) {
            high_pwr
        } else if self.state.pressed(button_low) {
            low_pwr
        } else {
            passive_pwr
        }
    }

    /// Maps 2 buttons to one or more motors. A maximum of 8 motors can be
    /// controlled at a time. Returns the velocity that was commanded.
    ///
    /// # Example
    ///
    /// ```
    /// use firebrand::{
    ///     opcontrol::controller::ControllerControl,
    ///     peripherals::{Actuator, controller::{ControllerButton, JoystickFrame}},
    ///     sim::SimMotor,
    /// };
    ///
    /// let frame = JoystickFrame::neutral().with_button(ControllerButton::ButtonL1, true);
    /// let mut intake = SimMotor::default();
    /// let mut motors: heapless::Vec<&mut dyn Actuator, 8> = heapless::Vec::new();
    /// let _ = motors.push(&mut intake);
    ///
    /// ControllerControl::new(&frame).dual_button_to_motors(
    ///     ControllerButton::ButtonL1, // forward
    ///     ControllerButton::ButtonL2, // reverse
    ///     motors,
    ///     127,
    ///     -127,
    ///     0,
    /// );
    /// assert_eq!(intake.last_velocity(), Some(127));
    /// ```
    pub fn dual_button_to_motors(
        &self,
        button_high: ControllerButton,
        button_low: ControllerButton,
        motors: Vec<&mut dyn Actuator, 8>,
        high_pwr: i32,
        low_pwr: i32,
        passive_pwr: i32,
    ) -> i32 {
        let velocity =
            self.dual_button_value(button_high, button_low, high_pwr, low_pwr, passive_pwr);
        for motor in motors {
            motor
                .command(MotorCommand::Velocity(velocity))
                .unwrap_or_else(|e| {
                    warn!("Motor Set Velocity Error: {}", e);
                });
        }
        velocity
    }
}
