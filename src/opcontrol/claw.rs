//! Claw / intake control.
//!
//! Two mirrored motors, two buttons. Holding open runs both motors forward at
//! full power, holding close runs them backward, and releasing both stops
//! them on the same tick. Nothing is latched between ticks.

use heapless::Vec;

use crate::{
    opcontrol::controller::ControllerControl,
    peripherals::{
        Actuator, MAX_COMMAND,
        controller::{ControllerButton, JoystickFrame},
    },
};

/// Stateless claw controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClawController {
    pub open:  ControllerButton,
    pub close: ControllerButton,
}

impl ClawController {
    pub fn new(open: ControllerButton, close: ControllerButton) -> Self { Self { open, close } }

    /// The velocity both intake motors should run at for `frame`.
    pub fn velocity(&self, frame: &JoystickFrame) -> i32 {
        ControllerControl::new(frame).dual_button_value(
            self.open,
            self.close,
            MAX_COMMAND,
            -MAX_COMMAND,
            0,
        )
    }

    /// Commands both intake motors for this tick and returns the velocity issued.
    pub fn tick(&self, frame: &JoystickFrame, motors: &mut [Box<dyn Actuator>; 2]) -> i32 {
        let mut group: Vec<&mut dyn Actuator, 8> = Vec::new();
        for motor in motors.iter_mut() {
            let _ = group.push(motor.as_mut());
        }
        ControllerControl::new(frame).dual_button_to_motors(
            self.open,
            self.close,
            group,
            MAX_COMMAND,
            -MAX_COMMAND,
            0,
        )
    }
}
