//! Controller inputs and the per-tick joystick snapshot.
//!
//! A [`JoystickFrame`] is sampled once at the top of every control tick and
//! handed to each mechanism, so every decision made during a tick sees the
//! same stick positions and button states.
//!
//! # Example
//!
//! ```
//! use firebrand::peripherals::controller::{ControllerAxis, ControllerButton, JoystickFrame};
//!
//! let frame = JoystickFrame::neutral()
//!     .with_axis(ControllerAxis::LeftY, 90)
//!     .with_button(ControllerButton::ButtonA, true);
//!
//! assert_eq!(frame.axis(ControllerAxis::LeftY), 90);
//! assert!(frame.pressed(ControllerButton::ButtonA));
//! assert!(!frame.pressed(ControllerButton::ButtonB));
//! ```

use crate::peripherals::MAX_COMMAND;

/// An enumeration of controller buttons.
///
/// These represent the physical buttons on a VEX controller that can be
/// bound to robot actions through [`ButtonBindings`](crate::config::ButtonBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

impl ControllerButton {
    /// Every button, in frame order.
    pub const ALL: [ControllerButton; 12] = [
        ControllerButton::ButtonA,
        ControllerButton::ButtonB,
        ControllerButton::ButtonX,
        ControllerButton::ButtonY,
        ControllerButton::ButtonUp,
        ControllerButton::ButtonDown,
        ControllerButton::ButtonLeft,
        ControllerButton::ButtonRight,
        ControllerButton::ButtonL1,
        ControllerButton::ButtonL2,
        ControllerButton::ButtonR1,
        ControllerButton::ButtonR2,
    ];

    const fn index(self) -> usize { self as usize }
}

/// An analog stick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl ControllerAxis {
    /// Every axis, in frame order.
    pub const ALL: [ControllerAxis; 4] = [
        ControllerAxis::LeftX,
        ControllerAxis::LeftY,
        ControllerAxis::RightX,
        ControllerAxis::RightY,
    ];

    const fn index(self) -> usize { self as usize }
}

/// A snapshot of all controller inputs for one tick.
///
/// Axis readings are always within `-127..=127`; anything outside that range
/// is clamped when it is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoystickFrame {
    axes:    [i32; 4],
    buttons: [bool; 12],
}

impl JoystickFrame {
    /// A frame with sticks centered and no buttons held.
    pub const fn neutral() -> Self {
        Self {
            axes:    [0; 4],
            buttons: [false; 12],
        }
    }

    /// Returns the reading of an axis.
    pub fn axis(&self, axis: ControllerAxis) -> i32 { self.axes[axis.index()] }

    /// Returns whether a button is held.
    pub fn pressed(&self, button: ControllerButton) -> bool { self.buttons[button.index()] }

    /// Returns whether every button in `buttons` is held at once.
    pub fn all_pressed(&self, buttons: &[ControllerButton]) -> bool {
        buttons.iter().all(|&button| self.pressed(button))
    }

    /// Stores an axis reading, clamped into range.
    pub fn set_axis(&mut self, axis: ControllerAxis, value: i32) {
        self.axes[axis.index()] = value.clamp(-MAX_COMMAND, MAX_COMMAND);
    }

    /// Stores a button state.
    pub fn set_button(&mut self, button: ControllerButton, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }

    /// Builder form of [`set_axis`](Self::set_axis).
    pub fn with_axis(mut self, axis: ControllerAxis, value: i32) -> Self {
        self.set_axis(axis, value);
        self
    }

    /// Builder form of [`set_button`](Self::set_button).
    pub fn with_button(mut self, button: ControllerButton, pressed: bool) -> Self {
        self.set_button(button, pressed);
        self
    }
}
