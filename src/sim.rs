//! Simulated devices.
//!
//! Stand-ins for the V5 hardware so the control loop can run on a desktop:
//! in unit tests, or to try out a binding layout before downloading to the
//! brain. Every handle is a cheap clone sharing its state with the original,
//! so a test can keep one copy while the loop owns the other.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::{
    error::DeviceError,
    peripherals::{
        Actuator, Delay, Diagnostics, MotorCommand, StopSignal,
        controller::{ControllerAxis, ControllerButton, JoystickFrame},
    },
};

/// A controller whose inputs are set by hand.
#[derive(Debug, Clone, Default)]
pub struct SimGamepad {
    frame:        Rc<RefCell<JoystickFrame>>,
    disconnected: Rc<Cell<bool>>,
}

impl SimGamepad {
    /// Replaces every input at once.
    pub fn set_frame(&self, frame: JoystickFrame) { *self.frame.borrow_mut() = frame; }

    pub fn set_axis(&self, axis: ControllerAxis, value: i32) {
        self.frame.borrow_mut().set_axis(axis, value);
    }

    pub fn press(&self, button: ControllerButton) {
        self.frame.borrow_mut().set_button(button, true);
    }

    pub fn release(&self, button: ControllerButton) {
        self.frame.borrow_mut().set_button(button, false);
    }

    /// Releases every button and centers both sticks.
    pub fn release_all(&self) { self.set_frame(JoystickFrame::neutral()); }

    /// Makes every read fail with [`DeviceError::Disconnected`].
    pub fn set_disconnected(&self, disconnected: bool) { self.disconnected.set(disconnected); }
}

impl crate::peripherals::Gamepad for SimGamepad {
    fn read_axis(&self, axis: ControllerAxis) -> Result<i32, DeviceError> {
        if self.disconnected.get() {
            return Err(DeviceError::Disconnected);
        }
        Ok(self.frame.borrow().axis(axis))
    }

    fn read_button(&self, button: ControllerButton) -> Result<bool, DeviceError> {
        if self.disconnected.get() {
            return Err(DeviceError::Disconnected);
        }
        Ok(self.frame.borrow().pressed(button))
    }
}

#[derive(Debug, Default)]
struct SimMotorState {
    position: f64,
    commands: Vec<MotorCommand>,
    failing:  bool,
}

/// A motor that records every command it receives.
///
/// Its position does not move on its own; tests set it with
/// [`set_position`](Self::set_position).
#[derive(Debug, Clone, Default)]
pub struct SimMotor {
    state: Rc<RefCell<SimMotorState>>,
}

impl SimMotor {
    pub fn set_position(&self, degrees: f64) { self.state.borrow_mut().position = degrees; }

    /// Makes every call fail with a port error.
    pub fn set_failing(&self, failing: bool) { self.state.borrow_mut().failing = failing; }

    /// Every accepted command, oldest first.
    pub fn commands(&self) -> Vec<MotorCommand> { self.state.borrow().commands.clone() }

    pub fn last_command(&self) -> Option<MotorCommand> {
        self.state.borrow().commands.last().copied()
    }

    /// The velocity of the most recent command, if it was a velocity command.
    pub fn last_velocity(&self) -> Option<i32> {
        match self.last_command() {
            Some(MotorCommand::Velocity(velocity)) => Some(velocity),
            _ => None,
        }
    }

    fn accept(&self, command: MotorCommand) -> Result<(), DeviceError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(DeviceError::Port {
                port:    0,
                message: "simulated fault".to_string(),
            });
        }
        state.commands.push(command);
        Ok(())
    }
}

impl Actuator for SimMotor {
    fn set_velocity(&mut self, velocity: i32) -> Result<(), DeviceError> {
        self.accept(MotorCommand::Velocity(velocity))
    }

    fn move_absolute(&mut self, target: f64, max_velocity: i32) -> Result<(), DeviceError> {
        self.accept(MotorCommand::MoveAbsolute {
            target,
            max_velocity,
        })
    }

    fn position(&self) -> Result<f64, DeviceError> {
        let state = self.state.borrow();
        if state.failing {
            return Err(DeviceError::Disconnected);
        }
        Ok(state.position)
    }
}

/// A delay that returns immediately and counts how often it was called.
#[derive(Debug, Clone, Default)]
pub struct SimDelay {
    waits:   Rc<Cell<u64>>,
    elapsed: Rc<Cell<Duration>>,
}

impl SimDelay {
    pub fn waits(&self) -> u64 { self.waits.get() }

    /// Total simulated time waited.
    pub fn elapsed(&self) -> Duration { self.elapsed.get() }
}

impl Delay for SimDelay {
    fn wait(&mut self, period: Duration) {
        self.waits.set(self.waits.get() + 1);
        self.elapsed.set(self.elapsed.get() + period);
    }
}

/// Collects diagnostic lines.
#[derive(Debug, Clone, Default)]
pub struct SimDiagnostics {
    lines: Rc<RefCell<Vec<(u8, u8, String)>>>,
}

impl SimDiagnostics {
    pub fn lines(&self) -> Vec<(u8, u8, String)> { self.lines.borrow().clone() }
}

impl Diagnostics for SimDiagnostics {
    fn report(&mut self, row: u8, col: u8, text: &str) {
        self.lines.borrow_mut().push((row, col, text.to_string()));
    }
}

/// Requests a stop once it has been polled a fixed number of times.
#[derive(Debug)]
pub struct TickLimit {
    remaining: Cell<u64>,
}

impl TickLimit {
    /// Allows exactly `ticks` iterations.
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining: Cell::new(ticks),
        }
    }
}

impl StopSignal for TickLimit {
    fn should_stop(&self) -> bool {
        match self.remaining.get() {
            0 => true,
            n => {
                self.remaining.set(n - 1);
                false
            }
        }
    }
}
