//! Double reverse four-bar (DR4B) lift control.
//!
//! The lift is driven by two mirrored motors and runs in one of three states:
//!
//! - [`LiftState::Manual`]: raise/lower buttons spin the motors open-loop.
//! - [`LiftState::SeekingMax`]: both motors are seeking full extension.
//! - [`LiftState::SeekingMin`]: both motors are seeking the retracted position.
//!
//! The seek buttons start an automatic move from any state. A seek ends, and
//! the lift drops back to manual, once both motors report that they have
//! arrived. While a seek is in progress the move command already issued is
//! left to run and no new command is sent.
//!
//! # Example
//!
//! ```
//! use firebrand::{
//!     config::LiftConfig,
//!     opcontrol::lift::{LiftBindings, LiftController, LiftState},
//!     peripherals::{MotorCommand, controller::{ControllerButton, JoystickFrame}},
//! };
//!
//! let mut lift = LiftController::new(LiftConfig::default(), LiftBindings::default());
//! let seek = JoystickFrame::neutral().with_button(ControllerButton::ButtonX, true);
//!
//! let command = lift.update(&seek, [0.0, 0.0]);
//! assert_eq!(lift.state(), LiftState::SeekingMax);
//! assert_eq!(
//!     command,
//!     Some(MotorCommand::MoveAbsolute { target: 40.0, max_velocity: 127 })
//! );
//!
//! // Still travelling: nothing new is issued.
//! assert_eq!(lift.update(&JoystickFrame::neutral(), [20.0, 22.0]), None);
//!
//! // Both sides past 35 degrees: stop and hand control back.
//! assert_eq!(
//!     lift.update(&JoystickFrame::neutral(), [36.0, 38.5]),
//!     Some(MotorCommand::Velocity(0))
//! );
//! assert_eq!(lift.state(), LiftState::Manual);
//! ```

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::{
    config::LiftConfig,
    opcontrol::controller::ControllerControl,
    peripherals::{
        Actuator, Diagnostics, MotorCommand, command_all,
        controller::{ControllerButton, JoystickFrame},
        position_or_zero,
    },
};

/// Ticks between position reports.
pub const REPORT_INTERVAL: u32 = 25;

/// The lift's control state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiftState {
    #[default]
    Manual,
    SeekingMax,
    SeekingMin,
}

/// Buttons that operate the lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftBindings {
    pub raise:     ControllerButton,
    pub lower:     ControllerButton,
    pub seek_up:   ControllerButton,
    pub seek_down: ControllerButton,
}

impl Default for LiftBindings {
    fn default() -> Self {
        Self {
            raise:     ControllerButton::ButtonUp,
            lower:     ControllerButton::ButtonDown,
            seek_up:   ControllerButton::ButtonX,
            seek_down: ControllerButton::ButtonB,
        }
    }
}

/// Hybrid manual/automatic lift controller.
#[derive(Debug, Clone)]
pub struct LiftController {
    config:          LiftConfig,
    bindings:        LiftBindings,
    state:           LiftState,
    ticks:           u32,
    report_interval: u32,
}

impl LiftController {
    /// Starts in [`LiftState::Manual`].
    pub fn new(config: LiftConfig, bindings: LiftBindings) -> Self {
        Self {
            config,
            bindings,
            state: LiftState::Manual,
            ticks: 0,
            report_interval: REPORT_INTERVAL,
        }
    }

    /// Sets how many ticks pass between position reports.
    pub fn with_report_interval(mut self, interval: u32) -> Self {
        self.report_interval = interval.max(1);
        self
    }

    /// The current state.
    pub fn state(&self) -> LiftState { self.state }

    fn extended(&self, position: f64) -> bool {
        position > self.config.full_extension - self.config.tolerance
    }

    fn retracted(&self, position: f64) -> bool { position.abs() < self.config.tolerance }

    fn transition(&mut self, next: LiftState) {
        if self.state != next {
            debug!("Lift {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Resolves this tick's state transition and returns the command both
    /// lift motors should receive, or `None` if the running seek should be
    /// left alone.
    ///
    /// `positions` are the left and right motor positions in degrees.
    pub fn update(&mut self, frame: &JoystickFrame, positions: [f64; 2]) -> Option<MotorCommand> {
        let max = self.config.max_velocity;

        if frame.pressed(self.bindings.seek_up) {
            self.transition(LiftState::SeekingMax);
            return Some(MotorCommand::MoveAbsolute {
                target:       self.config.full_extension,
                max_velocity: max,
            });
        }
        if frame.pressed(self.bindings.seek_down) {
            self.transition(LiftState::SeekingMin);
            return Some(MotorCommand::MoveAbsolute {
                target:       0.0,
                max_velocity: -max,
            });
        }

        match self.state {
            LiftState::SeekingMax if positions.iter().all(|&p| self.extended(p)) => {
                self.transition(LiftState::Manual);
                Some(MotorCommand::Velocity(0))
            }
            LiftState::SeekingMin if positions.iter().all(|&p| self.retracted(p)) => {
                self.transition(LiftState::Manual);
                Some(MotorCommand::Velocity(0))
            }
            LiftState::Manual => {
                let velocity = ControllerControl::new(frame).dual_button_value(
                    self.bindings.raise,
                    self.bindings.lower,
                    max,
                    -max,
                    0,
                );
                Some(MotorCommand::Velocity(velocity))
            }
            LiftState::SeekingMax | LiftState::SeekingMin => None,
        }
    }

    /// Runs one tick against the two lift motors: reads their positions,
    /// resolves the state, issues the resulting command, and reports the
    /// positions every `report_interval` ticks.
    pub fn tick(
        &mut self,
        frame: &JoystickFrame,
        motors: &mut [Box<dyn Actuator>; 2],
        diagnostics: &mut dyn Diagnostics,
    ) -> Option<MotorCommand> {
        let positions = [
            position_or_zero(motors[0].as_ref()),
            position_or_zero(motors[1].as_ref()),
        ];

        let command = self.update(frame, positions);
        if let Some(command) = command {
            command_all(motors, command);
        }

        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % self.report_interval == 0 {
            let mut line: String<32> = String::new();
            if write!(line, "L:{:.1} R:{:.1}", positions[0], positions[1]).is_ok() {
                diagnostics.report(0, 0, &line);
            }
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimDiagnostics, SimMotor};

    fn frame(button: ControllerButton) -> JoystickFrame {
        JoystickFrame::neutral().with_button(button, true)
    }

    fn controller() -> LiftController {
        LiftController::new(LiftConfig::default(), LiftBindings::default())
    }

    #[test]
    fn manual_follows_buttons() {
        let mut lift = controller();
        assert_eq!(
            lift.update(&frame(ControllerButton::ButtonUp), [0.0, 0.0]),
            Some(MotorCommand::Velocity(127))
        );
        assert_eq!(
            lift.update(&frame(ControllerButton::ButtonDown), [0.0, 0.0]),
            Some(MotorCommand::Velocity(-127))
        );
        assert_eq!(
            lift.update(&JoystickFrame::neutral(), [0.0, 0.0]),
            Some(MotorCommand::Velocity(0))
        );
        assert_eq!(lift.state(), LiftState::Manual);
    }

    #[test]
    fn seek_max_waits_for_both_sides() {
        let mut lift = controller();
        lift.update(&frame(ControllerButton::ButtonX), [0.0, 0.0]);

        // One side arrived, the other has not.
        assert_eq!(lift.update(&JoystickFrame::neutral(), [39.0, 30.0]), None);
        assert_eq!(lift.state(), LiftState::SeekingMax);

        // Exactly at the threshold is not past it.
        assert_eq!(lift.update(&JoystickFrame::neutral(), [35.0, 36.0]), None);

        assert_eq!(
            lift.update(&JoystickFrame::neutral(), [35.1, 36.0]),
            Some(MotorCommand::Velocity(0))
        );
        assert_eq!(lift.state(), LiftState::Manual);
    }

    #[test]
    fn seek_min_completes_near_zero() {
        let mut lift = controller();
        let command = lift.update(&frame(ControllerButton::ButtonB), [40.0, 40.0]);
        assert_eq!(
            command,
            Some(MotorCommand::MoveAbsolute {
                target:       0.0,
                max_velocity: -127,
            })
        );
        assert_eq!(lift.state(), LiftState::SeekingMin);

        // Far from the bottom: keep seeking.
        assert_eq!(lift.update(&JoystickFrame::neutral(), [30.0, 12.0]), None);
        assert_eq!(lift.update(&JoystickFrame::neutral(), [4.0, 6.0]), None);

        assert_eq!(
            lift.update(&JoystickFrame::neutral(), [4.0, -1.5]),
            Some(MotorCommand::Velocity(0))
        );
        assert_eq!(lift.state(), LiftState::Manual);
    }

    #[test]
    fn seek_buttons_override_any_state() {
        let mut lift = controller();
        lift.update(&frame(ControllerButton::ButtonX), [0.0, 0.0]);
        lift.update(&frame(ControllerButton::ButtonB), [20.0, 20.0]);
        assert_eq!(lift.state(), LiftState::SeekingMin);

        // Seek-up beats seek-down when both are held.
        let both = frame(ControllerButton::ButtonX).with_button(ControllerButton::ButtonB, true);
        lift.update(&both, [20.0, 20.0]);
        assert_eq!(lift.state(), LiftState::SeekingMax);
    }

    #[test]
    fn manual_buttons_ignored_while_seeking() {
        let mut lift = controller();
        lift.update(&frame(ControllerButton::ButtonX), [0.0, 0.0]);
        assert_eq!(lift.update(&frame(ControllerButton::ButtonDown), [10.0, 10.0]), None);
        assert_eq!(lift.state(), LiftState::SeekingMax);
    }

    #[test]
    fn tick_commands_motors_and_reports() {
        let mut lift = controller().with_report_interval(2);
        let (left, right) = (SimMotor::default(), SimMotor::default());
        let mut motors: [Box<dyn Actuator>; 2] = [Box::new(left.clone()), Box::new(right.clone())];
        let diagnostics = SimDiagnostics::default();
        let mut sink = diagnostics.clone();

        lift.tick(&frame(ControllerButton::ButtonX), &mut motors, &mut sink);
        assert_eq!(
            left.last_command(),
            Some(MotorCommand::MoveAbsolute {
                target:       40.0,
                max_velocity: 127,
            })
        );
        assert_eq!(right.last_command(), left.last_command());
        assert!(diagnostics.lines().is_empty());

        left.set_position(12.3);
        right.set_position(11.0);
        assert_eq!(lift.tick(&JoystickFrame::neutral(), &mut motors, &mut sink), None);
        assert_eq!(left.commands().len(), 1);
        assert_eq!(diagnostics.lines(), vec![(0, 0, "L:12.3 R:11.0".to_string())]);
    }
}
