//! The driver-control loop.
//!
//! [`ControlLoop`] owns the robot's devices and every piece of control state.
//! Each tick it:
//!
//! 1. samples one [`JoystickFrame`],
//! 2. lets the [`ModeSelector`] react to the style combo,
//! 3. advances the Ludicrous drift when that style is active,
//! 4. mixes the sticks and drives all four drivetrain motors,
//! 5. runs the lift state machine and issues its command,
//! 6. runs the claw,
//! 7. waits out the rest of the tick.
//!
//! Style changes therefore take effect on the same tick they are triggered,
//! and the lift never issues commands from two different states in one tick.
//!
//! The loop runs until its [`StopSignal`] says otherwise. It is meant to be
//! restarted, not resumed: when the robot is re-enabled, build a fresh loop
//! from [`ControlLoop::into_robot`].
//!
//! # Example
//!
//! ```
//! use firebrand::{
//!     config::TeleopConfig,
//!     opcontrol::teleop::{ControlLoop, Robot},
//!     sim::{SimDelay, SimGamepad, SimMotor, TickLimit},
//! };
//!
//! let robot = Robot {
//!     gamepad:     Box::new(SimGamepad::default()),
//!     drivetrain:  firebrand::drivetrain::Differential::new(
//!         [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!         [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!     ),
//!     lift:        [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!     claw:        [Box::new(SimMotor::default()), Box::new(SimMotor::default())],
//!     delay:       Box::new(SimDelay::default()),
//!     diagnostics: Box::new(firebrand::peripherals::LogDiagnostics),
//! };
//!
//! let mut teleop = ControlLoop::new(robot, TeleopConfig::default()).unwrap();
//! assert_eq!(teleop.run(&TickLimit::new(50)), 50);
//! ```

use log::info;

use crate::{
    config::TeleopConfig,
    drivetrain::{Differential, DriveCommand, Sticks, mix},
    error::ConfigError,
    opcontrol::{
        claw::ClawController,
        lift::{LiftController, LiftState},
        ludicrous::{ChaosRng, LudicrousPerturber, NoiseSource, NoiseState, derive_seed},
        mode::{ControlStyle, ModeSelector},
    },
    peripherals::{
        Actuator, Delay, Diagnostics, Gamepad, MotorCommand, StopSignal, command_all,
        controller::JoystickFrame,
    },
};

/// Every device the control loop drives or reads.
pub struct Robot {
    pub gamepad:     Box<dyn Gamepad>,
    pub drivetrain:  Differential,
    /// Left and right lift motors.
    pub lift:        [Box<dyn Actuator>; 2],
    /// Left and right intake motors.
    pub claw:        [Box<dyn Actuator>; 2],
    pub delay:       Box<dyn Delay>,
    pub diagnostics: Box<dyn Diagnostics>,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub style:      ControlStyle,
    /// The clamped command issued to the drivetrain.
    pub drive:      DriveCommand,
    pub lift_state: LiftState,
    /// Velocity issued to both claw motors.
    pub claw:       i32,
}

/// The driver-control orchestrator.
pub struct ControlLoop<N: NoiseSource = ChaosRng> {
    robot:     Robot,
    config:    TeleopConfig,
    mode:      ModeSelector,
    perturber: LudicrousPerturber<N>,
    lift:      LiftController,
    claw:      ClawController,
    ticks:     u64,
}

impl ControlLoop<ChaosRng> {
    /// Builds a loop with freshly initialised state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation. No device is
    /// touched in that case.
    pub fn new(robot: Robot, config: TeleopConfig) -> Result<Self, ConfigError> {
        let source = ChaosRng::new(config.seed);
        Self::with_noise_source(robot, config, source)
    }
}

impl<N: NoiseSource> ControlLoop<N> {
    /// Builds a loop whose Ludicrous drift comes from `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_noise_source(
        robot: Robot,
        config: TeleopConfig,
        source: N,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let bindings = config.bindings;
        Ok(Self {
            mode: ModeSelector::new(bindings.mode_combo, config.switch_cooldown),
            perturber: LudicrousPerturber::new(source, config.chaos_intensity),
            lift: LiftController::new(config.lift, bindings.lift)
                .with_report_interval(config.report_interval),
            claw: ClawController::new(bindings.claw_open, bindings.claw_close),
            ticks: 0,
            robot,
            config,
        })
    }

    pub fn style(&self) -> ControlStyle { self.mode.style() }

    pub fn lift_state(&self) -> LiftState { self.lift.state() }

    pub fn noise(&self) -> NoiseState { self.perturber.state() }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 { self.ticks }

    pub fn config(&self) -> &TeleopConfig { &self.config }

    /// Runs one tick without waiting afterwards.
    pub fn step(&mut self) -> TickReport {
        let frame: JoystickFrame = self.robot.gamepad.sample();

        let (root, tick) = (self.config.seed, self.ticks);
        self.mode.tick(&frame, &mut self.perturber, || derive_seed(root, tick));

        let style = self.mode.style();
        if style == ControlStyle::Ludicrous {
            self.perturber.tick();
        }

        let drive = mix(style, Sticks::shaped(&frame), self.perturber.state()).clamped();
        self.robot.drivetrain.drive(drive);

        self.lift.tick(
            &frame,
            &mut self.robot.lift,
            self.robot.diagnostics.as_mut(),
        );

        let claw = self.claw.tick(&frame, &mut self.robot.claw);

        self.ticks += 1;
        TickReport {
            style,
            drive,
            lift_state: self.lift.state(),
            claw,
        }
    }

    /// Runs ticks until `stop` asks to end, checking it once before each
    /// tick. Returns the number of ticks run.
    pub fn run(&mut self, stop: &dyn StopSignal) -> u64 {
        info!("Driver Control Loop Started");
        let start = self.ticks;
        while !stop.should_stop() {
            self.step();
            self.robot.delay.wait(self.config.tick_period);
        }
        let ran = self.ticks - start;
        info!("Driver Control Loop Stopped after {} ticks", ran);
        ran
    }

    /// Async form of [`run`](Self::run) for the V5 runtime, pacing with
    /// `vexide::time::sleep` instead of the robot's [`Delay`].
    #[cfg(feature = "vexide")]
    pub async fn run_async(&mut self, stop: &dyn StopSignal) -> u64 {
        info!("Driver Control Loop Started");
        let start = self.ticks;
        while !stop.should_stop() {
            self.step();
            vexide::time::sleep(self.config.tick_period).await;
        }
        let ran = self.ticks - start;
        info!("Driver Control Loop Stopped after {} ticks", ran);
        ran
    }

    /// Stops every motor and returns the devices.
    pub fn into_robot(mut self) -> Robot {
        self.robot.drivetrain.stop();
        command_all(&mut self.robot.lift, MotorCommand::Velocity(0));
        command_all(&mut self.robot.claw, MotorCommand::Velocity(0));
        self.robot
    }
}
