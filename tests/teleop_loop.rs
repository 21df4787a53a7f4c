use firebrand::{
    config::TeleopConfig,
    drivetrain::{Differential, DriveCommand},
    opcontrol::{
        lift::LiftState,
        ludicrous::{LudicrousPerturber, NoiseState, derive_seed},
        mode::ControlStyle,
        teleop::{ControlLoop, Robot},
    },
    peripherals::{
        MotorCommand,
        controller::{ControllerAxis, ControllerButton},
    },
    sim::{SimDelay, SimDiagnostics, SimGamepad, SimMotor, TickLimit},
};

/// Simulated devices plus the handles the test keeps after the loop takes ownership.
struct Bench {
    gamepad: SimGamepad,
    drive:   [SimMotor; 4],
    lift:    [SimMotor; 2],
    claw:    [SimMotor; 2],
    delay:   SimDelay,
    screen:  SimDiagnostics,
}

impl Bench {
    fn new() -> Self {
        Self {
            gamepad: SimGamepad::default(),
            drive:   Default::default(),
            lift:    Default::default(),
            claw:    Default::default(),
            delay:   SimDelay::default(),
            screen:  SimDiagnostics::default(),
        }
    }

    fn control_loop(&self, config: TeleopConfig) -> ControlLoop {
        let robot = Robot {
            gamepad:     Box::new(self.gamepad.clone()),
            drivetrain:  Differential::new(
                [Box::new(self.drive[0].clone()), Box::new(self.drive[1].clone())],
                [Box::new(self.drive[2].clone()), Box::new(self.drive[3].clone())],
            ),
            lift:        [Box::new(self.lift[0].clone()), Box::new(self.lift[1].clone())],
            claw:        [Box::new(self.claw[0].clone()), Box::new(self.claw[1].clone())],
            delay:       Box::new(self.delay.clone()),
            diagnostics: Box::new(self.screen.clone()),
        };
        ControlLoop::new(robot, config).expect("default config is valid")
    }

    fn hold_combo(&self) {
        for button in TeleopConfig::default().bindings.mode_combo {
            self.gamepad.press(button);
        }
    }

    fn left_velocity(&self) -> Vec<Option<i32>> {
        self.drive[..2].iter().map(SimMotor::last_velocity).collect()
    }

    fn right_velocity(&self) -> Vec<Option<i32>> {
        self.drive[2..].iter().map(SimMotor::last_velocity).collect()
    }
}

#[test]
fn tank_drives_each_side_from_its_stick() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());

    bench.gamepad.set_axis(ControllerAxis::LeftY, 127);
    bench.gamepad.set_axis(ControllerAxis::RightY, -127);
    teleop.step();
    assert_eq!(bench.left_velocity(), vec![Some(127); 2]);
    assert_eq!(bench.right_velocity(), vec![Some(-127); 2]);

    // Small deflections sit in the curve's deadband.
    bench.gamepad.set_axis(ControllerAxis::LeftY, 8);
    bench.gamepad.set_axis(ControllerAxis::RightY, -8);
    teleop.step();
    assert_eq!(bench.left_velocity(), vec![Some(0); 2]);
    assert_eq!(bench.right_velocity(), vec![Some(0); 2]);
}

#[test]
fn arcade_output_is_saturated() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());

    bench.hold_combo();
    teleop.step();
    bench.gamepad.release_all();
    assert_eq!(teleop.style(), ControlStyle::Arcade);

    bench.gamepad.set_axis(ControllerAxis::LeftY, 127);
    bench.gamepad.set_axis(ControllerAxis::LeftX, 127);
    let report = teleop.step();
    assert_eq!(report.drive, DriveCommand { left: 127, right: 0 });
    assert_eq!(bench.left_velocity(), vec![Some(127); 2]);
    assert_eq!(bench.right_velocity(), vec![Some(0); 2]);
}

#[test]
fn held_combo_switches_once_per_cooldown() {
    let bench = Bench::new();
    let config = TeleopConfig::default();
    let (root, intensity) = (config.seed, config.chaos_intensity);
    let mut teleop = bench.control_loop(config);

    bench.hold_combo();
    assert_eq!(teleop.step().style, ControlStyle::Arcade);

    for _ in 0..24 {
        assert_eq!(teleop.step().style, ControlStyle::Arcade);
    }

    // The 26th tick overall is the 25th since the switch.
    let entered_on = teleop.ticks();
    assert_eq!(teleop.step().style, ControlStyle::Ludicrous);

    let mut expected = LudicrousPerturber::seeded(derive_seed(root, entered_on), intensity);
    expected.tick();
    assert_eq!(teleop.noise(), expected.state());
}

#[test]
fn ludicrous_drift_stays_in_range() {
    let bench = Bench::new();
    let config = TeleopConfig {
        switch_cooldown: 0,
        chaos_intensity: 127,
        ..TeleopConfig::default()
    };
    let mut teleop = bench.control_loop(config);

    bench.hold_combo();
    teleop.step();
    teleop.step();
    bench.gamepad.release_all();
    assert_eq!(teleop.style(), ControlStyle::Ludicrous);

    for _ in 0..5_000 {
        let report = teleop.step();
        let NoiseState { left, right } = teleop.noise();
        assert!((-127..=127).contains(&left));
        assert!((-127..=127).contains(&right));
        assert!((-127..=127).contains(&report.drive.left));
        assert!((-127..=127).contains(&report.drive.right));
    }
}

#[test]
fn lift_seek_up_returns_to_manual() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());

    bench.gamepad.press(ControllerButton::ButtonX);
    let report = teleop.step();
    bench.gamepad.release_all();
    assert_eq!(report.lift_state, LiftState::SeekingMax);
    for motor in &bench.lift {
        assert_eq!(
            motor.last_command(),
            Some(MotorCommand::MoveAbsolute {
                target:       40.0,
                max_velocity: 127,
            })
        );
    }

    // One side has not arrived yet.
    bench.lift[0].set_position(36.0);
    bench.lift[1].set_position(30.0);
    assert_eq!(teleop.step().lift_state, LiftState::SeekingMax);

    bench.lift[1].set_position(35.5);
    assert_eq!(teleop.step().lift_state, LiftState::Manual);
    for motor in &bench.lift {
        assert_eq!(motor.last_velocity(), Some(0));
    }
}

#[test]
fn lift_seek_down_completes_near_zero() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());
    for motor in &bench.lift {
        motor.set_position(40.0);
    }

    bench.gamepad.press(ControllerButton::ButtonB);
    assert_eq!(teleop.step().lift_state, LiftState::SeekingMin);
    bench.gamepad.release_all();
    assert_eq!(
        bench.lift[0].last_command(),
        Some(MotorCommand::MoveAbsolute {
            target:       0.0,
            max_velocity: -127,
        })
    );

    for motor in &bench.lift {
        motor.set_position(4.0);
    }
    assert_eq!(teleop.step().lift_state, LiftState::Manual);
    assert_eq!(bench.lift[1].last_velocity(), Some(0));
}

#[test]
fn claw_does_not_latch() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());

    bench.gamepad.press(ControllerButton::ButtonA);
    assert_eq!(teleop.step().claw, 127);
    for motor in &bench.claw {
        assert_eq!(motor.last_velocity(), Some(127));
    }

    bench.gamepad.release(ControllerButton::ButtonA);
    assert_eq!(teleop.step().claw, 0);
    for motor in &bench.claw {
        assert_eq!(motor.last_velocity(), Some(0));
    }
}

#[test]
fn disconnected_controller_holds_still() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());

    bench.gamepad.set_axis(ControllerAxis::LeftY, 127);
    bench.gamepad.press(ControllerButton::ButtonUp);
    teleop.step();
    assert_eq!(bench.left_velocity(), vec![Some(127); 2]);

    bench.gamepad.set_disconnected(true);
    let report = teleop.step();
    assert_eq!(report.drive, DriveCommand::default());
    assert_eq!(bench.lift[0].last_velocity(), Some(0));
}

#[test]
fn failing_motor_does_not_stop_the_loop() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());
    bench.drive[0].set_failing(true);
    bench.lift[1].set_failing(true);

    bench.gamepad.set_axis(ControllerAxis::LeftY, 127);
    assert_eq!(teleop.run(&TickLimit::new(5)), 5);
    assert!(bench.drive[0].commands().is_empty());
    assert_eq!(bench.drive[1].last_velocity(), Some(127));
    assert_eq!(bench.delay.waits(), 5);
}

#[test]
fn lift_positions_are_reported_periodically() {
    let bench = Bench::new();
    let mut teleop = bench.control_loop(TeleopConfig::default());
    bench.lift[0].set_position(12.0);
    bench.lift[1].set_position(-3.0);

    teleop.run(&TickLimit::new(50));
    let lines = bench.screen.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], (0, 0, "L:12.0 R:-3.0".to_string()));
}
