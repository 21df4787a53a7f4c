use std::sync::atomic::AtomicBool;

use firebrand::{
    config::TeleopConfig,
    drivetrain::Differential,
    fs::logger,
    opcontrol::teleop::{ControlLoop, Robot},
    peripherals::{LogDiagnostics, StdDelay},
};
use log::{LevelFilter, error};
use vexide::prelude::*;

struct Compbot {
    teleop: ControlLoop,
    /// Never raised: the runtime cancels `driver` when the match leaves driver control.
    stop:   AtomicBool,
}

impl Compete for Compbot {
    async fn driver(&mut self) { self.teleop.run_async(&self.stop).await; }
}

#[vexide::main]
async fn main(peripherals: Peripherals) {
    let _ = logger::init(LevelFilter::Info);

    let robot = Robot {
        gamepad:     Box::new(peripherals.primary_controller),
        drivetrain:  Differential::new(
            [
                Box::new(Motor::new(peripherals.port_1, Gearset::Green, Direction::Forward)),
                Box::new(Motor::new(peripherals.port_3, Gearset::Green, Direction::Forward)),
            ],
            [
                Box::new(Motor::new(peripherals.port_2, Gearset::Green, Direction::Reverse)),
                Box::new(Motor::new(peripherals.port_4, Gearset::Green, Direction::Reverse)),
            ],
        ),
        lift:        [
            Box::new(Motor::new(peripherals.port_5, Gearset::Green, Direction::Reverse)),
            Box::new(Motor::new(peripherals.port_6, Gearset::Green, Direction::Forward)),
        ],
        claw:        [
            Box::new(Motor::new(peripherals.port_7, Gearset::Green, Direction::Forward)),
            Box::new(Motor::new(peripherals.port_8, Gearset::Green, Direction::Reverse)),
        ],
        delay:       Box::new(StdDelay::new()),
        diagnostics: Box::new(LogDiagnostics),
    };

    match ControlLoop::new(robot, TeleopConfig::default()) {
        Ok(teleop) => {
            Compbot {
                teleop,
                stop: AtomicBool::new(false),
            }
            .compete()
            .await;
        }
        Err(e) => error!("Invalid driver-control configuration: {}", e),
    }
}
