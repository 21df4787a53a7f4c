//! Drive style selection.
//!
//! Holding all four shoulder buttons together cycles the drive style
//! `Tank -> Arcade -> Ludicrous -> Tank`. After a switch the combo is ignored
//! for a cooldown (25 ticks, half a second at the default rate), so one long
//! press does not spin through every style.

use log::{debug, info};

use crate::{
    opcontrol::ludicrous::{LudicrousPerturber, NoiseSource},
    peripherals::controller::{ControllerButton, JoystickFrame},
};

/// Ticks during which the combo is ignored after a switch.
pub const SWITCH_COOLDOWN: i32 = 25;

/// How joystick input is mixed into drivetrain commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlStyle {
    /// Left stick drives the left side, right stick drives the right side.
    #[default]
    Tank,
    /// Left stick drives the whole robot: up/down is throttle, left/right is steering.
    Arcade,
    /// Tank control with random per-side drift.
    Ludicrous,
}

impl ControlStyle {
    /// The style that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            ControlStyle::Tank => ControlStyle::Arcade,
            ControlStyle::Arcade => ControlStyle::Ludicrous,
            ControlStyle::Ludicrous => ControlStyle::Tank,
        }
    }
}

/// Debounced, combo-triggered cycling between [`ControlStyle`]s.
#[derive(Debug, Clone)]
pub struct ModeSelector {
    style:    ControlStyle,
    cooldown: i32,
    reset_to: i32,
    combo:    [ControllerButton; 4],
}

impl ModeSelector {
    /// Starts in [`ControlStyle::Tank`] with the combo armed.
    pub fn new(combo: [ControllerButton; 4], cooldown: i32) -> Self {
        Self {
            style: ControlStyle::Tank,
            cooldown: 0,
            reset_to: cooldown,
            combo,
        }
    }

    /// The active style.
    pub fn style(&self) -> ControlStyle { self.style }

    /// Ticks left before the combo is honored again. May be negative.
    pub fn cooldown(&self) -> i32 { self.cooldown }

    /// Runs one tick. Returns the new style if a switch fired.
    ///
    /// Entering [`ControlStyle::Ludicrous`] reseeds `perturber` with the
    /// value of `seed`, which is only evaluated on that tick.
    pub fn tick<N: NoiseSource>(
        &mut self,
        frame: &JoystickFrame,
        perturber: &mut LudicrousPerturber<N>,
        seed: impl FnOnce() -> u64,
    ) -> Option<ControlStyle> {
        self.cooldown = self.cooldown.saturating_sub(1);
        if !frame.all_pressed(&self.combo) || self.cooldown > 0 {
            return None;
        }

        self.style = self.style.next();
        if self.style == ControlStyle::Ludicrous {
            let seed = seed();
            debug!("Ludicrous noise reseeded with {:#018x}", seed);
            perturber.reset(seed);
        }
        self.cooldown = self.reset_to;
        info!("Control style switched to {:?}", self.style);
        Some(self.style)
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(
            [
                ControllerButton::ButtonL1,
                ControllerButton::ButtonL2,
                ControllerButton::ButtonR1,
                ControllerButton::ButtonR2,
            ],
            SWITCH_COOLDOWN,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::opcontrol::ludicrous::NoiseState;

    fn combo_frame() -> JoystickFrame {
        JoystickFrame::neutral()
            .with_button(ControllerButton::ButtonL1, true)
            .with_button(ControllerButton::ButtonL2, true)
            .with_button(ControllerButton::ButtonR1, true)
            .with_button(ControllerButton::ButtonR2, true)
    }

    #[test]
    fn cycles_through_every_style() {
        assert_eq!(ControlStyle::Tank.next(), ControlStyle::Arcade);
        assert_eq!(ControlStyle::Arcade.next(), ControlStyle::Ludicrous);
        assert_eq!(ControlStyle::Ludicrous.next(), ControlStyle::Tank);
    }

    #[test]
    fn held_combo_is_debounced() {
        let mut selector = ModeSelector::default();
        let mut perturber = LudicrousPerturber::seeded(0, 5);
        let frame = combo_frame();

        assert_eq!(
            selector.tick(&frame, &mut perturber, || 1),
            Some(ControlStyle::Arcade)
        );
        assert_eq!(selector.cooldown(), 25);

        for _ in 0..24 {
            assert_eq!(selector.tick(&frame, &mut perturber, || 1), None);
            assert_eq!(selector.style(), ControlStyle::Arcade);
        }

        // Drift the walk so the reseed is observable.
        for _ in 0..50 {
            perturber.tick();
        }
        assert_eq!(
            selector.tick(&frame, &mut perturber, || 7),
            Some(ControlStyle::Ludicrous)
        );
        assert_eq!(perturber.state(), NoiseState::default());
        assert_eq!(selector.cooldown(), 25);
    }

    #[test]
    fn seed_is_only_derived_when_entering_ludicrous() {
        let mut selector = ModeSelector::new(
            [
                ControllerButton::ButtonL1,
                ControllerButton::ButtonL2,
                ControllerButton::ButtonR1,
                ControllerButton::ButtonR2,
            ],
            0,
        );
        let mut perturber = LudicrousPerturber::seeded(0, 5);
        let derived = Cell::new(0);
        let seed = || {
            derived.set(derived.get() + 1);
            11
        };

        selector.tick(&JoystickFrame::neutral(), &mut perturber, seed);
        assert_eq!(derived.get(), 0);

        let frame = combo_frame();
        assert_eq!(
            selector.tick(&frame, &mut perturber, seed),
            Some(ControlStyle::Arcade)
        );
        assert_eq!(derived.get(), 0);

        assert_eq!(
            selector.tick(&frame, &mut perturber, seed),
            Some(ControlStyle::Ludicrous)
        );
        assert_eq!(derived.get(), 1);
    }

    #[test]
    fn partial_combo_does_nothing() {
        let mut selector = ModeSelector::default();
        let mut perturber = LudicrousPerturber::seeded(0, 5);
        let frame = combo_frame().with_button(ControllerButton::ButtonR2, false);

        for _ in 0..100 {
            assert_eq!(selector.tick(&frame, &mut perturber, || 0), None);
        }
        assert_eq!(selector.style(), ControlStyle::Tank);
        assert!(selector.cooldown() < 0);
    }

    #[test]
    fn leaving_ludicrous_keeps_noise() {
        let mut selector = ModeSelector::new(
            [
                ControllerButton::ButtonL1,
                ControllerButton::ButtonL2,
                ControllerButton::ButtonR1,
                ControllerButton::ButtonR2,
            ],
            0,
        );
        let mut perturber = LudicrousPerturber::seeded(3, 5);
        let frame = combo_frame();

        selector.tick(&frame, &mut perturber, || 3);
        selector.tick(&frame, &mut perturber, || 3);
        assert_eq!(selector.style(), ControlStyle::Ludicrous);
        for _ in 0..10 {
            perturber.tick();
        }
        let drift = perturber.state();

        assert_eq!(
            selector.tick(&frame, &mut perturber, || 3),
            Some(ControlStyle::Tank)
        );
        assert_eq!(perturber.state(), drift);
    }
}
