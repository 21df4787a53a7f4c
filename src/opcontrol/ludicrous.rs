//! Ludicrous mode: the robot is on fire.
//!
//! While [`ControlStyle::Ludicrous`](crate::opcontrol::mode::ControlStyle) is
//! active the robot drives like tank control, but each side's speed drifts by
//! a random walk. Every tick a small random step is added to a per-side
//! accumulator, which is held within `-127..=127` so the drift never grows
//! without bound. It is a training mode: the driver has to keep correcting.
//!
//! The random source is a [`NoiseSource`], so tests can swap in a scripted
//! sequence of draws. On the robot it is a [`ChaosRng`], reseeded each time
//! the mode is entered.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::peripherals::{MAX_COMMAND, clamp_command};

/// Default step bound for each tick.
pub const LU_FLAME_INTENSITY: i32 = 5;

/// Random steps for the perturber.
pub trait NoiseSource {
    /// Returns a step within `-intensity..=intensity`.
    fn draw(&mut self, intensity: i32) -> i32;

    /// Restarts the sequence from `seed`.
    fn reseed(&mut self, seed: u64);
}

/// A [`NoiseSource`] backed by a seeded `ChaCha8Rng`.
#[derive(Debug, Clone)]
pub struct ChaosRng(ChaCha8Rng);

impl ChaosRng {
    pub fn new(seed: u64) -> Self { Self(ChaCha8Rng::seed_from_u64(seed)) }
}

impl NoiseSource for ChaosRng {
    fn draw(&mut self, intensity: i32) -> i32 {
        let bound = intensity.abs();
        self.0.gen_range(-bound..=bound)
    }

    fn reseed(&mut self, seed: u64) { self.0 = ChaCha8Rng::seed_from_u64(seed); }
}

/// Derives a child seed from a root seed and an index, such as the tick on
/// which Ludicrous mode was entered.
pub fn derive_seed(root: u64, index: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    root.hash(&mut hasher);
    index.hash(&mut hasher);
    hasher.finish()
}

/// The per-side drift accumulators. Both always lie within `-127..=127`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoiseState {
    pub left:  i32,
    pub right: i32,
}

/// Random-walk drift generator for Ludicrous mode.
#[derive(Debug, Clone)]
pub struct LudicrousPerturber<N: NoiseSource = ChaosRng> {
    source:    N,
    state:     NoiseState,
    intensity: i32,
}

impl LudicrousPerturber<ChaosRng> {
    /// Creates a perturber with a [`ChaosRng`] seeded from `seed`.
    pub fn seeded(seed: u64, intensity: i32) -> Self { Self::new(ChaosRng::new(seed), intensity) }
}

impl<N: NoiseSource> LudicrousPerturber<N> {
    /// Creates a perturber with zeroed accumulators.
    pub fn new(source: N, intensity: i32) -> Self {
        Self {
            source,
            state: NoiseState::default(),
            intensity: intensity.clamp(0, MAX_COMMAND),
        }
    }

    /// Current accumulator values.
    pub fn state(&self) -> NoiseState { self.state }

    /// The per-tick step bound.
    pub fn intensity(&self) -> i32 { self.intensity }

    /// Advances both accumulators by one random step each.
    pub fn tick(&mut self) {
        let left = self.source.draw(self.intensity);
        let right = self.source.draw(self.intensity);
        self.state.left = clamp_command(self.state.left.saturating_add(left));
        self.state.right = clamp_command(self.state.right.saturating_add(right));
    }

    /// Reseeds the source and clears the accumulators. Called once, on the
    /// tick Ludicrous mode is entered.
    pub fn reset(&mut self, seed: u64) {
        self.source.reseed(seed);
        self.state = NoiseState::default();
    }
}
