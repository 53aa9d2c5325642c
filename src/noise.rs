//! Injectable noise sources for the AQI predictor.
//!
//! The predictor never touches global RNG state. Callers hand it a [`NoiseSource`]:
//! - [`GaussianNoise`]: normal samples from any `rand::Rng` (seeded or thread-local)
//! - [`ZeroNoise`]: always 0.0, removes the noise term entirely
//! - [`FixedNoise`]: always the same value

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of normally distributed noise.
pub trait NoiseSource {
    /// Draw one sample from N(mean, std_dev²).
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        (**self).sample_normal(mean, std_dev)
    }
}

/// Normal noise drawn from a wrapped uniform RNG via Box-Muller.
#[derive(Debug, Clone)]
pub struct GaussianNoise<R> {
    rng: R,
}

/// Noise from the calling thread's RNG; each thread draws independently.
pub type ThreadNoise = GaussianNoise<ThreadRng>;

impl<R: Rng> GaussianNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Standard normal sample (Box-Muller transform).
    pub fn standard_normal(&mut self) -> f64 {
        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();

        // Avoid ln(0)
        let u1 = if u1 < f64::EPSILON { f64::EPSILON } else { u1 };

        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

impl GaussianNoise<StdRng> {
    /// Reproducible source: same seed, same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Independent reproducible stream `index` derived from a master seed.
    pub fn stream(master_seed: u64, index: u64) -> Self {
        Self::seeded(stream_seed(master_seed, index))
    }
}

impl GaussianNoise<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> NoiseSource for GaussianNoise<R> {
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }
}

/// Seed for stream `index` of a partitioned master seed (golden-ratio spacing).
pub fn stream_seed(master_seed: u64, index: u64) -> u64 {
    master_seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Noise source that contributes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample_normal(&mut self, _mean: f64, _std_dev: f64) -> f64 {
        0.0
    }
}

/// Noise source that always returns the same value, ignoring the distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample_normal(&mut self, _mean: f64, _std_dev: f64) -> f64 {
        self.0
    }
}
