//! Deterministic per-sample RNG.
//!
//! # Determinism strategy
//!
//! Each sample path that needs randomness (start-point jitter, test grids)
//! gets its own `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (sample_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive indices uniformly across the seed space.  Adding
//! samples at the end of a run does not disturb the seeds of existing ones,
//! and parallel workers never share RNG state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::GeoPoint;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SampleRng ─────────────────────────────────────────────────────────────────

/// Per-sample deterministic RNG.
pub struct SampleRng(SmallRng);

impl SampleRng {
    /// Seed deterministically from the run's seed and a sample index.
    pub fn new(run_seed: u64, sample_index: usize) -> Self {
        let seed = run_seed ^ (sample_index as u64).wrapping_mul(MIXING_CONSTANT);
        SampleRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A point uniformly distributed (by area) in the disk of `radius_m`
    /// around `center`.
    pub fn point_in_disk(&mut self, center: GeoPoint, radius_m: f64) -> GeoPoint {
        if radius_m <= 0.0 {
            return center;
        }
        let r = radius_m * self.0.r#gen::<f64>().sqrt();
        let heading = self.0.gen_range(0.0..360.0);
        center.displaced(heading, r)
    }
}
