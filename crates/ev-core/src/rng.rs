//! Deterministic per-run RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every run owns exactly one `SmallRng`, passed explicitly to every phase that
//! needs randomness (activation shuffle, spawning, willingness sampling,
//! plurality ballots).  Nothing reads a thread-local or global generator, so a
//! run is fully reproducible from its seed and independent runs can execute on
//! different threads.
//!
//! Batch runs derive their seeds as:
//!
//!   seed = master_seed XOR (run_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive run indices uniformly across the seed space.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand::seq::SliceRandom;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.  One per run; never shared between runs.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed run `run_index` of a batch deterministically from `master_seed`.
    pub fn for_run(master_seed: u64, run_index: u64) -> Self {
        SimRng::new(master_seed ^ run_index.wrapping_mul(MIXING_CONSTANT))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
