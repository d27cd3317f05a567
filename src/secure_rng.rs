//! Seedable random number generation.
//!
//! The engine takes an explicit RNG instead of reaching for ambient
//! randomness, so callers (and tests) can reproduce exact sample sequences.
//! ChaCha20 is used as the generator; `seed_from_u64` expands a compact
//! seed into the full 256-bit state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seedable RNG wrapper used by the sampling engine.
#[derive(Clone)]
pub struct SecureRng {
    rng: ChaCha20Rng,
}

impl std::fmt::Debug for SecureRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureRng").finish_non_exhaustive()
    }
}

impl SecureRng {
    /// Create a new RNG seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create an RNG with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random f64 in [0, 1).
    pub fn f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}
