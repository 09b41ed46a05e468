//! Catch roll
//!
//! The chance of catching a Pokemon falls with its base experience:
//! `1 / (1 + base_experience / CATCH_DIFFICULTY)`.

use rand::Rng;

/// Base experience at which the catch chance drops to one half
pub const CATCH_DIFFICULTY: f64 = 100.0;

/// Probability in `(0, 1]` that a throw catches a Pokemon.
pub fn catch_probability(base_experience: u32) -> f64 {
    1.0 / (1.0 + f64::from(base_experience) / CATCH_DIFFICULTY)
}

/// Rolls a uniform value in `[0, 1)` and reports whether it lands under the
/// catch probability.
pub fn attempt_catch<R: Rng + ?Sized>(rng: &mut R, base_experience: u32) -> bool {
    rng.random::<f64>() < catch_probability(base_experience)
}
