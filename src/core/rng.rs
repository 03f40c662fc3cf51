//! Deterministic random number generation for the rally simulator.
//!
//! The engine itself is random-free. `MatchRng` only drives simulated
//! rallies, so the same seed always replays the same game.
//!
//! ```
//! use rally_engine::core::MatchRng;
//!
//! let mut rng = MatchRng::new(42);
//! let mut again = MatchRng::new(42);
//! assert_eq!(rng.gen_team(), again.gen_team());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::team::TeamId;

/// Seeded ChaCha8 RNG.
#[derive(Clone, Debug)]
pub struct MatchRng {
    inner: ChaCha8Rng,
}

impl MatchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// True with the given probability.
    ///
    /// Out-of-range values are clamped into `[0, 1]`; NaN counts as 0.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        self.inner.gen_bool(p)
    }

    /// Fair coin toss between the two teams.
    pub fn gen_team(&mut self) -> TeamId {
        if self.inner.gen_bool(0.5) {
            TeamId::SECOND
        } else {
            TeamId::FIRST
        }
    }

    /// Choose an index with weighted probability.
    ///
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold <= 0.0 && weight > 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case
        weights.iter().rposition(|&w| w > 0.0)
    }
}
