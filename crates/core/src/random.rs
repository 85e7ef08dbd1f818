use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Source of randomness for picking quiz questions.
///
/// Injected into services the same way a clock would be, so tests can pin
/// the outcome with a seed while production draws from the thread RNG.
#[derive(Debug, Clone, Default)]
pub enum Sampler {
    #[default]
    Thread,
    Seeded(Arc<Mutex<StdRng>>),
}

impl Sampler {
    /// Returns a sampler backed by the thread-local RNG.
    #[must_use]
    pub fn thread() -> Self {
        Self::Thread
    }

    /// Returns a reproducible sampler. Clones share the same RNG state.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    /// Pick one element uniformly at random, or `None` for an empty slice.
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        match self {
            Self::Thread => items.choose(&mut rand::rng()),
            Self::Seeded(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                items.choose(&mut *rng)
            }
        }
    }
}
