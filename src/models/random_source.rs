use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandomSourceError {
    #[error("random source is exhausted")]
    Exhausted,
    #[error("could not seed random source from the operating system: {0}")]
    Entropy(String),
    #[error("nothing to draw from")]
    Empty,
}

/// Uniform draws used when generating forecasts.
///
/// Every [`Rng`] is a source that never fails. Implement this directly for
/// sources that can run dry.
pub trait RandomSource {
    /// A uniformly distributed integer in the closed `range`.
    fn int_in_range(&mut self, range: RangeInclusive<i32>) -> Result<i32, RandomSourceError>;

    /// A uniformly distributed element of `items`, picked with replacement.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomSourceError>;
}

impl<R: Rng> RandomSource for R {
    fn int_in_range(&mut self, range: RangeInclusive<i32>) -> Result<i32, RandomSourceError> {
        if range.is_empty() {
            return Err(RandomSourceError::Empty);
        }
        Ok(self.random_range(range))
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomSourceError> {
        items.choose(self).ok_or(RandomSourceError::Empty)
    }
}

/// Generator for a single request. A configured seed makes every request
/// produce the same draws.
pub fn request_rng(seed: Option<u64>) -> Result<StdRng, RandomSourceError> {
    match seed {
        Some(seed) => Ok(StdRng::seed_from_u64(seed)),
        None => StdRng::try_from_os_rng()
            .map_err(|error| RandomSourceError::Entropy(error.to_string())),
    }
}
