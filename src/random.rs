//! Normalising the different ways callers hand us randomness.
//!
//! Sampling helpers accept a seed, a seed array, an existing generator, or
//! nothing at all. [`get_rand_state`] turns any of those into a `StdRng` so
//! downstream code only ever deals with one generator type.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{DataError, Result};

/// Largest integer seed accepted (exclusive), matching a 32-bit seed space.
pub const MAX_SEED: i64 = 1 << 32;

#[derive(Debug, Clone)]
pub enum RandomState {
    /// Fresh generator seeded from OS entropy.
    None,
    Seed(i64),
    SeedArray(Vec<u32>),
    /// Already-constructed generator, returned as-is.
    Rng(StdRng),
}

// Seeds past i64::MAX saturate; they are out of range either way.
impl From<u64> for RandomState {
    fn from(seed: u64) -> Self {
        RandomState::Seed(i64::try_from(seed).unwrap_or(i64::MAX))
    }
}

impl From<Option<u64>> for RandomState {
    fn from(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => RandomState::from(s),
            None => RandomState::None,
        }
    }
}

impl From<Vec<u32>> for RandomState {
    fn from(words: Vec<u32>) -> Self {
        RandomState::SeedArray(words)
    }
}

impl From<StdRng> for RandomState {
    fn from(rng: StdRng) -> Self {
        RandomState::Rng(rng)
    }
}

/// Resolve a [`RandomState`] into a generator.
///
/// # Errors
///
/// Returns `DataError::InvalidRandomState` when an integer seed falls outside
/// `0..2^32` or a seed array is empty.
pub fn get_rand_state(rand: RandomState) -> Result<StdRng> {
    match rand {
        RandomState::Rng(rng) => Ok(rng),
        RandomState::None => Ok(StdRng::from_entropy()),
        RandomState::Seed(seed) => {
            if !(0..MAX_SEED).contains(&seed) {
                return Err(DataError::InvalidRandomState(format!(
                    "{} (seed must be between 0 and 2**32 - 1)",
                    seed
                )));
            }
            Ok(StdRng::seed_from_u64(seed as u64))
        }
        RandomState::SeedArray(words) => {
            if words.is_empty() {
                return Err(DataError::InvalidRandomState(
                    "[] (seed array must be non-empty)".to_string(),
                ));
            }
            Ok(StdRng::from_seed(fold_seed_words(&words)))
        }
    }
}

// Each word lands on a 4-byte lane; lanes wrap after 8 words and later
// passes are rotated so repeated words don't cancel out.
fn fold_seed_words(words: &[u32]) -> [u8; 32] {
    let mut seed = [0u8; 32];
    for (i, word) in words.iter().enumerate() {
        let lane = (i % 8) * 4;
        let pass = (i / 8) as u32;
        let mixed = word.rotate_left(pass * 7).wrapping_add(pass);
        for (j, byte) in mixed.to_le_bytes().iter().enumerate() {
            seed[lane + j] ^= byte;
        }
    }
    seed[31] ^= (words.len() % 256) as u8;
    seed
}
