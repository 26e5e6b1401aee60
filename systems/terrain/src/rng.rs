//! Deterministic random source derived from a seed string.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Pseudo-random stream whose draws depend only on the seed string it was
/// created from.
#[derive(Clone, Debug)]
pub struct SeededRng {
    seed: String,
    rng: ChaCha8Rng,
}

impl SeededRng {
    /// Creates a stream from `seed`.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::from_hashed(seed, hash_seed(seed, None))
    }

    /// Creates a stream from `seed`, or from a clock-derived seed string when
    /// `use_random_seed` is set.
    #[must_use]
    pub fn resolve(seed: &str, use_random_seed: bool) -> Self {
        if use_random_seed {
            Self::from_seed_str(&time_seed())
        } else {
            Self::from_seed_str(seed)
        }
    }

    /// Creates an independent stream for `seed` separated from the primary
    /// stream by `label`.
    #[must_use]
    pub fn labeled(seed: &str, label: &str) -> Self {
        Self::from_hashed(seed, hash_seed(seed, Some(label)))
    }

    /// Seed string this stream was derived from.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Draws a uniform integer in `0..bound`. A zero bound always yields zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    /// Draws a fair boolean.
    pub fn coin_flip(&mut self) -> bool {
        self.below(2) == 0
    }

    fn from_hashed(seed: &str, value: u64) -> Self {
        Self {
            seed: seed.to_owned(),
            rng: ChaCha8Rng::seed_from_u64(value),
        }
    }
}

fn hash_seed(seed: &str, label: Option<&str>) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    if let Some(label) = label {
        hasher.update([0_u8]);
        hasher.update(label.as_bytes());
    }
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

fn time_seed() -> String {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:09}", elapsed.as_secs(), elapsed.subsec_nanos())
}
