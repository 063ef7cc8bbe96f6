//! Deterministic layout RNG.
//!
//! Wraps `ChaCha8Rng` so every random draw the engine makes (depth jitter,
//! emissive glow, setbacks, roofs, wall tint) comes from an injected
//! generator. Seeding from the repository key gives each repository its own
//! stable look.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::DEFAULT_SEED;

/// Use `rng.0` for draws; it implements `rand::Rng`.
#[derive(Debug, Clone)]
pub struct LayoutRng(pub ChaCha8Rng);

impl Default for LayoutRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl LayoutRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seed from the `owner/repo` key.
    pub fn for_repo(owner: &str, repo: &str) -> Self {
        Self::from_seed_u64(repo_seed(owner, repo))
    }
}

/// Stable 64-bit seed for a repository.
pub fn repo_seed(owner: &str, repo: &str) -> u64 {
    xxh3_64(format!("{owner}/{repo}").as_bytes())
}
