pub mod color;
pub mod config;
pub mod diagram;
pub mod encoding;
pub mod geometry;
pub mod math;
pub mod surface;
pub mod typeset;

use rand::{rngs::StdRng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create a [`StdRng`] seeded from the `SEED` environment variable.
///
/// Each call uses a unique seed derived from the base seed and an
/// incrementing counter, so repeated calls yield deterministic yet
/// distinct streams. Randomized cell coloring stays reproducible when
/// `SEED` is fixed.
pub fn rng_from_env() -> StdRng {
    let base = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let idx = COUNTER.fetch_add(1, Ordering::SeqCst);
    StdRng::seed_from_u64(base + idx)
}
