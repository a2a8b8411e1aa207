//! Process-wide random generator.
//!
//! Default parameter initialization and ALLTOALL pair ordering draw from one
//! shared `StdRng`, seeded with [`DEFAULT_SEED`] on first use. Every random
//! operation in this crate also has a `*_with_rng` variant for callers that
//! want to own their generator.

use std::f64::consts::TAU;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Seed the shared generator starts from.
pub const DEFAULT_SEED: u64 = 1;

static GLOBAL_RNG: LazyLock<Mutex<StdRng>> =
    LazyLock::new(|| Mutex::new(StdRng::seed_from_u64(DEFAULT_SEED)));

/// Lock the shared generator.
///
/// A panic while the lock was held leaves the generator in a valid state, so
/// poisoning is ignored.
pub fn global_rng() -> MutexGuard<'static, StdRng> {
    GLOBAL_RNG.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Reset the shared generator to a known seed.
pub fn reseed_global_rng(seed: u64) {
    debug!(seed, "reseeding global rng");
    *global_rng() = StdRng::seed_from_u64(seed);
}

/// Draw an angle uniformly from `[0, 2π)`.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>() * TAU
}
