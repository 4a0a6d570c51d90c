//! Sampling primitives
//!
//! Both games draw from an RNG owned by the game instance. These helpers
//! consume a fixed number of draws per call so that identical seeds give
//! identical trajectories.

use rand::Rng;

/// Pick one element uniformly using a single index draw.
///
/// Empty arrays are rejected at compile time.
pub fn choice<T: Copy, R: Rng + ?Sized, const N: usize>(items: &[T; N], rng: &mut R) -> T {
    const { assert!(N > 0, "choice needs at least one item") };
    items[rng.random_range(0..N)]
}

/// Sample an index according to `weights` using one uniform draw.
///
/// Falls back to the last index if floating-point drift keeps the running
/// sum from ever exceeding the draw. That fallback is logged; it should not
/// happen for tables that sum to 1.
pub fn sample<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.random();
    cumulative_index(weights, r).unwrap_or_else(|| {
        log::warn!(
            "weighted sample fell through (r = {r}, weights = {weights:?}); using last index"
        );
        weights.len().saturating_sub(1)
    })
}

/// Smallest index whose running sum exceeds `r` or reaches exactly 1.0.
#[allow(clippy::float_cmp)]
pub fn cumulative_index(weights: &[f64], r: f64) -> Option<usize> {
    let mut sum = 0.0;
    for (i, &p) in weights.iter().enumerate() {
        sum += p;
        if sum > r || sum == 1.0 {
            return Some(i);
        }
    }
    None
}
