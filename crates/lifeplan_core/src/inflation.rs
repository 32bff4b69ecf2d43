//! Inflation projection
//!
//! Builds the horizon-length array of cumulative compounding factors.
//! `factors[i]` already includes year `i`'s rate, so downstream adjustment
//! multiplies a not-yet-inflated base quantity by `factors[year_index]`
//! directly. A sampling failure anywhere resets the whole array to the flat
//! default-rate curve, keeping a trial internally consistent.

use rand::Rng;

use crate::defaults::DEFAULT_INFLATION_RATE;
use crate::model::Distribution;

/// Cumulative factors at the default rate: `(1 + r)^(i + 1)`.
#[must_use]
pub fn fallback_factors(horizon: usize) -> Vec<f64> {
    let mut factors = Vec::with_capacity(horizon);
    let mut cumulative = 1.0;
    for _ in 0..horizon {
        cumulative *= 1.0 + DEFAULT_INFLATION_RATE;
        factors.push(cumulative);
    }
    factors
}

/// Project cumulative inflation factors for the trial horizon.
///
/// Returns the factors and whether the fallback curve was substituted.
pub fn project_inflation<R: Rng + ?Sized>(
    rng: &mut R,
    assumption: &Distribution,
    horizon: usize,
) -> (Vec<f64>, bool) {
    let mut factors = Vec::with_capacity(horizon);
    let mut cumulative = 1.0;
    for _ in 0..horizon {
        match assumption.sample(rng) {
            Ok(rate) => {
                cumulative *= 1.0 + rate;
                factors.push(cumulative);
            }
            Err(_) => return (fallback_factors(horizon), true),
        }
    }
    (factors, false)
}
