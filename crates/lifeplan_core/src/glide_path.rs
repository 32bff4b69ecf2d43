//! Glide-path allocation interpolation
//!
//! Linearly interpolates allocation percentages between an initial and final
//! strategy as a function of elapsed fraction of an event's duration. The
//! fraction is 0 in the event's first active year and 1 in its last. A
//! missing final strategy (or mismatched shape) degrades to the fixed
//! initial allocation.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{AccountTaxStatus, AllocationTargets};

/// `clamp(0, 1, years_elapsed / max(1, duration - 1))`
#[must_use]
pub fn glide_fraction(years_elapsed: i32, duration: i32) -> f64 {
    let denominator = (duration - 1).max(1);
    (f64::from(years_elapsed) / f64::from(denominator)).clamp(0.0, 1.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate a flat target map leaf by leaf; missing leaves default to 0.
#[must_use]
pub fn interpolate_flat(
    initial: &BTreeMap<String, f64>,
    final_: &BTreeMap<String, f64>,
    fraction: f64,
) -> BTreeMap<String, f64> {
    let keys: BTreeSet<&String> = initial.keys().chain(final_.keys()).collect();
    keys.into_iter()
        .map(|key| {
            let a = initial.get(key).copied().unwrap_or(0.0);
            let b = final_.get(key).copied().unwrap_or(0.0);
            (key.clone(), lerp(a, b, fraction))
        })
        .collect()
}

fn interpolate_nested(
    initial: &BTreeMap<AccountTaxStatus, BTreeMap<String, f64>>,
    final_: &BTreeMap<AccountTaxStatus, BTreeMap<String, f64>>,
    fraction: f64,
) -> BTreeMap<AccountTaxStatus, BTreeMap<String, f64>> {
    let empty = BTreeMap::new();
    let categories: BTreeSet<AccountTaxStatus> =
        initial.keys().chain(final_.keys()).copied().collect();
    categories
        .into_iter()
        .map(|category| {
            let a = initial.get(&category).unwrap_or(&empty);
            let b = final_.get(&category).unwrap_or(&empty);
            (category, interpolate_flat(a, b, fraction))
        })
        .collect()
}

/// Interpolate an allocation at the given fraction of the glide path.
#[must_use]
pub fn interpolate(
    initial: &AllocationTargets,
    final_: Option<&AllocationTargets>,
    fraction: f64,
) -> AllocationTargets {
    match (initial, final_) {
        (_, None) => initial.clone(),
        (AllocationTargets::Flat(a), Some(AllocationTargets::Flat(b))) => {
            AllocationTargets::Flat(interpolate_flat(a, b, fraction))
        }
        (AllocationTargets::Nested(a), Some(AllocationTargets::Nested(b))) => {
            AllocationTargets::Nested(interpolate_nested(a, b, fraction))
        }
        // Shape mismatch: treat as a fixed allocation.
        (initial, Some(_)) => initial.clone(),
    }
}
