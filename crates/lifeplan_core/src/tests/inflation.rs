//! Inflation projection tests

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::inflation::{fallback_factors, project_inflation};
use crate::model::Distribution;

#[test]
fn factors_compound_cumulatively() {
    let mut rng = SmallRng::seed_from_u64(1);
    let (factors, fallback) =
        project_inflation(&mut rng, &Distribution::Fixed { value: 0.03 }, 5);

    assert!(!fallback);
    assert_eq!(factors.len(), 5);
    assert!((factors[0] - 1.03).abs() < 1e-12, "Expected 1.03, got {}", factors[0]);
    assert!(
        (factors[4] - 1.03_f64.powi(5)).abs() < 1e-12,
        "Expected 1.03^5, got {}",
        factors[4]
    );
}

#[test]
fn zero_inflation_is_identity() {
    let mut rng = SmallRng::seed_from_u64(1);
    let (factors, fallback) =
        project_inflation(&mut rng, &Distribution::Fixed { value: 0.0 }, 3);

    assert!(!fallback);
    assert_eq!(factors, vec![1.0, 1.0, 1.0]);
}

#[test]
fn invalid_parameters_substitute_whole_fallback_curve() {
    let mut rng = SmallRng::seed_from_u64(1);
    let bad = Distribution::Normal {
        mean: 0.02,
        std_dev: -1.0,
    };
    let (factors, fallback) = project_inflation(&mut rng, &bad, 10);

    assert!(fallback);
    assert_eq!(factors, fallback_factors(10));
    // Flat 2%, compounded from year one
    assert!((factors[0] - 1.02).abs() < 1e-12);
    assert!((factors[9] - 1.02_f64.powi(10)).abs() < 1e-12);
}

#[test]
fn sampled_factors_stay_cumulative() {
    let mut rng = SmallRng::seed_from_u64(7);
    let uniform = Distribution::Uniform {
        lower: 0.0,
        upper: 0.05,
    };
    let (factors, fallback) = project_inflation(&mut rng, &uniform, 20);

    assert!(!fallback);
    for pair in factors.windows(2) {
        assert!(pair[1] >= pair[0], "factors must be non-decreasing");
    }
}
