//! Statistical sampling primitives
//!
//! Every uncertain quantity in a scenario (timing, inflation, returns,
//! annual changes, life expectancy) is described by one of these tagged
//! distributions, resolved at load time. Sampling draws from an injected
//! RNG so a trial is fully deterministic given a seed.

use rand::Rng;
use rand_distr::Distribution as _;
use serde::{Deserialize, Serialize};

use crate::error::DistributionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Distribution {
    Fixed { value: f64 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { lower: f64, upper: f64 },
}

impl Distribution {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, DistributionError> {
        match self {
            Distribution::Fixed { value } => Ok(*value),
            Distribution::Normal { mean, std_dev } => {
                // rand_distr only rejects non-finite std_dev; a negative one
                // would sample a mirrored normal, so reject it here.
                if !mean.is_finite() || !std_dev.is_finite() || *std_dev < 0.0 {
                    return Err(DistributionError::InvalidParameters {
                        kind: "normal",
                        a: *mean,
                        b: *std_dev,
                        reason: "mean must be finite, std_dev non-negative and finite",
                    });
                }
                rand_distr::Normal::new(*mean, *std_dev)
                    .map(|d| d.sample(rng))
                    .map_err(|_| DistributionError::InvalidParameters {
                        kind: "normal",
                        a: *mean,
                        b: *std_dev,
                        reason: "mean must be finite, std_dev non-negative and finite",
                    })
            }
            Distribution::Uniform { lower, upper } => {
                if !lower.is_finite() || !upper.is_finite() || lower > upper {
                    return Err(DistributionError::InvalidParameters {
                        kind: "uniform",
                        a: *lower,
                        b: *upper,
                        reason: "bounds must be finite with lower <= upper",
                    });
                }
                if lower == upper {
                    Ok(*lower)
                } else {
                    Ok(rng.random_range(*lower..*upper))
                }
            }
        }
    }

    /// Sample rounded to a whole year, floored at `floor`.
    ///
    /// Start years floor at the current year, durations floor at one.
    pub fn sample_year<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        floor: i32,
    ) -> Result<i32, DistributionError> {
        Ok((self.sample(rng)?.round() as i32).max(floor))
    }
}

/// Whether a sampled value is a dollar amount or a rate applied to a base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Amount,
    Percent,
}

/// Year-over-year change applied to an event's carried base amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualChange {
    pub distribution: Distribution,
    pub kind: ValueKind,
}

impl AnnualChange {
    /// Apply one sampled change to `base`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        base: f64,
    ) -> Result<f64, DistributionError> {
        let sampled = self.distribution.sample(rng)?;
        Ok(match self.kind {
            ValueKind::Amount => base + sampled,
            ValueKind::Percent => base * (1.0 + sampled),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_normal_rejects_negative_std_dev() {
        let mut rng = SmallRng::seed_from_u64(1);
        let bad = Distribution::Normal {
            mean: 0.02,
            std_dev: -1.0,
        };
        assert!(matches!(
            bad.sample(&mut rng),
            Err(DistributionError::InvalidParameters { kind: "normal", .. })
        ));
    }

    #[test]
    fn test_normal_rejects_non_finite_parameters() {
        let mut rng = SmallRng::seed_from_u64(1);
        let bad = Distribution::Normal {
            mean: f64::NAN,
            std_dev: 1.0,
        };
        assert!(bad.sample(&mut rng).is_err());
        let bad = Distribution::Normal {
            mean: 0.0,
            std_dev: f64::INFINITY,
        };
        assert!(bad.sample(&mut rng).is_err());
    }

    #[test]
    fn test_normal_zero_std_dev_is_degenerate() {
        let mut rng = SmallRng::seed_from_u64(1);
        let point = Distribution::Normal {
            mean: 0.03,
            std_dev: 0.0,
        };
        assert!((point.sample(&mut rng).unwrap() - 0.03).abs() < 1e-12);
    }
}
