//! Household financial trajectory simulation library
//!
//! This crate provides a Monte Carlo simulation engine for long-horizon
//! household financial planning. It supports:
//! - Multiple account tax treatments (pre-tax, after-tax, non-retirement, tax-exempt)
//! - Event-driven income, expense, invest, and rebalance modeling with
//!   referential start timing (same-year-as, year-after-end-of)
//! - Sampled horizons from per-person life expectancy distributions
//! - Progressive federal/state income tax and stacked capital-gains tax,
//!   with bracket thresholds indexed to the trial's inflation path
//! - Required Minimum Distributions and bracket-filling Roth conversions
//! - Goal-aware discretionary spending and a cash-first withdrawal waterfall
//!
//! Trials are deterministic for a given seed and fully independent, so they
//! parallelize across threads (the default `parallel` feature).

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod defaults;
pub mod error;
pub mod glide_path;
pub mod inflation;
pub mod simulation;
pub mod taxes;
pub mod timing;
pub mod withdrawal;
pub mod year_state;
pub mod yearly;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use model::{MonteCarloResult, Scenario, TaxTables, Termination, TrialResult};
pub use simulation::{monte_carlo_run, run_trial};
