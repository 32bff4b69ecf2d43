//! Integration tests for the lifeplan simulation engine
//!
//! Tests are organized by topic:
//! - `timing` - Event window resolution, referential starts, cycle detection
//! - `inflation` - Cumulative factor projection and the fallback curve
//! - `glide` - Glide-path fractions and allocation interpolation
//! - `rmd` - Required minimum distribution mechanics
//! - `roth` - Bracket-filling Roth conversions
//! - `rebalance` - Rebalance allocation and value conservation
//! - `determinism` - Seed reproducibility and batch summaries
//! - `end_to_end` - Multi-year trials through the public API

mod common;
mod inflation;
mod rebalance;
