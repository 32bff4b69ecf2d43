//! Scenario events and their timing specifications
//!
//! An event is active for every year in `[start_year, start_year + duration)`.
//! Timing specs are tagged enums: direct methods sample once per trial, the
//! two referential methods resolve recursively through the event graph
//! (see `timing::TimingResolver`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::distributions::AnnualChange;
use super::investments::AccountTaxStatus;
use crate::defaults::DEFAULT_EVENT_DURATION_YEARS;

/// How an event's start year is determined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StartSpec {
    Fixed { year: i32 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { lower: f64, upper: f64 },
    SameYearAs { event: String },
    YearAfterEndOf { event: String },
}

/// How an event's duration in years is determined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DurationSpec {
    Fixed { years: i32 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { lower: f64, upper: f64 },
}

impl Default for DurationSpec {
    fn default() -> Self {
        DurationSpec::Fixed {
            years: DEFAULT_EVENT_DURATION_YEARS,
        }
    }
}

/// Common shape of an income or expense stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSpec {
    /// Base amount in the event's first active year, in start-year dollars.
    pub initial_amount: f64,
    /// Year-over-year change applied to the carried base amount.
    pub annual_change: AnnualChange,
    /// Multiply the base by the cumulative inflation factor each year.
    pub inflation_adjusted: bool,
    /// Portion of the amount attributable to the user; applied once a
    /// married household becomes single.
    pub user_fraction: f64,
}

/// Allocation targets for invest and rebalance strategies.
///
/// Invest strategies nest targets under a tax-status category; rebalance
/// strategies use a flat target map. `BTreeMap` keeps iteration order
/// deterministic, which seeded trials rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllocationTargets {
    Nested(BTreeMap<AccountTaxStatus, BTreeMap<String, f64>>),
    Flat(BTreeMap<String, f64>),
}

/// Type-specific payload of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    Income {
        flow: CashFlowSpec,
        social_security: bool,
    },
    Expense {
        flow: CashFlowSpec,
        discretionary: bool,
    },
    Invest {
        /// Cash above this ceiling is swept into investments.
        max_cash: f64,
        initial_allocation: AllocationTargets,
        /// Glide-path endpoint; absent means a fixed allocation.
        #[serde(default)]
        final_allocation: Option<AllocationTargets>,
        #[serde(default)]
        glide_path: bool,
    },
    Rebalance {
        initial_allocation: AllocationTargets,
        #[serde(default)]
        final_allocation: Option<AllocationTargets>,
        #[serde(default)]
        glide_path: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique within a scenario; used as the timing-graph key.
    pub name: String,
    /// Absent start spec falls back to the scenario's start year.
    #[serde(default)]
    pub start: Option<StartSpec>,
    #[serde(default)]
    pub duration: DurationSpec,
    pub kind: EventKind,
}

impl Event {
    /// Convenience constructor for an event with a fixed start and duration.
    #[must_use]
    pub fn fixed_window(name: &str, start_year: i32, years: i32, kind: EventKind) -> Self {
        Event {
            name: name.to_string(),
            start: Some(StartSpec::Fixed { year: start_year }),
            duration: DurationSpec::Fixed { years },
            kind,
        }
    }
}

/// One year's pre-resolved invest sweep, allocation already interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestAction {
    pub event: String,
    pub max_cash: f64,
    pub allocation: AllocationTargets,
}

/// One year's pre-resolved rebalance, one action per tax-status category.
#[derive(Debug, Clone, PartialEq)]
pub struct RebalanceAction {
    pub event: String,
    pub targets: BTreeMap<String, f64>,
}

