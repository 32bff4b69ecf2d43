//! Yearly pipeline modules
//!
//! One module per step of the fixed yearly order:
//! income -> RMDs -> investment returns -> Roth conversion -> mandatory
//! payments -> discretionary spending -> invest sweeps -> rebalancing.
//! Each step mutates the shared `YearState` and appends structured log
//! entries; none throws for ordinary "nothing to do" conditions.

pub mod discretionary;
pub mod expenses;
pub mod income;
pub mod invest;
pub mod rebalance;
pub mod returns;
pub mod rmd;
pub mod roth;

use crate::model::{InvestAction, MaritalStatus, RebalanceAction, Scenario, TaxTables};
use crate::taxes::AdjustedTaxData;

/// Read-only inputs for one simulated year.
pub struct YearContext<'a> {
    pub scenario: &'a Scenario,
    pub tax_tables: &'a TaxTables,
    /// Cumulative inflation factors for the whole horizon.
    pub inflation_factors: &'a [f64],
    /// Names of events active this year.
    pub active_events: &'a [String],
    /// Household status this year (flips to single once a spouse dies).
    pub marital_status: MaritalStatus,
    pub user_age: i32,
    /// This year's inflation-adjusted tax tables.
    pub adjusted: &'a AdjustedTaxData,
    /// Last year's adjusted tables; absent in the first simulated year.
    pub prev_adjusted: Option<&'a AdjustedTaxData>,
    /// Pre-resolved invest sweeps for this year.
    pub invest_actions: &'a [InvestAction],
    /// Pre-resolved rebalances for this year.
    pub rebalance_actions: &'a [RebalanceAction],
}

impl YearContext<'_> {
    /// Cumulative inflation factor for the current year index.
    #[must_use]
    pub fn inflation_factor(&self, year_index: usize) -> f64 {
        self.inflation_factors.get(year_index).copied().unwrap_or(1.0)
    }

    /// Whether the household has narrowed from married to single.
    #[must_use]
    pub fn widowed(&self) -> bool {
        self.scenario.marital_status == MaritalStatus::Married
            && self.marital_status == MaritalStatus::Single
    }
}
