//! Mutable per-trial year state
//!
//! The accumulator threaded year to year: cash, the owned investment list,
//! running tax totals, and the per-event carry-forward base amounts. Created
//! once per trial from the scenario (deep copy of the investment list) and
//! mutated in place; the driver snapshots what it reports so no aliasing
//! crosses year boundaries.

use std::collections::BTreeMap;

use crate::model::{
    AccountOrigin, AccountTaxStatus, Investment, Scenario, SynthesisReason,
};

/// Income, Social Security, realized gains, and early-withdrawal totals for
/// one tax year. Taxes on these are paid the following year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxYearTotals {
    pub income: f64,
    pub social_security: f64,
    pub gains: f64,
    pub early_withdrawal: f64,
}

#[derive(Debug, Clone)]
pub struct YearState {
    pub year: i32,
    pub year_index: usize,
    pub cash: f64,
    pub investments: Vec<Investment>,
    /// Accrued this year, taxed next year.
    pub cur_year: TaxYearTotals,
    /// Accrued last year, taxed this year.
    pub prev_year: TaxYearTotals,
    /// Total pre-tax balance at the end of last year (RMD base).
    pub prev_year_pretax_balance: f64,
    /// Carried base amounts per income event, before inflation adjustment.
    pub income_event_bases: BTreeMap<String, f64>,
    /// Carried base amounts per expense event, before inflation adjustment.
    pub expense_event_bases: BTreeMap<String, f64>,
    /// Rebuilt every year.
    pub income_breakdown: BTreeMap<String, f64>,
    pub expense_breakdown: BTreeMap<String, f64>,
    pub discretionary_desired: f64,
    pub discretionary_paid: f64,
    pub financial_goal_met: bool,
}

impl YearState {
    #[must_use]
    pub fn new(scenario: &Scenario) -> Self {
        // The first year's RMD base is the balance the trial starts with
        let initial_pretax_balance = scenario
            .investments
            .iter()
            .filter(|i| i.tax_status == AccountTaxStatus::PreTax)
            .map(|i| i.value)
            .sum();
        YearState {
            year: scenario.settings.start_year,
            year_index: 0,
            cash: scenario.settings.initial_cash,
            investments: scenario.investments.clone(),
            cur_year: TaxYearTotals::default(),
            prev_year: TaxYearTotals::default(),
            prev_year_pretax_balance: initial_pretax_balance,
            income_event_bases: BTreeMap::new(),
            expense_event_bases: BTreeMap::new(),
            income_breakdown: BTreeMap::new(),
            expense_breakdown: BTreeMap::new(),
            discretionary_desired: 0.0,
            discretionary_paid: 0.0,
            financial_goal_met: true,
        }
    }

    /// Roll forward into the next simulated year.
    pub fn advance(&mut self) {
        self.prev_year_pretax_balance = self.pretax_balance();
        self.prev_year = self.cur_year;
        self.cur_year = TaxYearTotals::default();
        self.income_breakdown.clear();
        self.expense_breakdown.clear();
        self.discretionary_desired = 0.0;
        self.discretionary_paid = 0.0;
        self.year += 1;
        self.year_index += 1;
    }

    #[must_use]
    pub fn total_assets(&self) -> f64 {
        self.cash + self.investments.iter().map(|i| i.value).sum::<f64>()
    }

    #[must_use]
    pub fn pretax_balance(&self) -> f64 {
        self.investments
            .iter()
            .filter(|i| i.tax_status == AccountTaxStatus::PreTax)
            .map(|i| i.value)
            .sum()
    }

    #[must_use]
    pub fn investment(&self, name: &str) -> Option<&Investment> {
        self.investments.iter().find(|i| i.name == name)
    }

    pub fn investment_mut(&mut self, name: &str) -> Option<&mut Investment> {
        self.investments.iter_mut().find(|i| i.name == name)
    }

    /// Find or create the account synthesized from `source` for `reason`.
    ///
    /// Lookup goes through the origin relation; the display name
    /// (`"<source> (RMD)"`, `"<source> (Roth)"`) is derived for reporting.
    pub fn synthesized_mut(
        &mut self,
        source: &str,
        reason: SynthesisReason,
        investment_type: &str,
    ) -> &mut Investment {
        let position = self.investments.iter().position(|i| {
            matches!(
                &i.origin,
                AccountOrigin::Synthesized { source: s, reason: r }
                    if s == source && *r == reason
            )
        });
        let index = match position {
            Some(i) => i,
            None => {
                let (suffix, tax_status) = match reason {
                    SynthesisReason::Rmd => ("RMD", AccountTaxStatus::NonRetirement),
                    SynthesisReason::RothConversion => ("Roth", AccountTaxStatus::AfterTax),
                };
                self.investments.push(Investment {
                    name: format!("{source} ({suffix})"),
                    value: 0.0,
                    cost_basis: 0.0,
                    tax_status,
                    investment_type: investment_type.to_string(),
                    origin: AccountOrigin::Synthesized {
                        source: source.to_string(),
                        reason,
                    },
                });
                self.investments.len() - 1
            }
        };
        &mut self.investments[index]
    }

    pub fn add_income(&mut self, label: &str, amount: f64) {
        *self.income_breakdown.entry(label.to_string()).or_insert(0.0) += amount;
    }

    pub fn add_expense(&mut self, label: &str, amount: f64) {
        *self
            .expense_breakdown
            .entry(label.to_string())
            .or_insert(0.0) += amount;
    }
}
