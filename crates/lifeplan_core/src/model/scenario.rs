//! Scenario definition: household, accounts, events, strategies, settings
//!
//! A scenario arrives fully dereferenced from the persistence layer
//! (investments and events are nested objects, not ids) and is treated as
//! immutable by the whole engine; trials clone what they mutate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::distributions::Distribution;
use super::events::Event;
use super::investments::{Investment, InvestmentType};
use crate::error::ScenarioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
}

/// One member of the household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub birth_year: i32,
    /// Target age at death, sampled once per trial to fix the horizon.
    pub life_expectancy: Distribution,
}

/// Roth conversion optimizer window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RothOptimizer {
    pub enabled: bool,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// First simulated calendar year.
    pub start_year: i32,
    /// Yearly inflation rate distribution.
    pub inflation: Distribution,
    /// Minimum total-asset threshold the household wants to maintain.
    pub financial_goal: f64,
    pub initial_cash: f64,
    /// Annual after-tax contribution limit, in start-year dollars.
    pub after_tax_contribution_limit: f64,
    /// Base seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub marital_status: MaritalStatus,
    pub user: Person,
    #[serde(default)]
    pub spouse: Option<Person>,
    pub investment_types: Vec<InvestmentType>,
    pub investments: Vec<Investment>,
    pub events: Vec<Event>,
    /// Discretionary expense events in payment priority order.
    #[serde(default)]
    pub spending_strategy: Vec<String>,
    /// Account liquidation order for expense and tax payments.
    #[serde(default)]
    pub expense_withdrawal_strategy: Vec<String>,
    /// Pre-tax accounts to draw RMDs from, in order.
    #[serde(default)]
    pub rmd_strategy: Vec<String>,
    /// Pre-tax accounts to convert to Roth, in order.
    #[serde(default)]
    pub roth_conversion_strategy: Vec<String>,
    #[serde(default)]
    pub roth_optimizer: RothOptimizer,
    pub settings: SimulationSettings,
}

impl Scenario {
    /// Structural validation run once before a trial starts.
    ///
    /// Name uniqueness matters because event names key the timing graph and
    /// investment names key the withdrawal strategies.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.marital_status == MaritalStatus::Married && self.spouse.is_none() {
            return Err(ScenarioError::MissingSpouse);
        }

        let mut event_names = BTreeSet::new();
        for event in &self.events {
            if !event_names.insert(event.name.as_str()) {
                return Err(ScenarioError::DuplicateEventName(event.name.clone()));
            }
        }

        let mut investment_names = BTreeSet::new();
        for investment in &self.investments {
            if !investment_names.insert(investment.name.as_str()) {
                return Err(ScenarioError::DuplicateInvestmentName(
                    investment.name.clone(),
                ));
            }
            if self.investment_type(&investment.investment_type).is_none() {
                return Err(ScenarioError::UnknownInvestmentType {
                    investment: investment.name.clone(),
                    type_name: investment.investment_type.clone(),
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn investment_type(&self, name: &str) -> Option<&InvestmentType> {
        self.investment_types.iter().find(|t| t.name == name)
    }

    /// Age the user turns during `year`.
    #[must_use]
    pub fn user_age_in(&self, year: i32) -> i32 {
        year - self.user.birth_year
    }
}
