//! Investment accounts and their shared type descriptors

use serde::{Deserialize, Serialize};

use super::distributions::{Distribution, ValueKind};

/// Tax treatment of an investment account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountTaxStatus {
    PreTax,
    AfterTax,
    NonRetirement,
    TaxExempt,
}

/// Tax classification of income generated by an investment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeKind {
    Dividend,
    Interest,
    TaxExemptInterest,
}

/// Shared descriptor for a class of investments (index fund, bonds, cash, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentType {
    pub name: String,
    pub expected_return: Distribution,
    pub return_kind: ValueKind,
    pub expected_income: Distribution,
    pub income_kind: ValueKind,
    pub expense_ratio: f64,
    pub income_type: IncomeKind,
}

/// Why a synthesized account exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisReason {
    Rmd,
    RothConversion,
}

/// Where an account came from.
///
/// Synthesized accounts carry an explicit back-reference to their source
/// investment; lookups use this relation, never display-name parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountOrigin {
    #[default]
    Scenario,
    Synthesized {
        source: String,
        reason: SynthesisReason,
    },
}

/// A single account, owned and mutated in place by the trial's year state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub name: String,
    pub value: f64,
    pub cost_basis: f64,
    pub tax_status: AccountTaxStatus,
    /// Name of the `InvestmentType` describing growth/income behavior.
    pub investment_type: String,
    #[serde(default)]
    pub origin: AccountOrigin,
}

impl Investment {
    /// Fraction of current value that is cost basis. Zero for empty accounts.
    #[must_use]
    pub fn basis_fraction(&self) -> f64 {
        if self.value > 0.0 {
            (self.cost_basis / self.value).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
