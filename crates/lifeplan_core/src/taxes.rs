//! Tax bracket engine
//!
//! Inflation-adjusts bracket tables and computes progressive income tax and
//! stacked capital-gains tax. Taxes computed for year N are paid in year
//! N + 1 using year N's adjusted tables (see `yearly::expenses`).

use crate::defaults::SOCIAL_SECURITY_EXEMPT_FRACTION;
use crate::model::{MaritalStatus, TaxBracket, TaxTables};

/// Bracket tables and deduction for one year and filing status, already
/// scaled by cumulative inflation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedTaxData {
    pub standard_deduction: f64,
    pub federal_brackets: Vec<TaxBracket>,
    pub state_brackets: Vec<TaxBracket>,
    pub capital_gains_brackets: Vec<TaxBracket>,
}

fn scaled_brackets(brackets: &[TaxBracket], factor: f64) -> Vec<TaxBracket> {
    brackets.iter().map(|b| b.scaled(factor)).collect()
}

/// Scale deduction and bracket boundaries for one simulated year.
///
/// Year index 0 uses the published (unscaled) tables; later years scale by
/// the prior year's cumulative inflation factor, so brackets lag spending
/// inflation by one year.
#[must_use]
pub fn adjust_tax_data(
    tables: &TaxTables,
    status: MaritalStatus,
    year_index: usize,
    inflation_factors: &[f64],
) -> AdjustedTaxData {
    let factor = if year_index == 0 {
        1.0
    } else {
        inflation_factors
            .get(year_index - 1)
            .copied()
            .unwrap_or(1.0)
    };
    let filing = tables.for_status(status);
    AdjustedTaxData {
        standard_deduction: filing.standard_deduction * factor,
        federal_brackets: scaled_brackets(&filing.federal_brackets, factor),
        state_brackets: scaled_brackets(&filing.state_brackets, factor),
        capital_gains_brackets: scaled_brackets(&filing.capital_gains_brackets, factor),
    }
}

/// Ordinary taxable income under the retained Social Security policy:
/// `income - 0.15 * SS` stands in for the 85%-taxable-portion rule.
#[must_use]
pub fn federal_taxable_income(gross_income: f64, social_security: f64, deduction: f64) -> f64 {
    (gross_income - SOCIAL_SECURITY_EXEMPT_FRACTION * social_security - deduction).max(0.0)
}

/// Standard marginal/progressive sum over ascending brackets.
#[must_use]
pub fn calculate_income_tax(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    if taxable_income <= 0.0 {
        return 0.0;
    }
    let mut tax = 0.0;
    for bracket in brackets {
        if taxable_income <= bracket.lower {
            break;
        }
        let span = taxable_income.min(bracket.ceiling()) - bracket.lower;
        tax += span * bracket.rate;
    }
    tax
}

/// Capital gains stack on top of ordinary income: the portion of
/// `income + gains` that falls in each capital-gains bracket is taxed at
/// that bracket's rate, never double counting the ordinary-income floor.
#[must_use]
pub fn calculate_capital_gains_tax(
    gains: f64,
    ordinary_taxable_income: f64,
    brackets: &[TaxBracket],
) -> f64 {
    if gains <= 0.0 {
        return 0.0;
    }
    let floor = ordinary_taxable_income.max(0.0);
    let total = floor + gains;
    let mut tax = 0.0;
    for bracket in brackets {
        let lo = bracket.lower.max(floor);
        let hi = total.min(bracket.ceiling());
        if hi > lo {
            tax += (hi - lo) * bracket.rate;
        }
    }
    tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaxBracket;

    fn test_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(0.0, Some(10_000.0), 0.10),
            TaxBracket::new(10_000.0, Some(40_000.0), 0.12),
            TaxBracket::new(40_000.0, Some(90_000.0), 0.22),
            TaxBracket::new(90_000.0, None, 0.24),
        ]
    }

    fn cap_gains_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(0.0, Some(47_000.0), 0.0),
            TaxBracket::new(47_000.0, Some(519_000.0), 0.15),
            TaxBracket::new(519_000.0, None, 0.20),
        ]
    }

    #[test]
    fn test_income_tax_first_bracket() {
        let tax = calculate_income_tax(5_000.0, &test_brackets());
        assert!((tax - 500.0).abs() < 0.01, "Expected 500, got {}", tax);
    }

    #[test]
    fn test_income_tax_multiple_brackets() {
        // $50,000 income:
        // $10,000 at 10% = $1,000
        // $30,000 at 12% = $3,600
        // $10,000 at 22% = $2,200
        let tax = calculate_income_tax(50_000.0, &test_brackets());
        assert!((tax - 6_800.0).abs() < 0.01, "Expected 6800, got {}", tax);
    }

    #[test]
    fn test_income_tax_top_bracket() {
        // $100,000: 1,000 + 3,600 + 11,000 + 2,400 = 18,000
        let tax = calculate_income_tax(100_000.0, &test_brackets());
        assert!((tax - 18_000.0).abs() < 0.01, "Expected 18000, got {}", tax);
    }

    #[test]
    fn test_income_tax_zero_and_negative() {
        assert_eq!(calculate_income_tax(0.0, &test_brackets()), 0.0);
        assert_eq!(calculate_income_tax(-5_000.0, &test_brackets()), 0.0);
    }

    #[test]
    fn test_capital_gains_stack_within_zero_bracket() {
        // 20k income + 20k gains stays under the 47k threshold: no tax
        let tax = calculate_capital_gains_tax(20_000.0, 20_000.0, &cap_gains_brackets());
        assert!(tax.abs() < 0.01, "Expected 0, got {}", tax);
    }

    #[test]
    fn test_capital_gains_stack_straddles_bracket() {
        // 40k income + 20k gains: 7k of the gains sit below 47k (0%),
        // 13k fall in the 15% bracket
        let tax = calculate_capital_gains_tax(20_000.0, 40_000.0, &cap_gains_brackets());
        assert!((tax - 1_950.0).abs() < 0.01, "Expected 1950, got {}", tax);
    }

    #[test]
    fn test_capital_gains_income_floor_not_double_counted() {
        // Income already above the 0% threshold: all gains taxed at 15%
        let tax = calculate_capital_gains_tax(10_000.0, 100_000.0, &cap_gains_brackets());
        assert!((tax - 1_500.0).abs() < 0.01, "Expected 1500, got {}", tax);
    }

    #[test]
    fn test_adjust_year_zero_unscaled() {
        let tables = TaxTables::us_2024();
        let factors = vec![1.02, 1.0404];
        let adjusted = adjust_tax_data(&tables, MaritalStatus::Single, 0, &factors);
        assert_eq!(adjusted.standard_deduction, 14_600.0);
        assert_eq!(adjusted.federal_brackets[1].lower, 11_600.0);
    }

    #[test]
    fn test_adjust_scales_by_prior_year_factor() {
        let tables = TaxTables::us_2024();
        let factors = vec![1.02, 1.0404];
        let adjusted = adjust_tax_data(&tables, MaritalStatus::Single, 1, &factors);
        assert!((adjusted.standard_deduction - 14_600.0 * 1.02).abs() < 0.01);
        assert!((adjusted.federal_brackets[1].lower - 11_600.0 * 1.02).abs() < 0.01);
        // Top bracket stays unbounded
        assert!(adjusted.federal_brackets.last().unwrap().upper.is_none());
    }

    #[test]
    fn test_taxable_income_ss_policy() {
        // income 50k, SS 20k, deduction 14.6k: 50k - 3k - 14.6k
        let taxable = federal_taxable_income(50_000.0, 20_000.0, 14_600.0);
        assert!((taxable - 32_400.0).abs() < 0.01, "got {}", taxable);
        assert_eq!(federal_taxable_income(5_000.0, 0.0, 14_600.0), 0.0);
    }
}
