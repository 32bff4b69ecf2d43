//! Investment growth, generated income, and expense-ratio drag
//!
//! For every investment: sample capital growth and income from its type's
//! distributions (dollar methods use the sample directly, percentage
//! methods multiply by current value), add growth to value, add income to
//! cash, then deduct the expense ratio on the average of the year's start
//! and end values. Income is taxable unless the account is tax-exempt or
//! the income type is tax-exempt interest.

use rand::Rng;

use crate::error::TrialError;
use crate::model::{AccountTaxStatus, IncomeKind, LogEntry, LogKind, ValueKind};
use crate::year_state::YearState;

use super::YearContext;

pub fn process_investment_returns<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &YearContext,
    state: &mut YearState,
    log: &mut Vec<LogEntry>,
) -> Result<(), TrialError> {
    for index in 0..state.investments.len() {
        let investment_type = {
            let investment = &state.investments[index];
            ctx.scenario
                .investment_type(&investment.investment_type)
                .ok_or_else(|| TrialError::UnknownInvestmentType {
                    investment: investment.name.clone(),
                    type_name: investment.investment_type.clone(),
                })?
                .clone()
        };

        let growth_sample = investment_type.expected_return.sample(rng)?;
        let income_sample = investment_type.expected_income.sample(rng)?;

        let investment = &mut state.investments[index];
        let start_value = investment.value;

        let growth = match investment_type.return_kind {
            ValueKind::Amount => growth_sample,
            ValueKind::Percent => growth_sample * investment.value,
        };
        investment.value += growth;

        let income = match investment_type.income_kind {
            ValueKind::Amount => income_sample,
            ValueKind::Percent => income_sample * investment.value,
        };

        let fee = investment_type.expense_ratio * (start_value + investment.value) / 2.0;
        investment.value = (investment.value - fee).max(0.0);

        let name = investment.name.clone();
        let taxable = investment.tax_status != AccountTaxStatus::TaxExempt
            && investment_type.income_type != IncomeKind::TaxExemptInterest;

        if income != 0.0 {
            state.cash += income;
            if taxable {
                state.cur_year.income += income;
            }
            state.add_income(&name, income);
        }
        if fee > 0.0 {
            state.add_expense(&name, fee);
        }
        if growth != 0.0 || income != 0.0 {
            log.push(LogEntry::new(
                state.year,
                LogKind::Invest,
                format!("{name}: growth {growth:.2}, income {income:.2}, fees {fee:.2}"),
            ));
        }
    }
    Ok(())
}
