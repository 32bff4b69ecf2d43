//! Mandatory payments: prior-year deferred taxes plus this year's
//! non-discretionary expenses
//!
//! Taxes accrued in year N are recomputed with year N's adjusted brackets
//! and paid in year N + 1, together with the early-withdrawal penalty.
//! The combined obligation is paid cash-first, then through the waterfall
//! in the expense-withdrawal strategy order; a shortfall is logged, never
//! papered over.

use rand::Rng;

use crate::defaults::{EARLY_WITHDRAWAL_PENALTY_RATE, SOCIAL_SECURITY_EXEMPT_FRACTION};
use crate::error::TrialError;
use crate::model::{CashFlowSpec, EventKind, LogEntry, LogKind};
use crate::taxes::{calculate_capital_gains_tax, calculate_income_tax, federal_taxable_income};
use crate::withdrawal::pay;
use crate::year_state::YearState;

use super::YearContext;

pub fn pay_mandatory<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &YearContext,
    state: &mut YearState,
    log: &mut Vec<LogEntry>,
) -> Result<(), TrialError> {
    let taxes = deferred_taxes(ctx, state, log);
    if taxes > 0.0 {
        state.add_expense("Taxes", taxes);
    }

    let mut expense_total = 0.0;
    for name in ctx.active_events {
        let Some(event) = ctx.scenario.event(name) else {
            continue;
        };
        let EventKind::Expense {
            flow,
            discretionary: false,
        } = &event.kind
        else {
            continue;
        };
        let amount = expense_amount(rng, ctx, state, name, flow)?;
        if amount <= 0.0 {
            continue;
        }
        expense_total += amount;
        state.add_expense(name, amount);
        log.push(LogEntry::new(
            state.year,
            LogKind::Expense,
            format!("{name}: due {amount:.2}"),
        ));
    }

    let due = taxes + expense_total;
    if due > 0.0 {
        let outcome = pay(
            due,
            state,
            &ctx.scenario.expense_withdrawal_strategy,
            ctx.user_age,
        );
        if outcome.shortfall > 0.0 {
            log.push(LogEntry::new(
                state.year,
                LogKind::Expense,
                format!(
                    "mandatory payments short by {:.2} of {due:.2}",
                    outcome.shortfall
                ),
            ));
        }
    }
    Ok(())
}

/// Taxes on last year's accruals, using last year's adjusted tables.
fn deferred_taxes(ctx: &YearContext, state: &mut YearState, log: &mut Vec<LogEntry>) -> f64 {
    let Some(prev) = ctx.prev_adjusted else {
        return 0.0;
    };
    let totals = state.prev_year;

    let taxable = federal_taxable_income(
        totals.income,
        totals.social_security,
        prev.standard_deduction,
    );
    let federal = calculate_income_tax(taxable, &prev.federal_brackets);
    // State tax on the same SS-reduced base, no standard deduction
    let state_taxable =
        (totals.income - SOCIAL_SECURITY_EXEMPT_FRACTION * totals.social_security).max(0.0);
    let state_tax = calculate_income_tax(state_taxable, &prev.state_brackets);
    let gains_tax = calculate_capital_gains_tax(totals.gains, taxable, &prev.capital_gains_brackets);
    let penalty = EARLY_WITHDRAWAL_PENALTY_RATE * totals.early_withdrawal;

    let total = federal + state_tax + gains_tax + penalty;
    if total > 0.0 {
        log.push(LogEntry::new(
            state.year,
            LogKind::Tax,
            format!(
                "prior-year taxes: federal {federal:.2}, state {state_tax:.2}, \
                 capital gains {gains_tax:.2}, early-withdrawal penalty {penalty:.2}"
            ),
        ));
    }
    total
}

/// Shared base-amount logic for expense events: roll the carried base by the
/// annual change, inflate if flagged, scale for a widowed household.
pub(super) fn expense_amount<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &YearContext,
    state: &mut YearState,
    name: &str,
    flow: &CashFlowSpec,
) -> Result<f64, TrialError> {
    let base = match state.expense_event_bases.get(name) {
        Some(prev) => flow.annual_change.apply(rng, *prev)?,
        None => flow.initial_amount,
    };
    state.expense_event_bases.insert(name.to_string(), base);

    let mut amount = base;
    if flow.inflation_adjusted {
        amount *= ctx.inflation_factor(state.year_index);
    }
    if ctx.widowed() {
        amount *= flow.user_fraction;
    }
    Ok(amount.max(0.0))
}
