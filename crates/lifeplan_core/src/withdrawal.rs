//! Ordered withdrawal waterfall
//!
//! Liquidates investment accounts in a caller-supplied priority order to
//! satisfy a cash need. Cost basis shrinks in exact proportion to value;
//! pre-tax withdrawals are taxed as ordinary income next year and, below
//! age 59.5, accrue the deferred 10% early-withdrawal penalty;
//! non-retirement withdrawals realize the gain portion of the proceeds.
//! A shortfall is reported, never silently invented as cash.

use crate::defaults::EARLY_WITHDRAWAL_AGE;
use crate::model::AccountTaxStatus;
use crate::year_state::YearState;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WithdrawalOutcome {
    /// Amount actually raised; may be less than requested.
    pub total_paid: f64,
    /// Unmet remainder of the request.
    pub shortfall: f64,
}

/// Walk `order`, draining each account until the need is met or the list is
/// exhausted. Accounts not in the state (or already empty) are skipped.
pub fn perform_withdrawal(
    amount_needed: f64,
    state: &mut YearState,
    order: &[String],
    user_age: i32,
) -> WithdrawalOutcome {
    let mut remaining = amount_needed.max(0.0);
    for name in order {
        if remaining <= 0.0 {
            break;
        }
        let Some(investment) = state.investment_mut(name) else {
            continue;
        };
        if investment.value <= 0.0 {
            continue;
        }

        let take = remaining.min(investment.value);
        let old_value = investment.value;
        let basis_fraction = investment.basis_fraction();
        investment.value -= take;
        investment.cost_basis *= investment.value / old_value;
        let tax_status = investment.tax_status;

        match tax_status {
            AccountTaxStatus::PreTax => {
                state.cur_year.income += take;
                if f64::from(user_age) < EARLY_WITHDRAWAL_AGE {
                    state.cur_year.early_withdrawal += take;
                }
            }
            AccountTaxStatus::NonRetirement => {
                state.cur_year.gains += take * (1.0 - basis_fraction);
            }
            AccountTaxStatus::AfterTax | AccountTaxStatus::TaxExempt => {}
        }

        remaining -= take;
    }

    WithdrawalOutcome {
        total_paid: amount_needed.max(0.0) - remaining,
        shortfall: remaining,
    }
}

/// Pay an obligation: spend cash first, then run the waterfall for the rest.
pub fn pay(
    amount_due: f64,
    state: &mut YearState,
    order: &[String],
    user_age: i32,
) -> WithdrawalOutcome {
    let due = amount_due.max(0.0);
    let from_cash = due.min(state.cash.max(0.0));
    state.cash -= from_cash;
    let remainder = due - from_cash;
    if remainder <= 0.0 {
        return WithdrawalOutcome {
            total_paid: from_cash,
            shortfall: 0.0,
        };
    }
    let waterfall = perform_withdrawal(remainder, state, order, user_age);
    WithdrawalOutcome {
        total_paid: from_cash + waterfall.total_paid,
        shortfall: waterfall.shortfall,
    }
}
