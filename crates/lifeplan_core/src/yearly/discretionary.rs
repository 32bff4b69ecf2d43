//! Discretionary spending
//!
//! Desired amounts are computed for every active discretionary event (the
//! carried bases must roll forward either way), then payments run in
//! spending-strategy priority order. Each payment is capped at the headroom
//! above the financial goal; a short or fully capped payment stops all
//! further discretionary spending for the year.

use rand::Rng;

use crate::error::TrialError;
use crate::model::{EventKind, LogEntry, LogKind};
use crate::withdrawal::pay;
use crate::year_state::YearState;

use super::YearContext;
use super::expenses::expense_amount;

pub fn pay_discretionary<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &YearContext,
    state: &mut YearState,
    log: &mut Vec<LogEntry>,
) -> Result<(), TrialError> {
    // Desired amounts first, in priority order, before any payment mutates
    // the asset base.
    let mut desired: Vec<(String, f64)> = Vec::new();
    for name in &ctx.scenario.spending_strategy {
        if !ctx.active_events.iter().any(|n| n == name) {
            continue;
        }
        let Some(event) = ctx.scenario.event(name) else {
            continue;
        };
        let EventKind::Expense {
            flow,
            discretionary: true,
        } = &event.kind
        else {
            continue;
        };
        let amount = expense_amount(rng, ctx, state, name, flow)?;
        if amount > 0.0 {
            state.discretionary_desired += amount;
            desired.push((name.clone(), amount));
        }
    }

    let goal = ctx.scenario.settings.financial_goal;
    for (name, amount) in desired {
        let headroom = (state.total_assets() - goal).max(0.0);
        let capped = amount.min(headroom);
        if capped <= 0.0 {
            log.push(LogEntry::new(
                state.year,
                LogKind::Expense,
                format!("{name}: skipped, assets at financial goal"),
            ));
            break;
        }

        let outcome = pay(
            capped,
            state,
            &ctx.scenario.expense_withdrawal_strategy,
            ctx.user_age,
        );
        state.discretionary_paid += outcome.total_paid;
        if outcome.total_paid > 0.0 {
            state.add_expense(&name, outcome.total_paid);
            log.push(LogEntry::new(
                state.year,
                LogKind::Expense,
                format!("{name}: paid {:.2} of desired {amount:.2}", outcome.total_paid),
            ));
        }

        // A short or capped payment means the goal boundary was reached
        if outcome.shortfall > 0.0 || capped < amount {
            log.push(LogEntry::new(
                state.year,
                LogKind::Expense,
                "stopping discretionary spending for the year",
            ));
            break;
        }
    }
    Ok(())
}
