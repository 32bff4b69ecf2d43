//! Rebalance events: re-allocate existing balances across named targets
//!
//! Moves value between the named accounts so their shares match the target
//! percentages; no cash flows in or out. Sells reduce cost basis
//! proportionally and realize gains in non-retirement accounts.

use crate::model::{AccountTaxStatus, LogEntry, LogKind};
use crate::year_state::YearState;

use super::YearContext;

pub fn process_rebalance_events(ctx: &YearContext, state: &mut YearState, log: &mut Vec<LogEntry>) {
    for action in ctx.rebalance_actions {
        // Only targets that resolve to an investment participate; counting an
        // unknown name's weight would sell existing accounts short.
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for (name, weight) in &action.targets {
            match state.investment(name) {
                Some(investment) => {
                    total += investment.value;
                    weight_sum += weight;
                }
                None => log.push(LogEntry::new(
                    state.year,
                    LogKind::Rebalance,
                    format!("{}: unknown rebalance target {name:?}", action.event),
                )),
            }
        }
        if total <= 0.0 || weight_sum <= 0.0 {
            continue;
        }

        let mut moved = 0.0;
        for (name, weight) in &action.targets {
            let desired = total * weight / weight_sum;
            let Some(investment) = state.investment_mut(name) else {
                continue;
            };
            let delta = desired - investment.value;
            if delta < 0.0 {
                // Sell down to the target
                let sold = -delta;
                let old_value = investment.value;
                let basis_fraction = investment.basis_fraction();
                investment.value = desired;
                if old_value > 0.0 {
                    investment.cost_basis *= investment.value / old_value;
                }
                let tax_status = investment.tax_status;
                if tax_status == AccountTaxStatus::NonRetirement {
                    state.cur_year.gains += sold * (1.0 - basis_fraction);
                }
                moved += sold;
            } else if delta > 0.0 {
                investment.value = desired;
                investment.cost_basis += delta;
            }
        }

        if moved > 0.0 {
            log.push(LogEntry::new(
                state.year,
                LogKind::Rebalance,
                format!("{}: moved {moved:.2} between targets", action.event),
            ));
        }
    }
}
