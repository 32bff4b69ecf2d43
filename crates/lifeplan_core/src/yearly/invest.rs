//! Invest events: sweep excess cash into the year's allocation
//!
//! Cash above the event's ceiling is distributed across the (possibly
//! glide-interpolated) targets. Pre-tax categories are excluded from direct
//! contribution; each after-tax target is capped at the inflation-adjusted
//! annual contribution limit, and trimmed amounts are redistributed
//! proportionally to the non-retirement targets, or returned to cash when
//! none exist.

use crate::model::{AccountTaxStatus, AllocationTargets, LogEntry, LogKind};
use crate::year_state::YearState;

use super::YearContext;

struct Purchase {
    target: String,
    tax_status: AccountTaxStatus,
    amount: f64,
    weight: f64,
}

pub fn process_invest_events(ctx: &YearContext, state: &mut YearState, log: &mut Vec<LogEntry>) {
    for action in ctx.invest_actions {
        let excess = state.cash - action.max_cash;
        if excess <= 0.0 {
            continue;
        }

        let mut purchases = collect_targets(&action.allocation, state);
        let total_weight: f64 = purchases.iter().map(|p| p.weight).sum();
        if total_weight <= 0.0 {
            continue;
        }
        state.cash -= excess;

        for purchase in &mut purchases {
            purchase.amount = excess * purchase.weight / total_weight;
        }

        // Cap each after-tax target at the inflation-adjusted limit
        let limit = ctx.scenario.settings.after_tax_contribution_limit
            * ctx.inflation_factor(state.year_index);
        let mut trimmed = 0.0;
        for purchase in &mut purchases {
            if purchase.tax_status == AccountTaxStatus::AfterTax && purchase.amount > limit {
                trimmed += purchase.amount - limit;
                purchase.amount = limit;
            }
        }

        if trimmed > 0.0 {
            let non_retirement_weight: f64 = purchases
                .iter()
                .filter(|p| p.tax_status == AccountTaxStatus::NonRetirement)
                .map(|p| p.weight)
                .sum();
            if non_retirement_weight > 0.0 {
                for purchase in &mut purchases {
                    if purchase.tax_status == AccountTaxStatus::NonRetirement {
                        purchase.amount += trimmed * purchase.weight / non_retirement_weight;
                    }
                }
            } else {
                state.cash += trimmed;
            }
        }

        let mut invested = 0.0;
        for purchase in &purchases {
            if purchase.amount <= 0.0 {
                continue;
            }
            match state.investment_mut(&purchase.target) {
                Some(investment) => {
                    investment.value += purchase.amount;
                    investment.cost_basis += purchase.amount;
                    invested += purchase.amount;
                }
                None => {
                    // Unknown target: leave the money as cash
                    state.cash += purchase.amount;
                    log.push(LogEntry::new(
                        state.year,
                        LogKind::Invest,
                        format!("{}: unknown invest target {:?}", action.event, purchase.target),
                    ));
                }
            }
        }

        if invested > 0.0 {
            log.push(LogEntry::new(
                state.year,
                LogKind::Invest,
                format!("{}: invested {invested:.2} of excess cash", action.event),
            ));
        }
    }
}

/// Flatten the allocation into weighted targets, excluding pre-tax
/// categories/accounts from direct contribution.
fn collect_targets(allocation: &AllocationTargets, state: &YearState) -> Vec<Purchase> {
    let mut purchases = Vec::new();
    match allocation {
        AllocationTargets::Nested(categories) => {
            for (category, targets) in categories {
                if *category == AccountTaxStatus::PreTax {
                    continue;
                }
                for (target, weight) in targets {
                    if *weight > 0.0 {
                        purchases.push(Purchase {
                            target: target.clone(),
                            tax_status: *category,
                            amount: 0.0,
                            weight: *weight,
                        });
                    }
                }
            }
        }
        AllocationTargets::Flat(targets) => {
            for (target, weight) in targets {
                if *weight <= 0.0 {
                    continue;
                }
                let Some(investment) = state.investment(target) else {
                    continue;
                };
                if investment.tax_status == AccountTaxStatus::PreTax {
                    continue;
                }
                purchases.push(Purchase {
                    target: target.clone(),
                    tax_status: investment.tax_status,
                    amount: 0.0,
                    weight: *weight,
                });
            }
        }
    }
    purchases
}
