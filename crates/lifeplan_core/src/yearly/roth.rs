//! Roth conversion optimizer
//!
//! When enabled and inside its configured window, converts pre-tax funds
//! into synthesized `"<source> (Roth)"` after-tax accounts, filling the
//! unused headroom of the current marginal federal bracket. In the top
//! (unbounded) bracket there is no headroom and nothing converts.

use crate::model::{AccountTaxStatus, LogEntry, LogKind, SynthesisReason};
use crate::taxes::federal_taxable_income;
use crate::year_state::YearState;

use super::YearContext;

pub fn process_roth_conversion(ctx: &YearContext, state: &mut YearState, log: &mut Vec<LogEntry>) {
    let optimizer = &ctx.scenario.roth_optimizer;
    if !optimizer.enabled || state.year < optimizer.start_year || state.year > optimizer.end_year {
        return;
    }

    let taxable = federal_taxable_income(
        state.cur_year.income,
        state.cur_year.social_security,
        ctx.adjusted.standard_deduction,
    );
    let Some(bracket) = ctx
        .adjusted
        .federal_brackets
        .iter()
        .find(|b| taxable >= b.lower && taxable < b.ceiling())
    else {
        return;
    };
    let Some(upper) = bracket.upper else {
        // Top bracket: converting would only buy a higher rate
        return;
    };
    let headroom = upper - taxable;
    if headroom <= 0.0 {
        return;
    }

    let mut remaining = headroom;
    let mut converted = 0.0;

    for source in &ctx.scenario.roth_conversion_strategy {
        if remaining <= 0.0 {
            break;
        }
        let Some((take, type_name)) = take_pretax(state, source, remaining) else {
            continue;
        };
        let destination =
            state.synthesized_mut(source, SynthesisReason::RothConversion, &type_name);
        destination.value += take;
        destination.cost_basis += take;
        remaining -= take;
        converted += take;
    }

    if converted > 0.0 {
        state.cur_year.income += converted;
        log.push(LogEntry::new(
            state.year,
            LogKind::Roth,
            format!("converted {converted:.2} into bracket headroom {headroom:.2}"),
        ));
    }
}

fn take_pretax(state: &mut YearState, source: &str, remaining: f64) -> Option<(f64, String)> {
    let investment = state.investment_mut(source)?;
    if investment.tax_status != AccountTaxStatus::PreTax || investment.value <= 0.0 {
        return None;
    }
    let take = remaining.min(investment.value);
    let old_value = investment.value;
    investment.value -= take;
    investment.cost_basis *= investment.value / old_value;
    Some((take, investment.investment_type.clone()))
}
