//! Required minimum distributions
//!
//! No-op before age 73. The RMD equals last year's total pre-tax balance
//! divided by the uniform-lifetime distribution period for the current age
//! (exact-age lookup; a missing age skips the year). Funds move in kind
//! from the pre-tax sources into synthesized `"<source> (RMD)"`
//! non-retirement accounts, and the moved amount becomes taxable income.

use crate::defaults::RMD_START_AGE;
use crate::model::{AccountTaxStatus, LogEntry, LogKind, SynthesisReason};
use crate::year_state::YearState;

use super::YearContext;

pub fn process_rmds(ctx: &YearContext, state: &mut YearState, log: &mut Vec<LogEntry>) {
    if ctx.user_age < RMD_START_AGE {
        return;
    }
    let balance = state.prev_year_pretax_balance;
    if balance <= 0.0 {
        return;
    }
    let Ok(age) = u8::try_from(ctx.user_age) else {
        return;
    };
    let Some(period) = ctx.tax_tables.rmd_table.period_for_age(age) else {
        log.push(LogEntry::new(
            state.year,
            LogKind::Rmd,
            format!("no distribution period for age {age}; skipping"),
        ));
        return;
    };

    let rmd = balance / period;
    let mut remaining = rmd;
    let mut withdrawn = 0.0;

    for source in &ctx.scenario.rmd_strategy {
        if remaining <= 0.0 {
            break;
        }
        let Some((take, type_name)) = take_pretax(state, source, remaining) else {
            continue;
        };
        let destination = state.synthesized_mut(source, SynthesisReason::Rmd, &type_name);
        destination.value += take;
        // Taxed as income this year, so the transfer is all basis
        destination.cost_basis += take;
        remaining -= take;
        withdrawn += take;
    }

    if withdrawn > 0.0 {
        state.cur_year.income += withdrawn;
        log.push(LogEntry::new(
            state.year,
            LogKind::Rmd,
            format!("distributed {withdrawn:.2} of required {rmd:.2} (period {period})"),
        ));
    }
}

/// Remove up to `remaining` from a pre-tax source account, returning the
/// amount taken and the account's investment type.
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
