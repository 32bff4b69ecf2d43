//! Income events
//!
//! For each active income event: roll the carried base amount forward by the
//! event's annual change, inflate if flagged, scale for a widowed household,
//! then add the result to cash and taxable income. Social-Security-flagged
//! income also accumulates separately for the 85%-taxable computation.

use rand::Rng;

use crate::error::TrialError;
use crate::model::{EventKind, LogEntry, LogKind};
use crate::year_state::YearState;

use super::YearContext;

pub fn process_income_events<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &YearContext,
    state: &mut YearState,
    log: &mut Vec<LogEntry>,
) -> Result<(), TrialError> {
    for name in ctx.active_events {
        let Some(event) = ctx.scenario.event(name) else {
            continue;
        };
        let EventKind::Income {
            flow,
            social_security,
        } = &event.kind
        else {
            continue;
        };

        let base = match state.income_event_bases.get(name) {
            Some(prev) => flow.annual_change.apply(rng, *prev)?,
            None => flow.initial_amount,
        };
        state.income_event_bases.insert(name.clone(), base);

        let mut amount = base;
        if flow.inflation_adjusted {
            amount *= ctx.inflation_factor(state.year_index);
        }
        if ctx.widowed() {
            amount *= flow.user_fraction;
        }
        if amount <= 0.0 {
            continue;
        }

        state.cash += amount;
        state.cur_year.income += amount;
        if *social_security {
            state.cur_year.social_security += amount;
        }
        state.add_income(name, amount);
        log.push(LogEntry::new(
            state.year,
            LogKind::Income,
            format!("{name}: received {amount:.2}"),
        ));
    }
    Ok(())
}
