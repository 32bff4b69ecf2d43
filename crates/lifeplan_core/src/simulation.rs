//! Year state machine and Monte-Carlo trial driver
//!
//! A trial samples its horizon from life expectancy, builds the per-year
//! derived arrays once (inflation factors, active events, strategy
//! snapshots, marital status), then iterates the yearly pipeline, threading
//! the mutable state forward. Trials are independent; errors never
//! propagate past the trial boundary.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::TrialError;
use crate::glide_path::{glide_fraction, interpolate};
use crate::inflation::project_inflation;
use crate::model::{
    AllocationTargets, EventKind, InvestAction, LogEntry, LogKind, MaritalStatus, MonteCarloResult,
    RebalanceAction, Scenario, TaxTables, Termination, TrialResult, YearOutcome,
};
use crate::taxes::adjust_tax_data;
use crate::timing::TimingResolver;
use crate::year_state::YearState;
use crate::yearly::{
    YearContext, discretionary, expenses, income, invest, rebalance, returns, rmd, roth,
};

/// Per-year derived arrays, computed once per trial before the yearly loop.
struct TrialPlan {
    horizon: usize,
    inflation_factors: Vec<f64>,
    active_events: Vec<Vec<String>>,
    marital_status: Vec<MaritalStatus>,
    invest_actions: Vec<Vec<InvestAction>>,
    rebalance_actions: Vec<Vec<RebalanceAction>>,
}

fn build_trial_plan<R: Rng + ?Sized>(
    rng: &mut R,
    scenario: &Scenario,
    log: &mut Vec<LogEntry>,
) -> Result<TrialPlan, TrialError> {
    let start_year = scenario.settings.start_year;

    let target_age = scenario.user.life_expectancy.sample(rng)?.round() as i32;
    let horizon = (target_age - scenario.user_age_in(start_year)).max(1) as usize;

    let spouse_death_year = match (&scenario.marital_status, &scenario.spouse) {
        (MaritalStatus::Married, Some(spouse)) => {
            let spouse_target = spouse.life_expectancy.sample(rng)?.round() as i32;
            Some(spouse.birth_year + spouse_target)
        }
        _ => None,
    };
    let marital_status = (0..horizon)
        .map(|idx| match spouse_death_year {
            Some(death_year) if start_year + idx as i32 >= death_year => MaritalStatus::Single,
            Some(_) => MaritalStatus::Married,
            None => scenario.marital_status,
        })
        .collect();

    let (inflation_factors, used_fallback) =
        project_inflation(rng, &scenario.settings.inflation, horizon);
    if used_fallback {
        log.push(LogEntry::new(
            start_year,
            LogKind::Setting,
            "inflation sampling failed; substituted flat 2% compounding",
        ));
    }

    let mut resolver = TimingResolver::new(&scenario.events, start_year);
    let mut active_events = vec![Vec::new(); horizon];
    let mut invest_actions = vec![Vec::new(); horizon];
    let mut rebalance_actions = vec![Vec::new(); horizon];

    for event in &scenario.events {
        let window = resolver.resolve(rng, &event.name)?;
        for idx in 0..horizon {
            let year = start_year + idx as i32;
            if !window.contains(year) {
                continue;
            }
            active_events[idx].push(event.name.clone());

            match &event.kind {
                EventKind::Invest {
                    max_cash,
                    initial_allocation,
                    final_allocation,
                    glide_path,
                } => {
                    let allocation = yearly_allocation(
                        initial_allocation,
                        final_allocation.as_ref(),
                        *glide_path,
                        window.years_elapsed(year),
                        window.duration,
                    );
                    invest_actions[idx].push(InvestAction {
                        event: event.name.clone(),
                        max_cash: *max_cash,
                        allocation,
                    });
                }
                EventKind::Rebalance {
                    initial_allocation,
                    final_allocation,
                    glide_path,
                } => {
                    let allocation = yearly_allocation(
                        initial_allocation,
                        final_allocation.as_ref(),
                        *glide_path,
                        window.years_elapsed(year),
                        window.duration,
                    );
                    match allocation {
                        AllocationTargets::Flat(targets) => {
                            rebalance_actions[idx].push(RebalanceAction {
                                event: event.name.clone(),
                                targets,
                            });
                        }
                        // Nested rebalances act per tax-status category
                        AllocationTargets::Nested(categories) => {
                            for (_, targets) in categories {
                                rebalance_actions[idx].push(RebalanceAction {
                                    event: event.name.clone(),
                                    targets,
                                });
                            }
                        }
                    }
                }
                EventKind::Income { .. } | EventKind::Expense { .. } => {}
            }
        }
    }

    log.push(LogEntry::new(
        start_year,
        LogKind::Setting,
        format!("horizon {horizon} years, target age {target_age}"),
    ));

    Ok(TrialPlan {
        horizon,
        inflation_factors,
        active_events,
        marital_status,
        invest_actions,
        rebalance_actions,
    })
}

fn yearly_allocation(
    initial: &AllocationTargets,
    final_: Option<&AllocationTargets>,
    glide_path: bool,
    years_elapsed: i32,
    duration: i32,
) -> AllocationTargets {
    if glide_path {
        interpolate(initial, final_, glide_fraction(years_elapsed, duration))
    } else {
        initial.clone()
    }
}

/// Run the nine-step pipeline for one simulated year.
///
/// Step order is fixed; each step's output state feeds the next. The tax
/// adjustment step happens in the driver (it also serves the following
/// year's deferred-tax computation).
pub fn simulate_year<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &YearContext,
    state: &mut YearState,
    log: &mut Vec<LogEntry>,
) -> Result<(), TrialError> {
    income::process_income_events(rng, ctx, state, log)?;
    rmd::process_rmds(ctx, state, log);
    returns::process_investment_returns(rng, ctx, state, log)?;
    roth::process_roth_conversion(ctx, state, log);
    expenses::pay_mandatory(rng, ctx, state, log)?;
    discretionary::pay_discretionary(rng, ctx, state, log)?;
    invest::process_invest_events(ctx, state, log);
    rebalance::process_rebalance_events(ctx, state, log);

    state.financial_goal_met = state.total_assets() >= ctx.scenario.settings.financial_goal;
    Ok(())
}

/// Run one full trial. Never panics or returns an error: structural
/// failures terminate the trial with `Termination::Error` and whatever
/// partial results exist.
pub fn run_trial(scenario: &Scenario, tax_tables: &TaxTables, seed: u64) -> TrialResult {
    let mut log = Vec::new();
    let mut rng = SmallRng::seed_from_u64(seed);

    if let Err(e) = scenario.validate() {
        log.push(LogEntry::new(
            scenario.settings.start_year,
            LogKind::Error,
            e.to_string(),
        ));
        return TrialResult::empty(Termination::Error(e.to_string()), log);
    }

    let plan = match build_trial_plan(&mut rng, scenario, &mut log) {
        Ok(plan) => plan,
        Err(e) => {
            log.push(LogEntry::new(
                scenario.settings.start_year,
                LogKind::Error,
                e.to_string(),
            ));
            return TrialResult::empty(Termination::Error(e.to_string()), log);
        }
    };

    let mut state = YearState::new(scenario);
    let mut result = TrialResult::empty(Termination::Completed, Vec::new());
    let mut prev_adjusted = None;

    for idx in 0..plan.horizon {
        let year = scenario.settings.start_year + idx as i32;
        let adjusted = adjust_tax_data(
            tax_tables,
            plan.marital_status[idx],
            idx,
            &plan.inflation_factors,
        );
        let ctx = YearContext {
            scenario,
            tax_tables,
            inflation_factors: &plan.inflation_factors,
            active_events: &plan.active_events[idx],
            marital_status: plan.marital_status[idx],
            user_age: scenario.user_age_in(year),
            adjusted: &adjusted,
            prev_adjusted: prev_adjusted.as_ref(),
            invest_actions: &plan.invest_actions[idx],
            rebalance_actions: &plan.rebalance_actions[idx],
        };

        match simulate_year(&mut rng, &ctx, &mut state, &mut log) {
            Ok(()) => {
                record_year(&mut result, &state);
                if !state.financial_goal_met {
                    log.push(LogEntry::new(
                        year,
                        LogKind::Setting,
                        "financial goal missed; stopping trial",
                    ));
                    result.termination = Termination::GoalFailed;
                    break;
                }
            }
            Err(e) => {
                log.push(LogEntry::new(year, LogKind::Error, e.to_string()));
                backfill_year(&mut result, year);
                result.termination = Termination::Error(e.to_string());
                break;
            }
        }

        prev_adjusted = Some(adjusted);
        if idx + 1 < plan.horizon {
            state.advance();
        }
    }

    result.log = log;
    result
}

/// Snapshot the year into the parallel result arrays. Everything recorded
/// is copied out of the state, so later years never alias earlier ones.
fn record_year(result: &mut TrialResult, state: &YearState) {
    result.years.push(state.year);
    result.outcomes.push(YearOutcome {
        net_worth: state.total_assets(),
        meeting_financial_goal: state.financial_goal_met,
    });
    result.cash.push(state.cash);
    result.investments.push(
        state
            .investments
            .iter()
            .map(|i| (i.name.clone(), i.value))
            .collect(),
    );
    result.income_breakdown.push(state.income_breakdown.clone());
    result
        .expense_breakdown
        .push(state.expense_breakdown.clone());
    result
        .early_withdrawals
        .push(state.cur_year.early_withdrawal);
    result.discretionary_ratio.push(if state.discretionary_desired > 0.0 {
        state.discretionary_paid / state.discretionary_desired
    } else {
        1.0
    });
}

/// Back-fill a failed year with the last known-good snapshot.
fn backfill_year(result: &mut TrialResult, year: i32) {
    let Some(&outcome) = result.outcomes.last() else {
        return;
    };
    result.years.push(year);
    result.outcomes.push(outcome);
    result.cash.push(result.cash.last().copied().unwrap_or(0.0));
    result
        .investments
        .push(result.investments.last().cloned().unwrap_or_default());
    result
        .income_breakdown
        .push(result.income_breakdown.last().cloned().unwrap_or_default());
    result
        .expense_breakdown
        .push(result.expense_breakdown.last().cloned().unwrap_or_default());
    result
        .early_withdrawals
        .push(result.early_withdrawals.last().copied().unwrap_or(0.0));
    result
        .discretionary_ratio
        .push(result.discretionary_ratio.last().copied().unwrap_or(1.0));
}

/// Run a batch of independent trials, in parallel when the `parallel`
/// feature is enabled. Trial seeds derive deterministically from
/// `base_seed`, so a whole batch reproduces bit for bit.
pub fn monte_carlo_run(
    scenario: &Scenario,
    tax_tables: &TaxTables,
    num_trials: usize,
    base_seed: u64,
) -> MonteCarloResult {
    const MAX_BATCH_SIZE: usize = 100;
    let num_batches = num_trials.div_ceil(MAX_BATCH_SIZE);

    let run_batch = |i: usize| {
        let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i as u64));

        let batch_size = if i == num_batches.saturating_sub(1) {
            num_trials - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };

        (0..batch_size)
            .map(|_| {
                let seed = rng.next_u64();
                run_trial(scenario, tax_tables, seed)
            })
            .collect::<Vec<_>>()
    };

    #[cfg(feature = "parallel")]
    let trials = (0..num_batches).into_par_iter().flat_map(run_batch).collect();

    #[cfg(not(feature = "parallel"))]
    let trials = (0..num_batches).flat_map(run_batch).collect();

    MonteCarloResult { trials }
}
