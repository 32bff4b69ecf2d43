//! Trial results and the chronological event log
//!
//! One `TrialResult` per Monte-Carlo trial: parallel per-year arrays plus a
//! flat ledger of everything that happened, ordered as it happened. Each
//! trial's output is self-consistent and independently interpretable;
//! cross-trial aggregation is a collaborator's job.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Setting,
    Income,
    Tax,
    Expense,
    Invest,
    Rebalance,
    Rmd,
    Roth,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub year: i32,
    pub kind: LogKind,
    pub details: String,
}

impl LogEntry {
    pub fn new(year: i32, kind: LogKind, details: impl Into<String>) -> Self {
        LogEntry {
            year,
            kind,
            details: details.into(),
        }
    }
}

/// Headline per-year outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearOutcome {
    pub net_worth: f64,
    pub meeting_financial_goal: bool,
}

/// How a trial ended. The three buckets are semantically different outcomes
/// and are surfaced separately in the batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Ran to the sampled horizon.
    Completed,
    /// Total assets fell below the financial goal; later years are absent.
    GoalFailed,
    /// An unrecoverable error halted the loop; partial results returned.
    Error(String),
}

/// Complete results from one trial. All per-year vectors run in parallel and
/// may be shorter than the horizon if the trial stopped early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub years: Vec<i32>,
    pub outcomes: Vec<YearOutcome>,
    pub cash: Vec<f64>,
    /// Per-investment value breakdown, one map per simulated year.
    pub investments: Vec<BTreeMap<String, f64>>,
    pub income_breakdown: Vec<BTreeMap<String, f64>>,
    pub expense_breakdown: Vec<BTreeMap<String, f64>>,
    pub early_withdrawals: Vec<f64>,
    /// Paid / desired across discretionary events; 1.0 when nothing desired.
    pub discretionary_ratio: Vec<f64>,
    pub log: Vec<LogEntry>,
    pub termination: Termination,
}

impl TrialResult {
    #[must_use]
    pub fn empty(termination: Termination, log: Vec<LogEntry>) -> Self {
        TrialResult {
            years: Vec::new(),
            outcomes: Vec::new(),
            cash: Vec::new(),
            investments: Vec::new(),
            income_breakdown: Vec::new(),
            expense_breakdown: Vec::new(),
            early_withdrawals: Vec::new(),
            discretionary_ratio: Vec::new(),
            log,
            termination,
        }
    }

    /// Net worth in the last simulated year, if any year completed.
    #[must_use]
    pub fn final_net_worth(&self) -> Option<f64> {
        self.outcomes.last().map(|o| o.net_worth)
    }

    pub fn entries_of_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().filter(move |e| e.kind == kind)
    }
}

/// Results from a full Monte-Carlo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub trials: Vec<TrialResult>,
}

impl MonteCarloResult {
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_trials(&self.trials)
    }
}

/// Counts of trial terminations across a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub completed: usize,
    pub goal_failed: usize,
    pub errored: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn from_trials(trials: &[TrialResult]) -> Self {
        let mut summary = BatchSummary::default();
        for trial in trials {
            match trial.termination {
                Termination::Completed => summary.completed += 1,
                Termination::GoalFailed => summary.goal_failed += 1,
                Termination::Error(_) => summary.errored += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.goal_failed + self.errored
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} trials: {} completed, {} missed the financial goal, {} halted on errors",
            self.total(),
            self.completed,
            self.goal_failed,
            self.errored
        )
    }
}
