mod distributions;
mod events;
mod investments;
mod results;
mod scenario;
mod tax_tables;

pub use distributions::{AnnualChange, Distribution, ValueKind};
pub use events::{
    AllocationTargets, CashFlowSpec, DurationSpec, Event, EventKind, InvestAction,
    RebalanceAction, StartSpec,
};
pub use investments::{
    AccountOrigin, AccountTaxStatus, IncomeKind, Investment, InvestmentType, SynthesisReason,
};
pub use results::{
    BatchSummary, LogEntry, LogKind, MonteCarloResult, Termination, TrialResult, YearOutcome,
};
pub use scenario::{MaritalStatus, Person, RothOptimizer, Scenario, SimulationSettings};
pub use tax_tables::{FilingTables, RmdTable, RmdTableEntry, TaxBracket, TaxTables};
