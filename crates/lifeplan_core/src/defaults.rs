//! Fallback policy constants
//!
//! Every silent default the engine is allowed to substitute lives here, so
//! the rulebook can be audited and tested in one place. Modules must not
//! invent their own fallback values.

/// Inflation rate assumed when the configured distribution cannot be sampled.
pub const DEFAULT_INFLATION_RATE: f64 = 0.02;

/// Duration assumed for an event whose duration spec is absent.
pub const DEFAULT_EVENT_DURATION_YEARS: i32 = 1;

/// Age at which required minimum distributions begin (SECURE 2.0).
pub const RMD_START_AGE: i32 = 73;

/// Withdrawals from pre-tax accounts below this age accrue a penalty.
pub const EARLY_WITHDRAWAL_AGE: f64 = 59.5;

/// Flat penalty rate applied to early withdrawals, due the following year.
pub const EARLY_WITHDRAWAL_PENALTY_RATE: f64 = 0.10;

/// Fraction of Social Security benefits excluded from taxable income.
///
/// Retained policy choice: `income - 0.15 * SS` approximates the 85%-taxable
/// rule rather than the full tiered computation.
pub const SOCIAL_SECURITY_EXEMPT_FRACTION: f64 = 0.15;
