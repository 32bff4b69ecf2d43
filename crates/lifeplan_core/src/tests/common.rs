//! Shared scenario fixtures for the integration tests

use crate::model::{
    AccountTaxStatus, AnnualChange, CashFlowSpec, Distribution, Event, EventKind, IncomeKind,
    Investment, InvestmentType, MaritalStatus, Person, RothOptimizer, Scenario,
    SimulationSettings, ValueKind,
};

pub fn fixed(value: f64) -> Distribution {
    Distribution::Fixed { value }
}

pub fn no_change() -> AnnualChange {
    AnnualChange {
        distribution: fixed(0.0),
        kind: ValueKind::Amount,
    }
}

pub fn flow(initial_amount: f64) -> CashFlowSpec {
    CashFlowSpec {
        initial_amount,
        annual_change: no_change(),
        inflation_adjusted: false,
        user_fraction: 1.0,
    }
}

/// An investment type with no growth, no income, and no fees.
pub fn inert_type(name: &str) -> InvestmentType {
    InvestmentType {
        name: name.to_string(),
        expected_return: fixed(0.0),
        return_kind: ValueKind::Percent,
        expected_income: fixed(0.0),
        income_kind: ValueKind::Percent,
        expense_ratio: 0.0,
        income_type: IncomeKind::Interest,
    }
}

pub fn account(name: &str, value: f64, cost_basis: f64, tax_status: AccountTaxStatus) -> Investment {
    Investment {
        name: name.to_string(),
        value,
        cost_basis,
        tax_status,
        investment_type: "Index Fund".to_string(),
        origin: Default::default(),
    }
}

pub fn income_event(name: &str, amount: f64, start_year: i32, years: i32) -> Event {
    Event::fixed_window(
        name,
        start_year,
        years,
        EventKind::Income {
            flow: flow(amount),
            social_security: false,
        },
    )
}

pub fn expense_event(name: &str, amount: f64, start_year: i32, years: i32) -> Event {
    Event::fixed_window(
        name,
        start_year,
        years,
        EventKind::Expense {
            flow: flow(amount),
            discretionary: false,
        },
    )
}

/// Single 65-year-old with a fixed 25-year horizon and no market noise.
pub fn base_scenario() -> Scenario {
    Scenario {
        name: "test".to_string(),
        marital_status: MaritalStatus::Single,
        user: Person {
            birth_year: 1960,
            life_expectancy: fixed(90.0),
        },
        spouse: None,
        investment_types: vec![inert_type("Index Fund")],
        investments: Vec::new(),
        events: Vec::new(),
        spending_strategy: Vec::new(),
        expense_withdrawal_strategy: Vec::new(),
        rmd_strategy: Vec::new(),
        roth_conversion_strategy: Vec::new(),
        roth_optimizer: RothOptimizer::default(),
        settings: SimulationSettings {
            start_year: 2025,
            inflation: fixed(0.0),
            financial_goal: 0.0,
            initial_cash: 10_000.0,
            after_tax_contribution_limit: 7_000.0,
            seed: None,
        },
    }
}
