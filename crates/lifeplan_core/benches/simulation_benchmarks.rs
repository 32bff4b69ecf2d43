//! Criterion benchmarks for lifeplan_core simulation
//!
//! Run with: cargo bench -p lifeplan_core

use std::collections::BTreeMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lifeplan_core::model::{
    AccountOrigin, AccountTaxStatus, AllocationTargets, AnnualChange, CashFlowSpec, Distribution,
    Event, EventKind, IncomeKind, Investment, InvestmentType, MaritalStatus, Person,
    RothOptimizer, Scenario, SimulationSettings, TaxTables, ValueKind,
};
use lifeplan_core::simulation::{monte_carlo_run, run_trial};

fn flow(initial_amount: f64) -> CashFlowSpec {
    CashFlowSpec {
        initial_amount,
        annual_change: AnnualChange {
            distribution: Distribution::Fixed { value: 0.0 },
            kind: ValueKind::Amount,
        },
        inflation_adjusted: true,
        user_fraction: 1.0,
    }
}

fn create_retirement_scenario() -> Scenario {
    Scenario {
        name: "bench".to_string(),
        marital_status: MaritalStatus::Single,
        user: Person {
            birth_year: 1975,
            life_expectancy: Distribution::Normal {
                mean: 88.0,
                std_dev: 4.0,
            },
        },
        spouse: None,
        investment_types: vec![
            InvestmentType {
                name: "Stocks".to_string(),
                expected_return: Distribution::Normal {
                    mean: 0.07,
                    std_dev: 0.15,
                },
                return_kind: ValueKind::Percent,
                expected_income: Distribution::Fixed { value: 0.015 },
                income_kind: ValueKind::Percent,
                expense_ratio: 0.0005,
                income_type: IncomeKind::Dividend,
            },
            InvestmentType {
                name: "Bonds".to_string(),
                expected_return: Distribution::Normal {
                    mean: 0.03,
                    std_dev: 0.05,
                },
                return_kind: ValueKind::Percent,
                expected_income: Distribution::Fixed { value: 0.03 },
                income_kind: ValueKind::Percent,
                expense_ratio: 0.0003,
                income_type: IncomeKind::Interest,
            },
        ],
        investments: vec![
            Investment {
                name: "401k".to_string(),
                value: 600_000.0,
                cost_basis: 0.0,
                tax_status: AccountTaxStatus::PreTax,
                investment_type: "Stocks".to_string(),
                origin: AccountOrigin::Scenario,
            },
            Investment {
                name: "Brokerage".to_string(),
                value: 250_000.0,
                cost_basis: 180_000.0,
                tax_status: AccountTaxStatus::NonRetirement,
                investment_type: "Stocks".to_string(),
                origin: AccountOrigin::Scenario,
            },
            Investment {
                name: "Muni Bonds".to_string(),
                value: 100_000.0,
                cost_basis: 100_000.0,
                tax_status: AccountTaxStatus::NonRetirement,
                investment_type: "Bonds".to_string(),
                origin: AccountOrigin::Scenario,
            },
        ],
        events: vec![
            Event::fixed_window(
                "Salary",
                2025,
                10,
                EventKind::Income {
                    flow: flow(120_000.0),
                    social_security: false,
                },
            ),
            Event::fixed_window(
                "Social Security",
                2042,
                30,
                EventKind::Income {
                    flow: flow(36_000.0),
                    social_security: true,
                },
            ),
            Event::fixed_window(
                "Living Expenses",
                2025,
                50,
                EventKind::Expense {
                    flow: flow(70_000.0),
                    discretionary: false,
                },
            ),
            Event::fixed_window(
                "Travel",
                2035,
                20,
                EventKind::Expense {
                    flow: flow(15_000.0),
                    discretionary: true,
                },
            ),
            Event::fixed_window(
                "Sweep",
                2025,
                50,
                EventKind::Invest {
                    max_cash: 30_000.0,
                    initial_allocation: AllocationTargets::Flat(BTreeMap::from([
                        ("Brokerage".to_string(), 0.8),
                        ("Muni Bonds".to_string(), 0.2),
                    ])),
                    final_allocation: Some(AllocationTargets::Flat(BTreeMap::from([
                        ("Brokerage".to_string(), 0.4),
                        ("Muni Bonds".to_string(), 0.6),
                    ]))),
                    glide_path: true,
                },
            ),
        ],
        spending_strategy: vec!["Travel".to_string()],
        expense_withdrawal_strategy: vec![
            "Brokerage".to_string(),
            "Muni Bonds".to_string(),
            "401k".to_string(),
        ],
        rmd_strategy: vec!["401k".to_string()],
        roth_conversion_strategy: vec!["401k".to_string()],
        roth_optimizer: RothOptimizer {
            enabled: true,
            start_year: 2036,
            end_year: 2047,
        },
        settings: SimulationSettings {
            start_year: 2025,
            inflation: Distribution::Normal {
                mean: 0.025,
                std_dev: 0.01,
            },
            financial_goal: 200_000.0,
            initial_cash: 40_000.0,
            after_tax_contribution_limit: 7_000.0,
            seed: None,
        },
    }
}

fn bench_single_trial(c: &mut Criterion) {
    let scenario = create_retirement_scenario();
    let tables = TaxTables::us_2024();

    c.bench_function("single_trial_full_retirement", |b| {
        b.iter(|| run_trial(black_box(&scenario), black_box(&tables), black_box(42)))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    let scenario = create_retirement_scenario();
    let tables = TaxTables::us_2024();

    for trials in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("trials", trials), trials, |b, &trials| {
            b.iter(|| {
                monte_carlo_run(
                    black_box(&scenario),
                    black_box(&tables),
                    black_box(trials),
                    black_box(42),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_trial, bench_monte_carlo);
criterion_main!(benches);
