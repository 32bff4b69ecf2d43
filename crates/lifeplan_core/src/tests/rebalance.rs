//! Rebalance event tests

use crate::model::{
    AccountTaxStatus, LogKind, MaritalStatus, RebalanceAction, Scenario, TaxTables,
};
use crate::taxes::{AdjustedTaxData, adjust_tax_data};
use crate::year_state::YearState;
use crate::yearly::{YearContext, rebalance};

use super::common::{account, base_scenario};

fn action(targets: &[(&str, f64)]) -> RebalanceAction {
    RebalanceAction {
        event: "Rebalance".to_string(),
        targets: targets
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect(),
    }
}

fn context<'a>(
    scenario: &'a Scenario,
    tables: &'a TaxTables,
    adjusted: &'a AdjustedTaxData,
    factors: &'a [f64],
    actions: &'a [RebalanceAction],
) -> YearContext<'a> {
    YearContext {
        scenario,
        tax_tables: tables,
        inflation_factors: factors,
        active_events: &[],
        marital_status: MaritalStatus::Single,
        user_age: 65,
        adjusted,
        prev_adjusted: None,
        invest_actions: &[],
        rebalance_actions: actions,
    }
}

#[test]
fn rebalance_moves_value_to_target_weights() {
    let mut scenario = base_scenario();
    scenario.investments = vec![
        account("Stocks", 90_000.0, 90_000.0, AccountTaxStatus::AfterTax),
        account("Bonds", 10_000.0, 10_000.0, AccountTaxStatus::AfterTax),
    ];
    let tables = TaxTables::us_2024();
    let factors = vec![1.0; 30];
    let adjusted = adjust_tax_data(&tables, MaritalStatus::Single, 0, &factors);
    let actions = vec![action(&[("Stocks", 0.6), ("Bonds", 0.4)])];
    let ctx = context(&scenario, &tables, &adjusted, &factors, &actions);

    let mut state = YearState::new(&scenario);
    let mut log = Vec::new();
    rebalance::process_rebalance_events(&ctx, &mut state, &mut log);

    assert!((state.investment("Stocks").unwrap().value - 60_000.0).abs() < 0.01);
    assert!((state.investment("Bonds").unwrap().value - 40_000.0).abs() < 0.01);
    // Tax-advantaged accounts realize nothing
    assert!(state.cur_year.gains.abs() < 0.01);
}

#[test]
fn unknown_target_does_not_destroy_value() {
    let mut scenario = base_scenario();
    scenario.investments = vec![
        account("Stocks", 60_000.0, 60_000.0, AccountTaxStatus::AfterTax),
        account("Bonds", 50_000.0, 50_000.0, AccountTaxStatus::AfterTax),
    ];
    let tables = TaxTables::us_2024();
    let factors = vec![1.0; 30];
    let adjusted = adjust_tax_data(&tables, MaritalStatus::Single, 0, &factors);
    let actions = vec![action(&[
        ("Stocks", 0.4),
        ("Bonds", 0.4),
        ("Typo Fund", 0.2),
    ])];
    let ctx = context(&scenario, &tables, &adjusted, &factors, &actions);

    let mut state = YearState::new(&scenario);
    let before = state.total_assets();
    let mut log = Vec::new();
    rebalance::process_rebalance_events(&ctx, &mut state, &mut log);

    let after = state.total_assets();
    assert!(
        (before - after).abs() < 0.01,
        "rebalance must conserve value: before {before}, after {after}"
    );
    // The unknown name is dropped from the split, not silently funded
    assert!((state.investment("Stocks").unwrap().value - 55_000.0).abs() < 0.01);
    assert!((state.investment("Bonds").unwrap().value - 55_000.0).abs() < 0.01);
    assert!(
        log.iter()
            .any(|e| e.kind == LogKind::Rebalance && e.details.contains("Typo Fund"))
    );
}

#[test]
fn non_retirement_sells_realize_proportional_gains() {
    let mut scenario = base_scenario();
    scenario.investments = vec![
        account("Growth", 100_000.0, 40_000.0, AccountTaxStatus::NonRetirement),
        account("Value", 0.0, 0.0, AccountTaxStatus::NonRetirement),
    ];
    let tables = TaxTables::us_2024();
    let factors = vec![1.0; 30];
    let adjusted = adjust_tax_data(&tables, MaritalStatus::Single, 0, &factors);
    let actions = vec![action(&[("Growth", 0.5), ("Value", 0.5)])];
    let ctx = context(&scenario, &tables, &adjusted, &factors, &actions);

    let mut state = YearState::new(&scenario);
    let mut log = Vec::new();
    rebalance::process_rebalance_events(&ctx, &mut state, &mut log);

    // Sold 50000 with basis fraction 0.4: 30000 of realized gains
    assert!(
        (state.cur_year.gains - 30_000.0).abs() < 0.01,
        "Expected 30000, got {}",
        state.cur_year.gains
    );
    assert!((state.investment("Growth").unwrap().value - 50_000.0).abs() < 0.01);
    assert!((state.investment("Value").unwrap().value - 50_000.0).abs() < 0.01);
}
