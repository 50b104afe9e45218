//! Integration tests for year-by-year vehicle comparison.

mod common;

use common::assert_close;
use vehicle_tco::CostError;
use vehicle_tco::compare::{ComparatorConfig, ComparisonSummary, compare};
use vehicle_tco::runner::run_comparison;

fn model3_vs_sr() -> vehicle_tco::runner::ComparisonRun {
    let (catalog, mode) = common::preset_catalog("ev_shootout");
    run_comparison(
        &catalog,
        &mode,
        "Model 3",
        "Model 3 SR",
        &ComparatorConfig::default(),
    )
    .unwrap()
}

#[test]
fn default_comparison_covers_fifteen_years() {
    let run = model3_vs_sr();
    assert_eq!(run.comparison.num_years(), 15);
    assert_eq!(run.summary.num_years, 15);
    let years: Vec<u32> = run.comparison.records.iter().map(|r| r.year).collect();
    assert_eq!(years, (1..=15).collect::<Vec<_>>());
}

#[test]
fn acquisition_is_spread_over_loan_term() {
    let run = model3_vs_sr();
    let records = &run.comparison.records;
    let a = &run.profile_a;

    // 72-month loan: six years carry a sixth of the initial cost.
    assert_close(records[0].cost_a, a.initial_cost / 6.0 + a.recurring_cost, 1e-6);
    assert_close(records[5].cost_a, records[0].cost_a, 1e-9);
    assert_close(records[6].cost_a, a.recurring_cost, 1e-9);
    assert_close(records[14].cost_a, a.recurring_cost, 1e-9);
}

#[test]
fn balance_follows_diff_plus_accrual() {
    let run = model3_vs_sr();
    let mut balance = 0.0;
    for r in &run.comparison.records {
        assert_close(r.diff, r.cost_a - r.cost_b, 1e-9);
        assert_close(r.opportunity_accrual, 0.04 * (balance + r.diff / 2.0), 1e-6);
        assert_close(r.year_total, r.diff + r.opportunity_accrual, 1e-9);
        balance += r.year_total;
        assert_close(r.running_balance, balance, 1e-6);
    }
    assert_close(run.summary.final_balance, balance, 1e-6);
}

#[test]
fn pricier_car_ends_with_positive_balance() {
    let run = model3_vs_sr();
    assert!(run.summary.final_balance > 0.0);
    assert!(run.summary.total_a > run.summary.total_b);
    assert_eq!(run.summary.cheaper(), Some("Model 3 SR"));
}

#[test]
fn comparing_a_vehicle_with_itself_is_neutral() {
    let p = common::annualized(&common::long_range_ev());
    let c = compare(&p, &p, &ComparatorConfig::default()).unwrap();
    assert!(c.records.iter().all(|r| r.running_balance == 0.0));
    assert_eq!(c.total_a, c.total_b);
    let summary = ComparisonSummary::from_comparison("x", "x", &c);
    assert_eq!(summary.cheaper(), None);
}

#[test]
fn swapping_vehicles_negates_balance() {
    let a = common::annualized(&common::long_range_ev());
    let b = common::annualized(&common::compact_gas());
    let cfg = ComparatorConfig::default();
    let ab = compare(&a, &b, &cfg).unwrap();
    let ba = compare(&b, &a, &cfg).unwrap();
    for (x, y) in ab.records.iter().zip(&ba.records) {
        assert_close(x.running_balance, -y.running_balance, 1e-6);
    }
    assert_close(ab.total_a, ba.total_b, 1e-6);
}

#[test]
fn lifetime_profiles_compare_on_average_running_cost() {
    let (catalog, mode) = common::preset_catalog("commuter");
    let cfg = ComparatorConfig::new(60, 10, 1.04).unwrap();
    let run = run_comparison(&catalog, &mode, "civic", "prius", &cfg).unwrap();
    assert_eq!(run.comparison.num_years(), 10);
    assert_close(
        run.comparison.records[9].cost_a,
        run.profile_a.recurring_cost,
        1e-9,
    );
}

#[test]
fn partial_year_loan_term_is_rejected() {
    let err = ComparatorConfig::new(66, 15, 1.04).unwrap_err();
    assert!(matches!(err, CostError::InvalidArgument { ref argument, .. } if argument == "loan_term_months"));
}

#[test]
fn unknown_name_fails_before_comparing() {
    let (catalog, mode) = common::preset_catalog("ev_shootout");
    let err = run_comparison(
        &catalog,
        &mode,
        "Model 3",
        "Cybertruck",
        &ComparatorConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, CostError::not_found("Cybertruck"));
}
