//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use vehicle_tco::catalog::Catalog;
use vehicle_tco::config::CatalogConfig;
use vehicle_tco::cost::types::defaults;
use vehicle_tco::cost::{CostMode, VehicleCostProfile, VehicleInput, evaluate};

/// A new gasoline compact: $21,718 before 9% tax, 38 mpg, sold at 100k miles.
pub fn compact_gas() -> VehicleInput {
    VehicleInput {
        purchase_price: 21_718.0,
        tax_multiplier: 1.09,
        annual_miles: 10_000.0,
        insurance_rate: 500.0,
        starting_mileage: 0.0,
        selling_mileage: 100_000.0,
        mpg: 38.0,
        fuel_price: 3.45,
        miles_per_kwh: defaults::MILES_PER_KWH,
        electricity_price: defaults::ELECTRICITY_PRICE,
        electric_fraction: 0.0,
        maintenance_per_year: 400.0,
        depreciation_coef: 0.89,
        apr: defaults::APR,
        loan_term_months: defaults::LOAN_TERM_MONTHS,
        service_life_miles: defaults::SERVICE_LIFE_MILES,
        resale_override: None,
    }
}

/// A long-range EV driven 20k miles a year on $0.16/kWh power.
pub fn long_range_ev() -> VehicleInput {
    VehicleInput {
        purchase_price: 48_000.0,
        tax_multiplier: 1.07,
        annual_miles: 20_000.0,
        insurance_rate: 600.0,
        selling_mileage: 300_000.0,
        mpg: 1.0,
        fuel_price: 4.95,
        miles_per_kwh: 350.0 / 82.0,
        electricity_price: 0.16,
        electric_fraction: 1.0,
        maintenance_per_year: 200.0,
        depreciation_coef: 0.88,
        apr: 0.0275,
        loan_term_months: 72,
        service_life_miles: 300_000.0,
        ..compact_gas()
    }
}

/// Evaluates `input` in lifetime mode with default parameters.
pub fn lifetime(input: &VehicleInput) -> VehicleCostProfile {
    evaluate(input, &CostMode::lifetime()).unwrap()
}

/// Evaluates `input` in annualized mode.
pub fn annualized(input: &VehicleInput) -> VehicleCostProfile {
    evaluate(input, &CostMode::Annualized).unwrap()
}

/// Builds a preset's catalog along with the mode it is evaluated in.
pub fn preset_catalog(name: &str) -> (Catalog, CostMode) {
    let cfg = CatalogConfig::from_preset(name).unwrap();
    assert!(cfg.validate().is_empty(), "preset {name} should validate");
    (cfg.to_catalog().unwrap(), cfg.settings.mode)
}

/// Asserts two floats agree to within `tol`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}
