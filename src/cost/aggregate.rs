//! Total-cost-of-ownership aggregation.

use tracing::{debug, warn};

use super::depreciation::resale_blended;
use super::energy::fuel_and_electric_cost;
use super::loan::loan_interest;
use super::types::{CostBreakdown, CostMode, VehicleCostProfile, VehicleInput};
use crate::error::Result;

/// Evaluates one vehicle into a cost profile.
///
/// Both modes share the acquisition side: `initial_cost` is the taxed
/// price plus the interest of financing that whole amount at `apr / 12`
/// over `loan_term_months`.
///
/// * [`CostMode::Annualized`] adds one year of running costs
///   (`annual_miles` of fuel, `maintenance_per_year`, two insurance
///   premiums) and does not net out resale.
/// * [`CostMode::Lifetime`] covers the miles between `starting_mileage`
///   and `selling_mileage`, estimates maintenance as the mean of a
///   time-based and a mileage-based figure, and subtracts the resale
///   value.
///
/// The result is not ranked; ordering by `cost_per_mile` is left to the
/// caller.
///
/// # Errors
///
/// Returns `InvalidArgument` if the input or mode fails validation, or if
/// a lifetime evaluation covers zero miles.
pub fn evaluate(input: &VehicleInput, mode: &CostMode) -> Result<VehicleCostProfile> {
    input.validate_for(mode)?;
    mode.validate()?;

    let price_with_tax = input.price_with_tax();
    let interest = loan_interest(price_with_tax, input.apr / 12.0, input.loan_term_months)?;
    let initial_cost = price_with_tax + interest;
    let sales_tax = price_with_tax - input.purchase_price;

    let profile = match *mode {
        CostMode::Annualized => {
            let miles = input.annual_miles;
            let fuel = fuel_cost(input, miles)?;
            let maintenance = input.maintenance_per_year;
            let insurance = input.insurance_rate * 2.0;
            let recurring_cost = fuel + maintenance + insurance;
            let total_cost = initial_cost + recurring_cost;

            VehicleCostProfile {
                mode: *mode,
                initial_cost,
                recurring_cost,
                total_cost,
                cost_per_mile: total_cost / miles,
                cost_per_year: total_cost,
                resale_value: 0.0,
                years_owned: 1.0,
                miles_driven: miles,
                cost_at_loan_payoff: None,
                breakdown: CostBreakdown {
                    purchase_with_tax: price_with_tax,
                    sales_tax,
                    interest,
                    fuel,
                    maintenance,
                    insurance,
                },
            }
        }
        CostMode::Lifetime {
            mileage_weight,
            full_maintenance_age,
        } => {
            let miles_driven = input.miles_driven();
            let years_owned = miles_driven / input.annual_miles;

            let resale_value = match input.resale_override {
                Some(resale) if resale > input.purchase_price => {
                    warn!(
                        resale,
                        purchase_price = input.purchase_price,
                        "resale override exceeds purchase price, capping"
                    );
                    input.purchase_price
                }
                Some(resale) => resale,
                None => resale_blended(
                    input.purchase_price,
                    input.depreciation_coef,
                    years_owned,
                    mileage_weight,
                    input.selling_mileage,
                    input.service_life_miles,
                )?,
            };

            let insurance = input.insurance_rate * 2.0 * years_owned;

            let wear_done = (miles_driven / input.service_life_miles).min(1.0);
            let mileage_maintenance = full_maintenance_age * input.maintenance_per_year * wear_done;
            let time_maintenance = input.maintenance_per_year * years_owned;
            let maintenance = (time_maintenance + mileage_maintenance) / 2.0;

            let fuel = fuel_cost(input, miles_driven)?;

            let running = fuel + maintenance + insurance;
            let total_cost = initial_cost + running - resale_value;
            let cost_at_loan_payoff =
                initial_cost + running * input.loan_term_years() / years_owned;

            VehicleCostProfile {
                mode: *mode,
                initial_cost,
                recurring_cost: running / years_owned,
                total_cost,
                cost_per_mile: total_cost / miles_driven,
                cost_per_year: total_cost / years_owned,
                resale_value,
                years_owned,
                miles_driven,
                cost_at_loan_payoff: Some(cost_at_loan_payoff),
                breakdown: CostBreakdown {
                    purchase_with_tax: price_with_tax,
                    sales_tax,
                    interest,
                    fuel,
                    maintenance,
                    insurance,
                },
            }
        }
    };

    debug!(
        mode = mode.name(),
        years_owned = profile.years_owned,
        total_cost = profile.total_cost,
        cost_per_mile = profile.cost_per_mile,
        "evaluated vehicle"
    );
    Ok(profile)
}

fn fuel_cost(input: &VehicleInput, miles: f64) -> Result<f64> {
    fuel_and_electric_cost(
        input.mpg,
        miles,
        input.fuel_price,
        input.miles_per_kwh,
        input.electricity_price,
        input.electric_fraction,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::types::defaults;
    use crate::error::CostError;

    fn civic() -> VehicleInput {
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
            apr: 0.03,
            loan_term_months: 60,
            service_life_miles: 250_000.0,
            resale_override: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn lifetime_matches_hand_computation() {
        let input = civic();
        let p = evaluate(&input, &CostMode::lifetime()).unwrap();

        let price = 21_718.0 * 1.09;
        let interest = loan_interest(price, 0.03 / 12.0, 60).unwrap();
        let years = 10.0;
        let resale = 21_718.0 * (0.89_f64.powf(years) * 0.7 + (1.0 - 100_000.0 / 250_000.0) * 0.3);
        let insurance = 500.0 * 2.0 * years;
        let maintenance = (400.0 * years + 15.0 * 400.0 * 0.4) / 2.0;
        let fuel = 3.45 * 100_000.0 / 38.0;
        let total = price + insurance + fuel + maintenance + interest - resale;

        assert!(close(p.years_owned, years));
        assert!(close(p.resale_value, resale));
        assert!(close(p.breakdown.maintenance, maintenance));
        assert!(close(p.total_cost, total));
        assert!(close(p.cost_per_mile, total / 100_000.0));
        assert!(close(p.cost_per_year, total / years));

        let payoff = price + interest + (fuel + maintenance + insurance) * 5.0 / years;
        assert!(close(p.cost_at_loan_payoff.unwrap(), payoff));
    }

    #[test]
    fn lifetime_invariant_holds() {
        let p = evaluate(&civic(), &CostMode::lifetime()).unwrap();
        let rebuilt = p.initial_cost + p.recurring_cost * p.years_owned - p.resale_value;
        assert!(close(p.total_cost, rebuilt));
    }

    #[test]
    fn annualized_has_no_resale_and_one_year() {
        let p = evaluate(&civic(), &CostMode::Annualized).unwrap();
        assert_eq!(p.resale_value, 0.0);
        assert_eq!(p.years_owned, 1.0);
        assert!(p.cost_at_loan_payoff.is_none());
        let fuel = 3.45 * 10_000.0 / 38.0;
        assert!(close(p.recurring_cost, fuel + 400.0 + 1_000.0));
        assert!(close(p.total_cost, p.initial_cost + p.recurring_cost));
    }

    #[test]
    fn resale_override_replaces_estimate() {
        let input = VehicleInput {
            resale_override: Some(5_000.0),
            ..civic()
        };
        let p = evaluate(&input, &CostMode::lifetime()).unwrap();
        assert_eq!(p.resale_value, 5_000.0);
    }

    #[test]
    fn resale_override_above_price_is_capped() {
        let input = VehicleInput {
            purchase_price: 20_000.0,
            resale_override: Some(1_000_000.0),
            ..civic()
        };
        let p = evaluate(&input, &CostMode::lifetime()).unwrap();
        assert_eq!(p.resale_value, 20_000.0);
        assert!(p.total_cost > 0.0);
        assert!(p.cost_per_mile > 0.0);
    }

    #[test]
    fn zero_ownership_rejected() {
        let input = VehicleInput {
            starting_mileage: 100_000.0,
            selling_mileage: 100_000.0,
            ..civic()
        };
        let err = evaluate(&input, &CostMode::lifetime());
        assert!(matches!(err, Err(CostError::InvalidArgument { .. })));
    }

    #[test]
    fn zero_ownership_allowed_in_annualized_mode() {
        let input = VehicleInput {
            starting_mileage: 100_000.0,
            selling_mileage: 100_000.0,
            ..civic()
        };
        assert!(evaluate(&input, &CostMode::Annualized).is_ok());
    }

    #[test]
    fn zero_apr_means_no_interest() {
        let input = VehicleInput {
            apr: 0.0,
            ..civic()
        };
        let p = evaluate(&input, &CostMode::Annualized).unwrap();
        assert_eq!(p.breakdown.interest, 0.0);
    }

    #[test]
    fn used_vehicle_maintenance_wear_uses_miles_driven() {
        let input = VehicleInput {
            starting_mileage: 94_000.0,
            selling_mileage: 100_000.0,
            maintenance_per_year: 650.0,
            ..civic()
        };
        let p = evaluate(&input, &CostMode::lifetime()).unwrap();
        let years = 0.6;
        let expected = (650.0 * years + 15.0 * 650.0 * (6_000.0 / 250_000.0)) / 2.0;
        assert!(close(p.breakdown.maintenance, expected));
    }
}
