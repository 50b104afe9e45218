//! Propulsion cost blending gasoline and electricity.

use crate::error::{Result, ensure_fraction, ensure_non_negative, ensure_positive};

/// Cost of driving `distance` miles with a gas/electric usage split.
///
/// The gasoline term is `fuel_price × distance / mpg × (1 − f)` and is
/// skipped entirely for pure-electric use (`f == 1`), where `mpg` is only a
/// placeholder. The electric term `distance / miles_per_kwh × elec_price × f`
/// is always evaluated and vanishes at `f == 0`.
///
/// # Arguments
///
/// * `mpg` - Fuel economy in miles per gallon
/// * `distance` - Miles driven
/// * `fuel_price` - Price per gallon
/// * `miles_per_kwh` - Electric efficiency
/// * `elec_price` - Price per kWh
/// * `elec_fraction` - Share of distance driven on electricity, `[0, 1]`
///
/// # Errors
///
/// Returns `InvalidArgument` if `elec_fraction` is outside `[0, 1]`, if
/// `mpg` or `miles_per_kwh` is not strictly positive, or if `distance` or a
/// price is negative.
pub fn fuel_and_electric_cost(
    mpg: f64,
    distance: f64,
    fuel_price: f64,
    miles_per_kwh: f64,
    elec_price: f64,
    elec_fraction: f64,
) -> Result<f64> {
    ensure_positive("mpg", mpg)?;
    ensure_positive("miles_per_kwh", miles_per_kwh)?;
    ensure_non_negative("distance", distance)?;
    ensure_non_negative("fuel_price", fuel_price)?;
    ensure_non_negative("electricity_price", elec_price)?;
    ensure_fraction("electric_fraction", elec_fraction)?;

    let gas_cost = if elec_fraction < 1.0 {
        let gallons = distance / mpg;
        fuel_price * gallons * (1.0 - elec_fraction)
    } else {
        0.0
    };
    let electric_cost = distance / miles_per_kwh * elec_price * elec_fraction;

    Ok(gas_cost + electric_cost)
}
