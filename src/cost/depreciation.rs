//! Resale value estimation from age and mileage decay.

use crate::error::{CostError, Result, ensure_fraction, ensure_non_negative, ensure_positive};

fn ensure_coefficient(coef: f64) -> Result<()> {
    if coef > 0.0 && coef <= 1.0 {
        Ok(())
    } else {
        Err(CostError::invalid(
            "depreciation_coef",
            format!("must be in (0.0, 1.0], got {coef}"),
        ))
    }
}

/// Resale value after `years` of exponential age decay: `price × coef^years`.
///
/// `years` may be fractional and is taken as given, so callers can pass
/// either usage-derived or calendar age.
///
/// # Errors
///
/// Returns `InvalidArgument` if `coef` is outside `(0, 1]` or `price`/`years`
/// is negative.
pub fn resale_by_age(price: f64, coef: f64, years: f64) -> Result<f64> {
    ensure_non_negative("purchase_price", price)?;
    ensure_coefficient(coef)?;
    ensure_non_negative("years", years)?;
    Ok(price * coef.powf(years))
}

/// Resale value blending age decay with odometer wear.
///
/// * age factor: `coef^years`
/// * mileage factor: `1 − min(1, mileage / service_life_miles)`
/// * blended factor: `age × (1 − w) + mileage × w`
///
/// Both factors lie in `[0, 1]`, so the result lies in `[0, price]`.
///
/// # Arguments
///
/// * `price` - Reference price the factor applies to
/// * `coef` - Annual value-retention ratio in `(0, 1]`
/// * `years` - Age in years
/// * `mileage_weight` - Importance of mileage wear, `w ∈ [0, 1]`
/// * `mileage` - Odometer reading at the time of sale
/// * `service_life_miles` - Mileage at which the vehicle is considered worn out
///
/// # Errors
///
/// Returns `InvalidArgument` for any input outside the ranges above.
pub fn resale_blended(
    price: f64,
    coef: f64,
    years: f64,
    mileage_weight: f64,
    mileage: f64,
    service_life_miles: f64,
) -> Result<f64> {
    ensure_non_negative("purchase_price", price)?;
    ensure_coefficient(coef)?;
    ensure_non_negative("years", years)?;
    ensure_fraction("mileage_weight", mileage_weight)?;
    ensure_non_negative("mileage", mileage)?;
    ensure_positive("service_life_miles", service_life_miles)?;

    let age_factor = coef.powf(years);
    let mileage_factor = 1.0 - (mileage / service_life_miles).min(1.0);
    let factor = age_factor * (1.0 - mileage_weight) + mileage_factor * mileage_weight;
    Ok(price * factor)
}
