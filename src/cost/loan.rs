//! Fixed-rate amortizing loan.

use crate::error::{CostError, Result, ensure_non_negative};

fn validate(principal: f64, monthly_rate: f64, months: u32) -> Result<()> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("monthly_rate", monthly_rate)?;
    if months == 0 {
        return Err(CostError::invalid("months", "must be > 0"));
    }
    Ok(())
}

/// Level monthly payment of an amortizing loan.
///
/// `payment = P·r·(1+r)^n / ((1+r)^n − 1)`. A zero rate degenerates to
/// straight repayment, `P / n`.
///
/// `(1+r)^n − 1` is evaluated as `expm1(n·ln1p(r))` so that tiny positive
/// rates stay accurate instead of collapsing the denominator to zero.
///
/// # Errors
///
/// Returns `InvalidArgument` if `principal` or `monthly_rate` is negative or
/// non-finite, or if `months` is zero.
pub fn monthly_payment(principal: f64, monthly_rate: f64, months: u32) -> Result<f64> {
    validate(principal, monthly_rate, months)?;
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return Ok(principal / n);
    }
    let growth_m1 = (n * monthly_rate.ln_1p()).exp_m1();
    if growth_m1 == 0.0 {
        return Ok(principal / n);
    }
    Ok(principal * monthly_rate * (1.0 + growth_m1) / growth_m1)
}

/// Total interest paid over the life of the loan.
///
/// `interest = payment·n − P`, never below zero. An interest-free loan
/// (`monthly_rate == 0`) returns exactly `0.0` rather than going through
/// the annuity formula, whose denominator vanishes at zero rate.
///
/// # Arguments
///
/// * `principal` - Amount financed
/// * `monthly_rate` - Periodic rate, i.e. APR / 12
/// * `months` - Number of monthly payments
///
/// # Errors
///
/// Returns `InvalidArgument` on the same conditions as [`monthly_payment`].
pub fn loan_interest(principal: f64, monthly_rate: f64, months: u32) -> Result<f64> {
    if monthly_rate == 0.0 {
        validate(principal, monthly_rate, months)?;
        return Ok(0.0);
    }
    let payment = monthly_payment(principal, monthly_rate, months)?;
    // Rounding can leave a few ulps below zero at vanishing rates.
    Ok((payment * f64::from(months) - principal).max(0.0))
}
