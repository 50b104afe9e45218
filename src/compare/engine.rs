//! Year-by-year opportunity-cost comparison of two vehicles.

use tracing::{debug, info};

use super::types::{Comparison, ComparatorConfig, ComparisonYearRecord};
use crate::cost::VehicleCostProfile;
use crate::error::Result;

/// Cost stream of one vehicle as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CostStream {
    initial_cost: f64,
    recurring_cost: f64,
}

impl From<&VehicleCostProfile> for CostStream {
    fn from(p: &VehicleCostProfile) -> Self {
        Self {
            initial_cost: p.initial_cost,
            recurring_cost: p.recurring_cost,
        }
    }
}

/// Sequential comparison state.
///
/// Initial costs are spread evenly over the loan term in whole years and
/// drop out once the term has elapsed. Each year the cost difference
/// `A - B` is added to a running balance, together with opportunity cost
/// `(rate - 1) × (balance + diff / 2)` charged at mid-year. Separately,
/// each vehicle's nominal yearly cost is compounded forward at `rate` to
/// give the totals.
///
/// Years must be simulated in ascending order, since each one depends on
/// the balance left by the previous one; [`Comparator::step`] advances the
/// internal year counter itself.
pub struct Comparator {
    config: ComparatorConfig,
    a: CostStream,
    b: CostStream,
    year_index: u32,
    running_balance: f64,
    accrued_a: f64,
    accrued_b: f64,
}

impl Comparator {
    /// Creates a comparator for vehicle A against vehicle B.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `config` fails validation.
    pub fn new(
        profile_a: &VehicleCostProfile,
        profile_b: &VehicleCostProfile,
        config: ComparatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            a: profile_a.into(),
            b: profile_b.into(),
            year_index: 0,
            running_balance: 0.0,
            accrued_a: 0.0,
            accrued_b: 0.0,
        })
    }

    /// Whether every configured year has been simulated.
    pub fn is_finished(&self) -> bool {
        self.year_index >= self.config.num_years
    }

    /// Simulates the next year and returns its record.
    ///
    /// Calling `step` past the configured horizon keeps extending the
    /// simulation; [`Comparator::run`] stops at `num_years`.
    pub fn step(&mut self) -> ComparisonYearRecord {
        let i = self.year_index;
        let rate = self.config.opportunity_cost_rate;

        // 1. Amortized initial cost, only while the loan is running
        let share = if u64::from(i) * 12 < u64::from(self.config.loan_term_months) {
            12.0 / f64::from(self.config.loan_term_months)
        } else {
            0.0
        };

        // 2. Year costs
        let cost_a = self.a.initial_cost * share + self.a.recurring_cost;
        let cost_b = self.b.initial_cost * share + self.b.recurring_cost;

        // 3-5. Difference, mid-year opportunity cost, running balance
        let diff = cost_a - cost_b;
        let opportunity_accrual = (rate - 1.0) * (self.running_balance + diff / 2.0);
        let year_total = diff + opportunity_accrual;
        self.running_balance += year_total;

        // Future value of nominal costs
        self.accrued_a = self.accrued_a * rate + cost_a;
        self.accrued_b = self.accrued_b * rate + cost_b;

        self.year_index += 1;

        let record = ComparisonYearRecord {
            year: self.year_index,
            cost_a,
            cost_b,
            diff,
            opportunity_accrual,
            year_total,
            running_balance: self.running_balance,
        };
        debug!(
            year = record.year,
            diff,
            running_balance = record.running_balance,
            "simulated comparison year"
        );
        record
    }

    /// Simulates all remaining years and returns their records.
    pub fn run(&mut self) -> Vec<ComparisonYearRecord> {
        let remaining = self.config.num_years.saturating_sub(self.year_index);
        let mut records = Vec::with_capacity(remaining as usize);
        while !self.is_finished() {
            records.push(self.step());
        }
        records
    }

    /// Compounded totals `(A, B)` over the years simulated so far.
    pub fn totals(&self) -> (f64, f64) {
        (self.accrued_a, self.accrued_b)
    }
}

/// Runs a full comparison of `profile_a` against `profile_b`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `config` fails validation, e.g. a loan term
/// that is not a whole number of years.
pub fn compare(
    profile_a: &VehicleCostProfile,
    profile_b: &VehicleCostProfile,
    config: &ComparatorConfig,
) -> Result<Comparison> {
    let mut comparator = Comparator::new(profile_a, profile_b, config.clone())?;
    let records = comparator.run();
    let (total_a, total_b) = comparator.totals();
    info!(
        years = records.len(),
        total_a, total_b, "comparison finished"
    );
    Ok(Comparison {
        records,
        total_a,
        total_b,
    })
}
