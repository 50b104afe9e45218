//! Comparator configuration and per-year output records.

use std::fmt;

use serde::Serialize;

use crate::error::{CostError, Result};

/// Parameters of a two-vehicle comparison.
///
/// # Examples
///
/// ```
/// use vehicle_tco::compare::ComparatorConfig;
///
/// let cfg = ComparatorConfig::new(72, 15, 1.04).unwrap();
/// assert_eq!(cfg.loan_term_years(), 6);
/// assert!(ComparatorConfig::new(50, 15, 1.04).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparatorConfig {
    /// Financing term over which initial costs are spread (whole years).
    pub loan_term_months: u32,
    /// Number of years to simulate.
    pub num_years: u32,
    /// Yearly compounding factor for forgone returns (1.04 = 4%).
    pub opportunity_cost_rate: f64,
}

impl ComparatorConfig {
    /// Default financing term.
    pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 72;
    /// Default simulated horizon.
    pub const DEFAULT_NUM_YEARS: u32 = 15;
    /// Default opportunity-cost factor.
    pub const DEFAULT_OPPORTUNITY_COST_RATE: f64 = 1.04;

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// See [`ComparatorConfig::validate`].
    pub fn new(loan_term_months: u32, num_years: u32, opportunity_cost_rate: f64) -> Result<Self> {
        let cfg = Self {
            loan_term_months,
            num_years,
            opportunity_cost_rate,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks that the loan term is a positive whole number of years, the
    /// horizon is non-empty, and the rate is a finite positive factor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.loan_term_months == 0 || self.loan_term_months % 12 != 0 {
            return Err(CostError::invalid(
                "loan_term_months",
                format!(
                    "must be a positive multiple of 12, got {}",
                    self.loan_term_months
                ),
            ));
        }
        if self.num_years == 0 {
            return Err(CostError::invalid("num_years", "must be > 0"));
        }
        if !(self.opportunity_cost_rate.is_finite() && self.opportunity_cost_rate > 0.0) {
            return Err(CostError::invalid(
                "opportunity_cost_rate",
                format!("must be a finite factor > 0, got {}", self.opportunity_cost_rate),
            ));
        }
        Ok(())
    }

    /// Loan term in whole years.
    pub fn loan_term_years(&self) -> u32 {
        self.loan_term_months / 12
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            loan_term_months: Self::DEFAULT_LOAN_TERM_MONTHS,
            num_years: Self::DEFAULT_NUM_YEARS,
            opportunity_cost_rate: Self::DEFAULT_OPPORTUNITY_COST_RATE,
        }
    }
}

/// One simulated year of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonYearRecord {
    /// Year number, starting at 1.
    pub year: u32,
    /// Vehicle A's cost this year (amortized initial + recurring).
    pub cost_a: f64,
    /// Vehicle B's cost this year.
    pub cost_b: f64,
    /// `cost_a - cost_b`.
    pub diff: f64,
    /// Opportunity cost charged on the prior balance plus half this year's diff.
    pub opportunity_accrual: f64,
    /// `diff + opportunity_accrual`.
    pub year_total: f64,
    /// Cumulative position of A relative to B after this year. Positive
    /// means A has cost more.
    pub running_balance: f64,
}

impl fmt::Display for ComparisonYearRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4}:  {:5.1} {:6.1}  {:6.1} {:5.1}  {:7.1} {:6.1}",
            self.year,
            self.cost_a / 1000.0,
            self.cost_b / 1000.0,
            self.diff / 1000.0,
            self.opportunity_accrual / 1000.0,
            self.year_total / 1000.0,
            self.running_balance / 1000.0,
        )
    }
}

/// Complete output of a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// One record per simulated year, in order.
    pub records: Vec<ComparisonYearRecord>,
    /// Future value of A's yearly costs compounded at the opportunity rate.
    pub total_a: f64,
    /// Future value of B's yearly costs compounded at the opportunity rate.
    pub total_b: f64,
}

impl Comparison {
    /// Number of simulated years.
    pub fn num_years(&self) -> usize {
        self.records.len()
    }

    /// `total_a` spread over the simulated years.
    pub fn average_a(&self) -> f64 {
        self.per_year(self.total_a)
    }

    /// `total_b` spread over the simulated years.
    pub fn average_b(&self) -> f64 {
        self.per_year(self.total_b)
    }

    /// Running balance after the last year (zero for an empty run).
    pub fn final_balance(&self) -> f64 {
        self.records.last().map_or(0.0, |r| r.running_balance)
    }

    fn per_year(&self, total: f64) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            total / self.records.len() as f64
        }
    }
}
