//! Headline figures of a finished comparison.

use std::fmt;

use serde::Serialize;

use super::types::Comparison;

/// Totals and averages of a two-vehicle comparison, ready for display.
///
/// Derived post-hoc from a [`Comparison`] so the printed figures always
/// agree with the year records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    /// Name of vehicle A.
    pub name_a: String,
    /// Name of vehicle B.
    pub name_b: String,
    /// Number of simulated years.
    pub num_years: usize,
    /// Compounded total cost of A.
    pub total_a: f64,
    /// Compounded total cost of B.
    pub total_b: f64,
    /// `total_a` per simulated year.
    pub average_a: f64,
    /// `total_b` per simulated year.
    pub average_b: f64,
    /// Running balance after the last year (positive: A cost more).
    pub final_balance: f64,
}

impl ComparisonSummary {
    /// Builds the summary for `comparison` between `name_a` and `name_b`.
    pub fn from_comparison(name_a: &str, name_b: &str, comparison: &Comparison) -> Self {
        Self {
            name_a: name_a.to_string(),
            name_b: name_b.to_string(),
            num_years: comparison.num_years(),
            total_a: comparison.total_a,
            total_b: comparison.total_b,
            average_a: comparison.average_a(),
            average_b: comparison.average_b(),
            final_balance: comparison.final_balance(),
        }
    }

    /// Name of the vehicle that came out cheaper, or `None` on a tie.
    pub fn cheaper(&self) -> Option<&str> {
        if self.final_balance > 0.0 {
            Some(&self.name_b)
        } else if self.final_balance < 0.0 {
            Some(&self.name_a)
        } else {
            None
        }
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.name_a.len().max(self.name_b.len());
        writeln!(f, "Total Cost:")?;
        writeln!(f, "{:w$}:  ${:5.1}k", self.name_a, self.total_a / 1000.0)?;
        writeln!(f, "{:w$}:  ${:5.1}k", self.name_b, self.total_b / 1000.0)?;
        writeln!(f)?;
        writeln!(f, "Avg cost / year:")?;
        writeln!(f, "{:w$}:  ${:5.1}k", self.name_a, self.average_a / 1000.0)?;
        writeln!(f, "{:w$}:  ${:5.1}k", self.name_b, self.average_b / 1000.0)?;
        writeln!(f)?;
        write!(f, "Final balance: {:.2}", self.final_balance)
    }
}
