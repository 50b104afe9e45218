//! Vehicle total-cost-of-ownership engine.
//!
//! Evaluates vehicles into comparable cost profiles (per mile, per year,
//! total), ranks catalogs, and compares two vehicles year by year under a
//! compounding opportunity cost.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod compare;
pub mod config;
/// Loan, depreciation, and energy formulas plus the aggregator.
pub mod cost;
pub mod error;
pub mod io {
    //! File output.
    pub mod export;
}
pub mod reporting;
pub mod runner;
/// Road-trip energy and charging planner.
pub mod trip;

pub use error::{CostError, Result};
