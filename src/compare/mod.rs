//! Multi-year opportunity-cost comparison of two vehicles.

pub mod engine;
pub mod summary;
/// Comparator configuration and output records.
pub mod types;

pub use engine::{Comparator, compare};
pub use summary::ComparisonSummary;
pub use types::{Comparison, ComparatorConfig, ComparisonYearRecord};
