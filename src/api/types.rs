//! API response and query types.
//!
//! Field names follow the CSV export columns for consistency across
//! output formats.

use serde::{Deserialize, Serialize};

use crate::compare::{ComparatorConfig, ComparisonSummary, ComparisonYearRecord};
use crate::runner::RankedVehicle;

/// One line of the ranking, using ranking CSV field names.
#[derive(Debug, Serialize)]
pub struct VehicleRecord {
    pub rank: usize,
    pub name: String,
    pub is_new: bool,
    pub cost_per_mile: f64,
    pub cost_per_year: f64,
    pub cost_per_month: f64,
    pub years_owned: f64,
    pub resale_value: f64,
    pub ten_year_cost: f64,
    /// `null` for annualized profiles.
    pub cost_at_loan_payoff: Option<f64>,
}

impl From<&RankedVehicle> for VehicleRecord {
    fn from(r: &RankedVehicle) -> Self {
        let p = &r.profile;
        Self {
            rank: r.rank,
            name: r.name.clone(),
            is_new: r.is_new,
            cost_per_mile: p.cost_per_mile,
            cost_per_year: p.cost_per_year,
            cost_per_month: p.cost_per_month(),
            years_owned: p.years_owned,
            resale_value: p.resale_value,
            ten_year_cost: p.ten_year_cost(),
            cost_at_loan_payoff: p.cost_at_loan_payoff,
        }
    }
}

/// Comparison summary plus the (optionally filtered) year records.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub config: ComparatorConfig,
    pub summary: ComparisonSummary,
    pub records: Vec<ComparisonYearRecord>,
}

/// Optional year range for the comparison endpoint.
#[derive(Debug, Deserialize)]
pub struct YearRangeQuery {
    /// First year (inclusive, 1-based).
    pub from: Option<u32>,
    /// Last year (inclusive).
    pub to: Option<u32>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostBreakdown, CostMode, VehicleCostProfile};

    #[test]
    fn vehicle_record_from_ranked_maps_fields() {
        let ranked = RankedVehicle {
            rank: 2,
            name: "prius".to_string(),
            is_new: true,
            profile: VehicleCostProfile {
                mode: CostMode::lifetime(),
                initial_cost: 27_000.0,
                recurring_cost: 2_500.0,
                total_cost: 40_000.0,
                cost_per_mile: 0.40,
                cost_per_year: 4_000.0,
                resale_value: 6_000.0,
                years_owned: 10.0,
                miles_driven: 100_000.0,
                cost_at_loan_payoff: Some(39_500.0),
                breakdown: CostBreakdown {
                    purchase_with_tax: 26_160.0,
                    sales_tax: 2_160.0,
                    interest: 840.0,
                    fuel: 5_650.0,
                    maintenance: 3_200.0,
                    insurance: 10_000.0,
                },
            },
        };
        let record = VehicleRecord::from(&ranked);

        assert_eq!(record.rank, 2);
        assert_eq!(record.name, "prius");
        assert!(record.is_new);
        assert_eq!(record.cost_per_mile, 0.40);
        assert!((record.cost_per_month - 4_000.0 / 12.0).abs() < 1e-9);
        assert_eq!(record.ten_year_cost, 40_000.0);
        assert_eq!(record.cost_at_loan_payoff, Some(39_500.0));
    }
}
