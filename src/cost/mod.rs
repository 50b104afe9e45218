//! Vehicle cost formulas and the ownership-cost aggregator.

/// Total-cost-of-ownership aggregation.
pub mod aggregate;
/// Resale value from age and mileage decay.
pub mod depreciation;
/// Fuel and electricity cost.
pub mod energy;
/// Amortizing loan interest.
pub mod loan;
pub mod types;

pub use aggregate::evaluate;
pub use depreciation::{resale_blended, resale_by_age};
pub use energy::fuel_and_electric_cost;
pub use loan::{loan_interest, monthly_payment};
pub use types::{CostBreakdown, CostMode, VehicleCostProfile, VehicleInput};
