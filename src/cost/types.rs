//! Input, mode, and result types for the cost engine.

use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result, ensure_fraction, ensure_non_negative, ensure_positive};

/// Named defaults for optional vehicle parameters.
pub mod defaults {
    /// Sales-tax multiplier applied to the purchase price (1.0 = untaxed).
    pub const TAX_MULTIPLIER: f64 = 1.0;
    /// Loan APR as a fraction.
    pub const APR: f64 = 0.03;
    /// Loan term in months.
    pub const LOAN_TERM_MONTHS: u32 = 60;
    /// Electricity price per kWh.
    pub const ELECTRICITY_PRICE: f64 = 1.0;
    /// Share of miles driven on electricity.
    pub const ELECTRIC_FRACTION: f64 = 0.0;
    /// Placeholder electric efficiency for vehicles that never plug in.
    pub const MILES_PER_KWH: f64 = 0.1;
    /// Annual value retention for catalog entries that do not set one.
    pub const DEPRECIATION_COEF: f64 = 0.88;
    /// Odometer reading at which a vehicle is considered used up.
    pub const SERVICE_LIFE_MILES: f64 = 250_000.0;
    /// Weight of odometer wear in the blended resale estimate.
    pub const MILEAGE_WEIGHT: f64 = 0.3;
    /// Age (years) over which a full service-life of maintenance is spent.
    pub const FULL_MAINTENANCE_AGE: f64 = 15.0;
}

/// Static parameters of one vehicle, as supplied by a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleInput {
    /// Purchase price before tax.
    pub purchase_price: f64,
    /// Multiplier turning the pre-tax price into the paid price (e.g. 1.09).
    pub tax_multiplier: f64,
    /// Miles driven per year.
    pub annual_miles: f64,
    /// Insurance premium per half-year.
    pub insurance_rate: f64,
    /// Odometer reading at purchase.
    pub starting_mileage: f64,
    /// Odometer reading at sale.
    pub selling_mileage: f64,
    /// Fuel economy (miles per gallon). Placeholder for pure-electric vehicles.
    pub mpg: f64,
    /// Price per gallon of fuel.
    pub fuel_price: f64,
    /// Electric efficiency (miles per kWh).
    pub miles_per_kwh: f64,
    /// Price per kWh of electricity.
    pub electricity_price: f64,
    /// Share of miles driven on electricity (0.0–1.0).
    pub electric_fraction: f64,
    /// Baseline maintenance spend per year.
    pub maintenance_per_year: f64,
    /// Annual value-retention ratio, `(0, 1]`.
    pub depreciation_coef: f64,
    /// Loan APR as a fraction (0.0275 = 2.75%).
    pub apr: f64,
    /// Loan term in months.
    pub loan_term_months: u32,
    /// Odometer reading at which the vehicle is considered worn out.
    pub service_life_miles: f64,
    /// Known sale price, replacing the depreciation estimate.
    pub resale_override: Option<f64>,
}

impl VehicleInput {
    /// Checks every field against its valid range.
    ///
    /// # Errors
    ///
    /// Returns the first `InvalidArgument` found, named after the field.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("purchase_price", self.purchase_price)?;
        ensure_positive("tax_multiplier", self.tax_multiplier)?;
        ensure_positive("annual_miles", self.annual_miles)?;
        ensure_non_negative("insurance_rate", self.insurance_rate)?;
        ensure_non_negative("starting_mileage", self.starting_mileage)?;
        ensure_non_negative("selling_mileage", self.selling_mileage)?;
        if self.selling_mileage < self.starting_mileage {
            return Err(CostError::invalid(
                "selling_mileage",
                format!(
                    "must be >= starting_mileage ({}), got {}",
                    self.starting_mileage, self.selling_mileage
                ),
            ));
        }
        ensure_positive("mpg", self.mpg)?;
        ensure_non_negative("fuel_price", self.fuel_price)?;
        ensure_positive("miles_per_kwh", self.miles_per_kwh)?;
        ensure_non_negative("electricity_price", self.electricity_price)?;
        ensure_fraction("electric_fraction", self.electric_fraction)?;
        ensure_non_negative("maintenance_per_year", self.maintenance_per_year)?;
        if !(self.depreciation_coef > 0.0 && self.depreciation_coef <= 1.0) {
            return Err(CostError::invalid(
                "depreciation_coef",
                format!("must be in (0.0, 1.0], got {}", self.depreciation_coef),
            ));
        }
        ensure_non_negative("apr", self.apr)?;
        if self.loan_term_months == 0 {
            return Err(CostError::invalid("loan_term_months", "must be > 0"));
        }
        ensure_positive("service_life_miles", self.service_life_miles)?;
        if let Some(resale) = self.resale_override {
            ensure_non_negative("resale_override", resale)?;
        }
        Ok(())
    }

    /// Checks the input for evaluation in `mode`.
    ///
    /// Lifetime evaluation also needs a non-zero ownership period.
    ///
    /// # Errors
    ///
    /// Returns the first `InvalidArgument` found, named after the field.
    pub fn validate_for(&self, mode: &CostMode) -> Result<()> {
        self.validate()?;
        if matches!(mode, CostMode::Lifetime { .. }) && self.miles_driven() <= 0.0 {
            return Err(CostError::invalid(
                "selling_mileage",
                "must be greater than starting_mileage to own the vehicle for a non-zero period",
            ));
        }
        Ok(())
    }

    /// Purchase price including tax.
    pub fn price_with_tax(&self) -> f64 {
        self.purchase_price * self.tax_multiplier
    }

    /// Miles between purchase and sale.
    pub fn miles_driven(&self) -> f64 {
        self.selling_mileage - self.starting_mileage
    }

    /// Loan term expressed in years.
    pub fn loan_term_years(&self) -> f64 {
        f64::from(self.loan_term_months) / 12.0
    }
}

/// How a vehicle's costs are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostMode {
    /// One representative year: acquisition cost plus one year of running
    /// costs, no resale netting.
    Annualized,
    /// Whole ownership period from purchase to sale, net of resale value.
    Lifetime {
        /// Weight of odometer wear in the resale estimate, `[0, 1]`.
        #[serde(default = "default_mileage_weight")]
        mileage_weight: f64,
        /// Age over which a full service-life of maintenance is spent.
        #[serde(default = "default_full_maintenance_age")]
        full_maintenance_age: f64,
    },
}

fn default_mileage_weight() -> f64 {
    defaults::MILEAGE_WEIGHT
}

fn default_full_maintenance_age() -> f64 {
    defaults::FULL_MAINTENANCE_AGE
}

impl CostMode {
    /// Lifetime mode with the default mileage weight and maintenance age.
    pub fn lifetime() -> Self {
        Self::Lifetime {
            mileage_weight: defaults::MILEAGE_WEIGHT,
            full_maintenance_age: defaults::FULL_MAINTENANCE_AGE,
        }
    }

    /// Checks the mode parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the lifetime parameters are out of range.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Annualized => Ok(()),
            Self::Lifetime {
                mileage_weight,
                full_maintenance_age,
            } => {
                ensure_fraction("mileage_weight", mileage_weight)?;
                ensure_non_negative("full_maintenance_age", full_maintenance_age)
            }
        }
    }

    /// Short lowercase name, as written in catalog files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Annualized => "annualized",
            Self::Lifetime { .. } => "lifetime",
        }
    }
}

impl Default for CostMode {
    fn default() -> Self {
        Self::lifetime()
    }
}

/// Cost components summed over the evaluated horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Purchase price including tax.
    pub purchase_with_tax: f64,
    /// Tax portion of the purchase price.
    pub sales_tax: f64,
    /// Total loan interest.
    pub interest: f64,
    /// Fuel and electricity.
    pub fuel: f64,
    /// Maintenance.
    pub maintenance: f64,
    /// Insurance.
    pub insurance: f64,
}

/// Normalized cost figures for one evaluated vehicle.
///
/// Satisfies `total_cost = initial_cost + recurring_cost × years_owned −
/// resale_value` in both modes; annualized profiles have `years_owned = 1`
/// and no resale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCostProfile {
    /// Mode the profile was computed in.
    pub mode: CostMode,
    /// One-time acquisition cost: taxed price plus loan interest.
    pub initial_cost: f64,
    /// Running cost per year: fuel, maintenance, insurance.
    pub recurring_cost: f64,
    /// Total cost over the horizon, net of resale.
    pub total_cost: f64,
    /// Total cost per mile driven over the horizon.
    pub cost_per_mile: f64,
    /// Total cost per year of the horizon.
    pub cost_per_year: f64,
    /// Estimated (or overridden) sale price. Zero in annualized mode.
    pub resale_value: f64,
    /// Length of the horizon in years.
    pub years_owned: f64,
    /// Miles driven over the horizon.
    pub miles_driven: f64,
    /// Cumulative spend when the loan is paid off. Lifetime mode only.
    pub cost_at_loan_payoff: Option<f64>,
    /// Per-component amounts over the horizon.
    pub breakdown: CostBreakdown,
}

impl VehicleCostProfile {
    /// Average monthly cost over the horizon.
    pub fn cost_per_month(&self) -> f64 {
        self.cost_per_year / 12.0
    }

    /// Ten years at the average yearly cost.
    pub fn ten_year_cost(&self) -> f64 {
        self.cost_per_year * 10.0
    }
}
