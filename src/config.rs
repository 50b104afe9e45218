//! TOML-based vehicle catalogs and preset definitions.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::compare::ComparatorConfig;
use crate::cost::types::defaults;
use crate::cost::{CostMode, VehicleInput};
use crate::error::CostError;
use crate::trip::TripConfig;

/// Top-level catalog configuration parsed from TOML.
///
/// Load from TOML with [`CatalogConfig::from_toml_file`] or pick a
/// built-in with [`CatalogConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Aggregation mode and catalog-wide vehicle defaults.
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Optional two-vehicle comparison.
    #[serde(default)]
    pub comparison: Option<ComparisonConfig>,
    /// Road-trip planner parameters.
    #[serde(default)]
    pub trip: TripConfig,
    /// Vehicles, in listing order.
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

/// Aggregation mode plus values shared by every vehicle that does not set
/// its own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsConfig {
    /// How vehicle costs are aggregated.
    pub mode: CostMode,
    /// Miles driven per year.
    pub annual_miles: Option<f64>,
    /// Price per gallon of fuel.
    pub fuel_price: Option<f64>,
    /// Price per kWh of electricity.
    pub electricity_price: Option<f64>,
    /// Sales-tax multiplier.
    pub tax_multiplier: Option<f64>,
    /// Loan APR as a fraction.
    pub apr: Option<f64>,
    /// Loan term in months.
    pub loan_term_months: Option<u32>,
    /// Odometer reading at sale.
    pub selling_mileage: Option<f64>,
    /// Odometer reading at which vehicles are worn out.
    pub service_life_miles: Option<f64>,
}

/// Two-vehicle comparison parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Name of vehicle A.
    pub vehicle_a: String,
    /// Name of vehicle B.
    pub vehicle_b: String,
    /// Term over which initial costs are amortized (multiple of 12).
    #[serde(default = "default_comparison_term")]
    pub loan_term_months: u32,
    /// Number of years to simulate.
    #[serde(default = "default_num_years")]
    pub num_years: u32,
    /// Yearly opportunity-cost factor.
    #[serde(default = "default_opportunity_cost_rate")]
    pub opportunity_cost_rate: f64,
}

fn default_comparison_term() -> u32 {
    ComparatorConfig::DEFAULT_LOAN_TERM_MONTHS
}

fn default_num_years() -> u32 {
    ComparatorConfig::DEFAULT_NUM_YEARS
}

fn default_opportunity_cost_rate() -> f64 {
    ComparatorConfig::DEFAULT_OPPORTUNITY_COST_RATE
}

impl ComparisonConfig {
    /// Comparator parameters, unvalidated.
    pub fn comparator(&self) -> ComparatorConfig {
        ComparatorConfig {
            loan_term_months: self.loan_term_months,
            num_years: self.num_years,
            opportunity_cost_rate: self.opportunity_cost_rate,
        }
    }
}

/// One `[[vehicles]]` entry.
///
/// Fields left as `None` fall back to `[settings]`, then to the named
/// defaults in [`crate::cost::types::defaults`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    pub name: String,
    #[serde(default)]
    pub is_new: bool,
    pub purchase_price: f64,
    pub tax_multiplier: Option<f64>,
    pub annual_miles: Option<f64>,
    pub insurance_rate: f64,
    #[serde(default)]
    pub starting_mileage: f64,
    pub selling_mileage: Option<f64>,
    pub mpg: f64,
    pub fuel_price: Option<f64>,
    pub miles_per_kwh: Option<f64>,
    pub electricity_price: Option<f64>,
    pub electric_fraction: Option<f64>,
    pub maintenance_per_year: f64,
    pub depreciation_coef: Option<f64>,
    pub apr: Option<f64>,
    pub loan_term_months: Option<u32>,
    pub service_life_miles: Option<f64>,
    pub resale_override: Option<f64>,
}

impl VehicleConfig {
    /// Resolves the entry against `settings` into engine input.
    ///
    /// `annual_miles` has no default and must come from the entry or from
    /// `[settings]`. A missing selling odometer reading means the vehicle
    /// is not sold, which only annualized mode accepts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the missing field.
    pub fn resolve(&self, settings: &SettingsConfig) -> Result<VehicleInput, CostError> {
        let annual_miles = self
            .annual_miles
            .or(settings.annual_miles)
            .ok_or_else(|| CostError::invalid("annual_miles", "required here or in [settings]"))?;
        let selling_mileage = match self.selling_mileage.or(settings.selling_mileage) {
            Some(m) => m,
            None if settings.mode == CostMode::Annualized => self.starting_mileage,
            None => {
                return Err(CostError::invalid(
                    "selling_mileage",
                    "required in lifetime mode, here or in [settings]",
                ));
            }
        };

        Ok(VehicleInput {
            purchase_price: self.purchase_price,
            tax_multiplier: self
                .tax_multiplier
                .or(settings.tax_multiplier)
                .unwrap_or(defaults::TAX_MULTIPLIER),
            annual_miles,
            insurance_rate: self.insurance_rate,
            starting_mileage: self.starting_mileage,
            selling_mileage,
            mpg: self.mpg,
            fuel_price: self.fuel_price.or(settings.fuel_price).unwrap_or(0.0),
            miles_per_kwh: self.miles_per_kwh.unwrap_or(defaults::MILES_PER_KWH),
            electricity_price: self
                .electricity_price
                .or(settings.electricity_price)
                .unwrap_or(defaults::ELECTRICITY_PRICE),
            electric_fraction: self
                .electric_fraction
                .unwrap_or(defaults::ELECTRIC_FRACTION),
            maintenance_per_year: self.maintenance_per_year,
            depreciation_coef: self
                .depreciation_coef
                .unwrap_or(defaults::DEPRECIATION_COEF),
            apr: self.apr.or(settings.apr).unwrap_or(defaults::APR),
            loan_term_months: self
                .loan_term_months
                .or(settings.loan_term_months)
                .unwrap_or(defaults::LOAN_TERM_MONTHS),
            service_life_miles: self
                .service_life_miles
                .or(settings.service_life_miles)
                .unwrap_or(defaults::SERVICE_LIFE_MILES),
            resale_override: self.resale_override,
        })
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"vehicles[2].electric_fraction"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn from_cost(prefix: &str, err: CostError) -> Self {
        match err {
            CostError::InvalidArgument { argument, message } => Self {
                field: format!("{prefix}.{argument}"),
                message,
            },
            CostError::NotFound { name } => Self {
                field: prefix.to_string(),
                message: format!("vehicle \"{name}\" not found"),
            },
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Shorthand for a `[[vehicles]]` entry in a preset.
#[expect(clippy::too_many_arguments)]
fn vehicle(
    name: &str,
    is_new: bool,
    purchase_price: f64,
    tax_multiplier: f64,
    insurance_rate: f64,
    mpg: f64,
    maintenance_per_year: f64,
    depreciation_coef: f64,
) -> VehicleConfig {
    VehicleConfig {
        name: name.to_string(),
        is_new,
        purchase_price,
        tax_multiplier: Some(tax_multiplier),
        annual_miles: None,
        insurance_rate,
        starting_mileage: 0.0,
        selling_mileage: None,
        mpg,
        fuel_price: None,
        miles_per_kwh: None,
        electricity_price: None,
        electric_fraction: None,
        maintenance_per_year,
        depreciation_coef: Some(depreciation_coef),
        apr: None,
        loan_term_months: None,
        service_life_miles: None,
        resale_override: None,
    }
}

impl CatalogConfig {
    /// Returns the commuter preset: new and used compact cars, ranked over
    /// their whole ownership period.
    pub fn commuter() -> Self {
        let gas_price = 3.05;
        let premium = gas_price + 0.4;
        Self {
            settings: SettingsConfig {
                mode: CostMode::lifetime(),
                annual_miles: Some(10_000.0),
                fuel_price: Some(gas_price),
                electricity_price: Some(0.10),
                selling_mileage: Some(100_000.0),
                ..SettingsConfig::default()
            },
            comparison: None,
            trip: TripConfig::default(),
            vehicles: vec![
                VehicleConfig {
                    fuel_price: Some(0.10),
                    electric_fraction: Some(1.0),
                    miles_per_kwh: Some(300.0 / 85.0),
                    ..vehicle("tesla", true, 47_000.0, 1.09, 650.0, 1.0, 400.0, 0.89)
                },
                VehicleConfig {
                    fuel_price: Some(premium),
                    ..vehicle("civic", true, 21_718.0, 1.09, 500.0, 38.0, 400.0, 0.89)
                },
                VehicleConfig {
                    fuel_price: Some(premium),
                    selling_mileage: Some(25_000.0),
                    ..vehicle("civic_short_term", true, 21_718.0, 1.09, 500.0, 38.0, 300.0, 0.95)
                },
                VehicleConfig {
                    fuel_price: Some(premium),
                    starting_mileage: 25_000.0,
                    ..vehicle("civic_value", false, 20_500.0, 1.0, 500.0, 38.0, 450.0, 0.89)
                },
                vehicle("prius", true, 24_000.0, 1.09, 500.0, 54.0, 400.0, 0.876),
                VehicleConfig {
                    electric_fraction: Some(0.3),
                    miles_per_kwh: Some(47.0 / 16.0),
                    ..vehicle("clarity", true, 19_500.0, 1.13, 550.0, 42.0, 500.0, 0.88)
                },
            ],
        }
    }

    /// Returns the EV shootout preset: electric cars on one representative
    /// year, with a 15-year comparison of two long-range sedans.
    pub fn ev_shootout() -> Self {
        let ev = |name: &str, price: f64, insurance: f64, miles_per_kwh: f64| VehicleConfig {
            electric_fraction: Some(1.0),
            miles_per_kwh: Some(miles_per_kwh),
            ..vehicle(name, true, price, 1.07, insurance, 1.0, 200.0, 0.88)
        };
        Self {
            settings: SettingsConfig {
                mode: CostMode::Annualized,
                annual_miles: Some(20_000.0),
                fuel_price: Some(4.95),
                electricity_price: Some(0.16),
                tax_multiplier: Some(1.07),
                apr: Some(0.0275),
                loan_term_months: Some(72),
                service_life_miles: Some(300_000.0),
                ..SettingsConfig::default()
            },
            comparison: Some(ComparisonConfig {
                vehicle_a: "Model 3".to_string(),
                vehicle_b: "Model 3 SR".to_string(),
                loan_term_months: 72,
                num_years: 300_000 / 20_000,
                opportunity_cost_rate: 1.04,
            }),
            trip: TripConfig::default(),
            vehicles: vec![
                ev("Mach E", 39_000.0, 600.0, 300.0 / 91.0),
                ev("Model 3", 48_000.0, 600.0, 350.0 / 82.0),
                ev("Model 3 SR", 43_000.0, 600.0, 272.0 / 50.0),
                ev("Model Y", 56_000.0, 600.0, 330.0 / 82.0),
                ev("Model S", 94_000.0, 650.0, 405.0 / 100.0),
                vehicle("Prius", true, 32_000.0, 1.07, 550.0, 52.0, 400.0, 0.88),
                ev("Ioniq 5", 43_000.0, 550.0, 310.0 / 77.0),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["commuter", "ev_shootout"];

    /// Loads a catalog from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "commuter" => Ok(Self::commuter()),
            "ev_shootout" => Ok(Self::ev_shootout()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "catalog".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let cfg = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            vehicles = cfg.vehicles.len(),
            "loaded catalog"
        );
        Ok(cfg)
    }

    /// Parses a catalog from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.settings.mode.validate() {
            errors.push(ConfigError::from_cost("settings.mode", e));
        }

        if self.vehicles.is_empty() {
            errors.push(ConfigError {
                field: "vehicles".into(),
                message: "must list at least one vehicle".into(),
            });
        }

        let mut seen = HashSet::new();
        for (i, v) in self.vehicles.iter().enumerate() {
            let prefix = format!("vehicles[{i}]");
            if v.name.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("{prefix}.name"),
                    message: "must not be empty".into(),
                });
            } else if !seen.insert(v.name.as_str()) {
                errors.push(ConfigError {
                    field: format!("{prefix}.name"),
                    message: format!("duplicate vehicle name \"{}\"", v.name),
                });
            }
            let checked = v
                .resolve(&self.settings)
                .and_then(|input| input.validate_for(&self.settings.mode));
            if let Err(e) = checked {
                errors.push(ConfigError::from_cost(&prefix, e));
            }
        }

        if let Some(cmp) = &self.comparison {
            for (field, name) in [("vehicle_a", &cmp.vehicle_a), ("vehicle_b", &cmp.vehicle_b)] {
                if !self.vehicles.iter().any(|v| &v.name == name) {
                    errors.push(ConfigError {
                        field: format!("comparison.{field}"),
                        message: format!("vehicle \"{name}\" is not in the catalog"),
                    });
                }
            }
            if let Err(e) = cmp.comparator().validate() {
                errors.push(ConfigError::from_cost("comparison", e));
            }
        }

        if let Err(e) = self.trip.road.validate() {
            errors.push(ConfigError::from_cost("trip.road", e));
        }
        if let Err(e) = self.trip.daily.validate() {
            errors.push(ConfigError::from_cost("trip.daily", e));
        }

        errors
    }

    /// Builds the engine catalog from the `[[vehicles]]` entries.
    ///
    /// # Errors
    ///
    /// Returns the first entry that cannot be resolved or fails validation.
    pub fn to_catalog(&self) -> Result<Catalog, ConfigError> {
        let mut catalog = Catalog::new();
        for (i, v) in self.vehicles.iter().enumerate() {
            let input = v
                .resolve(&self.settings)
                .and_then(|input| input.validate_for(&self.settings.mode).map(|()| input))
                .map_err(|e| ConfigError::from_cost(&format!("vehicles[{i}]"), e))?;
            catalog.insert(v.name.clone(), v.is_new, input);
        }
        Ok(catalog)
    }
}
