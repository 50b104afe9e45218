//! Named collection of vehicles to evaluate.

use serde::Serialize;

use crate::cost::VehicleInput;
use crate::error::{CostError, Result};

/// One vehicle in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Whether the vehicle is bought new (flagged with `*` in reports).
    pub is_new: bool,
    /// Cost parameters.
    pub input: VehicleInput,
}

/// Ordered mapping from vehicle name to its parameters.
///
/// Insertion order is preserved so reports list ties in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vehicle, replacing any existing entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, is_new: bool, input: VehicleInput) {
        let name = name.into();
        let entry = CatalogEntry {
            name,
            is_new,
            input,
        };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Looks up a vehicle by exact name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no vehicle is called `name`.
    pub fn get(&self, name: &str) -> Result<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| CostError::not_found(name))
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Vehicle names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::types::defaults;

    fn input(price: f64) -> VehicleInput {
        VehicleInput {
            purchase_price: price,
            tax_multiplier: 1.07,
            annual_miles: 20_000.0,
            insurance_rate: 600.0,
            starting_mileage: 0.0,
            selling_mileage: 100_000.0,
            mpg: 1.0,
            fuel_price: 4.95,
            miles_per_kwh: 350.0 / 82.0,
            electricity_price: 0.16,
            electric_fraction: 1.0,
            maintenance_per_year: 200.0,
            depreciation_coef: 0.89,
            apr: 0.0275,
            loan_term_months: 72,
            service_life_miles: 300_000.0,
            resale_override: None,
        }
    }

    #[test]
    fn get_unknown_name_is_not_found() {
        let mut catalog = Catalog::new();
        catalog.insert("Model 3", true, input(48_000.0));
        let err = catalog.get("Model S");
        assert_eq!(
            err.map(|e| e.name.clone()),
            Err(CostError::NotFound {
                name: "Model S".to_string()
            })
        );
    }

    #[test]
    fn insertion_order_preserved() {
        let mut catalog = Catalog::new();
        catalog.insert("Model 3", true, input(48_000.0));
        catalog.insert("Mach E", true, input(39_000.0));
        catalog.insert("Ioniq 5", true, input(43_000.0));
        assert_eq!(catalog.names(), vec!["Model 3", "Mach E", "Ioniq 5"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn insert_same_name_replaces() {
        let mut catalog = Catalog::new();
        catalog.insert("Model 3", true, input(48_000.0));
        catalog.insert("Model 3", false, input(30_000.0));
        assert_eq!(catalog.len(), 1);
        let entry = catalog.get("Model 3").unwrap();
        assert_eq!(entry.input.purchase_price, 30_000.0);
        assert!(!entry.is_new);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut catalog = Catalog::new();
        catalog.insert("civic", false, VehicleInput {
            mpg: 38.0,
            electric_fraction: defaults::ELECTRIC_FRACTION,
            ..input(21_718.0)
        });
        assert!(catalog.get("civic").is_ok());
        assert!(catalog.get("Civic").is_err());
    }
}
