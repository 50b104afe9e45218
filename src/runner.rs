//! Catalog-level pipelines: rank every vehicle, compare two of them.

use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::compare::{Comparison, ComparatorConfig, ComparisonSummary, compare};
use crate::cost::{CostMode, VehicleCostProfile, evaluate};
use crate::error::Result;

/// One evaluated catalog entry with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVehicle {
    /// 1-based position, cheapest per mile first.
    pub rank: usize,
    pub name: String,
    pub is_new: bool,
    pub profile: VehicleCostProfile,
}

/// Evaluates every vehicle in `catalog` and ranks them by ascending
/// `cost_per_mile`. Ties keep catalog order.
///
/// # Errors
///
/// Returns the first `InvalidArgument` raised by an evaluation.
pub fn evaluate_catalog(catalog: &Catalog, mode: &CostMode) -> Result<Vec<RankedVehicle>> {
    let mut ranked = catalog
        .iter()
        .map(|entry| {
            Ok(RankedVehicle {
                rank: 0,
                name: entry.name.clone(),
                is_new: entry.is_new,
                profile: evaluate(&entry.input, mode)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.profile.cost_per_mile.total_cmp(&b.profile.cost_per_mile));
    for (i, r) in ranked.iter_mut().enumerate() {
        r.rank = i + 1;
    }

    info!(
        vehicles = ranked.len(),
        mode = mode.name(),
        cheapest = ranked.first().map(|r| r.name.as_str()),
        "ranked catalog"
    );
    Ok(ranked)
}

/// Evaluates a single named vehicle.
///
/// # Errors
///
/// Returns `NotFound` for an unknown name, or `InvalidArgument` from the
/// evaluation.
pub fn evaluate_named(catalog: &Catalog, name: &str, mode: &CostMode) -> Result<VehicleCostProfile> {
    let entry = catalog.get(name)?;
    evaluate(&entry.input, mode)
}

/// Output of [`run_comparison`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRun {
    pub config: ComparatorConfig,
    pub profile_a: VehicleCostProfile,
    pub profile_b: VehicleCostProfile,
    pub comparison: Comparison,
    pub summary: ComparisonSummary,
}

/// Looks up `name_a` and `name_b`, evaluates both in `mode`, and compares
/// them year by year.
///
/// # Errors
///
/// Returns `NotFound` if either name is missing from the catalog, or
/// `InvalidArgument` from evaluation or comparator validation.
pub fn run_comparison(
    catalog: &Catalog,
    mode: &CostMode,
    name_a: &str,
    name_b: &str,
    config: &ComparatorConfig,
) -> Result<ComparisonRun> {
    let profile_a = evaluate_named(catalog, name_a, mode)?;
    let profile_b = evaluate_named(catalog, name_b, mode)?;
    let comparison = compare(&profile_a, &profile_b, config)?;
    let summary = ComparisonSummary::from_comparison(name_a, name_b, &comparison);
    Ok(ComparisonRun {
        config: config.clone(),
        profile_a,
        profile_b,
        comparison,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::error::CostError;

    fn catalog(cfg: &CatalogConfig) -> Catalog {
        cfg.to_catalog().expect("preset catalog should build")
    }

    #[test]
    fn ranking_is_ascending_and_numbered() {
        let cfg = CatalogConfig::commuter();
        let ranked = evaluate_catalog(&catalog(&cfg), &cfg.settings.mode).expect("should rank");
        assert_eq!(ranked.len(), cfg.vehicles.len());
        for pair in ranked.windows(2) {
            assert!(pair[0].profile.cost_per_mile <= pair[1].profile.cost_per_mile);
        }
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=ranked.len()).collect::<Vec<_>>());
    }

    #[test]
    fn ties_keep_catalog_order() {
        let cfg = CatalogConfig::ev_shootout();
        let mut cat = catalog(&cfg);
        let twin = cat.get("Model 3").map(|e| e.input.clone()).expect("Model 3 exists");
        cat.insert("Model 3 twin", true, twin);
        let ranked = evaluate_catalog(&cat, &cfg.settings.mode).expect("should rank");
        let pos = |n: &str| ranked.iter().position(|r| r.name == n);
        assert_eq!(pos("Model 3").map(|p| p + 1), pos("Model 3 twin"));
    }

    #[test]
    fn comparison_unknown_vehicle_is_not_found() {
        let cfg = CatalogConfig::ev_shootout();
        let err = run_comparison(
            &catalog(&cfg),
            &cfg.settings.mode,
            "Model 3",
            "Cybertruck",
            &ComparatorConfig::default(),
        );
        assert!(matches!(err, Err(CostError::NotFound { ref name }) if name == "Cybertruck"));
    }

    #[test]
    fn comparison_summary_matches_records() {
        let cfg = CatalogConfig::ev_shootout();
        let run = run_comparison(
            &catalog(&cfg),
            &cfg.settings.mode,
            "Model 3",
            "Model 3 SR",
            &ComparatorConfig::default(),
        )
        .expect("comparison should run");
        assert_eq!(run.comparison.records.len(), 15);
        assert_eq!(run.summary.final_balance, run.comparison.final_balance());
        // Model 3 costs more to buy and, at fewer miles per kWh, more to run
        assert!(run.summary.final_balance > 0.0);
    }
}
