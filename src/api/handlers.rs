//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ComparisonResponse, ErrorResponse, VehicleRecord, YearRangeQuery};
use crate::runner::RankedVehicle;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

/// Returns the ranking, cheapest per mile first.
///
/// `GET /vehicles` → 200 + `Vec<VehicleRecord>` JSON
pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<VehicleRecord>> {
    Json(state.ranking.iter().map(VehicleRecord::from).collect())
}

/// Returns the full cost profile of one vehicle.
///
/// `GET /vehicles/{name}` → 200 + `RankedVehicle` JSON
/// `GET /vehicles/unknown` → 404 + `ErrorResponse`
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<RankedVehicle>, ApiError> {
    state
        .ranking
        .iter()
        .find(|r| r.name == name)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("vehicle \"{name}\" not found")))
}

/// Returns the configured comparison, optionally filtered by year range.
///
/// `GET /comparison` → 200 + `ComparisonResponse` JSON
/// `GET /comparison?from=N&to=M` → records for years N..=M
/// `GET /comparison?from=10&to=5` → 400 + `ErrorResponse`
/// No comparison configured → 404 + `ErrorResponse`
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearRangeQuery>,
) -> Result<Json<ComparisonResponse>, ApiError> {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(u32::MAX);

    if from > to {
        return Err(error(
            StatusCode::BAD_REQUEST,
            format!("`from` ({from}) must be <= `to` ({to})"),
        ));
    }

    let run = state.comparison.as_ref().ok_or_else(|| {
        error(
            StatusCode::NOT_FOUND,
            "no comparison configured for this catalog".to_string(),
        )
    })?;

    let records = run
        .comparison
        .records
        .iter()
        .filter(|r| r.year >= from && r.year <= to)
        .cloned()
        .collect();

    Ok(Json(ComparisonResponse {
        config: run.config.clone(),
        summary: run.summary.clone(),
        records,
    }))
}
