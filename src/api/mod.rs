//! REST API for catalog rankings and comparisons.
//!
//! Provides three GET endpoints:
//! - `/vehicles` ranks every vehicle in the catalog
//! - `/vehicles/{name}` returns one vehicle's full cost profile
//! - `/comparison` returns the configured comparison with optional year filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::runner::{ComparisonRun, RankedVehicle};

/// Immutable application state shared across all request handlers.
///
/// Built once after the catalog has been evaluated and wrapped in `Arc`;
/// all data is read-only so no locks are needed.
pub struct AppState {
    /// Evaluated vehicles in rank order.
    pub ranking: Vec<RankedVehicle>,
    /// The catalog's comparison, if one was configured.
    pub comparison: Option<ComparisonRun>,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/vehicles", get(handlers::list_vehicles))
        .route("/vehicles/{name}", get(handlers::get_vehicle))
        .route("/comparison", get(handlers::get_comparison))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
