//! Read-only REST API over one computed day plan.
//!
//! Provides two GET endpoints:
//! - `/plan`: both policies' schedules, metrics, and the savings
//! - `/hourly`: per-hour records of one policy with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::advisor::DayPlan;
use crate::pricing::PricingTable;

pub use types::{ErrorResponse, HourlyQuery, HourlyRecord};

/// Immutable application state shared across all request handlers.
///
/// Built once after planning and wrapped in `Arc`; nothing is mutated while
/// serving, so no locks are needed.
#[derive(Debug)]
pub struct AppState {
    /// Plan computed for the household's current day.
    pub plan: DayPlan,
    /// Tariff the plan was computed against.
    pub pricing: PricingTable,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", get(handlers::get_plan))
        .route("/hourly", get(handlers::get_hourly))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, router(state)).await
}
