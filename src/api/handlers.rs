//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, HourlyQuery, HourlyRecord};
use crate::advisor::{DayPlan, Policy};
use crate::sim::types::HOURS_PER_DAY;

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Returns the whole day plan.
///
/// `GET /plan` → 200 + `DayPlan` JSON
pub async fn get_plan(State(state): State<Arc<AppState>>) -> Json<DayPlan> {
    Json(state.plan.clone())
}

/// Returns hourly records of one policy, optionally filtered by hour range.
///
/// `GET /hourly` → 200 + 24 greedy `HourlyRecord`s
/// `GET /hourly?policy=baseline&from=N&to=M` → inclusive range
/// `GET /hourly?from=10&to=5` or an unknown policy → 400 + `ErrorResponse`
pub async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HourlyQuery>,
) -> Result<Json<Vec<HourlyRecord>>, (StatusCode, Json<ErrorResponse>)> {
    let policy = match query.policy.as_deref() {
        Some(name) => name
            .parse::<Policy>()
            .map_err(|e| bad_request(e.to_string()))?,
        None => Policy::default(),
    };
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(HOURS_PER_DAY - 1);

    if from > to {
        return Err(bad_request(format!(
            "`from` ({from}) must be <= `to` ({to})"
        )));
    }

    let outcome = state.plan.outcome(policy);
    let records: Vec<HourlyRecord> = (from..=to.min(HOURS_PER_DAY - 1))
        .filter_map(|hour| HourlyRecord::from_outcome(outcome, &state.pricing, hour))
        .collect();

    Ok(Json(records))
}
