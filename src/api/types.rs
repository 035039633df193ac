//! API response and query types.
//!
//! Field names follow the CSV export columns.

use serde::{Deserialize, Serialize};

use crate::advisor::PolicyOutcome;
use crate::pricing::PricingTable;

/// One hour of one policy's simulated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub hour: usize,
    pub price: f64,
    /// Thermostat setpoint in force (°F).
    pub setpoint: f64,
    /// Energy used (kWh).
    pub usage_kwh: f64,
    pub cost: f64,
    /// Appliances starting this hour.
    pub starts: Vec<String>,
}

impl HourlyRecord {
    /// Builds the record for `hour`, or `None` past the simulated day.
    pub fn from_outcome(outcome: &PolicyOutcome, pricing: &PricingTable, hour: usize) -> Option<Self> {
        let m = &outcome.metrics;
        Some(Self {
            hour,
            price: pricing.price_at(hour),
            setpoint: *m.hourly_setpoints.get(hour)?,
            usage_kwh: *m.hourly_usage.get(hour)?,
            cost: *m.hourly_costs.get(hour)?,
            starts: outcome.schedule.starting_at(hour).to_vec(),
        })
    }
}

/// Query parameters for the hourly endpoint.
#[derive(Debug, Deserialize)]
pub struct HourlyQuery {
    /// `"baseline"` or `"greedy"` (default greedy).
    pub policy: Option<String>,
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
