//! Household energy advisor: day-ahead appliance scheduling and thermostat
//! planning against time-of-use prices.

pub mod advisor;
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod error;
pub mod household;
pub mod io;
pub mod pricing;
pub mod reporting;
/// Allocation policies, day simulation, and metrics.
pub mod sim;
