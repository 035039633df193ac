//! Household load models.

/// Deferrable appliances with a deadline.
pub mod appliance;
/// HVAC thermostat with comfort bounds.
pub mod thermostat;
pub mod types;

pub use appliance::Appliance;
pub use thermostat::Thermostat;
pub use types::Device;
