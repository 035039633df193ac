//! Shared test fixtures for integration tests.

use energy_advisor::devices::{Appliance, Thermostat};
use energy_advisor::household::{BudgetSettings, Household};
use energy_advisor::pricing::{PricingProfile, PricingTable};
use energy_advisor::sim::types::HOURS_PER_DAY;

/// Float tolerance for derived sums.
pub const EPS: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Dishwasher 1.2 kW/2 h/23, Washer/Dryer 2.0 kW/3 h/21, EV Charger 7.0 kW/4 h/7.
pub fn default_appliances() -> Vec<Appliance> {
    vec![
        Appliance::new("Dishwasher", 1.2, 2, 23).unwrap(),
        Appliance::new("Washer/Dryer", 2.0, 3, 21).unwrap(),
        Appliance::new("EV Charger", 7.0, 4, 7).unwrap(),
    ]
}

/// Household on a named tariff with the default thermostat (72°F, 3.5 kW).
pub fn household(profile: PricingProfile, appliances: Vec<Appliance>) -> Household {
    let mut h = Household::with_profile(BudgetSettings::default(), profile).unwrap();
    for a in appliances {
        h.add_appliance(a).unwrap();
    }
    h
}

/// Household on a custom price table with the default thermostat.
pub fn household_with_prices(prices: [f64; HOURS_PER_DAY], appliances: Vec<Appliance>) -> Household {
    let pricing = PricingTable::from_prices(prices).unwrap();
    let mut h = Household::new(BudgetSettings::default(), pricing, Thermostat::default()).unwrap();
    for a in appliances {
        h.add_appliance(a).unwrap();
    }
    h
}
