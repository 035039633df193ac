//! Household state: appliances, thermostat, tariff, and monthly budget.

use serde::Serialize;
use tracing::info;

use crate::devices::{Appliance, Thermostat};
use crate::error::ConfigError;
use crate::pricing::{PricingProfile, PricingTable};
use crate::sim::kpi::SimulationMetrics;

/// Budget calendar supplied when a household is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSettings {
    /// Energy allowance for the billing month (kWh, > 0).
    pub monthly_budget_kwh: f64,
    /// Day of the billing month being planned (1-based).
    pub current_day: u32,
    /// Length of the billing month in days (> 0).
    pub month_days: u32,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            monthly_budget_kwh: 600.0,
            current_day: 1,
            month_days: 30,
        }
    }
}

impl BudgetSettings {
    /// # Errors
    ///
    /// Returns a `ConfigError` for a non-positive budget or month length, or
    /// a `current_day` outside `[1, month_days]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.monthly_budget_kwh.is_finite() || self.monthly_budget_kwh <= 0.0 {
            return Err(ConfigError::new(
                "monthly_budget_kwh",
                format!("must be finite and > 0, got {}", self.monthly_budget_kwh),
            ));
        }
        if self.month_days == 0 {
            return Err(ConfigError::new("month_days", "must be > 0"));
        }
        if self.current_day == 0 || self.current_day > self.month_days {
            return Err(ConfigError::new(
                "current_day",
                format!(
                    "must be in [1, {}], got {}",
                    self.month_days, self.current_day
                ),
            ));
        }
        Ok(())
    }
}

/// State of one household.
///
/// Appliances keep their insertion order, which is the arrival order used by
/// the baseline policy. Planning and simulation only read a `Household`; the
/// monthly accumulators move only through [`Household::commit_day`].
#[derive(Debug, Clone, Serialize)]
pub struct Household {
    appliances: Vec<Appliance>,
    thermostat: Thermostat,
    pricing: PricingTable,
    monthly_budget_kwh: f64,
    energy_used_month_kwh: f64,
    cost_month: f64,
    current_day: u32,
    month_days: u32,
}

impl Household {
    /// Creates a household with no appliances.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `budget` fails validation.
    pub fn new(
        budget: BudgetSettings,
        pricing: PricingTable,
        thermostat: Thermostat,
    ) -> Result<Self, ConfigError> {
        budget.validate()?;
        Ok(Self {
            appliances: Vec::new(),
            thermostat,
            pricing,
            monthly_budget_kwh: budget.monthly_budget_kwh,
            energy_used_month_kwh: 0.0,
            cost_month: 0.0,
            current_day: budget.current_day,
            month_days: budget.month_days,
        })
    }

    /// Shorthand for a named tariff with a default thermostat.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `budget` fails validation.
    pub fn with_profile(
        budget: BudgetSettings,
        profile: PricingProfile,
    ) -> Result<Self, ConfigError> {
        Self::new(budget, PricingTable::build(profile), Thermostat::default())
    }

    /// Appends an appliance to the arrival queue.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if an appliance with the same name exists.
    pub fn add_appliance(&mut self, appliance: Appliance) -> Result<(), ConfigError> {
        if self.appliance(&appliance.name).is_some() {
            return Err(ConfigError::new(
                "name",
                format!("duplicate appliance name \"{}\"", appliance.name),
            ));
        }
        self.appliances.push(appliance);
        Ok(())
    }

    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    /// Looks up an appliance by exact name.
    pub fn appliance(&self, name: &str) -> Option<&Appliance> {
        self.appliances.iter().find(|a| a.name == name)
    }

    pub fn thermostat(&self) -> &Thermostat {
        &self.thermostat
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn monthly_budget_kwh(&self) -> f64 {
        self.monthly_budget_kwh
    }

    pub fn energy_used_month_kwh(&self) -> f64 {
        self.energy_used_month_kwh
    }

    pub fn cost_month(&self) -> f64 {
        self.cost_month
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn month_days(&self) -> u32 {
        self.month_days
    }

    /// Remaining monthly allowance spread over the remaining days (kWh).
    ///
    /// `max(0, (budget - used) / (month_days - current_day + 1))`, and `0.0`
    /// once no days remain.
    pub fn daily_budget_kwh(&self) -> f64 {
        let days_remaining = i64::from(self.month_days) - i64::from(self.current_day) + 1;
        if days_remaining <= 0 {
            return 0.0;
        }
        let remaining = self.monthly_budget_kwh - self.energy_used_month_kwh;
        (remaining / days_remaining as f64).max(0.0)
    }

    /// Records one simulated day against the month and moves to the next day.
    ///
    /// Call once per calendar day with the metrics of the adopted plan.
    pub fn commit_day(&mut self, metrics: &SimulationMetrics) {
        self.energy_used_month_kwh += metrics.total_kwh;
        self.cost_month += metrics.total_cost;
        self.current_day += 1;
        info!(
            day = self.current_day - 1,
            kwh = metrics.total_kwh,
            cost = metrics.total_cost,
            month_kwh = self.energy_used_month_kwh,
            "committed day to monthly totals"
        );
    }
}
