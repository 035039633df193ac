//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::advisor::Policy;
use crate::devices::{Appliance, Thermostat};
use crate::error::{AdvisorError, ConfigError};
use crate::household::{BudgetSettings, Household};
use crate::pricing::{PricingProfile, PricingTable};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the `default` preset except the
/// appliance list, which is empty unless given. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Budget calendar and tariff.
    #[serde(default)]
    pub household: HouseholdConfig,
    /// Thermostat comfort band and draw.
    #[serde(default)]
    pub thermostat: ThermostatConfig,
    /// Appliances in arrival order.
    #[serde(default)]
    pub appliances: Vec<ApplianceConfig>,
    /// Which plan is committed to the month.
    #[serde(default)]
    pub plan: PlanConfig,
}

/// Budget calendar and tariff.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Monthly energy allowance (kWh, > 0).
    pub monthly_budget_kwh: f64,
    /// Tariff name: `"standard"`, `"summer"`, or `"winter"`.
    pub pricing: String,
    /// Day being planned (1-based, <= `month_days`).
    pub current_day: u32,
    /// Days in the billing month (> 0).
    pub month_days: u32,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        let budget = BudgetSettings::default();
        Self {
            monthly_budget_kwh: budget.monthly_budget_kwh,
            pricing: PricingProfile::Standard.to_string(),
            current_day: budget.current_day,
            month_days: budget.month_days,
        }
    }
}

/// Thermostat comfort band and draw.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermostatConfig {
    /// Normal setpoint (°F).
    pub base_setpoint: f64,
    /// Comfort lower bound (°F).
    pub min_temp: f64,
    /// Comfort upper bound (°F).
    pub max_temp: f64,
    /// Constant HVAC draw (kW).
    pub power_kw: f64,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        let t = Thermostat::default();
        Self {
            base_setpoint: t.base_setpoint,
            min_temp: t.min_temp,
            max_temp: t.max_temp,
            power_kw: t.power_kw,
        }
    }
}

/// One appliance entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceConfig {
    pub name: String,
    /// Draw while running (kW).
    pub power_kw: f64,
    /// Contiguous run length (whole hours).
    pub duration_hours: usize,
    /// Hour by which the run must finish (0-23).
    pub deadline_hour: usize,
    /// Whether the greedy plan may move it (default `true`).
    #[serde(default = "default_flexible")]
    pub flexible: bool,
}

fn default_flexible() -> bool {
    true
}

impl ApplianceConfig {
    fn new(name: &str, power_kw: f64, duration_hours: usize, deadline_hour: usize) -> Self {
        Self {
            name: name.to_string(),
            power_kw,
            duration_hours,
            deadline_hour,
            flexible: true,
        }
    }

    fn build(&self) -> Result<Appliance, ConfigError> {
        Ok(
            Appliance::new(
                self.name.as_str(),
                self.power_kw,
                self.duration_hours,
                self.deadline_hour,
            )?
            .with_flexible(self.flexible),
        )
    }
}

/// Which plan is committed to the month.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanConfig {
    pub adopt: Policy,
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "summer", "winter"];

    /// The three-appliance household used by every preset.
    pub fn default_appliances() -> Vec<ApplianceConfig> {
        vec![
            ApplianceConfig::new("Dishwasher", 1.2, 2, 23),
            ApplianceConfig::new("Washer/Dryer", 2.0, 3, 21),
            ApplianceConfig::new("EV Charger", 7.0, 4, 7),
        ]
    }

    /// Default appliances on the given tariff.
    pub fn with_pricing(profile: PricingProfile) -> Self {
        Self {
            household: HouseholdConfig {
                pricing: profile.to_string(),
                ..HouseholdConfig::default()
            },
            appliances: Self::default_appliances(),
            ..Self::default()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::with_pricing(PricingProfile::Standard)),
            "summer" => Ok(Self::with_pricing(PricingProfile::Summer)),
            "winter" => Ok(Self::with_pricing(PricingProfile::Winter)),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, AdvisorError> {
        let content = fs::read_to_string(path).map_err(|source| AdvisorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, AdvisorError> {
        Ok(toml::from_str(s)?)
    }

    fn budget(&self) -> BudgetSettings {
        BudgetSettings {
            monthly_budget_kwh: self.household.monthly_budget_kwh,
            current_day: self.household.current_day,
            month_days: self.household.month_days,
        }
    }

    fn thermostat(&self) -> Result<Thermostat, ConfigError> {
        let t = &self.thermostat;
        Thermostat::new(t.base_setpoint, t.min_temp, t.max_temp, t.power_kw)
            .map_err(|e| e.within("thermostat"))
    }

    fn pricing(&self) -> Result<PricingProfile, ConfigError> {
        self.household
            .pricing
            .parse()
            .map_err(|e: ConfigError| e.within("household"))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.budget().validate() {
            errors.push(e.within("household"));
        }
        if let Err(e) = self.pricing() {
            errors.push(e);
        }
        if let Err(e) = self.thermostat() {
            errors.push(e);
        }

        for (i, entry) in self.appliances.iter().enumerate() {
            let prefix = format!("appliances[{i}]");
            if let Err(e) = entry.build() {
                errors.push(e.within(&prefix));
            }
            if self.appliances[..i].iter().any(|a| a.name == entry.name) {
                errors.push(ConfigError::new(
                    format!("{prefix}.name"),
                    format!("duplicate appliance name \"{}\"", entry.name),
                ));
            }
        }

        errors
    }

    /// Builds the household described by this scenario.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` encountered.
    pub fn build_household(&self) -> Result<Household, ConfigError> {
        let pricing = PricingTable::build(self.pricing()?);
        let mut household = Household::new(self.budget(), pricing, self.thermostat()?)
            .map_err(|e| e.within("household"))?;
        for (i, entry) in self.appliances.iter().enumerate() {
            let prefix = format!("appliances[{i}]");
            let appliance = entry.build().map_err(|e| e.within(&prefix))?;
            household
                .add_appliance(appliance)
                .map_err(|e| e.within(&prefix))?;
        }
        Ok(household)
    }
}
