use serde::Serialize;

use crate::devices::types::Device;
use crate::error::ConfigError;

/// Household HVAC thermostat.
///
/// Temperature follows the commanded setpoint instantly (no thermal lag), and
/// the HVAC draws a constant `power_kw` every hour regardless of setpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thermostat {
    /// Setpoint used when no relaxation applies (°F).
    pub base_setpoint: f64,
    /// Comfort lower bound (°F).
    pub min_temp: f64,
    /// Comfort upper bound (°F).
    pub max_temp: f64,
    /// Constant HVAC draw (kW).
    pub power_kw: f64,
    /// Indoor temperature (°F), equal to the last commanded setpoint.
    pub current_temp: f64,
    /// Last commanded setpoint (°F).
    pub setpoint: f64,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self {
            base_setpoint: 72.0,
            min_temp: 68.0,
            max_temp: 76.0,
            power_kw: 3.5,
            current_temp: 72.0,
            setpoint: 72.0,
        }
    }
}

impl Thermostat {
    /// Creates a thermostat resting at its base setpoint.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a value is not finite, `min_temp > max_temp`,
    /// or `power_kw < 0`.
    pub fn new(
        base_setpoint: f64,
        min_temp: f64,
        max_temp: f64,
        power_kw: f64,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("base_setpoint", base_setpoint),
            ("min_temp", min_temp),
            ("max_temp", max_temp),
            ("power_kw", power_kw),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::new(field, "must be finite"));
            }
        }
        if min_temp > max_temp {
            return Err(ConfigError::new("min_temp", "must be <= max_temp"));
        }
        if power_kw < 0.0 {
            return Err(ConfigError::new("power_kw", "must be >= 0"));
        }

        Ok(Self {
            base_setpoint,
            min_temp,
            max_temp,
            power_kw,
            current_temp: base_setpoint,
            setpoint: base_setpoint,
        })
    }

    /// Commands a new setpoint; the indoor temperature follows immediately.
    pub fn apply_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
        self.current_temp = setpoint;
    }

    /// Returns `true` if `min_temp <= current_temp <= max_temp`.
    pub fn is_comfortable(&self) -> bool {
        self.min_temp <= self.current_temp && self.current_temp <= self.max_temp
    }

    /// Setpoint for a peak-priced hour: base + 2°F, capped at `max_temp`.
    pub fn relaxed_setpoint(&self) -> f64 {
        (self.base_setpoint + 2.0).min(self.max_temp)
    }
}

impl Device for Thermostat {
    fn power_kw(&self, _hour: usize) -> f64 {
        self.power_kw
    }
}
