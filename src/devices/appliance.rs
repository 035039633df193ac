use serde::Serialize;

use crate::devices::types::Device;
use crate::error::ConfigError;
use crate::sim::types::HOURS_PER_DAY;

/// A deferrable appliance that must run for a whole number of contiguous
/// hours and finish by its deadline.
///
/// `scheduled_start` is per-run state: the simulator sets it on its own
/// working copy and it is never part of the household's configured data.
///
/// # Power Flow Convention
/// Returns **positive** values (consumption) while running, `0.0` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appliance {
    /// Unique name within the household.
    pub name: String,
    /// Draw while running (kW).
    pub power_kw: f64,
    /// Contiguous run length (hours, >= 1).
    pub duration_hours: usize,
    /// Hour by which the run must have finished (0-23).
    pub deadline_hour: usize,
    /// Whether the greedy allocator may move this appliance.
    pub is_flexible: bool,
    /// Start hour assigned by the current simulation run.
    #[serde(skip)]
    pub scheduled_start: Option<usize>,
}

impl Appliance {
    /// Creates a flexible appliance.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique, non-empty identifier
    /// * `power_kw` - Draw while running (kW, >= 0)
    /// * `duration_hours` - Contiguous run length (hours, >= 1)
    /// * `deadline_hour` - Hour by which the run must finish (0-23)
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid field.
    pub fn new(
        name: impl Into<String>,
        power_kw: f64,
        duration_hours: usize,
        deadline_hour: usize,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::new("name", "must not be empty"));
        }
        if !power_kw.is_finite() || power_kw < 0.0 {
            return Err(ConfigError::new(
                "power_kw",
                format!("must be finite and >= 0, got {power_kw}"),
            ));
        }
        if duration_hours == 0 {
            return Err(ConfigError::new("duration_hours", "must be >= 1"));
        }
        if deadline_hour >= HOURS_PER_DAY {
            return Err(ConfigError::new(
                "deadline_hour",
                format!("must be in [0, 23], got {deadline_hour}"),
            ));
        }

        Ok(Self {
            name,
            power_kw,
            duration_hours,
            deadline_hour,
            is_flexible: true,
            scheduled_start: None,
        })
    }

    /// Marks the appliance as fixed (or flexible again).
    pub fn with_flexible(mut self, is_flexible: bool) -> Self {
        self.is_flexible = is_flexible;
        self
    }

    /// Latest start hour the allocators consider, `max(0, deadline - duration + 1)`.
    pub fn latest_start(&self) -> usize {
        (self.deadline_hour + 1).saturating_sub(self.duration_hours)
    }

    /// Returns `true` if a run starting at the scheduled hour covers `hour`.
    pub fn is_running_at(&self, hour: usize) -> bool {
        self.scheduled_start
            .is_some_and(|start| hour >= start && hour < start.saturating_add(self.duration_hours))
    }

    /// Hour at which the scheduled run ends (exclusive), if scheduled.
    pub fn finish_hour(&self) -> Option<usize> {
        self.scheduled_start.map(|start| self.finish_from(start))
    }

    /// End of a run starting at `start`, saturating for oversized durations.
    pub fn finish_from(&self, start: usize) -> usize {
        start.saturating_add(self.duration_hours)
    }

    /// Returns `true` if the scheduled run finishes after the deadline.
    pub fn misses_deadline(&self) -> bool {
        self.finish_hour()
            .is_some_and(|finish| finish > self.deadline_hour)
    }
}

impl Device for Appliance {
    fn power_kw(&self, hour: usize) -> f64 {
        if self.is_running_at(hour) {
            self.power_kw
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dishwasher() -> Appliance {
        Appliance::new("Dishwasher", 1.2, 2, 23).unwrap()
    }

    #[test]
    fn rejects_empty_name() {
        let err = Appliance::new("  ", 1.0, 1, 5).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn rejects_negative_power() {
        let err = Appliance::new("Heater", -0.5, 1, 5).unwrap_err();
        assert_eq!(err.field, "power_kw");
    }

    #[test]
    fn rejects_zero_duration() {
        let err = Appliance::new("Heater", 1.0, 0, 5).unwrap_err();
        assert_eq!(err.field, "duration_hours");
    }

    #[test]
    fn rejects_deadline_past_end_of_day() {
        let err = Appliance::new("Heater", 1.0, 1, 24).unwrap_err();
        assert_eq!(err.field, "deadline_hour");
    }

    #[test]
    fn latest_start_clamps_at_zero() {
        let a = Appliance::new("EV", 7.0, 4, 2).unwrap();
        assert_eq!(a.latest_start(), 0);
        assert_eq!(dishwasher().latest_start(), 22);
        let b = Appliance::new("Kettle", 2.0, 1, 0).unwrap();
        assert_eq!(b.latest_start(), 0);
    }

    #[test]
    fn draws_power_only_while_running() {
        let mut a = dishwasher();
        assert_eq!(a.power_kw(0), 0.0);

        a.scheduled_start = Some(3);
        assert_eq!(a.power_kw(2), 0.0);
        assert_eq!(a.power_kw(3), 1.2);
        assert_eq!(a.power_kw(4), 1.2);
        assert_eq!(a.power_kw(5), 0.0);
    }

    #[test]
    fn deadline_miss_uses_finish_hour() {
        let mut a = Appliance::new("EV", 7.0, 4, 7).unwrap();
        a.scheduled_start = Some(3);
        assert_eq!(a.finish_hour(), Some(7));
        assert!(!a.misses_deadline());

        a.scheduled_start = Some(4);
        assert!(a.misses_deadline());
    }

    #[test]
    fn unscheduled_never_misses_deadline() {
        assert!(!dishwasher().misses_deadline());
    }

    #[test]
    fn oversized_duration_saturates() {
        let mut a = Appliance::new("Marathon", 1.0, usize::MAX, 23).unwrap();
        assert_eq!(a.latest_start(), 0);
        a.scheduled_start = Some(5);
        assert_eq!(a.finish_hour(), Some(usize::MAX));
        assert!(a.misses_deadline());
        assert_eq!(a.power_kw(4), 0.0);
        assert_eq!(a.power_kw(23), 1.0);
    }
}
