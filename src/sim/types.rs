//! Core planning types: schedules, setpoint curves, and allocator output.

use std::fmt;

use serde::Serialize;

/// Hours in one planned day.
pub const HOURS_PER_DAY: usize = 24;

/// Start-hour assignment for one day.
///
/// Every hour 0-23 holds the ordered list of appliance names starting in
/// that hour. Several appliances may share an hour.
///
/// # Examples
///
/// ```
/// use energy_advisor::sim::types::Schedule;
///
/// let mut schedule = Schedule::new();
/// schedule.assign(0, "EV Charger");
/// schedule.assign(0, "Dishwasher");
/// assert_eq!(schedule.starting_at(0), ["EV Charger", "Dishwasher"]);
/// assert_eq!(schedule.start_of("Dishwasher"), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    slots: [Vec<String>; HOURS_PER_DAY],
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    /// Creates a schedule with an empty list at every hour.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Appends `name` to the starts of `hour`.
    ///
    /// Hours past the end of the day are clamped to hour 23 so no key outside
    /// 0-23 ever exists.
    pub fn assign(&mut self, hour: usize, name: impl Into<String>) {
        let hour = hour.min(HOURS_PER_DAY - 1);
        self.slots[hour].push(name.into());
    }

    /// Names starting at `hour`; empty for hours outside the day.
    pub fn starting_at(&self, hour: usize) -> &[String] {
        self.slots
            .get(hour)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates `(hour, names)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.slots
            .iter()
            .enumerate()
            .map(|(hour, names)| (hour, names.as_slice()))
    }

    /// First hour at which `name` starts.
    pub fn start_of(&self, name: &str) -> Option<usize> {
        self.iter()
            .find(|(_, names)| names.iter().any(|n| n == name))
            .map(|(hour, _)| hour)
    }

    /// Returns `true` if no appliance starts at any hour.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Total number of scheduled starts.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

/// Hourly thermostat setpoints (°F) commanded by a policy.
///
/// Normally 24 entries long. The simulator leaves the thermostat untouched
/// for hours without an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SetpointCurve(Vec<f64>);

impl SetpointCurve {
    /// A flat curve holding `setpoint` for the whole day.
    pub fn constant(setpoint: f64) -> Self {
        Self(vec![setpoint; HOURS_PER_DAY])
    }

    pub fn from_vec(setpoints: Vec<f64>) -> Self {
        Self(setpoints)
    }

    /// Setpoint for `hour`, if the curve covers it.
    pub fn get(&self, hour: usize) -> Option<f64> {
        self.0.get(hour).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Non-fatal finding raised while allocating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The placed run finishes after the appliance's deadline. The start is
    /// kept; the simulator counts the same run as a deadline violation.
    InfeasibleSchedule {
        appliance: String,
        start_hour: usize,
        finish_hour: usize,
        deadline_hour: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfeasibleSchedule {
                appliance,
                start_hour,
                finish_hour,
                deadline_hour,
            } => write!(
                f,
                "{appliance}: placed run starting at hour {start_hour} finishes at {finish_hour}, \
                 after deadline {deadline_hour}"
            ),
        }
    }
}

/// Output of one allocation policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub schedule: Schedule,
    pub setpoints: SetpointCurve,
    pub advisories: Vec<Advisory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_schedule_has_every_hour_empty() {
        let schedule = Schedule::new();
        assert_eq!(schedule.iter().count(), HOURS_PER_DAY);
        assert!(schedule.is_empty());
        assert_eq!(schedule.len(), 0);
    }

    #[test]
    fn assign_clamps_late_hours() {
        let mut schedule = Schedule::new();
        schedule.assign(30, "Dryer");
        assert_eq!(schedule.starting_at(23), ["Dryer"]);
        assert!(schedule.starting_at(30).is_empty());
    }

    #[test]
    fn start_of_unknown_name_is_none() {
        let mut schedule = Schedule::new();
        schedule.assign(5, "Dryer");
        assert_eq!(schedule.start_of("Washer"), None);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn constant_curve_covers_day() {
        let curve = SetpointCurve::constant(72.0);
        assert_eq!(curve.len(), HOURS_PER_DAY);
        assert_eq!(curve.get(23), Some(72.0));
        assert_eq!(curve.get(24), None);
    }

    #[test]
    fn advisory_display_names_appliance() {
        let advisory = Advisory::InfeasibleSchedule {
            appliance: "EV".into(),
            start_hour: 5,
            finish_hour: 9,
            deadline_hour: 7,
        };
        let s = advisory.to_string();
        assert!(s.starts_with("EV:"));
        assert!(s.contains("deadline 7"));
    }
}
