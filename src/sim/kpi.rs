//! Day metrics and savings comparison.

use std::fmt;

use serde::Serialize;

/// Where one appliance ended up in a simulated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub appliance: String,
    /// Assigned start hour, `None` if the schedule never mentioned it.
    pub start_hour: Option<usize>,
    /// End of the run (exclusive), `start + duration`.
    pub finish_hour: Option<usize>,
    pub deadline_hour: usize,
    pub missed_deadline: bool,
}

/// Metrics of one simulated day.
///
/// Created fresh by every simulation call; `total_kwh` and `total_cost` are
/// accumulated from the hourly arrays in hour order, so they equal the sums of
/// those arrays exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationMetrics {
    /// Energy used over the day (kWh).
    pub total_kwh: f64,
    /// Energy cost over the day.
    pub total_cost: f64,
    /// Energy used in each hour (kWh).
    pub hourly_usage: Vec<f64>,
    /// Cost of each hour.
    pub hourly_costs: Vec<f64>,
    /// Setpoint in force during each hour (°F).
    pub hourly_setpoints: Vec<f64>,
    /// Hours whose temperature fell outside the comfort band.
    pub comfort_violations: usize,
    /// Appliances whose run finished after their deadline.
    pub deadline_violations: usize,
    /// Daily budget derived from the household at simulation time (kWh).
    pub daily_budget_kwh: f64,
    /// Per-appliance outcome, in household arrival order.
    pub placements: Vec<Placement>,
}

impl SimulationMetrics {
    /// Returns `true` if the day's energy fits within the daily budget.
    pub fn within_budget(&self) -> bool {
        self.total_kwh <= self.daily_budget_kwh
    }

    /// Hour with the highest usage, first one on ties.
    pub fn peak_hour(&self) -> Option<usize> {
        self.hourly_usage
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (hour, &kwh)| match best {
                Some((_, top)) if top >= kwh => best,
                _ => Some((hour, kwh)),
            })
            .map(|(hour, _)| hour)
    }
}

impl fmt::Display for SimulationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Daily energy:          {:.2} kWh", self.total_kwh)?;
        writeln!(f, "Daily cost:            {:.2}", self.total_cost)?;
        writeln!(f, "Daily budget:          {:.2} kWh", self.daily_budget_kwh)?;
        match self.peak_hour() {
            Some(hour) => writeln!(f, "Peak usage hour:       {hour}")?,
            None => writeln!(f, "Peak usage hour:       -")?,
        }
        writeln!(f, "Comfort violations:    {}", self.comfort_violations)?;
        write!(f, "Deadline violations:   {}", self.deadline_violations)
    }
}

/// Cost saved by one plan relative to another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Savings {
    /// `baseline.total_cost - plan.total_cost`.
    pub absolute: f64,
    /// `absolute / baseline.total_cost * 100`.
    pub percent: f64,
}

impl Savings {
    /// Compares two simulated days.
    ///
    /// Returns zero savings when the baseline cost is not a positive finite
    /// number (or the plan cost is not finite) instead of dividing by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use energy_advisor::sim::kpi::{Savings, SimulationMetrics};
    ///
    /// let baseline = SimulationMetrics { total_cost: 20.0, ..Default::default() };
    /// let greedy = SimulationMetrics { total_cost: 15.0, ..Default::default() };
    /// let s = Savings::between(&baseline, &greedy);
    /// assert_eq!(s.absolute, 5.0);
    /// assert_eq!(s.percent, 25.0);
    /// ```
    pub fn between(baseline: &SimulationMetrics, plan: &SimulationMetrics) -> Self {
        let base = baseline.total_cost;
        if !base.is_finite() || !plan.total_cost.is_finite() || base <= 0.0 {
            return Self::default();
        }
        let absolute = base - plan.total_cost;
        Self {
            absolute,
            percent: absolute / base * 100.0,
        }
    }
}

impl fmt::Display for Savings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ({:.1}%)", self.absolute, self.percent)
    }
}
