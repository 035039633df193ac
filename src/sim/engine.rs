//! Day simulator replaying a schedule and setpoint curve against hourly prices.

use serde::Serialize;
use tracing::{debug, warn};

use crate::devices::{Appliance, Device, Thermostat};
use crate::household::Household;

use super::clock::DayClock;
use super::kpi::{Placement, SimulationMetrics};
use super::types::{HOURS_PER_DAY, Schedule, SetpointCurve};

/// Record of one simulated hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourResult {
    pub hour: usize,
    pub price: f64,
    /// Setpoint in force during the hour (°F).
    pub setpoint: f64,
    /// Energy used in the hour (kWh).
    pub usage_kwh: f64,
    pub cost: f64,
    pub comfortable: bool,
}

/// Replays one day for a household snapshot.
///
/// The simulator owns private copies of the appliances and thermostat, so
/// running it never changes the household. Monthly totals are only updated
/// when the caller commits a day with [`Household::commit_day`].
#[derive(Debug)]
pub struct DaySimulator<'a> {
    household: &'a Household,
    appliances: Vec<Appliance>,
    thermostat: Thermostat,
}

impl<'a> DaySimulator<'a> {
    /// Creates a simulator over `household` with nothing scheduled.
    pub fn new(household: &'a Household) -> Self {
        let mut sim = Self {
            household,
            appliances: household.appliances().to_vec(),
            thermostat: household.thermostat().clone(),
        };
        sim.reset();
        sim
    }

    /// Clears every start hour and restores the household's thermostat.
    pub fn reset(&mut self) {
        for appliance in &mut self.appliances {
            appliance.scheduled_start = None;
        }
        self.thermostat = self.household.thermostat().clone();
    }

    /// Sets each named appliance's start hour from `schedule`.
    ///
    /// Names are matched exactly; the first matching appliance wins. An
    /// appliance listed at several hours keeps the last one. Unknown names
    /// are skipped.
    pub fn apply_schedule(&mut self, schedule: &Schedule) {
        for (hour, names) in schedule.iter() {
            for name in names {
                match self.appliances.iter_mut().find(|a| &a.name == name) {
                    Some(appliance) => appliance.scheduled_start = Some(hour),
                    None => warn!(appliance = %name, hour, "schedule names an unknown appliance"),
                }
            }
        }
    }

    /// Simulates one hour and returns its record.
    ///
    /// # Arguments
    ///
    /// * `hour` - Hour of the day (0-23)
    /// * `setpoints` - Curve commanded by the policy; hours it does not cover
    ///   keep the previous setpoint
    pub fn step(&mut self, hour: usize, setpoints: &SetpointCurve) -> HourResult {
        if let Some(setpoint) = setpoints.get(hour) {
            self.thermostat.apply_setpoint(setpoint);
        }
        let comfortable = self.thermostat.is_comfortable();

        let appliance_kw: f64 = self.appliances.iter().map(|a| a.power_kw(hour)).sum();
        let usage_kwh = self.thermostat.power_kw(hour) + appliance_kw;
        let price = self.household.pricing().price_at(hour);

        HourResult {
            hour,
            price,
            setpoint: self.thermostat.setpoint,
            usage_kwh,
            cost: usage_kwh * price,
            comfortable,
        }
    }

    /// Replays the whole day and returns its metrics.
    ///
    /// Starts from a clean state, so a simulator can be reused for several
    /// schedules.
    pub fn run(&mut self, schedule: &Schedule, setpoints: &SetpointCurve) -> SimulationMetrics {
        self.reset();
        self.apply_schedule(schedule);

        let mut hours = Vec::with_capacity(HOURS_PER_DAY);
        DayClock::new().run(|hour| hours.push(self.step(hour, setpoints)));

        let mut metrics = SimulationMetrics {
            hourly_usage: Vec::with_capacity(HOURS_PER_DAY),
            hourly_costs: Vec::with_capacity(HOURS_PER_DAY),
            hourly_setpoints: Vec::with_capacity(HOURS_PER_DAY),
            daily_budget_kwh: self.household.daily_budget_kwh(),
            ..SimulationMetrics::default()
        };
        for h in &hours {
            if !h.comfortable {
                metrics.comfort_violations += 1;
            }
            metrics.hourly_usage.push(h.usage_kwh);
            metrics.hourly_costs.push(h.cost);
            metrics.hourly_setpoints.push(h.setpoint);
            metrics.total_kwh += h.usage_kwh;
            metrics.total_cost += h.cost;
        }

        metrics.placements = self
            .appliances
            .iter()
            .map(|a| Placement {
                appliance: a.name.clone(),
                start_hour: a.scheduled_start,
                finish_hour: a.finish_hour(),
                deadline_hour: a.deadline_hour,
                missed_deadline: a.misses_deadline(),
            })
            .collect();
        metrics.deadline_violations = metrics.placements.iter().filter(|p| p.missed_deadline).count();

        debug!(
            kwh = metrics.total_kwh,
            cost = metrics.total_cost,
            comfort_violations = metrics.comfort_violations,
            deadline_violations = metrics.deadline_violations,
            "simulated day"
        );
        metrics
    }

    /// Working copies of the appliances, with this run's start hours.
    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }
}

/// Simulates `schedule` and `setpoints` against a household snapshot.
pub fn simulate(
    household: &Household,
    schedule: &Schedule,
    setpoints: &SetpointCurve,
) -> SimulationMetrics {
    DaySimulator::new(household).run(schedule, setpoints)
}
