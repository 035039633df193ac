//! Allocation policies that turn a household into a day schedule.

use tracing::{debug, warn};

use crate::devices::Appliance;
use crate::household::Household;
use crate::pricing::PricingTable;

use super::types::{Advisory, Allocation, HOURS_PER_DAY, Schedule, SetpointCurve};

/// A policy producing a schedule and setpoint curve from household state.
///
/// Implementations are pure: they read the household and return fresh values.
pub trait Allocator {
    /// Short policy name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Produces the day's schedule, setpoint curve, and advisories.
    fn allocate(&self, household: &Household) -> Allocation;
}

/// Records an advisory if the placed run finishes after the deadline.
///
/// The allocators' search window ends at `latest_start`, whose run finishes
/// one hour past the deadline, so a placed run can be late even when an
/// earlier start would have been on time.
fn check_deadline(appliance: &Appliance, start: usize, advisories: &mut Vec<Advisory>) {
    let finish = appliance.finish_from(start);
    if finish > appliance.deadline_hour {
        warn!(
            appliance = %appliance.name,
            start,
            finish,
            deadline = appliance.deadline_hour,
            "placed run finishes after the deadline"
        );
        advisories.push(Advisory::InfeasibleSchedule {
            appliance: appliance.name.clone(),
            start_hour: start,
            finish_hour: finish,
            deadline_hour: appliance.deadline_hour,
        });
    }
}

/// "Run immediately" baseline.
///
/// Appliances run back-to-back in arrival order from midnight, with no cost or
/// deadline awareness. The thermostat holds its base setpoint all day.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaselineAllocator;

impl Allocator for BaselineAllocator {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn allocate(&self, household: &Household) -> Allocation {
        let mut schedule = Schedule::new();
        let mut advisories = Vec::new();
        let mut next_free = 0;

        for appliance in household.appliances() {
            // A queue that overflows the day keeps stacking on the last hour.
            let start = next_free.min(HOURS_PER_DAY - 1);
            schedule.assign(start, appliance.name.as_str());
            check_deadline(appliance, start, &mut advisories);
            next_free = appliance.finish_from(next_free).min(HOURS_PER_DAY);
        }

        Allocation {
            schedule,
            setpoints: SetpointCurve::constant(household.thermostat().base_setpoint),
            advisories,
        }
    }
}

/// Cost-aware greedy plan.
///
/// Appliances are taken in ascending deadline order (stable, so ties keep
/// arrival order). Each flexible appliance gets the cheapest start in
/// `[0, latest_start]` whose run fits inside the day; earlier starts win ties.
/// Appliances are placed independently and may overlap.
///
/// The thermostat is relaxed by 2°F (capped at `max_temp`) in every hour priced
/// at or above the 75th-percentile peak threshold.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    /// Energy cost of running `appliance` from `start` for its whole duration.
    pub fn run_cost(appliance: &Appliance, pricing: &PricingTable, start: usize) -> f64 {
        appliance.power_kw * pricing.window_sum(start, appliance.duration_hours)
    }

    /// Scans every feasible start and returns the cheapest `(start, cost)`.
    ///
    /// Returns `None` when no start in `[0, latest_start]` keeps the run
    /// inside the day.
    pub fn cheapest_start(appliance: &Appliance, pricing: &PricingTable) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for start in 0..=appliance.latest_start() {
            if appliance.finish_from(start) > HOURS_PER_DAY {
                continue;
            }
            let cost = Self::run_cost(appliance, pricing, start);
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((start, cost));
            }
        }
        best
    }

    /// Start hour chosen for one appliance.
    ///
    /// Fixed appliances are pinned to their latest start. Flexible ones take
    /// the cheapest start, or hour 0 when nothing fits.
    pub fn choose_start(appliance: &Appliance, pricing: &PricingTable) -> usize {
        if !appliance.is_flexible {
            let start = appliance.latest_start();
            debug!(appliance = %appliance.name, start, "pinned fixed appliance");
            return start;
        }

        match Self::cheapest_start(appliance, pricing) {
            Some((start, cost)) => {
                debug!(appliance = %appliance.name, start, cost, "placed at cheapest start");
                start
            }
            None => {
                debug!(
                    appliance = %appliance.name,
                    duration = appliance.duration_hours,
                    "no start fits inside the day, falling back to hour 0"
                );
                0
            }
        }
    }

    /// Two-level thermostat curve: base setpoint off-peak, relaxed at peak.
    pub fn setpoint_curve(household: &Household) -> SetpointCurve {
        let pricing = household.pricing();
        let thermostat = household.thermostat();
        let threshold = pricing.peak_threshold();

        let setpoints = (0..HOURS_PER_DAY)
            .map(|hour| {
                if pricing.price_at(hour) >= threshold {
                    thermostat.relaxed_setpoint()
                } else {
                    thermostat.base_setpoint
                }
            })
            .collect();
        SetpointCurve::from_vec(setpoints)
    }
}

impl Allocator for GreedyAllocator {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn allocate(&self, household: &Household) -> Allocation {
        let pricing = household.pricing();
        let mut by_deadline: Vec<&Appliance> = household.appliances().iter().collect();
        by_deadline.sort_by_key(|a| a.deadline_hour);

        let mut schedule = Schedule::new();
        let mut advisories = Vec::new();
        for appliance in by_deadline {
            let start = Self::choose_start(appliance, pricing);
            schedule.assign(start, appliance.name.as_str());
            check_deadline(appliance, start, &mut advisories);
        }

        Allocation {
            schedule,
            setpoints: Self::setpoint_curve(household),
            advisories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::BudgetSettings;
    use crate::pricing::PricingProfile;

    fn household_with(appliances: Vec<Appliance>) -> Household {
        let mut h =
            Household::with_profile(BudgetSettings::default(), PricingProfile::Standard).unwrap();
        for a in appliances {
            h.add_appliance(a).unwrap();
        }
        h
    }

    #[test]
    fn baseline_runs_back_to_back() {
        let h = household_with(vec![
            Appliance::new("a", 1.0, 2, 23).unwrap(),
            Appliance::new("b", 1.0, 3, 23).unwrap(),
            Appliance::new("c", 1.0, 1, 23).unwrap(),
        ]);
        let alloc = BaselineAllocator.allocate(&h);
        assert_eq!(alloc.schedule.start_of("a"), Some(0));
        assert_eq!(alloc.schedule.start_of("b"), Some(2));
        assert_eq!(alloc.schedule.start_of("c"), Some(5));
        assert!(alloc.advisories.is_empty());
        assert_eq!(alloc.setpoints, SetpointCurve::constant(72.0));
    }

    #[test]
    fn baseline_overflow_stays_inside_day() {
        let h = household_with(vec![
            Appliance::new("long", 1.0, 20, 23).unwrap(),
            Appliance::new("longer", 1.0, 10, 23).unwrap(),
            Appliance::new("late", 1.0, 2, 23).unwrap(),
        ]);
        let alloc = BaselineAllocator.allocate(&h);
        assert_eq!(alloc.schedule.start_of("longer"), Some(20));
        assert_eq!(alloc.schedule.start_of("late"), Some(23));
        assert_eq!(alloc.advisories.len(), 2);
    }

    #[test]
    fn greedy_prefers_off_peak() {
        let h = household_with(vec![Appliance::new("dryer", 2.0, 3, 21).unwrap()]);
        let alloc = GreedyAllocator.allocate(&h);
        assert_eq!(alloc.schedule.start_of("dryer"), Some(0));
    }

    #[test]
    fn greedy_tie_keeps_earliest_start() {
        let prices = [0.1; HOURS_PER_DAY];
        let pricing = PricingTable::from_prices(prices).unwrap();
        let a = Appliance::new("flat", 1.0, 2, 20).unwrap();
        assert_eq!(GreedyAllocator::cheapest_start(&a, &pricing).map(|(s, _)| s), Some(0));
    }

    #[test]
    fn greedy_finds_cheap_valley() {
        let mut prices = [0.3; HOURS_PER_DAY];
        prices[10] = 0.05;
        prices[11] = 0.05;
        let pricing = PricingTable::from_prices(prices).unwrap();
        let a = Appliance::new("pump", 1.5, 2, 15).unwrap();
        let (start, cost) = GreedyAllocator::cheapest_start(&a, &pricing).unwrap();
        assert_eq!(start, 10);
        assert!((cost - 0.15).abs() < 1e-12);
    }

    #[test]
    fn greedy_falls_back_to_zero_when_nothing_fits() {
        let a = Appliance::new("marathon", 1.0, 30, 23).unwrap();
        let pricing = PricingTable::build(PricingProfile::Standard);
        assert_eq!(GreedyAllocator::cheapest_start(&a, &pricing), None);
        assert_eq!(GreedyAllocator::choose_start(&a, &pricing), 0);
    }

    #[test]
    fn oversized_duration_plans_without_overflow() {
        let h = household_with(vec![
            Appliance::new("a", 1.0, 1, 23).unwrap(),
            Appliance::new("b", 1.0, usize::MAX, 23).unwrap(),
            Appliance::new("c", 1.0, 1, 23).unwrap(),
        ]);

        let baseline = BaselineAllocator.allocate(&h);
        assert_eq!(baseline.schedule.start_of("b"), Some(1));
        assert_eq!(baseline.schedule.start_of("c"), Some(23));

        let greedy = GreedyAllocator.allocate(&h);
        assert_eq!(greedy.schedule.start_of("b"), Some(0));
        assert!(greedy.advisories.iter().any(|a| matches!(
            a,
            Advisory::InfeasibleSchedule { appliance, finish_hour: usize::MAX, .. } if appliance == "b"
        )));
    }

    #[test]
    fn late_advisory_reports_the_placed_run() {
        let oven = Appliance::new("oven", 2.5, 2, 19)
            .unwrap()
            .with_flexible(false);
        let alloc = GreedyAllocator.allocate(&household_with(vec![oven]));
        assert_eq!(alloc.advisories.len(), 1);
        assert_eq!(
            alloc.advisories[0].to_string(),
            "oven: placed run starting at hour 18 finishes at 20, after deadline 19"
        );
    }

    #[test]
    fn fixed_appliance_is_pinned_to_latest_start() {
        let a = Appliance::new("oven", 2.5, 2, 19)
            .unwrap()
            .with_flexible(false);
        let pricing = PricingTable::build(PricingProfile::Standard);
        assert_eq!(GreedyAllocator::choose_start(&a, &pricing), 18);
    }

    #[test]
    fn greedy_orders_by_deadline_then_arrival() {
        let h = household_with(vec![
            Appliance::new("late", 1.0, 1, 23).unwrap(),
            Appliance::new("early", 1.0, 1, 3).unwrap(),
            Appliance::new("late_too", 1.0, 1, 23).unwrap(),
        ]);
        let alloc = GreedyAllocator.allocate(&h);
        assert_eq!(alloc.schedule.starting_at(0), ["early", "late", "late_too"]);
    }

    #[test]
    fn greedy_setpoints_relax_at_peak() {
        let h = household_with(Vec::new());
        let curve = GreedyAllocator::setpoint_curve(&h);
        // Standard threshold is 0.15, so only the six 0.08 hours stay at base.
        for hour in 0..HOURS_PER_DAY {
            let expected = if hour < 6 { 72.0 } else { 74.0 };
            assert_eq!(curve.get(hour), Some(expected), "hour {hour}");
        }
    }
}
