//! Randomized invariant checks over seeded households.

mod common;

use common::{approx_eq, household_with_prices};
use energy_advisor::advisor::{EnergyAdvisor, Policy};
use energy_advisor::devices::Appliance;
use energy_advisor::household::Household;
use energy_advisor::sim::allocator::{Allocator, BaselineAllocator, GreedyAllocator};
use energy_advisor::sim::engine::simulate;
use energy_advisor::sim::types::HOURS_PER_DAY;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TRIALS: u64 = 200;

fn random_prices(rng: &mut StdRng) -> [f64; HOURS_PER_DAY] {
    let mut prices = [0.0; HOURS_PER_DAY];
    for p in &mut prices {
        // Coarse grid so equal-cost starts actually occur.
        *p = f64::from(rng.random_range(1..=8u8)) * 0.05;
    }
    prices
}

fn random_appliance(rng: &mut StdRng, index: usize) -> Appliance {
    Appliance::new(
        format!("appliance-{index}"),
        rng.random_range(0.1..10.0),
        rng.random_range(1..=8),
        rng.random_range(0..HOURS_PER_DAY),
    )
    .unwrap()
    .with_flexible(rng.random_bool(0.8))
}

fn random_household(rng: &mut StdRng) -> Household {
    let count = rng.random_range(0..6);
    let appliances = (0..count).map(|i| random_appliance(rng, i)).collect();
    household_with_prices(random_prices(rng), appliances)
}

#[test]
fn totals_always_equal_hourly_sums() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..TRIALS {
        let h = random_household(&mut rng);
        let plan = EnergyAdvisor::new(&h).plan_day();
        for m in [&plan.baseline.metrics, &plan.greedy.metrics] {
            assert_eq!(m.total_kwh, m.hourly_usage.iter().sum::<f64>());
            assert_eq!(m.total_cost, m.hourly_costs.iter().sum::<f64>());
        }
    }
}

#[test]
fn runs_occupy_exactly_their_duration() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..TRIALS {
        let appliance = random_appliance(&mut rng, 0);
        let h = household_with_prices(random_prices(&mut rng), vec![appliance.clone()]);
        let hvac = h.thermostat().power_kw;

        for allocator in [&BaselineAllocator as &dyn Allocator, &GreedyAllocator] {
            let alloc = allocator.allocate(&h);
            let m = simulate(&h, &alloc.schedule, &alloc.setpoints);
            let start = alloc.schedule.start_of(&appliance.name).unwrap();
            assert!(start + appliance.duration_hours <= HOURS_PER_DAY);

            let running: Vec<usize> = (0..HOURS_PER_DAY)
                .filter(|&hour| approx_eq(m.hourly_usage[hour] - hvac, appliance.power_kw))
                .collect();
            let expected: Vec<usize> = (start..start + appliance.duration_hours).collect();
            assert_eq!(running, expected, "{} via {}", appliance.name, allocator.name());
        }
    }
}

#[test]
fn greedy_start_is_cheapest_and_earliest() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..TRIALS {
        let h = random_household(&mut rng);
        let alloc = GreedyAllocator.allocate(&h);

        for appliance in h.appliances().iter().filter(|a| a.is_flexible) {
            let chosen = alloc.schedule.start_of(&appliance.name).unwrap();
            let chosen_cost = GreedyAllocator::run_cost(appliance, h.pricing(), chosen);

            for start in 0..=appliance.latest_start() {
                if start + appliance.duration_hours > HOURS_PER_DAY {
                    continue;
                }
                let cost = GreedyAllocator::run_cost(appliance, h.pricing(), start);
                if start < chosen {
                    assert!(cost > chosen_cost, "earlier start {start} is no worse than {chosen}");
                } else {
                    assert!(cost >= chosen_cost, "start {start} beats chosen {chosen}");
                }
            }
        }
    }
}

#[test]
fn fixed_appliances_start_at_latest_start() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..TRIALS {
        let h = random_household(&mut rng);
        let alloc = GreedyAllocator.allocate(&h);
        for appliance in h.appliances().iter().filter(|a| !a.is_flexible) {
            assert_eq!(
                alloc.schedule.start_of(&appliance.name),
                Some(appliance.latest_start())
            );
        }
    }
}

#[test]
fn savings_match_cost_difference() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..TRIALS {
        let h = random_household(&mut rng);
        let plan = EnergyAdvisor::new(&h).plan_day();
        let base = plan.baseline.metrics.total_cost;
        assert!(base > 0.0);
        assert_eq!(plan.savings.absolute, base - plan.greedy.metrics.total_cost);
        assert!(approx_eq(
            plan.savings.percent,
            plan.savings.absolute / base * 100.0
        ));
    }
}

#[test]
fn daily_budget_follows_remaining_days() {
    let mut rng = StdRng::seed_from_u64(59);
    let mut h = random_household(&mut rng);
    let month_days = h.month_days();
    let mut used = 0.0;

    for day in 1..=month_days + 2 {
        let expected = if day > month_days {
            0.0
        } else {
            ((h.monthly_budget_kwh() - used) / f64::from(month_days - day + 1)).max(0.0)
        };
        assert_eq!(h.current_day(), day);
        assert!(approx_eq(h.daily_budget_kwh(), expected), "day {day}");

        let plan = EnergyAdvisor::new(&h).plan_day();
        assert!(approx_eq(plan.greedy.metrics.daily_budget_kwh, expected));
        let adopted = if rng.random_bool(0.5) {
            Policy::Greedy
        } else {
            Policy::Baseline
        };
        used += plan.outcome(adopted).metrics.total_kwh;
        plan.commit(adopted, &mut h);
        assert!(approx_eq(h.energy_used_month_kwh(), used));
    }
}
