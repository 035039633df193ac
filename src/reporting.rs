//! Plain-text presentation of a computed day plan.

use std::fmt::Write as _;

use crate::advisor::DayPlan;
use crate::devices::Appliance;
use crate::household::Household;
use crate::pricing::PricingTable;
use crate::sim::types::HOURS_PER_DAY;

/// First hour of the overnight band; the band wraps to [`OVERNIGHT_END`].
const OVERNIGHT_START: usize = 22;
const OVERNIGHT_END: usize = 6;

fn start_reason(appliance: &Appliance, start: usize, pricing: &PricingTable) -> &'static str {
    if start >= OVERNIGHT_START || start < OVERNIGHT_END {
        return "prices overnight are the lowest";
    }
    let end = appliance.finish_from(start).min(HOURS_PER_DAY);
    if (start..end).all(|hour| !pricing.is_peak(hour)) {
        "its whole run avoids peak-priced hours"
    } else {
        "it is early enough to meet its deadline even at higher prices"
    }
}

/// Explains the greedy plan in plain sentences.
///
/// One sentence per scheduled appliance in household order, then a budget
/// sentence and a note on the thermostat. Appliances missing from the greedy
/// schedule are skipped.
pub fn explain(household: &Household, plan: &DayPlan) -> Vec<String> {
    let pricing = household.pricing();
    let greedy = &plan.greedy;

    let mut lines: Vec<String> = household
        .appliances()
        .iter()
        .filter_map(|appliance| {
            let start = greedy.schedule.start_of(&appliance.name)?;
            Some(format!(
                "{} was scheduled at hour {start} because {}.",
                appliance.name,
                start_reason(appliance, start, pricing)
            ))
        })
        .collect();

    let metrics = &greedy.metrics;
    lines.push(if metrics.within_budget() {
        format!(
            "The plan uses {:.2} kWh, within the daily budget of {:.2} kWh.",
            metrics.total_kwh, metrics.daily_budget_kwh
        )
    } else {
        format!(
            "The plan uses {:.2} kWh, over the daily budget of {:.2} kWh, to meet deadlines and comfort limits.",
            metrics.total_kwh, metrics.daily_budget_kwh
        )
    });

    let thermostat = household.thermostat();
    lines.push(format!(
        "The thermostat is relaxed to {:.1}°F during peak-priced hours and stays at {:.1}°F otherwise.",
        thermostat.relaxed_setpoint(),
        thermostat.base_setpoint
    ));
    lines
}

/// Hour-by-hour table of the appliances starting under each policy.
pub fn schedule_table(plan: &DayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<32}  {}", "hour", "baseline", "greedy");
    for hour in 0..HOURS_PER_DAY {
        let baseline = plan.baseline.schedule.starting_at(hour).join(", ");
        let greedy = plan.greedy.schedule.starting_at(hour).join(", ");
        let _ = writeln!(out, "{hour:>4}  {baseline:<32}  {greedy}");
    }
    out
}

/// Prints the schedule table, both policies' metrics, savings, and explanations.
pub fn print_plan_report(household: &Household, plan: &DayPlan) {
    println!("--- Schedules (day {}) ---", plan.day);
    print!("{}", schedule_table(plan));

    println!("\n--- Baseline ---");
    println!("{}", plan.baseline.metrics);
    println!("\n--- Greedy ---");
    println!("{}", plan.greedy.metrics);

    println!("\nSavings vs baseline: {}", plan.savings);

    println!("\n--- Explanations ---");
    for line in explain(household, plan) {
        println!("- {line}");
    }
}
