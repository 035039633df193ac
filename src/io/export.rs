//! CSV export of a day plan, one row per hour.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::advisor::{DayPlan, PolicyOutcome};
use crate::error::AdvisorError;
use crate::pricing::PricingTable;
use crate::sim::types::HOURS_PER_DAY;

/// Column header for the hourly plan export.
const HEADER: &str = "hour,price,baseline_setpoint,baseline_kwh,baseline_cost,baseline_starts,\
                      greedy_setpoint,greedy_kwh,greedy_cost,greedy_starts";

/// Separator between appliance names starting in the same hour.
const STARTS_SEPARATOR: &str = ";";

/// Exports a day plan to a CSV file at the given path.
///
/// # Errors
///
/// Returns `AdvisorError::Io` if the file cannot be created and
/// `AdvisorError::Csv` if writing fails.
pub fn export_csv(plan: &DayPlan, pricing: &PricingTable, path: &Path) -> Result<(), AdvisorError> {
    let file = File::create(path).map_err(|source| AdvisorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(plan, pricing, io::BufWriter::new(file))
}

fn policy_columns(outcome: &PolicyOutcome, hour: usize) -> [String; 4] {
    let m = &outcome.metrics;
    let value = |series: &[f64]| series.get(hour).map_or_else(String::new, |v| format!("{v:.4}"));
    [
        value(&m.hourly_setpoints),
        value(&m.hourly_usage),
        value(&m.hourly_costs),
        outcome.schedule.starting_at(hour).join(STARTS_SEPARATOR),
    ]
}

/// Writes a day plan as CSV to any writer.
///
/// Produces a header row and 24 data rows. Output is deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns `AdvisorError::Csv` if writing fails.
pub fn write_csv(
    plan: &DayPlan,
    pricing: &PricingTable,
    writer: impl Write,
) -> Result<(), AdvisorError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for hour in 0..HOURS_PER_DAY {
        let [b_set, b_kwh, b_cost, b_starts] = policy_columns(&plan.baseline, hour);
        let [g_set, g_kwh, g_cost, g_starts] = policy_columns(&plan.greedy, hour);
        wtr.write_record([
            hour.to_string(),
            format!("{:.4}", pricing.price_at(hour)),
            b_set,
            b_kwh,
            b_cost,
            b_starts,
            g_set,
            g_kwh,
            g_cost,
            g_starts,
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
