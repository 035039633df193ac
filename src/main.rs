//! Energy advisor entry point: CLI wiring, planning, and reporting.

mod cli;

use std::process;

use energy_advisor::advisor::EnergyAdvisor;
use energy_advisor::config::ScenarioConfig;
use energy_advisor::error::AdvisorError;
use energy_advisor::io::export::export_csv;
use energy_advisor::reporting::print_plan_report;
use tracing_subscriber::EnvFilter;

use cli::CliOptions;

/// Loads the scenario: `--scenario` takes priority over `--preset`.
fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, AdvisorError> {
    match cli.scenario {
        Some(ref path) => ScenarioConfig::from_toml_file(path),
        None => Ok(ScenarioConfig::from_preset(&cli.preset)?),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("energy_advisor=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(2);
    });

    let scenario = load_scenario(&cli).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mut household = scenario.build_household().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let plan = EnergyAdvisor::new(&household).plan_day();
    print_plan_report(&household, &plan);

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&plan, household.pricing(), path) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        eprintln!("Plan written to {}", path.display());
    }

    let adopt = cli.adopt.unwrap_or(scenario.plan.adopt);
    plan.commit(adopt, &mut household);
    println!("\n--- Month ---");
    println!("Adopted plan:          {adopt}");
    println!("Energy used:           {:.2} kWh", household.energy_used_month_kwh());
    println!("Cost so far:           {:.2}", household.cost_month());
    println!(
        "Next daily budget:     {:.2} kWh",
        household.daily_budget_kwh()
    );

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(energy_advisor::api::AppState {
            pricing: household.pricing().clone(),
            plan,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(energy_advisor::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
