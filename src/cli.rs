use std::env;
use std::path::PathBuf;

use energy_advisor::advisor::Policy;

/// Default API port.
#[cfg(feature = "api")]
const DEFAULT_PORT: u16 = 3000;

pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: String,
    pub adopt: Option<Policy>,
    pub csv_out: Option<PathBuf>,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        scenario: None,
        preset: "default".to_string(),
        adopt: None,
        csv_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: DEFAULT_PORT,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                opts.scenario = Some(PathBuf::from(path));
            }
            "--preset" => {
                i += 1;
                opts.preset = args
                    .next_or_err(i, "missing value for --preset (expected a preset name)")?
                    .to_string();
            }
            "--adopt" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --adopt (expected baseline or greedy)")?;
                let policy = name.parse::<Policy>().map_err(|e| e.to_string())?;
                opts.adopt = Some(policy);
            }
            "--csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                opts.csv_out = Some(PathBuf::from(path));
            }
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("energy-advisor: day-ahead appliance and thermostat planner");
    eprintln!();
    eprintln!("Usage: energy-advisor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML file (wins over --preset)");
    eprintln!("  --preset <name>     Built-in preset: default, summer, winter");
    eprintln!("  --adopt <policy>    Plan committed to the month: baseline or greedy");
    eprintln!("  --csv-out <path>    Export the hourly plan to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve             Start REST API server after planning");
        eprintln!("  --port <u16>        API server port (default: 3000)");
    }
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. energy_advisor=debug) for allocation logs on stderr.");
}
