use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use lifeplan_core::{Scenario, TaxTables, monte_carlo_run};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "lifeplan")]
#[command(about = "Monte-Carlo simulator for long-horizon household financial plans")]
struct Args {
    /// Path to the scenario JSON file
    scenario: PathBuf,

    /// Path to a tax tables JSON file (default: built-in 2024 US tables)
    #[arg(short, long)]
    tax_tables: Option<PathBuf>,

    /// Number of Monte-Carlo trials to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    trials: usize,

    /// Base seed; overrides the scenario's seed when given
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write full per-trial results as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    let scenario_text = fs::read_to_string(&args.scenario)
        .wrap_err_with(|| format!("reading scenario file {}", args.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&scenario_text)
        .wrap_err_with(|| format!("parsing scenario file {}", args.scenario.display()))?;

    let tax_tables = match &args.tax_tables {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("reading tax tables file {}", path.display()))?;
            serde_json::from_str::<TaxTables>(&text)
                .wrap_err_with(|| format!("parsing tax tables file {}", path.display()))?
        }
        None => TaxTables::us_2024(),
    };

    let seed = args.seed.or(scenario.settings.seed).unwrap_or(0);

    tracing::info!(
        "Running {} trials of scenario '{}' with base seed {seed}",
        args.trials,
        scenario.name
    );
    let result = monte_carlo_run(&scenario, &tax_tables, args.trials, seed);
    println!("{}", result.summary());

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(path, json)
            .wrap_err_with(|| format!("writing results to {}", path.display()))?;
        tracing::info!("Wrote per-trial results to {}", path.display());
    }

    Ok(())
}
