//! Cooperation Evolution Simulation
//!
//! Runs the yellow/green cooperation model and writes one round table per run.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coop_core::config::{default_config_toml, DEFAULT_TUNING_PATH};
use coop_core::output::population_report;
use coop_core::{run_replicates, Config, SimError};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "coop_evolution")]
#[command(about = "Evolution of in-group and out-group cooperation between two populations")]
struct Args {
    /// Tuning file (TOML); defaults are used if it does not exist
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds per run
    #[arg(long)]
    rounds: Option<u64>,

    /// Number of independent runs
    #[arg(long)]
    runs: Option<u32>,

    /// Directory for round tables and summaries
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print every agent of the final populations
    #[arg(long)]
    print_population: bool,

    /// Print the default tuning file and exit
    #[arg(long)]
    print_default_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.simulation.rounds = rounds;
        }
        if let Some(runs) = self.runs {
            config.simulation.runs = runs;
        }
        if let Some(ref dir) = self.output_dir {
            config.simulation.output_dir = dir.clone();
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = Config::load_or_default(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    println!("Cooperation Evolution");
    println!("=====================");
    println!("Seed: {}", config.simulation.seed);
    println!("Rounds: {}", config.simulation.rounds);
    println!("Runs: {}", config.simulation.runs);
    println!(
        "Population: {} per group, {} culled per round",
        config.population.size, config.population.cull_count
    );
    println!("Output: {}", config.simulation.output_dir.display());
    println!();

    let summaries = run_replicates(&config)?;

    if args.print_population {
        for summary in &summaries {
            println!();
            println!("{}", population_report(summary));
            println!("Final population:");
            for population in &summary.populations {
                for agent in &population.agents {
                    println!("  {}", agent);
                }
            }
        }
    }

    println!();
    println!(
        "Simulation complete. Ran {} run(s) of {} rounds.",
        summaries.len(),
        config.simulation.rounds
    );
    Ok(())
}
