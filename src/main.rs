use anyhow::Context;
use clap::{Parser, Subcommand};
use reefsim_lib::config::EngineConfig;
use reefsim_lib::evaluator::Evaluator;
use reefsim_lib::observer::HeuristicNarrator;
use reefsim_lib::scenario::Scenario;
use reefsim_lib::service::{MemoryStore, SimulationService};
use reefsim_lib::state::SimulationContext;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "reefsim", about = "Reef ecosystem simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario for a fixed number of ticks and print the evaluation.
    Run {
        /// Scenario TOML; the built-in kelp forest is used when omitted.
        #[arg(long)]
        scenario: Option<PathBuf>,
        #[arg(long, default_value_t = 50)]
        steps: u32,
        /// Wall-clock limit for the attempt, in seconds.
        #[arg(long, default_value_t = 300)]
        time_limit_secs: u64,
    },
    /// Check a scenario against the viability rules without running it.
    Validate {
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
}

fn load_scenario(path: Option<&PathBuf>) -> anyhow::Result<Scenario> {
    match path {
        Some(path) => Scenario::load(path),
        None => Ok(Scenario::sample()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    reefsim_lib::init_logging();
    let cli = Cli::parse();
    let config = EngineConfig::load();

    match cli.command {
        Command::Run {
            scenario,
            steps,
            time_limit_secs,
        } => {
            let scenario = load_scenario(scenario.as_ref())?;
            let mut service = SimulationService::new(config.clone(), MemoryStore::default());
            let context =
                SimulationContext::new("cli", Duration::from_secs(time_limit_secs));
            let id = service.begin(context, scenario.species, scenario.environment)?;

            for _ in 0..steps {
                let score = service.tick(id)?;
                tracing::debug!(score, "tick");
            }

            let report = Evaluator::new(config)
                .evaluate(service.engine(id)?, &HeuristicNarrator)
                .await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("rendering report")?
            );
        }
        Command::Validate { scenario } => {
            let scenario = load_scenario(scenario.as_ref())?;
            match reefsim_lib::validator::validate(
                &scenario.species,
                &scenario.environment,
                &config.validator,
            ) {
                Ok(()) => println!("scenario is viable"),
                Err(e) => {
                    println!("{}: {} {}", e.code(), e, e.details());
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
