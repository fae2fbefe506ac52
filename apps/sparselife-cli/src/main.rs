use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sparselife_kernel::{Outcome, Pattern, Rule, Simulation, SimulationConfig, neighbour_coords, tick};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sparselife-cli", about = "Run sparse N-dimensional Life patterns")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run a pattern until it settles or the generation limit is reached
    Run {
        /// Pattern file (.json, .yaml or .yml)
        #[arg(short, long)]
        pattern: PathBuf,
        /// Maximum number of generations
        #[arg(short, long, default_value = "100")]
        generations: u64,
        /// Rule in B/S notation; overrides the pattern's rule
        #[arg(short, long)]
        rule: Option<Rule>,
        /// Keep running after an oscillation is detected
        #[arg(long)]
        ignore_cycles: bool,
    },
    /// Advance a pattern by one generation and print the result
    Step {
        /// Pattern file (.json, .yaml or .yml)
        #[arg(short, long)]
        pattern: PathBuf,
    },
    /// List the neighbourhood of a coordinate key such as "3,4"
    Neighbours {
        key: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("sparselife-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("default rule: {}", Rule::conway());
            println!("default config: {:?}", SimulationConfig::default());
        }
        Commands::Run {
            pattern,
            generations,
            rule,
            ignore_cycles,
        } => {
            let loaded = Pattern::load(&pattern)
                .with_context(|| format!("failed to load pattern {}", pattern.display()))?;
            let rule = rule.unwrap_or_else(|| loaded.rule());
            let config = SimulationConfig {
                max_generations: generations,
                stop_on_cycle: !ignore_cycles,
                ..SimulationConfig::default()
            };
            let world = loaded.world();
            tracing::info!(
                name = loaded.name.as_deref().unwrap_or("unnamed"),
                population = world.population(),
                %rule,
                "starting run"
            );
            println!("generation 0: population {}", world.population());

            let mut sim = Simulation::with_rule(world, rule, config);
            tracing::debug!(config = ?sim.config(), "simulation configured");
            let report = sim.run_observed(|s, outcome| {
                let suffix = match outcome {
                    Outcome::Running => String::new(),
                    other => format!(" ({other})"),
                };
                println!(
                    "generation {}: population {}{suffix}",
                    s.generation(),
                    s.world().population()
                );
            });
            println!("outcome: {}", report.outcome);
            println!("{}", serde_json::to_string_pretty(sim.world())?);
        }
        Commands::Step { pattern } => {
            let loaded = Pattern::load(&pattern)
                .with_context(|| format!("failed to load pattern {}", pattern.display()))?;
            let next = match loaded.rule {
                Some(rule) => sparselife_kernel::tick_with(&loaded.world(), &rule),
                None => tick(&loaded.world()),
            };
            println!("{}", serde_json::to_string_pretty(&next)?);
        }
        Commands::Neighbours { key } => {
            let coord = sparselife_common::parse(&key)
                .with_context(|| format!("cannot read coordinate {key:?}"))?;
            for n in neighbour_coords(&coord) {
                println!("{}", sparselife_common::format(&n));
            }
        }
    }

    Ok(())
}
