use std::error::Error;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use frag_ana::{Preset, RunConfig};
use tracing_subscriber::EnvFilter;

use commands::{
    inspect::{self, InspectArgs},
    presets::{self, PresetsArgs},
    run::{self, RunArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "frag-sim", about = "First-hadron string fragmentation CLI")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate events and export the selected particles to CSV.
    Run(RunArgs),
    /// Print a readable first-hadron report for a few events.
    Inspect(InspectArgs),
    /// List the built-in presets or print one as YAML.
    Presets(PresetsArgs),
    /// Print version information.
    Version(VersionArgs),
}

/// Configuration source and overrides shared by `run` and `inspect`.
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// YAML run configuration; takes precedence over `--preset`.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Built-in configuration to start from.
    #[arg(long, default_value = "first-hadron")]
    pub preset: String,
    /// Number of events to generate.
    #[arg(long)]
    pub events: Option<usize>,
    /// Energy of each seed parton in GeV.
    #[arg(long)]
    pub energy: Option<f64>,
    /// Master seed of the event source.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ConfigArgs {
    /// Loads the base configuration and applies command line overrides.
    pub fn resolve(&self) -> Result<RunConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => self.preset.parse::<Preset>()?.config(),
        };
        if let Some(events) = self.events {
            config.events = events;
        }
        if let Some(energy) = self.energy {
            config.seed.energy = energy;
        }
        if let Some(seed) = self.seed {
            config.generator.master_seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Inspect(args) => inspect::run(&args),
        Command::Presets(args) => presets::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
