use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    catalog::{self, CatalogArgs},
    inspect::{self, InspectArgs},
    run::{self, RunArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "nuis-sim", about = "Neutrino cross-section measurement driver")]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in samples or print one definition.
    Catalog(CatalogArgs),
    /// Evaluate the samples of a run configuration against an event file.
    Run(RunArgs),
    /// Count signal events per sample without reference data.
    Inspect(InspectArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    match cli.command {
        Command::Catalog(args) => catalog::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Inspect(args) => inspect::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
