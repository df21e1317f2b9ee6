use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use nuis_meas::{execute, load_run_config};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Overrides the configured worker count.
    #[arg(long)]
    pub threads: Option<usize>,
    /// Compare shapes only, whatever the configuration says.
    #[arg(long)]
    pub shape_only: bool,
    /// Overrides the configured report directory.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_run_config(&args.config)?;
    if let Some(threads) = args.threads {
        config.threads = threads.max(1);
    }
    if args.shape_only {
        config.shape_only = true;
    }
    if let Some(out) = &args.out {
        config.output = Some(out.clone());
    }
    let reports = execute(&config)?;
    for report in &reports {
        println!(
            "{:<40} chi2={:.4} ndof={} selected={}/{}",
            report.name, report.chi2.chi2, report.chi2.ndof, report.selected, report.processed
        );
    }
    Ok(())
}
