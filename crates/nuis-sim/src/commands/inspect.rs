use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use nuis_core::PhysicsConstants;
use nuis_meas::serde::{from_yaml_str, to_canonical_json_bytes};
use nuis_meas::{builtin_catalog, find_sample, load_records};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Interaction record file (JSON array or JSON lines).
    #[arg(long)]
    pub events: PathBuf,
    /// Restrict to one catalog sample.
    #[arg(long)]
    pub sample: Option<String>,
    /// YAML file with physical constants.
    #[arg(long)]
    pub constants: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SampleCounts {
    name: String,
    processed: usize,
    selected: usize,
    with_observable: usize,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let constants = match &args.constants {
        Some(path) => {
            let constants: PhysicsConstants = from_yaml_str(&fs::read_to_string(path)?)?;
            constants.validate()?;
            constants
        }
        None => PhysicsConstants::default(),
    };
    let records = load_records(&args.events)?;
    let samples = match &args.sample {
        Some(name) => vec![find_sample(name)?],
        None => builtin_catalog(),
    };

    let mut counts = Vec::with_capacity(samples.len());
    for sample in &samples {
        let mut selected = 0;
        let mut with_observable = 0;
        for record in &records {
            if !sample.selector.select(record, sample.enu_range, &constants) {
                continue;
            }
            selected += 1;
            if sample.observable.evaluate(record, &constants).is_some() {
                with_observable += 1;
            }
        }
        tracing::debug!(sample = %sample.name, selected, "inspected sample");
        counts.push(SampleCounts {
            name: sample.name.clone(),
            processed: records.len(),
            selected,
            with_observable,
        });
    }
    println!("{}", String::from_utf8(to_canonical_json_bytes(&counts)?)?);
    Ok(())
}
