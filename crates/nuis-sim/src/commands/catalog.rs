use std::error::Error;

use clap::Args;
use nuis_meas::serde::to_canonical_json_bytes;
use nuis_meas::{builtin_catalog, find_sample};

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Print the full definition of one sample as JSON.
    #[arg(long)]
    pub name: Option<String>,
    /// Print every definition as a JSON array instead of names.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CatalogArgs) -> Result<(), Box<dyn Error>> {
    if let Some(name) = &args.name {
        let sample = find_sample(name)?;
        println!("{}", String::from_utf8(to_canonical_json_bytes(&sample)?)?);
        return Ok(());
    }
    let samples = builtin_catalog();
    if args.json {
        println!("{}", String::from_utf8(to_canonical_json_bytes(&samples)?)?);
        return Ok(());
    }
    for sample in samples {
        println!(
            "{:<40} enu=[{}, {}) GeV  {:?}",
            sample.name, sample.enu_range.min, sample.enu_range.max, sample.kind
        );
    }
    Ok(())
}
