//! Runs every sample of a configuration over one event file.

use std::fs;

use nuis_core::{InteractionRecord, NuisError};

use crate::config::RunConfig;
use crate::data::ReferenceData;
use crate::events::load_records;
use crate::measurement::{Chi2Options, Measurement};
use crate::report::MeasurementReport;

/// Evaluates all configured samples against already loaded records.
pub fn run_samples(
    config: &RunConfig,
    records: &[InteractionRecord],
) -> Result<Vec<MeasurementReport>, NuisError> {
    let mut reports = Vec::with_capacity(config.samples.len());
    for entry in &config.samples {
        let definition = entry.resolve()?;
        let data = ReferenceData::load(&entry.data)?;
        let mut measurement = Measurement::new(definition, data, config.constants.clone())?;
        measurement.process_all(records, config.threads)?;
        let normalisation = entry.normalisation.as_ref().unwrap_or(&config.normalisation);
        let prediction = measurement.finalise(normalisation)?;
        let options = Chi2Options {
            shape_only: config.shape_only,
            norm: entry.norm,
        };
        let report = measurement.report(&prediction, options, &config.generator)?;
        tracing::info!(
            sample = %report.name,
            chi2 = report.chi2.chi2,
            ndof = report.chi2.ndof,
            "sample finished"
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Loads the event file, evaluates every sample and writes the reports
/// when an output directory is configured.
pub fn execute(config: &RunConfig) -> Result<Vec<MeasurementReport>, NuisError> {
    let records = load_records(&config.events)?;
    let reports = run_samples(config, &records)?;
    if let Some(dir) = &config.output {
        fs::create_dir_all(dir).map_err(|err| NuisError::io("output-dir", dir, err))?;
        for report in &reports {
            report.write_json(&dir.join(format!("{}.json", report.name)))?;
        }
    }
    Ok(reports)
}
