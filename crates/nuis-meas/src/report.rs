use std::fs;
use std::path::Path;

use nuis_core::{NuisError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::histogram::Histogram1D;
use crate::sample::SampleKind;
use crate::serde::to_canonical_json_bytes;

/// Goodness of fit of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chi2Result {
    /// Total chi-square including any normalisation penalty.
    pub chi2: f64,
    /// Normalisation penalty contribution.
    pub penalty: f64,
    /// Degrees of freedom.
    pub ndof: usize,
}

/// Serialisable summary of a finalised measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReport {
    /// Schema of this payload.
    pub schema: SchemaVersion,
    /// Sample name.
    pub name: String,
    /// Axis titles.
    pub title: String,
    /// Normalisation scheme.
    pub kind: SampleKind,
    /// Bin edges.
    pub bin_edges: Vec<f64>,
    /// Reference values after the data scale.
    pub data: Vec<f64>,
    /// Reference uncertainties.
    pub data_errors: Vec<f64>,
    /// Normalised prediction.
    pub prediction: Vec<f64>,
    /// Area-normalised monitor histogram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<Histogram1D>,
    /// Records seen.
    pub processed: u64,
    /// Records passing the signal definition.
    pub selected: u64,
    /// Fit quality.
    pub chi2: Chi2Result,
    /// Whether the prediction was shape-normalised before the comparison.
    pub shape_only: bool,
    /// Input identity.
    pub provenance: RunProvenance,
    /// sha256 of the report with this field empty.
    pub report_hash: String,
}

impl MeasurementReport {
    /// Fills [`MeasurementReport::report_hash`].
    pub fn with_hash(mut self) -> Result<Self, NuisError> {
        self.report_hash = String::new();
        self.report_hash = stable_hash_string(&self)?;
        Ok(self)
    }

    /// Writes the canonical JSON encoding to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), NuisError> {
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| NuisError::io("report-write", path, err))
    }
}
