#![deny(missing_docs)]
#![doc = "Data-driven neutrino cross-section measurements: signal selection, binned predictions, covariance comparisons and hashed reports."]

/// Built-in sample definitions.
pub mod catalog;
/// YAML run configuration.
pub mod config;
/// Covariance matrices and chi-square evaluation.
pub mod covariance;
/// Reference data loading.
pub mod data;
/// Interaction record files.
pub mod events;
/// Canonical hashing helpers.
pub mod hash;
/// Fixed-edge histograms.
pub mod histogram;
/// The generic measurement entity.
pub mod measurement;
/// Histogrammed quantities.
pub mod observable;
/// Report payloads.
pub mod report;
/// Configuration-driven runs.
pub mod runner;
/// Sample metadata.
pub mod sample;
/// Signal definitions selectable from configuration.
pub mod selector;
/// Canonical JSON serde helpers.
pub mod serde;

pub use catalog::{builtin_catalog, find_sample, sample_names};
pub use config::{load_run_config, RunConfig, SampleEntry};
pub use covariance::Covariance;
pub use data::{CovarianceSpec, DataSource, MatrixKind, ReferenceData};
pub use events::{load_records, parse_records};
pub use histogram::Histogram1D;
pub use measurement::{
    Chi2Options, GeneratorNormalisation, Measurement, Prediction, ProcessSummary,
};
pub use observable::{MassWindow, ObservableSpec, PairMassWindow, RecoilKind};
pub use report::{Chi2Result, MeasurementReport};
pub use runner::{execute, run_samples};
pub use sample::{MonitorSpec, SampleDefinition, SampleKind};
pub use selector::SignalSelector;
