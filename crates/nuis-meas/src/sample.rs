use nuis_core::{ErrorInfo, NuisError};
use nuis_sig::EnuRange;
use serde::{Deserialize, Serialize};

use crate::observable::ObservableSpec;
use crate::selector::SignalSelector;

/// How the event histogram turns into the published quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    /// Flux-averaged differential cross-section, divided by bin width.
    DifferentialXSec,
    /// Cross-section as a function of neutrino energy, divided by the flux
    /// in each bin.
    EnuXSec,
    /// Event counts normalised to the data.
    EventRate,
}

/// Secondary histogram filled alongside the main observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSpec {
    /// Label used in reports.
    pub name: String,
    /// Quantity to histogram.
    pub observable: ObservableSpec,
    /// Number of uniform bins.
    pub bins: usize,
    /// Lower edge.
    pub low: f64,
    /// Upper edge.
    pub high: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// Everything that distinguishes one measurement from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDefinition {
    /// Unique sample name.
    pub name: String,
    /// Axis titles in `; x; y` form.
    #[serde(default)]
    pub title: String,
    /// True beam energy window in GeV.
    pub enu_range: EnuRange,
    /// Normalisation scheme.
    pub kind: SampleKind,
    /// Multiplier converting per-nucleon to the published target unit.
    #[serde(default = "default_scale")]
    pub target_scale: f64,
    /// Multiplier applied to the reference values on load.
    #[serde(default = "default_scale")]
    pub data_scale: f64,
    /// Fractional normalisation uncertainty; zero disables the penalty.
    #[serde(default)]
    pub norm_error: f64,
    /// Ignore off-diagonal covariance terms.
    #[serde(default)]
    pub diagonal_only: bool,
    /// Signal definition.
    pub selector: SignalSelector,
    /// Histogrammed quantity.
    pub observable: ObservableSpec,
    /// Optional secondary histogram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorSpec>,
}

fn sample_error(name: &str, code: &str, message: &str) -> NuisError {
    NuisError::sample(code, name, message)
}

impl SampleDefinition {
    /// Checks scales, ranges and monitor binning.
    pub fn validate(&self) -> Result<(), NuisError> {
        if self.name.trim().is_empty() {
            return Err(NuisError::Sample(ErrorInfo::new(
                "sample-name",
                "sample name must not be empty",
            )));
        }
        for (label, value) in [
            ("target_scale", self.target_scale),
            ("data_scale", self.data_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(sample_error(
                    &self.name,
                    "invalid-scale",
                    "scales must be finite and positive",
                )
                .with_context("field", label));
            }
        }
        if !self.norm_error.is_finite() || self.norm_error < 0.0 {
            return Err(sample_error(
                &self.name,
                "invalid-norm-error",
                "normalisation error must be finite and non-negative",
            ));
        }
        let range = self.enu_range;
        if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
            return Err(sample_error(
                &self.name,
                "invalid-enu-range",
                "energy range needs finite bounds with min <= max",
            ));
        }
        if range.is_unbounded() && range.min != 0.0 {
            tracing::warn!(
                sample = %self.name,
                enu = range.min,
                "equal energy bounds disable the beam energy cut"
            );
        }
        if let Some(monitor) = &self.monitor {
            if monitor.bins == 0 || !(monitor.high > monitor.low) {
                return Err(sample_error(
                    &self.name,
                    "invalid-monitor",
                    "monitor needs bins > 0 and high > low",
                ));
            }
        }
        Ok(())
    }
}
