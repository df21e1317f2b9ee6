//! Generic measurement: one signal definition, one observable and one set of
//! reference data, filled from interaction records and compared through the
//! data covariance.

use std::collections::BTreeMap;

use nuis_core::{ErrorInfo, InteractionRecord, NuisError, PhysicsConstants, RunProvenance};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::covariance::Covariance;
use crate::data::ReferenceData;
use crate::hash::{round_f64, stable_hash_string};
use crate::histogram::Histogram1D;
use crate::report::{Chi2Result, MeasurementReport};
use crate::sample::{SampleDefinition, SampleKind};

/// Units of the generator event rate.
pub const XSEC_UNIT_CM2: f64 = 1e-38;

fn norm_error(code: &str, message: &str) -> NuisError {
    NuisError::Config(ErrorInfo::new(code, message))
}

/// Generator-side normalisation of the processed sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorNormalisation {
    /// Flux-integrated event rate of the generated sample, in 1e-38 cm^2
    /// times flux units.
    pub event_rate: f64,
    /// Integral of the flux over the sampled energy range.
    pub flux_integral: f64,
    /// Number of generated events. Defaults to the number processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_events: Option<u64>,
    /// Flux integrated over each reference bin; required for
    /// energy-dependent cross-sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_flux: Option<Vec<f64>>,
}

impl GeneratorNormalisation {
    /// Checks that the scalars are usable.
    pub fn validate(&self) -> Result<(), NuisError> {
        if !self.event_rate.is_finite() || self.event_rate < 0.0 {
            return Err(norm_error(
                "invalid-event-rate",
                "event rate must be finite and non-negative",
            ));
        }
        if !self.flux_integral.is_finite() || self.flux_integral <= 0.0 {
            return Err(norm_error(
                "invalid-flux",
                "flux integral must be finite and positive",
            ));
        }
        if self.total_events == Some(0) {
            return Err(norm_error(
                "invalid-total-events",
                "total events must be positive",
            ));
        }
        Ok(())
    }
}

/// Options controlling the data comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Chi2Options {
    /// Scale the prediction to the data integral before comparing.
    #[serde(default)]
    pub shape_only: bool,
    /// Free normalisation applied to the prediction. When set and the sample
    /// carries a normalisation error, a Gaussian penalty is added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<f64>,
}

/// Normalised prediction ready for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Prediction binned like the reference data.
    pub histogram: Histogram1D,
    /// Factor applied to raw event counts before any width division.
    pub scale_factor: f64,
    /// Area-normalised monitor histogram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<Histogram1D>,
}

/// Counters returned from a processing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProcessSummary {
    /// Records seen in this pass.
    pub processed: u64,
    /// Records passing the signal definition.
    pub selected: u64,
    /// Selected records whose observable landed inside the binning.
    pub in_range: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Outcome {
    signal: bool,
    value: Option<f64>,
    monitor: Option<f64>,
}

/// A measurement accumulating signal events from interaction records.
#[derive(Debug, Clone)]
pub struct Measurement {
    definition: SampleDefinition,
    data: ReferenceData,
    covariance: Covariance,
    constants: PhysicsConstants,
    events: Histogram1D,
    monitor: Option<Histogram1D>,
    processed: u64,
    selected: u64,
}

impl Measurement {
    /// Builds a measurement from its definition and reference data. The data
    /// scale of the definition is applied here.
    pub fn new(
        definition: SampleDefinition,
        data: ReferenceData,
        constants: PhysicsConstants,
    ) -> Result<Self, NuisError> {
        definition.validate()?;
        constants.validate()?;
        let data = data.scaled(definition.data_scale);
        let covariance = data.build_covariance(definition.diagonal_only)?;
        let events = Histogram1D::new(data.bin_edges.clone())?;
        let monitor = match &definition.monitor {
            Some(spec) => Some(Histogram1D::uniform(spec.bins, spec.low, spec.high)?),
            None => None,
        };
        tracing::info!(
            sample = %definition.name,
            bins = data.bins(),
            diagonal = definition.diagonal_only,
            "measurement ready"
        );
        Ok(Self {
            definition,
            data,
            covariance,
            constants,
            events,
            monitor,
            processed: 0,
            selected: 0,
        })
    }

    /// Sample definition.
    pub fn definition(&self) -> &SampleDefinition {
        &self.definition
    }

    /// Reference data after the data scale.
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Raw signal event histogram.
    pub fn events(&self) -> &Histogram1D {
        &self.events
    }

    /// Records processed so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Records selected so far.
    pub fn selected(&self) -> u64 {
        self.selected
    }

    fn evaluate(&self, record: &InteractionRecord) -> Outcome {
        let signal =
            self.definition
                .selector
                .select(record, self.definition.enu_range, &self.constants);
        if !signal {
            return Outcome {
                signal,
                value: None,
                monitor: None,
            };
        }
        Outcome {
            signal,
            value: self.definition.observable.evaluate(record, &self.constants),
            monitor: self
                .definition
                .monitor
                .as_ref()
                .and_then(|spec| spec.observable.evaluate(record, &self.constants)),
        }
    }

    // Selected records without an observable value are kept as underflow so
    // the selected count and the histogram total agree.
    fn apply(&mut self, outcome: Outcome, summary: &mut ProcessSummary) {
        self.processed += 1;
        summary.processed += 1;
        if !outcome.signal {
            return;
        }
        self.selected += 1;
        summary.selected += 1;
        match outcome.value {
            Some(value) => {
                if self.events.find_bin(value).is_some() {
                    summary.in_range += 1;
                }
                self.events.fill(value, 1.0);
            }
            None => self.events.underflow += 1.0,
        }
        if let (Some(hist), Some(value)) = (self.monitor.as_mut(), outcome.monitor) {
            hist.fill(value, 1.0);
        }
    }

    /// Validates and processes a single record. Returns whether it was
    /// signal.
    pub fn process(&mut self, record: &InteractionRecord) -> Result<bool, NuisError> {
        record.validate()?;
        let outcome = self.evaluate(record);
        let mut summary = ProcessSummary::default();
        self.apply(outcome, &mut summary);
        Ok(outcome.signal)
    }

    /// Processes records on a rayon pool of `threads` workers. Results are
    /// applied in input order, so the histogram does not depend on
    /// scheduling.
    pub fn process_all(
        &mut self,
        records: &[InteractionRecord],
        threads: usize,
    ) -> Result<ProcessSummary, NuisError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .map_err(|err| {
                NuisError::Config(
                    ErrorInfo::new("thread-pool", "failed to build worker pool")
                        .with_hint(err.to_string()),
                )
            })?;

        let this = &*self;
        let results: Result<Vec<(usize, Outcome)>, NuisError> = pool.install(|| {
            records
                .par_iter()
                .enumerate()
                .map(|(index, record)| {
                    record
                        .validate()
                        .map_err(|err| err.with_context("record", index.to_string()))?;
                    Ok((index, this.evaluate(record)))
                })
                .collect()
        });
        let mut ordered = results?;
        ordered.sort_by_key(|(index, _)| *index);

        let mut summary = ProcessSummary::default();
        for (_, outcome) in ordered {
            self.apply(outcome, &mut summary);
        }
        tracing::info!(
            sample = %self.definition.name,
            processed = summary.processed,
            selected = summary.selected,
            in_range = summary.in_range,
            "processed records"
        );
        Ok(summary)
    }

    /// Converts the accumulated events into the published quantity.
    pub fn finalise(&self, norm: &GeneratorNormalisation) -> Result<Prediction, NuisError> {
        norm.validate()?;
        let total = norm.total_events.unwrap_or(self.processed);
        if total == 0 {
            return Err(norm_error(
                "no-events",
                "cannot normalise a measurement with no processed records",
            ));
        }
        let scale_factor = norm.event_rate * XSEC_UNIT_CM2 / total as f64 / norm.flux_integral;

        let mut histogram = self.events.clone();
        match self.definition.kind {
            SampleKind::DifferentialXSec => {
                histogram.scale(scale_factor * self.definition.target_scale);
                histogram.scale_by_width();
            }
            SampleKind::EnuXSec => {
                let bin_flux = norm.bin_flux.as_ref().ok_or_else(|| {
                    NuisError::Config(
                        ErrorInfo::new("missing-bin-flux", "energy-binned samples need bin_flux")
                            .with_context("sample", self.definition.name.clone()),
                    )
                })?;
                if bin_flux.len() != histogram.bins() || bin_flux.iter().any(|flux| *flux <= 0.0) {
                    return Err(NuisError::Config(
                        ErrorInfo::new("invalid-bin-flux", "bin_flux must be positive per bin")
                            .with_context("bins", histogram.bins().to_string())
                            .with_context("entries", bin_flux.len().to_string()),
                    ));
                }
                let base = norm.event_rate * XSEC_UNIT_CM2 / total as f64
                    * self.definition.target_scale;
                for (index, flux) in bin_flux.iter().enumerate() {
                    let factor = base / flux;
                    histogram.contents[index] *= factor;
                    histogram.sumw2[index] *= factor * factor;
                }
            }
            SampleKind::EventRate => {
                let predicted = histogram.integral();
                let observed: f64 = self.data.values.iter().sum();
                if predicted > 0.0 {
                    histogram.scale(observed / predicted);
                }
            }
        }

        let monitor = self.monitor.as_ref().map(|hist| {
            let mut normalised = hist.clone();
            let area = normalised.integral();
            if area > 0.0 {
                normalised.scale(1.0 / area);
            }
            normalised
        });

        tracing::debug!(
            sample = %self.definition.name,
            scale_factor,
            "finalised prediction"
        );
        Ok(Prediction {
            histogram,
            scale_factor,
            monitor,
        })
    }

    /// Chi-square of `prediction` against the reference data.
    pub fn chi2(
        &self,
        prediction: &Prediction,
        options: Chi2Options,
    ) -> Result<Chi2Result, NuisError> {
        let mut values = prediction.histogram.contents.clone();
        if let Some(norm) = options.norm {
            if !norm.is_finite() || norm <= 0.0 {
                return Err(norm_error("invalid-norm", "normalisation must be positive"));
            }
            values.iter_mut().for_each(|value| *value *= norm);
        }

        let bins = self.data.bins();
        if options.shape_only {
            let predicted = width_integral(&values, &self.data.bin_edges);
            let observed = width_integral(&self.data.values, &self.data.bin_edges);
            if predicted > 0.0 {
                values
                    .iter_mut()
                    .for_each(|value| *value *= observed / predicted);
            }
        }

        let mut chi2 = self.covariance.chi2(&self.data.values, &values)?;
        let mut penalty = 0.0;
        if !options.shape_only && self.definition.norm_error > 0.0 {
            if let Some(norm) = options.norm {
                penalty = ((1.0 - norm) / self.definition.norm_error).powi(2);
                chi2 += penalty;
            }
        }
        let ndof = if options.shape_only {
            bins.saturating_sub(1)
        } else {
            bins
        };
        Ok(Chi2Result {
            chi2,
            penalty,
            ndof,
        })
    }

    /// Assembles the hashed report for a finalised prediction.
    pub fn report(
        &self,
        prediction: &Prediction,
        options: Chi2Options,
        generator: &str,
    ) -> Result<MeasurementReport, NuisError> {
        let chi2 = self.chi2(prediction, options)?;
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            "nuis-meas".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        let provenance = RunProvenance {
            input_hash: stable_hash_string(&(self.processed, &self.events))?,
            data_hash: stable_hash_string(&self.data)?,
            constants_hash: stable_hash_string(&self.constants)?,
            generator: generator.to_string(),
            tool_versions,
        };
        let round_all = |values: &[f64]| values.iter().copied().map(round_f64).collect::<Vec<_>>();
        MeasurementReport {
            schema: Default::default(),
            name: self.definition.name.clone(),
            title: self.definition.title.clone(),
            kind: self.definition.kind,
            bin_edges: self.data.bin_edges.clone(),
            data: round_all(&self.data.values),
            data_errors: round_all(&self.data.errors),
            prediction: round_all(&prediction.histogram.contents),
            monitor: prediction.monitor.clone(),
            processed: self.processed,
            selected: self.selected,
            chi2: Chi2Result {
                chi2: round_f64(chi2.chi2),
                penalty: round_f64(chi2.penalty),
                ndof: chi2.ndof,
            },
            shape_only: options.shape_only,
            provenance,
            report_hash: String::new(),
        }
        .with_hash()
    }
}

fn width_integral(values: &[f64], edges: &[f64]) -> f64 {
    values
        .iter()
        .zip(edges.windows(2))
        .map(|(value, pair)| value * (pair[1] - pair[0]))
        .sum()
}
