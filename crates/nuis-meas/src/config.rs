//! YAML run configuration.
//!
//! Relative paths (events, reference data, output directory) are resolved
//! against the directory containing the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use nuis_core::{ErrorInfo, NuisError, PhysicsConstants};
use nuis_sig::EnuRange;
use serde::{Deserialize, Serialize};

use crate::catalog::find_sample;
use crate::data::DataSource;
use crate::measurement::GeneratorNormalisation;
use crate::sample::SampleDefinition;
use crate::serde::from_yaml_str;

fn default_threads() -> usize {
    1
}

fn default_generator() -> String {
    "unknown".to_string()
}

/// One sample to evaluate within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEntry {
    /// Name of a built-in sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inline definition, used instead of a catalog name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<SampleDefinition>,
    /// Reference data files.
    pub data: DataSource,
    /// Replaces the energy window of the definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enu_range: Option<EnuRange>,
    /// Replaces the run-level normalisation for this sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalisation: Option<GeneratorNormalisation>,
    /// Free normalisation applied to the prediction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<f64>,
}

impl SampleEntry {
    /// Resolves the sample definition, applying any energy override.
    pub fn resolve(&self) -> Result<SampleDefinition, NuisError> {
        let mut definition = match (&self.name, &self.definition) {
            (Some(name), None) => find_sample(name)?,
            (None, Some(definition)) => definition.clone(),
            (Some(name), Some(_)) => {
                return Err(NuisError::Config(
                    ErrorInfo::new(
                        "ambiguous-sample",
                        "sample entry has both a name and an inline definition",
                    )
                    .with_context("name", name.clone()),
                ))
            }
            (None, None) => {
                return Err(NuisError::Config(
                    ErrorInfo::new("missing-sample", "sample entry needs a name or a definition")
                        .with_hint("set `name` to a catalog sample or provide `definition`"),
                ))
            }
        };
        if let Some(range) = self.enu_range {
            definition.enu_range = range;
        }
        definition.validate()?;
        Ok(definition)
    }
}

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Physical constants; the published values when omitted.
    #[serde(default)]
    pub constants: PhysicsConstants,
    /// Worker threads for the event loop.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Compare shapes only.
    #[serde(default)]
    pub shape_only: bool,
    /// Generator label written to report provenance.
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Normalisation of the event file.
    pub normalisation: GeneratorNormalisation,
    /// Interaction record file.
    pub events: PathBuf,
    /// Samples to evaluate.
    pub samples: Vec<SampleEntry>,
    /// Directory receiving one JSON report per sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Directory the configuration was loaded from.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn config_error(code: &str, message: &str) -> NuisError {
    NuisError::Config(ErrorInfo::new(code, message))
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text without touching the
    /// filesystem. Paths stay as written.
    pub fn from_yaml_str(text: &str) -> Result<Self, NuisError> {
        let config: RunConfig = from_yaml_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks counts and nested definitions.
    pub fn validate(&self) -> Result<(), NuisError> {
        if self.threads == 0 {
            return Err(config_error("invalid-threads", "threads must be at least 1"));
        }
        if self.samples.is_empty() {
            return Err(config_error("no-samples", "configuration lists no samples"));
        }
        self.constants.validate()?;
        self.normalisation.validate()?;
        for entry in &self.samples {
            entry.resolve()?;
            if let Some(norm) = &entry.normalisation {
                norm.validate()?;
            }
            if let Some(value) = entry.norm {
                if !value.is_finite() || value <= 0.0 {
                    return Err(config_error(
                        "invalid-norm",
                        "sample norm must be finite and positive",
                    ));
                }
            }
        }
        Ok(())
    }

    fn rebase(&mut self, base: &Path) {
        self.events = resolve_path(base, &self.events);
        if let Some(output) = self.output.as_mut() {
            *output = resolve_path(base, output);
        }
        for entry in &mut self.samples {
            entry.data.values = resolve_path(base, &entry.data.values);
            if let Some(matrix) = entry.data.matrix.as_mut() {
                *matrix = resolve_path(base, matrix);
            }
        }
        self.base_dir = base.to_path_buf();
    }
}

/// Loads a configuration file and rebases its relative paths.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, NuisError> {
    let config_path = path.as_ref();
    let text = fs::read_to_string(config_path)
        .map_err(|err| NuisError::io("config-read", config_path, err))?;
    let mut config = RunConfig::from_yaml_str(&text)?;
    let base = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    config.rebase(&base);
    tracing::debug!(
        path = %config_path.display(),
        samples = config.samples.len(),
        threads = config.threads,
        "loaded run configuration"
    );
    Ok(config)
}
