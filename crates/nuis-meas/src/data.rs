//! Reference data: binned central values with their uncertainty model.
//!
//! Two on-disk layouts are understood. YAML documents deserialize straight
//! into [`ReferenceData`]. Column text follows the layout of published
//! data releases: one row per bin holding `low_edge value error`, closed by
//! a row whose first column is the upper edge of the last bin. Columns may
//! be separated by commas or whitespace and `#` starts a comment.

use std::fs;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};
use nuis_core::{ErrorInfo, NuisError};
use serde::{Deserialize, Serialize};

use crate::covariance::Covariance;
use crate::histogram::validate_edges;
use crate::serde::from_yaml_str;

fn wrap_csv(code: &str, err: csv::Error) -> NuisError {
    NuisError::Data(ErrorInfo::new(code, "failed to parse column data").with_hint(err.to_string()))
}

/// Uncertainty model attached to the central values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CovarianceSpec {
    /// Uncorrelated bins using the per-bin errors.
    #[default]
    Diagonal,
    /// Correlation matrix scaled by the per-bin errors.
    Correlation {
        /// Row-major correlation coefficients.
        matrix: Vec<Vec<f64>>,
    },
    /// Explicit covariance in the units of the values squared.
    Full {
        /// Row-major covariance.
        matrix: Vec<Vec<f64>>,
    },
}

/// Published values of one measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Bin edges, one more than the number of values.
    pub bin_edges: Vec<f64>,
    /// Central value per bin.
    pub values: Vec<f64>,
    /// Total uncertainty per bin.
    pub errors: Vec<f64>,
    /// Correlation structure.
    #[serde(default)]
    pub covariance: CovarianceSpec,
}

/// Files making up one reference data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// YAML document or column text with edges, values and errors.
    pub values: PathBuf,
    /// Optional square matrix in column text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<PathBuf>,
    /// How to interpret `matrix`.
    #[serde(default)]
    pub matrix_kind: MatrixKind,
}

/// Interpretation of a matrix file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Correlation coefficients.
    #[default]
    Correlation,
    /// Covariance entries.
    Covariance,
}

impl ReferenceData {
    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.values.len()
    }

    /// Checks that edges, values, errors and matrix agree in size and are
    /// finite.
    pub fn validate(&self) -> Result<(), NuisError> {
        validate_edges(&self.bin_edges)?;
        let bins = self.values.len();
        if self.bin_edges.len() != bins + 1 || self.errors.len() != bins {
            return Err(NuisError::Data(
                ErrorInfo::new("data-shape", "edges, values and errors disagree in length")
                    .with_context("edges", self.bin_edges.len().to_string())
                    .with_context("values", bins.to_string())
                    .with_context("errors", self.errors.len().to_string()),
            ));
        }
        if let Some(index) = self
            .values
            .iter()
            .chain(self.errors.iter())
            .position(|value| !value.is_finite())
        {
            return Err(NuisError::Data(
                ErrorInfo::new("data-non-finite", "reference data contains non-finite entries")
                    .with_context("index", index.to_string()),
            ));
        }
        match &self.covariance {
            CovarianceSpec::Diagonal => Ok(()),
            CovarianceSpec::Correlation { matrix } | CovarianceSpec::Full { matrix } => {
                if matrix.len() != bins || matrix.iter().any(|row| row.len() != bins) {
                    return Err(NuisError::Data(
                        ErrorInfo::new("matrix-shape", "matrix must be square with one row per bin")
                            .with_context("bins", bins.to_string())
                            .with_context("rows", matrix.len().to_string()),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Multiplies values, errors and any explicit covariance by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for value in self.values.iter_mut() {
            *value *= factor;
        }
        for err in self.errors.iter_mut() {
            *err *= factor.abs();
        }
        if let CovarianceSpec::Full { matrix } = &mut self.covariance {
            for entry in matrix.iter_mut().flatten() {
                *entry *= factor * factor;
            }
        }
        self
    }

    /// Builds the covariance described by [`ReferenceData::covariance`].
    pub fn build_covariance(&self, diagonal_only: bool) -> Result<Covariance, NuisError> {
        self.validate()?;
        let covariance = match &self.covariance {
            CovarianceSpec::Diagonal => Covariance::from_errors(&self.errors)?,
            CovarianceSpec::Correlation { matrix } => {
                Covariance::from_correlation(matrix, &self.errors)?
            }
            CovarianceSpec::Full { matrix } => Covariance::from_rows(matrix)?,
        };
        if diagonal_only {
            covariance.diagonal_only()
        } else {
            Ok(covariance)
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, NuisError> {
        let data: ReferenceData = from_yaml_str(text)?;
        data.validate()?;
        Ok(data)
    }

    /// Parses column text with a diagonal uncertainty model.
    pub fn from_columns_str(text: &str) -> Result<Self, NuisError> {
        let rows = parse_rows(text)?;
        let Some((last, body)) = rows.split_last() else {
            return Err(NuisError::Data(ErrorInfo::new(
                "data-empty",
                "column text contains no rows",
            )));
        };
        let mut bin_edges = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(body.len());
        let mut errors = Vec::with_capacity(body.len());
        for (index, row) in body.iter().enumerate() {
            if row.len() < 3 {
                return Err(NuisError::Data(
                    ErrorInfo::new("data-columns", "expected low edge, value and error")
                        .with_context("row", index.to_string())
                        .with_context("columns", row.len().to_string()),
                ));
            }
            bin_edges.push(row[0]);
            values.push(row[1]);
            errors.push(row[2]);
        }
        bin_edges.push(last[0]);
        let data = ReferenceData {
            bin_edges,
            values,
            errors,
            covariance: CovarianceSpec::Diagonal,
        };
        data.validate()?;
        Ok(data)
    }

    /// Attaches a matrix parsed from column text.
    pub fn with_matrix_str(mut self, text: &str, kind: MatrixKind) -> Result<Self, NuisError> {
        let matrix = parse_rows(text)?;
        self.covariance = match kind {
            MatrixKind::Correlation => CovarianceSpec::Correlation { matrix },
            MatrixKind::Covariance => CovarianceSpec::Full { matrix },
        };
        self.validate()?;
        Ok(self)
    }

    /// Loads a data set from disk. `.yaml`/`.yml` values files are YAML;
    /// anything else is column text.
    pub fn load(source: &DataSource) -> Result<Self, NuisError> {
        let text = fs::read_to_string(&source.values)
            .map_err(|err| NuisError::io("data-read", &source.values, err))?;
        let is_yaml = matches!(
            source.values.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let data = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_columns_str(&text)?
        };
        let data = match &source.matrix {
            Some(path) => {
                let matrix_text =
                    fs::read_to_string(path).map_err(|err| NuisError::io("matrix-read", path, err))?;
                data.with_matrix_str(&matrix_text, source.matrix_kind)?
            }
            None => data,
        };
        tracing::debug!(
            path = %source.values.display(),
            bins = data.bins(),
            "loaded reference data"
        );
        Ok(data)
    }
}

// Whitespace-separated lines are rewritten with commas so a single csv
// reader handles both layouts. The choice is made per line, after anything
// from `#` onwards is dropped.
fn normalise_line(line: &str) -> Option<String> {
    let content = line.split('#').next().unwrap_or_default();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains(',') {
        Some(trimmed.to_string())
    } else {
        Some(trimmed.split_whitespace().collect::<Vec<_>>().join(","))
    }
}

fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>, NuisError> {
    let normalised = text
        .lines()
        .filter_map(normalise_line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(normalised.as_bytes());
    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|err| wrap_csv("data-record", err))?
    {
        let fields: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        let mut row = Vec::with_capacity(fields.len());
        for field in fields {
            let value: f64 = field.parse().map_err(|_| {
                NuisError::Data(
                    ErrorInfo::new("data-number", "column entry is not a number")
                        .with_context("field", field.to_string())
                        .with_context("row", rows.len().to_string()),
                )
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}
