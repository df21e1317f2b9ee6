//! Error type for record validation, sample lookup, configuration and file
//! loading. Reconstruction and selection are total functions and never
//! produce one of these.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every [`NuisError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code, e.g. `covariance-not-spd`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Where it happened: `sample`, `path`, `record`, `line`, `bin`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with a code and message and no context.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds or replaces one context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remedy.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            write!(f, ")")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; {hint}")?;
        }
        Ok(())
    }
}

/// Failures surfaced by the measurement crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NuisError {
    /// An interaction record with non-finite kinematics. Context: `record`,
    /// `index`, `pdg`.
    #[error("invalid record {0}")]
    Record(ErrorInfo),
    /// Unknown or inconsistent sample definition. Context: `sample`.
    #[error("sample {0}")]
    Sample(ErrorInfo),
    /// Run configuration, constants or generator normalisation.
    #[error("configuration {0}")]
    Config(ErrorInfo),
    /// Reference values, binning or covariance. Context: `row`, `bin`.
    #[error("reference data {0}")]
    Data(ErrorInfo),
    /// Reading or writing a file. Context: `path`.
    #[error("i/o {0}")]
    Io(ErrorInfo),
    /// JSON or YAML encoding. Context: `line` for JSON-lines input.
    #[error("encoding {0}")]
    Serde(ErrorInfo),
}

impl NuisError {
    /// Payload of any family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NuisError::Record(info)
            | NuisError::Sample(info)
            | NuisError::Config(info)
            | NuisError::Data(info)
            | NuisError::Io(info)
            | NuisError::Serde(info) => info,
        }
    }

    /// Stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Same family with one more context entry.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            NuisError::Record(info) => NuisError::Record(info.with_context(key, value)),
            NuisError::Sample(info) => NuisError::Sample(info.with_context(key, value)),
            NuisError::Config(info) => NuisError::Config(info.with_context(key, value)),
            NuisError::Data(info) => NuisError::Data(info.with_context(key, value)),
            NuisError::Io(info) => NuisError::Io(info.with_context(key, value)),
            NuisError::Serde(info) => NuisError::Serde(info.with_context(key, value)),
        }
    }

    /// File access failure at `path`; the OS message becomes the hint.
    pub fn io(code: &str, path: &Path, err: impl Display) -> Self {
        NuisError::Io(
            ErrorInfo::new(code, "file access failed")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    }

    /// Problem with the named sample.
    pub fn sample(code: &str, sample: &str, message: impl Into<String>) -> Self {
        NuisError::Sample(ErrorInfo::new(code, message).with_context("sample", sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_context_then_hint() {
        let err = NuisError::sample("unknown-sample", "T2K_x", "no such sample");
        assert_eq!(err.to_string(), "sample [unknown-sample] no such sample (sample=T2K_x)");
        let err = NuisError::io("events-read", Path::new("/tmp/e.jsonl"), "not found");
        assert_eq!(
            err.to_string(),
            "i/o [events-read] file access failed (path=/tmp/e.jsonl); not found"
        );
    }

    #[test]
    fn with_context_keeps_the_family() {
        let err = NuisError::Record(ErrorInfo::new("non-finite-momentum", "nan"))
            .with_context("record", "7");
        assert!(matches!(err, NuisError::Record(_)));
        assert_eq!(err.info().context.get("record").map(String::as_str), Some("7"));
        assert_eq!(err.code(), "non-finite-momentum");
    }
}
