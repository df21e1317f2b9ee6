//! Interaction record files: a JSON array or JSON lines.

use std::fs;
use std::path::Path;

use nuis_core::{ErrorInfo, InteractionRecord, NuisError};

use crate::serde::from_json_slice;

/// Parses records from text. A leading `[` means one JSON array; anything
/// else is read as one record per non-blank line.
pub fn parse_records(text: &str) -> Result<Vec<InteractionRecord>, NuisError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return from_json_slice(trimmed.as_bytes());
    }
    let mut records = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = from_json_slice(line.as_bytes())
            .map_err(|err| err.with_context("line", (line_no + 1).to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Loads records from a file.
pub fn load_records(path: &Path) -> Result<Vec<InteractionRecord>, NuisError> {
    let text = fs::read_to_string(path)
        .map_err(|err| NuisError::io("events-read", path, err))?;
    let records = parse_records(&text)?;
    if records.is_empty() {
        return Err(NuisError::Data(
            ErrorInfo::new("events-empty", "no records in file")
                .with_context("path", path.display().to_string()),
        ));
    }
    tracing::debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuis_core::{FourVector, Particle, Pdg};

    fn record() -> InteractionRecord {
        let beam = Particle::new(Pdg::NU_MU, FourVector::new(1000.0, 0.0, 0.0, 1000.0));
        InteractionRecord::new(1, beam).with_particle(Particle::new(
            Pdg::MUON,
            FourVector::from_mass(105.66, 0.0, 100.0, 600.0),
        ))
    }

    #[test]
    fn array_and_lines_agree() {
        let one = serde_json::to_string(&record()).unwrap();
        let array = format!("[{one},{one}]");
        let lines = format!("{one}\n\n{one}\n");
        assert_eq!(parse_records(&array).unwrap(), parse_records(&lines).unwrap());
    }

    #[test]
    fn bad_line_reports_its_number() {
        let one = serde_json::to_string(&record()).unwrap();
        let err = parse_records(&format!("{one}\n{{oops")).unwrap_err();
        assert_eq!(err.info().context.get("line").map(String::as_str), Some("2"));
    }
}
