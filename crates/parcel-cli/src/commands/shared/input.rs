//! Loading request files: JSON is checked against the published schema
//! before deserialization so that errors point at the offending field.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use parcel_core::entities::RoiAssumptions;
use parcel_schema::SchemaRegistry;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read a JSON or TOML document (chosen by extension) as a JSON value.
pub fn read_document(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        let doc: toml::Value = toml::from_str(&text)
            .with_context(|| format!("{} is not valid TOML", path.display()))?;
        serde_json::to_value(doc).context("failed to convert TOML document")
    } else {
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
    }
}

/// Validate `value` against schema `schema` and deserialize it.
pub fn from_checked<T: DeserializeOwned>(
    registry: &SchemaRegistry,
    schema: &str,
    value: Value,
) -> anyhow::Result<T> {
    registry.validate(schema, &value)?;
    Ok(serde_json::from_value(value)?)
}

/// Read one schema-checked document from `path`.
pub fn read_checked<T: DeserializeOwned>(
    registry: &SchemaRegistry,
    schema: &str,
    path: &Path,
) -> anyhow::Result<T> {
    let value = read_document(path)?;
    from_checked(registry, schema, value).with_context(|| format!("invalid {}", path.display()))
}

/// Explicit assumptions file, or the configured defaults.
pub fn read_assumptions(
    registry: &SchemaRegistry,
    path: Option<&Path>,
    fallback: &RoiAssumptions,
) -> anyhow::Result<RoiAssumptions> {
    match path {
        Some(path) => read_checked(registry, "roi_assumptions", path),
        None => Ok(fallback.clone()),
    }
}

/// One line of a JSON-lines input that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

/// Read a JSON-lines file, checking each line against `schema`.
///
/// Unreadable files fail outright; a bad line yields a [`LineError`] in
/// place so the remaining lines are still processed. Blank lines are skipped.
pub fn read_lines_checked<T: DeserializeOwned>(
    registry: &SchemaRegistry,
    schema: &str,
    path: &Path,
) -> anyhow::Result<Vec<Result<T, LineError>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let parsed = serde_json::from_str::<Value>(line)
            .map_err(anyhow::Error::from)
            .and_then(|value| from_checked(registry, schema, value));
        out.push(parsed.map_err(|error| LineError {
            line: line_no,
            message: format!("{error:#}"),
        }));
    }

    if out.is_empty() {
        bail!("{} contains no records", path.display());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use parcel_core::entities::ParcelRecord;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const PARCEL: &str = r#"{"id":"mapo-1","area_m2":500.0,"zoning_code":"residential-general","district":"mapo","road_access":true,"shape_regularity":0.9,"terrain":"flat"}"#;

    fn file_with(suffix: &str, body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn reads_a_checked_parcel() {
        let file = file_with(".json", PARCEL);
        let parcel: ParcelRecord =
            read_checked(&SchemaRegistry::new(), "parcel_record", file.path()).expect("parcel");
        assert_eq!(parcel.id, "mapo-1");
        assert_eq!(parcel.district, "mapo");
    }

    #[test]
    fn schema_violation_names_the_field() {
        let file = file_with(".json", &PARCEL.replace("\"flat\"", "\"cliff\""));
        let err = read_checked::<ParcelRecord>(&SchemaRegistry::new(), "parcel_record", file.path())
            .unwrap_err();
        assert!(format!("{err:#}").contains("/terrain"), "{err:#}");
    }

    #[test]
    fn assumptions_load_from_toml() {
        let file = file_with(
            ".toml",
            "holding_period_years = 3\nacquisition_cost = 900000000.0\n",
        );
        let assumptions = read_assumptions(
            &SchemaRegistry::new(),
            Some(file.path()),
            &RoiAssumptions::default(),
        )
        .expect("assumptions");
        assert_eq!(assumptions.holding_period_years, 3);
        assert_eq!(assumptions.acquisition_cost, Some(900_000_000.0));
        assert_eq!(assumptions.scenarios, RoiAssumptions::default().scenarios);
    }

    #[test]
    fn missing_assumptions_fall_back() {
        let fallback = RoiAssumptions {
            holding_period_years: 9,
            ..RoiAssumptions::default()
        };
        let assumptions =
            read_assumptions(&SchemaRegistry::new(), None, &fallback).expect("assumptions");
        assert_eq!(assumptions, fallback);
    }

    #[test]
    fn bad_lines_are_reported_in_place() {
        let body = format!("{PARCEL}\n\nnot json\n{}\n", PARCEL.replace("500.0", "\"big\""));
        let file = file_with(".jsonl", &body);
        let lines = read_lines_checked::<ParcelRecord>(
            &SchemaRegistry::new(),
            "parcel_record",
            file.path(),
        )
        .expect("file reads");

        assert_eq!(lines.len(), 3);
        assert!(lines[0].is_ok());
        assert_eq!(lines[1].as_ref().unwrap_err().line, 3);
        assert_eq!(lines[2].as_ref().unwrap_err().line, 4);
    }

    #[test]
    fn empty_jsonl_is_an_error() {
        let file = file_with(".jsonl", "\n\n");
        assert!(
            read_lines_checked::<ParcelRecord>(&SchemaRegistry::new(), "parcel_record", file.path())
                .is_err()
        );
    }
}
