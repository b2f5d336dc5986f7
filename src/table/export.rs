//! Flat delimited-text export of patient records.
//!
//! The default output matches the legacy download byte for byte: a header
//! of attribute names, one line per record, fields joined by the delimiter
//! with no escaping, lines joined by `\n` and no trailing newline. Fields
//! containing the delimiter, quotes or newlines therefore corrupt the row
//! in legacy mode; `Escaping::Quoted` opts into RFC 4180 quoting.

use std::path::{Path, PathBuf};

use crate::config::{exports_dir, EXPORT_FILENAME};
use crate::error::EngineError;
use crate::models::Patient;

/// Exported attributes, in `Patient` declaration order. The nested visit
/// history has no flat representation and is left out.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "id",
    "name",
    "age",
    "gender",
    "lastVisit",
    "revisitRate",
    "disease",
    "distance",
    "bloodType",
    "weight",
    "height",
    "doctorId",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Fields written verbatim.
    #[default]
    Legacy,
    /// Fields containing the delimiter, `"`, `\r` or `\n` are wrapped in
    /// quotes with inner quotes doubled.
    Quoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: char,
    pub escaping: Escaping,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            escaping: Escaping::Legacy,
        }
    }
}

impl ExportOptions {
    fn field(&self, value: &str) -> String {
        let needs_quotes = self.escaping == Escaping::Quoted
            && value
                .chars()
                .any(|c| c == self.delimiter || matches!(c, '"' | '\r' | '\n'));
        if needs_quotes {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn line<I, S>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let delimiter = self.delimiter.to_string();
        fields
            .into_iter()
            .map(|f| self.field(f.as_ref()))
            .collect::<Vec<_>>()
            .join(&delimiter)
    }
}

fn record_fields(p: &Patient) -> [String; 12] {
    [
        p.id.to_string(),
        p.name.clone(),
        p.age.to_string(),
        p.gender.to_string(),
        p.last_visit.to_string(),
        p.revisit_rate.to_string(),
        p.disease.clone(),
        // distances were recorded to one decimal
        format!("{:.1}", p.distance),
        p.blood_type.to_string(),
        p.weight.to_string(),
        p.height.to_string(),
        p.doctor_id.to_string(),
    ]
}

/// Renders records in the legacy format.
pub fn to_table<'a>(records: impl IntoIterator<Item = &'a Patient>) -> String {
    to_table_with(records, &ExportOptions::default())
}

pub fn to_table_with<'a>(
    records: impl IntoIterator<Item = &'a Patient>,
    options: &ExportOptions,
) -> String {
    let mut lines = vec![options.line(EXPORT_COLUMNS)];
    lines.extend(records.into_iter().map(|p| options.line(record_fields(p))));
    tracing::debug!(rows = lines.len() - 1, "Exported patient table");
    lines.join("\n")
}

/// Writes the export to `path`, creating parent directories as needed.
pub fn export_to_file<'a>(
    records: impl IntoIterator<Item = &'a Patient>,
    options: &ExportOptions,
    path: &Path,
) -> Result<PathBuf, EngineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_table_with(records, options))?;
    tracing::info!(path = %path.display(), "Patient export written");
    Ok(path.to_path_buf())
}

/// Writes `patients.csv` under the application's exports directory.
pub fn export_to_default_location<'a>(
    records: impl IntoIterator<Item = &'a Patient>,
    options: &ExportOptions,
) -> Result<PathBuf, EngineError> {
    export_to_file(records, options, &exports_dir().join(EXPORT_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{patient, sample_snapshot};

    #[test]
    fn legacy_format_matches_download() {
        let p = patient(7);
        let text = to_table([&p]);
        assert_eq!(
            text,
            "id,name,age,gender,lastVisit,revisitRate,disease,distance,bloodType,weight,height,doctorId\n\
             7,Patient 7,40,male,2024-05-01,0.5,Hypertension,1.0,A,60,170,1"
        );
    }

    #[test]
    fn distance_keeps_one_decimal() {
        let snapshot = sample_snapshot();
        let text = to_table(&snapshot.patients);
        let distances: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(7).unwrap())
            .collect();
        assert_eq!(distances, vec!["2.0", "7.5", "1.0", "3.0", "0.5", "3.0"]);
    }

    #[test]
    fn empty_input_is_header_only() {
        let text = to_table(std::iter::empty());
        assert_eq!(text, EXPORT_COLUMNS.join(","));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn parsed_rows_reconstruct_attributes() {
        let snapshot = sample_snapshot();
        let text = to_table(&snapshot.patients);
        let mut lines = text.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(header, EXPORT_COLUMNS);

        for (line, p) in lines.zip(&snapshot.patients) {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), EXPORT_COLUMNS.len());
            assert_eq!(fields[0].parse::<u32>().unwrap(), p.id);
            assert_eq!(fields[1], p.name);
            assert_eq!(fields[4], p.last_visit.to_string());
            assert_eq!(fields[5].parse::<f64>().unwrap(), p.revisit_rate);
            assert_eq!(fields[7].parse::<f64>().unwrap(), p.distance);
            assert_eq!(fields[11].parse::<u32>().unwrap(), p.doctor_id);
        }
    }

    #[test]
    fn legacy_mode_does_not_escape() {
        let p = Patient {
            name: "Doe, Jane".into(),
            ..patient(1)
        };
        let text = to_table([&p]);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), EXPORT_COLUMNS.len() + 1);
    }

    #[test]
    fn quoted_mode_escapes_delimiter_and_quotes() {
        let p = Patient {
            name: "Jane \"JJ\", Doe".into(),
            ..patient(1)
        };
        let options = ExportOptions {
            escaping: Escaping::Quoted,
            ..ExportOptions::default()
        };
        let text = to_table_with([&p], &options);
        assert!(text.contains(",\"Jane \"\"JJ\"\", Doe\","));
    }

    #[test]
    fn custom_delimiter() {
        let p = patient(1);
        let options = ExportOptions {
            delimiter: ';',
            ..ExportOptions::default()
        };
        let text = to_table_with([&p], &options);
        assert!(text.starts_with("id;name;age;"));
        assert!(text.lines().nth(1).unwrap().starts_with("1;Patient 1;40;"));
    }

    #[test]
    fn writes_file_creating_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(EXPORT_FILENAME);
        let snapshot = sample_snapshot();

        let written = export_to_file(&snapshot.patients, &ExportOptions::default(), &path).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1 + snapshot.patients.len());
    }
}
