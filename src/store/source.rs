//! Snapshot sources: the boundary between the engine and whatever
//! produced the records (seed generator, fixture file, future persistence).
//!
//! The engine only relies on the record invariants, never on how a
//! snapshot was made, so generation stays outside the crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Doctor, Patient};

/// The full set of records an engine operation is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
}

/// Supplies a snapshot at session start (and on explicit reload).
pub trait SnapshotSource {
    fn load(&self) -> Result<Snapshot, EngineError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Reads a snapshot from a JSON document of the form
/// `{ "doctors": [...], "patients": [...] }` with camelCase record fields.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self) -> Result<Snapshot, EngineError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

/// An already-built snapshot, e.g. from a generator or test fixture.
impl SnapshotSource for Snapshot {
    fn load(&self) -> Result<Snapshot, EngineError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!(
            "in-memory snapshot ({} doctors, {} patients)",
            self.doctors.len(),
            self.patients.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{doctor, patient};

    #[test]
    fn json_file_round_trip() {
        let snapshot = Snapshot {
            doctors: vec![doctor(1, "Dr. Sato")],
            patients: vec![patient(1), patient(2)],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let source = JsonFileSource::new(&path);
        assert_eq!(source.load().unwrap(), snapshot);
        assert!(source.describe().contains("snapshot.json"));
    }

    #[test]
    fn json_uses_legacy_field_names() {
        let raw = r#"{
            "doctors": [{"id": 1, "name": "Dr. Sato", "specialization": "Internal medicine"}],
            "patients": [{
                "id": 1, "name": "Patient 1", "age": 42, "gender": "female",
                "lastVisit": "2024-05-01", "revisitRate": 0.42, "disease": "Asthma",
                "distance": 3.5, "bloodType": "AB", "weight": 55, "height": 160,
                "visitHistory": [{"patientId": 1, "visitDate": "2024-05-01",
                                  "disease": "Asthma", "nextVisitDate": "2024-09-01"}],
                "doctorId": 1
            }]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.patients[0].revisit_rate, 0.42);
        assert_eq!(snapshot.patients[0].visit_history.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(source.load(), Err(EngineError::Io(_))));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ \"doctors\": [").unwrap();
        assert!(matches!(JsonFileSource::new(path).load(), Err(EngineError::Json(_))));
    }
}
