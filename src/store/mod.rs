//! RecordStore: the immutable snapshot every engine operation reads.
//!
//! Holds patients and doctors in snapshot order plus three indexes built
//! once per snapshot: doctor id -> doctor, patient id -> patient, and
//! doctor id -> panel (owned patient ids). Indexes are rebuilt only when
//! the snapshot is replaced, which also bumps the generation counter and
//! assigns a fresh snapshot id that the query cache keys on.

mod integrity;
mod source;

pub use integrity::{check_snapshot, IntegrityIssue};
pub use source::{JsonFileSource, Snapshot, SnapshotSource};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::EngineError;
use crate::models::{Doctor, Patient};

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

fn next_snapshot_id() -> u64 {
    NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug)]
pub struct RecordStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    doctor_index: HashMap<u32, usize>,
    patient_index: HashMap<u32, usize>,
    panels: HashMap<u32, Vec<u32>>,
    /// Dangling doctor references tolerated at load.
    warnings: Vec<IntegrityIssue>,
    generation: u64,
    /// Unique per installed snapshot across every store in the process.
    snapshot_id: u64,
}

impl RecordStore {
    /// Validates the snapshot and builds the indexes.
    ///
    /// Fails with `EngineError::Integrity` on the first fatal violation.
    pub fn new(snapshot: Snapshot) -> Result<Self, EngineError> {
        let mut store = Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            doctor_index: HashMap::new(),
            patient_index: HashMap::new(),
            panels: HashMap::new(),
            warnings: Vec::new(),
            generation: 0,
            snapshot_id: next_snapshot_id(),
        };
        store.install(snapshot)?;
        Ok(store)
    }

    /// Loads from a source at session start.
    pub fn load(source: &dyn SnapshotSource) -> Result<Self, EngineError> {
        let snapshot = source.load()?;
        tracing::info!(source = %source.describe(), "Loading record snapshot");
        Self::new(snapshot)
    }

    /// Swaps in a new snapshot and rebuilds every index. On failure the
    /// current snapshot stays in place.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) -> Result<(), EngineError> {
        let mut next = Self::new(snapshot)?;
        next.generation = self.generation + 1;
        *self = next;
        tracing::info!(generation = self.generation, "Record snapshot replaced");
        Ok(())
    }

    fn install(&mut self, snapshot: Snapshot) -> Result<(), EngineError> {
        let issues = check_snapshot(&snapshot);
        if let Some(fatal) = issues.iter().find(|i| i.is_fatal()) {
            return Err(EngineError::Integrity(fatal.to_string()));
        }
        for issue in &issues {
            tracing::warn!(%issue, "Snapshot integrity warning");
        }

        let doctor_index = snapshot
            .doctors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id, i))
            .collect();
        let patient_index = snapshot
            .patients
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();

        let mut panels: HashMap<u32, Vec<u32>> = snapshot
            .doctors
            .iter()
            .map(|d| (d.id, Vec::new()))
            .collect();
        for patient in &snapshot.patients {
            if let Some(panel) = panels.get_mut(&patient.doctor_id) {
                panel.push(patient.id);
            }
        }

        tracing::info!(
            doctors = snapshot.doctors.len(),
            patients = snapshot.patients.len(),
            warnings = issues.len(),
            "Record snapshot indexed"
        );

        self.doctors = snapshot.doctors;
        self.patients = snapshot.patients;
        self.doctor_index = doctor_index;
        self.patient_index = patient_index;
        self.panels = panels;
        self.warnings = issues;
        Ok(())
    }

    /// All patients in snapshot order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identity of the installed snapshot. Two stores, or one store before
    /// and after `replace_snapshot`, never share an id.
    pub fn snapshot_id(&self) -> u64 {
        self.snapshot_id
    }

    /// Non-fatal issues found when the snapshot was loaded.
    pub fn warnings(&self) -> &[IntegrityIssue] {
        &self.warnings
    }

    pub fn find_patient(&self, id: u32) -> Option<&Patient> {
        self.patient_index.get(&id).map(|&i| &self.patients[i])
    }

    pub fn find_doctor(&self, id: u32) -> Option<&Doctor> {
        self.doctor_index.get(&id).map(|&i| &self.doctors[i])
    }

    pub fn patient(&self, id: u32) -> Result<&Patient, EngineError> {
        self.find_patient(id)
            .ok_or_else(|| EngineError::patient_not_found(id))
    }

    pub fn doctor(&self, id: u32) -> Result<&Doctor, EngineError> {
        self.find_doctor(id)
            .ok_or_else(|| EngineError::doctor_not_found(id))
    }

    /// Resolves the patient's doctor, failing on a dangling reference.
    pub fn doctor_of(&self, patient: &Patient) -> Result<&Doctor, EngineError> {
        self.doctor(patient.doctor_id)
    }

    /// Patient ids on a doctor's panel, in snapshot order.
    pub fn panel_ids(&self, doctor_id: u32) -> Result<&[u32], EngineError> {
        self.panels
            .get(&doctor_id)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::doctor_not_found(doctor_id))
    }

    /// Patients on a doctor's panel, in snapshot order. Empty for a doctor
    /// with no patients; an error for an unknown doctor.
    pub fn panel(&self, doctor_id: u32) -> Result<Vec<&Patient>, EngineError> {
        self.panel_ids(doctor_id)?
            .iter()
            .map(|&id| self.patient(id))
            .collect()
    }
}
