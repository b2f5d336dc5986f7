use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{BloodType, Gender};

/// One clinic visit. Belongs to exactly one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub patient_id: u32,
    pub visit_date: NaiveDate,
    pub disease: String,
    /// Planned follow-up. May lie in the past.
    pub next_visit_date: NaiveDate,
}

/// A patient record as supplied by the snapshot source.
///
/// Field order is the declaration order used for the flat export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub last_visit: NaiveDate,
    /// Share of expected follow-ups actually attended, in [0, 1].
    pub revisit_rate: f64,
    pub disease: String,
    /// Home-to-clinic distance in km.
    pub distance: f64,
    pub blood_type: BloodType,
    pub weight: f64,
    pub height: f64,
    /// Most recent first. Never empty in a valid snapshot.
    pub visit_history: Vec<VisitRecord>,
    pub doctor_id: u32,
}

impl Patient {
    pub fn latest_visit(&self) -> Option<&VisitRecord> {
        self.visit_history.first()
    }

    /// Follow-up date planned at the most recent visit.
    pub fn next_visit_date(&self) -> Option<NaiveDate> {
        self.latest_visit().map(|v| v.next_visit_date)
    }
}
