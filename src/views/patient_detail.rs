use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{classify, is_overdue, nearest, same_gender_peers, RiskTier, SimilarityKey};
use crate::config::SIMILAR_PATIENT_LIMIT;
use crate::error::EngineError;
use crate::models::{Doctor, Gender, Patient};
use crate::store::RecordStore;

/// Compact card for a similar patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerCard {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub distance: f64,
    pub disease: String,
}

impl From<&Patient> for PeerCard {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            age: p.age,
            gender: p.gender,
            distance: p.distance,
            disease: p.disease.clone(),
        }
    }
}

/// Patient detail screen: single fetch for the record, its doctor and
/// the three similar-patient lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetail {
    pub patient: Patient,
    pub doctor: Doctor,
    pub risk_tier: RiskTier,
    pub overdue: bool,
    pub nearby: Vec<PeerCard>,
    pub same_gender: Vec<PeerCard>,
    pub similar_age: Vec<PeerCard>,
}

fn cards(patients: Vec<&Patient>) -> Vec<PeerCard> {
    patients.into_iter().map(PeerCard::from).collect()
}

/// Fails with a reference error for an unknown patient or a dangling
/// doctor reference.
pub fn get_patient_detail(
    store: &RecordStore,
    patient_id: u32,
    today: NaiveDate,
) -> Result<PatientDetail, EngineError> {
    let patient = store.patient(patient_id)?;
    let doctor = store.doctor_of(patient)?;
    let all = store.patients();

    Ok(PatientDetail {
        patient: patient.clone(),
        doctor: doctor.clone(),
        risk_tier: classify(patient),
        overdue: is_overdue(patient, today),
        nearby: cards(nearest(all, patient, SimilarityKey::Distance, SIMILAR_PATIENT_LIMIT)?),
        same_gender: cards(same_gender_peers(all, patient, SIMILAR_PATIENT_LIMIT)),
        similar_age: cards(nearest(all, patient, SimilarityKey::Age, SIMILAR_PATIENT_LIMIT)?),
    })
}
