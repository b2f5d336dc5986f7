//! Shared record fixtures for unit tests.

use chrono::NaiveDate;

use crate::models::{BloodType, Doctor, Gender, Patient, VisitRecord};
use crate::store::{RecordStore, Snapshot};

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn doctor(id: u32, name: &str) -> Doctor {
    Doctor {
        id,
        name: name.into(),
        specialization: "Internal medicine".into(),
    }
}

pub(crate) fn visit(patient_id: u32, visit_date: &str, next_visit_date: &str) -> VisitRecord {
    VisitRecord {
        patient_id,
        visit_date: date(visit_date),
        disease: "Hypertension".into(),
        next_visit_date: date(next_visit_date),
    }
}

/// A valid patient of doctor 1 with one visit on 2024-05-01.
pub(crate) fn patient(id: u32) -> Patient {
    Patient {
        id,
        name: format!("Patient {id}"),
        age: 40,
        gender: Gender::Male,
        last_visit: date("2024-05-01"),
        revisit_rate: 0.5,
        disease: "Hypertension".into(),
        distance: 1.0,
        blood_type: BloodType::A,
        weight: 60.0,
        height: 170.0,
        visit_history: vec![visit(id, "2024-05-01", "2024-08-01")],
        doctor_id: 1,
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_patient(
    id: u32,
    name: &str,
    age: u32,
    gender: Gender,
    revisit_rate: f64,
    distance: f64,
    disease: &str,
    last_visit: &str,
) -> Patient {
    let mut history = visit(id, last_visit, "2024-09-30");
    history.disease = disease.into();
    Patient {
        name: name.into(),
        age,
        gender,
        revisit_rate,
        distance,
        disease: disease.into(),
        last_visit: date(last_visit),
        visit_history: vec![history],
        doctor_id: if id % 2 == 1 { 1 } else { 2 },
        ..patient(id)
    }
}

/// Three doctors (doctor 3 has an empty panel) and six patients;
/// odd ids belong to doctor 1, even ids to doctor 2.
pub(crate) fn sample_snapshot() -> Snapshot {
    Snapshot {
        doctors: vec![
            doctor(1, "Dr. Sato"),
            doctor(2, "Dr. Ito"),
            doctor(3, "Dr. Kato"),
        ],
        patients: vec![
            sample_patient(1, "Aoki", 34, Gender::Female, 0.45, 2.0, "Asthma", "2024-05-10"),
            sample_patient(2, "Baba", 67, Gender::Male, 0.05, 7.5, "Diabetes", "2024-03-02"),
            sample_patient(3, "chiba", 21, Gender::Male, 0.25, 1.0, "Arthritis", "2024-06-01"),
            sample_patient(4, "Doi", 45, Gender::Female, 0.15, 3.0, "Hypertension", "2023-12-20"),
            sample_patient(5, "Endo", 82, Gender::Female, 0.80, 0.5, "Asthma", "2024-01-15"),
            sample_patient(6, "Fujii", 45, Gender::Male, 0.30, 3.0, "Diabetes", "2024-04-22"),
        ],
    }
}

pub(crate) fn sample_store() -> RecordStore {
    RecordStore::new(sample_snapshot()).unwrap()
}

pub(crate) fn ids(patients: &[&Patient]) -> Vec<u32> {
    patients.iter().map(|p| p.id).collect()
}
