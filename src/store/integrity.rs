use std::collections::HashSet;
use std::fmt;

use super::source::Snapshot;

/// A record invariant the snapshot breaks.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    DuplicatePatientId(u32),
    DuplicateDoctorId(u32),
    EmptyVisitHistory { patient_id: u32 },
    /// `lastVisit` differs from the most recent visit's date.
    LastVisitMismatch { patient_id: u32 },
    /// The history is not ordered most recent first.
    UnorderedVisitHistory { patient_id: u32 },
    RevisitRateOutOfRange { patient_id: u32, value: f64 },
    NegativeDistance { patient_id: u32, value: f64 },
    /// A visit in the history names another patient.
    ForeignVisit { patient_id: u32, owner_id: u32 },
    DanglingDoctor { patient_id: u32, doctor_id: u32 },
}

impl IntegrityIssue {
    /// Fatal issues stop the snapshot from loading. Dangling doctor
    /// references are tolerated at load and surface as reference errors
    /// where a join needs them.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IntegrityIssue::DanglingDoctor { .. })
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePatientId(id) => write!(f, "duplicate patient id {id}"),
            Self::DuplicateDoctorId(id) => write!(f, "duplicate doctor id {id}"),
            Self::EmptyVisitHistory { patient_id } => {
                write!(f, "patient {patient_id} has no visit history")
            }
            Self::LastVisitMismatch { patient_id } => write!(
                f,
                "patient {patient_id} lastVisit does not match most recent visit"
            ),
            Self::UnorderedVisitHistory { patient_id } => write!(
                f,
                "patient {patient_id} visit history is not most recent first"
            ),
            Self::NegativeDistance { patient_id, value } => {
                write!(f, "patient {patient_id} distance {value} is negative")
            }
            Self::RevisitRateOutOfRange { patient_id, value } => write!(
                f,
                "patient {patient_id} revisitRate {value} outside [0, 1]"
            ),
            Self::ForeignVisit {
                patient_id,
                owner_id,
            } => write!(
                f,
                "patient {patient_id} history contains a visit of patient {owner_id}"
            ),
            Self::DanglingDoctor {
                patient_id,
                doctor_id,
            } => write!(
                f,
                "patient {patient_id} references missing doctor {doctor_id}"
            ),
        }
    }
}

/// Checks every record invariant and returns all violations found,
/// in snapshot order.
pub fn check_snapshot(snapshot: &Snapshot) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    let mut doctor_ids = HashSet::new();
    for doctor in &snapshot.doctors {
        if !doctor_ids.insert(doctor.id) {
            issues.push(IntegrityIssue::DuplicateDoctorId(doctor.id));
        }
    }

    let mut patient_ids = HashSet::new();
    for patient in &snapshot.patients {
        if !patient_ids.insert(patient.id) {
            issues.push(IntegrityIssue::DuplicatePatientId(patient.id));
        }

        match patient.latest_visit() {
            None => issues.push(IntegrityIssue::EmptyVisitHistory {
                patient_id: patient.id,
            }),
            Some(latest) if latest.visit_date != patient.last_visit => {
                issues.push(IntegrityIssue::LastVisitMismatch {
                    patient_id: patient.id,
                });
            }
            Some(_) => {}
        }

        if patient
            .visit_history
            .windows(2)
            .any(|pair| pair[1].visit_date > pair[0].visit_date)
        {
            issues.push(IntegrityIssue::UnorderedVisitHistory {
                patient_id: patient.id,
            });
        }

        if let Some(visit) = patient
            .visit_history
            .iter()
            .find(|v| v.patient_id != patient.id)
        {
            issues.push(IntegrityIssue::ForeignVisit {
                patient_id: patient.id,
                owner_id: visit.patient_id,
            });
        }

        // NaN fails the range check as well.
        if !(0.0..=1.0).contains(&patient.revisit_rate) {
            issues.push(IntegrityIssue::RevisitRateOutOfRange {
                patient_id: patient.id,
                value: patient.revisit_rate,
            });
        }

        // NaN is left for the sort and similarity keys to reject.
        if patient.distance < 0.0 {
            issues.push(IntegrityIssue::NegativeDistance {
                patient_id: patient.id,
                value: patient.distance,
            });
        }

        if !doctor_ids.contains(&patient.doctor_id) {
            issues.push(IntegrityIssue::DanglingDoctor {
                patient_id: patient.id,
                doctor_id: patient.doctor_id,
            });
        }
    }

    issues
}
