//! Screen payloads. Each assembler gathers everything one screen shows in
//! a single call over the record store.

mod doctor_detail;
mod patient_detail;
mod statistics;

pub use doctor_detail::{get_doctor_detail, DoctorDetail, PanelEntry};
pub use patient_detail::{get_patient_detail, PatientDetail, PeerCard};
pub use statistics::{get_statistics, StatisticsSummary};
