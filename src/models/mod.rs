pub mod doctor;
pub mod enums;
pub mod filters;
pub mod patient;

pub use doctor::Doctor;
pub use enums::{BloodType, ColumnKey, Gender, KeyKind, SortDirection};
pub use filters::PatientCriteria;
pub use patient::{Patient, VisitRecord};
