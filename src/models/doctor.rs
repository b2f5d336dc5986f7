use serde::{Deserialize, Serialize};

/// A doctor. The patient panel is not stored here; it is derived from
/// `Patient::doctor_id` and indexed by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialization: String,
}
