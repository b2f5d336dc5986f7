use thiserror::Error;

/// Failures scoped to a single query, render or load. Nothing here is
/// fatal to the process and no operation retries.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed numeric data on a sort or analytics key.
    #[error("Invalid {field} for patient {patient_id}: {reason}")]
    Data {
        field: String,
        patient_id: u32,
        reason: String,
    },

    /// A foreign key that points at nothing, or a lookup by unknown id.
    #[error("Entity not found: {entity_type} with id {id}")]
    Reference { entity_type: String, id: u32 },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The snapshot breaks a record invariant and cannot be loaded.
    #[error("Snapshot integrity violated: {0}")]
    Integrity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn doctor_not_found(id: u32) -> Self {
        EngineError::Reference {
            entity_type: "doctor".into(),
            id,
        }
    }

    pub(crate) fn patient_not_found(id: u32) -> Self {
        EngineError::Reference {
            entity_type: "patient".into(),
            id,
        }
    }

    /// True for dangling references, which the UI renders as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Reference { .. })
    }
}
