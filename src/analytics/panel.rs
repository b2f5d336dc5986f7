use serde::Serialize;

use super::risk::classify;
use crate::error::EngineError;
use crate::models::{Doctor, Patient};
use crate::store::RecordStore;

/// Mean revisit rate, or `None` for an empty set.
pub fn average_revisit_rate<'a>(patients: impl IntoIterator<Item = &'a Patient>) -> Option<f64> {
    let (sum, count) = patients
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), p| (sum + p.revisit_rate, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Mean revisit rate over a doctor's panel. `Ok(None)` when the panel is
/// empty; a reference error when the doctor does not exist.
pub fn panel_average_revisit_rate(
    store: &RecordStore,
    doctor_id: u32,
) -> Result<Option<f64>, EngineError> {
    Ok(average_revisit_rate(store.panel(doctor_id)?))
}

/// One row of the doctor list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    pub doctor: Doctor,
    pub panel_size: usize,
    pub at_risk_count: usize,
    pub average_revisit_rate: Option<f64>,
}

/// Summaries for every doctor, in snapshot order.
pub fn doctor_summaries(store: &RecordStore) -> Result<Vec<DoctorSummary>, EngineError> {
    store
        .doctors()
        .iter()
        .map(|doctor| {
            let panel = store.panel(doctor.id)?;
            Ok(DoctorSummary {
                doctor: doctor.clone(),
                panel_size: panel.len(),
                at_risk_count: panel.iter().filter(|p| classify(p).is_at_risk()).count(),
                average_revisit_rate: average_revisit_rate(panel),
            })
        })
        .collect()
}
