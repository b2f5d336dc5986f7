use serde::Serialize;

use crate::analytics::{average_revisit_rate, classify, RiskTier};
use crate::error::EngineError;
use crate::models::{Doctor, Patient};
use crate::store::RecordStore;

/// One patient on the doctor's panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEntry {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub disease: String,
    pub revisit_rate: f64,
    pub risk_tier: RiskTier,
}

impl From<&Patient> for PanelEntry {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            age: p.age,
            disease: p.disease.clone(),
            revisit_rate: p.revisit_rate,
            risk_tier: classify(p),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDetail {
    pub doctor: Doctor,
    pub panel: Vec<PanelEntry>,
    /// `None` for an empty panel.
    pub average_revisit_rate: Option<f64>,
}

pub fn get_doctor_detail(store: &RecordStore, doctor_id: u32) -> Result<DoctorDetail, EngineError> {
    let doctor = store.doctor(doctor_id)?;
    let panel = store.panel(doctor_id)?;
    tracing::debug!(doctor_id, panel = panel.len(), "Assembled doctor detail");

    Ok(DoctorDetail {
        doctor: doctor.clone(),
        average_revisit_rate: average_revisit_rate(panel.iter().copied()),
        panel: panel.into_iter().map(PanelEntry::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_store;

    #[test]
    fn panel_in_snapshot_order_with_average() {
        let store = sample_store();
        let detail = get_doctor_detail(&store, 2).unwrap();
        let ids: Vec<u32> = detail.panel.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
        // (0.05 + 0.15 + 0.30) / 3
        let avg = detail.average_revisit_rate.unwrap();
        assert!((avg - 0.5 / 3.0).abs() < 1e-9);
        assert_eq!(detail.panel[0].risk_tier, RiskTier::Critical);
    }

    #[test]
    fn empty_panel_has_no_average() {
        let store = sample_store();
        let detail = get_doctor_detail(&store, 3).unwrap();
        assert!(detail.panel.is_empty());
        assert_eq!(detail.average_revisit_rate, None);

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json["averageRevisitRate"].is_null());
    }

    #[test]
    fn unknown_doctor_is_not_found() {
        let store = sample_store();
        assert!(get_doctor_detail(&store, 77).unwrap_err().is_not_found());
    }
}
