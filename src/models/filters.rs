use serde::{Deserialize, Serialize};

use super::enums::Gender;
use crate::config::AT_RISK_THRESHOLD;

/// Patient list filter. Every option is independent; set options are
/// combined with AND and `None` imposes no constraint.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCriteria {
    /// Keep distance <= value.
    pub max_distance: Option<f64>,
    /// Keep revisit rate >= value.
    pub min_revisit_rate: Option<f64>,
    /// Keep revisit rate < value (at-risk view).
    pub max_revisit_rate: Option<f64>,
    pub gender: Option<Gender>,
    pub doctor_id: Option<u32>,
}

impl PatientCriteria {
    /// Criteria behind the at-risk patient list.
    pub fn at_risk() -> Self {
        Self {
            max_revisit_rate: Some(AT_RISK_THRESHOLD),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
