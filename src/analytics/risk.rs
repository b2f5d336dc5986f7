//! Disengagement risk derived from the revisit rate, plus the overdue
//! follow-up flag shown on the patient list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AT_RISK_THRESHOLD;
use crate::models::Patient;

const CRITICAL_THRESHOLD: f64 = 0.1;
const HIGH_THRESHOLD: f64 = 0.2;

/// Upper edge of the middle revisit band on the general list.
const MEDIUM_BAND_THRESHOLD: f64 = 0.5;

/// Risk tier, ordered from no risk to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    None,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    pub fn is_at_risk(self) -> bool {
        self != RiskTier::None
    }

    /// Display color shared by every at-risk view.
    pub fn color(self) -> Option<&'static str> {
        match self {
            RiskTier::Critical => Some("red"),
            RiskTier::High => Some("orange"),
            RiskTier::Moderate => Some("yellow"),
            RiskTier::None => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Critical => "critical",
            RiskTier::High => "high",
            RiskTier::Moderate => "moderate",
            RiskTier::None => "none",
        }
    }
}

/// Tier boundaries are exclusive below: 0.1 is High, 0.2 is Moderate,
/// 0.3 is None.
pub fn classify_rate(revisit_rate: f64) -> RiskTier {
    if revisit_rate < CRITICAL_THRESHOLD {
        RiskTier::Critical
    } else if revisit_rate < HIGH_THRESHOLD {
        RiskTier::High
    } else if revisit_rate < AT_RISK_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::None
    }
}

pub fn classify(patient: &Patient) -> RiskTier {
    classify_rate(patient.revisit_rate)
}

/// Coarser three-way banding used by the general patient list bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisitBand {
    Low,
    Medium,
    High,
}

impl RevisitBand {
    pub fn of(revisit_rate: f64) -> Self {
        if revisit_rate < AT_RISK_THRESHOLD {
            RevisitBand::Low
        } else if revisit_rate < MEDIUM_BAND_THRESHOLD {
            RevisitBand::Medium
        } else {
            RevisitBand::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RevisitBand::Low => "red",
            RevisitBand::Medium => "yellow",
            RevisitBand::High => "blue",
        }
    }
}

/// The follow-up planned at the latest visit has passed without a newer visit.
pub fn is_overdue(patient: &Patient, today: NaiveDate) -> bool {
    match patient.next_visit_date() {
        Some(next) => next < today && patient.last_visit < next,
        None => false,
    }
}
