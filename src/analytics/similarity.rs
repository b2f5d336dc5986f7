use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Patient;

/// Attribute used to rank similar patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityKey {
    Age,
    Distance,
}

impl SimilarityKey {
    pub fn field(self) -> &'static str {
        match self {
            SimilarityKey::Age => "age",
            SimilarityKey::Distance => "distance",
        }
    }

    fn value(self, patient: &Patient) -> Result<f64, EngineError> {
        let value = match self {
            SimilarityKey::Age => f64::from(patient.age),
            SimilarityKey::Distance => patient.distance,
        };
        // inf - inf is NaN, so infinities are rejected along with NaN.
        if !value.is_finite() {
            return Err(EngineError::Data {
                field: self.field().into(),
                patient_id: patient.id,
                reason: format!("{value} is not a finite number"),
            });
        }
        Ok(value)
    }
}

/// Up to `limit` patients closest to `subject` on `key`, nearest first.
///
/// The subject itself is excluded by id. Equal distances keep input order.
pub fn nearest<'a>(
    patients: impl IntoIterator<Item = &'a Patient>,
    subject: &Patient,
    key: SimilarityKey,
    limit: usize,
) -> Result<Vec<&'a Patient>, EngineError> {
    let origin = key.value(subject)?;

    let mut ranked = patients
        .into_iter()
        .filter(|p| p.id != subject.id)
        .map(|p| Ok(((key.value(p)? - origin).abs(), p)))
        .collect::<Result<Vec<_>, EngineError>>()?;

    // sort_by is stable, which keeps ties in input order.
    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);

    Ok(ranked.into_iter().map(|(_, p)| p).collect())
}

/// Up to `limit` other patients of the subject's gender, in input order.
pub fn same_gender_peers<'a>(
    patients: impl IntoIterator<Item = &'a Patient>,
    subject: &Patient,
    limit: usize,
) -> Vec<&'a Patient> {
    patients
        .into_iter()
        .filter(|p| p.gender == subject.gender && p.id != subject.id)
        .take(limit)
        .collect()
}
