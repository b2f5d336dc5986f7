use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::models::{ColumnKey, Patient, SortDirection};
use crate::store::RecordStore;

/// A patient's value for one column, resolved once before sorting.
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Text { folded: String, raw: String },
    Date(NaiveDate),
    Number(f64),
}

impl SortValue {
    fn text(raw: &str) -> Self {
        SortValue::Text {
            folded: raw.to_lowercase(),
            raw: raw.to_string(),
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                SortValue::Text { folded: a, raw: ra },
                SortValue::Text { folded: b, raw: rb },
            ) => a.cmp(b).then_with(|| ra.cmp(rb)),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            // A column always yields one variant.
            _ => Ordering::Equal,
        }
    }
}

/// String collation used for text columns: case-insensitive first, then
/// code-point order so that distinct strings never compare equal.
///
/// This is not locale-aware. Kana and kanji names order by code point
/// (hiragana, then katakana, then kanji) rather than by reading.
pub fn collate(a: &str, b: &str) -> Ordering {
    SortValue::text(a).cmp(&SortValue::text(b))
}

fn numeric(patient: &Patient, column: ColumnKey, value: f64) -> Result<SortValue, EngineError> {
    // NaN and infinities would break the total order sort_by relies on.
    if !value.is_finite() {
        return Err(EngineError::Data {
            field: column.as_str().into(),
            patient_id: patient.id,
            reason: format!("{value} is not a finite number"),
        });
    }
    Ok(SortValue::Number(value))
}

fn sort_value(
    store: &RecordStore,
    patient: &Patient,
    column: ColumnKey,
) -> Result<SortValue, EngineError> {
    match column {
        ColumnKey::Name => Ok(SortValue::text(&patient.name)),
        ColumnKey::Gender => Ok(SortValue::text(patient.gender.as_str())),
        ColumnKey::Disease => Ok(SortValue::text(&patient.disease)),
        // ISO dates order the same as their strings.
        ColumnKey::LastVisit => Ok(SortValue::Date(patient.last_visit)),
        ColumnKey::Age => numeric(patient, column, f64::from(patient.age)),
        ColumnKey::RevisitRate => numeric(patient, column, patient.revisit_rate),
        ColumnKey::Distance => numeric(patient, column, patient.distance),
        ColumnKey::DoctorName => Ok(SortValue::text(&store.doctor_of(patient)?.name)),
    }
}

/// Stable sort by one column. Equal keys keep their input order in both
/// directions, so toggling direction twice restores the original order.
///
/// Fails with a data error on a NaN numeric key and with a reference error
/// when `doctorName` meets a dangling doctor id.
pub fn sort<'a>(
    store: &RecordStore,
    records: Vec<&'a Patient>,
    column: ColumnKey,
    direction: SortDirection,
) -> Result<Vec<&'a Patient>, EngineError> {
    let mut keyed = records
        .into_iter()
        .map(|p| Ok((sort_value(store, p, column)?, p)))
        .collect::<Result<Vec<_>, EngineError>>()?;

    match direction {
        SortDirection::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        SortDirection::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    tracing::debug!(%column, kind = ?column.kind(), %direction, rows = keyed.len(), "Sorted patients");
    Ok(keyed.into_iter().map(|(_, p)| p).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;
    use crate::test_support::{doctor, ids, patient, sample_store};
    use proptest::prelude::*;

    fn all(store: &RecordStore) -> Vec<&Patient> {
        store.patients().iter().collect()
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let store = sample_store();
        let sorted = sort(&store, all(&store), ColumnKey::Name, SortDirection::Asc).unwrap();
        assert_eq!(ids(&sorted), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn numeric_sort_desc() {
        let store = sample_store();
        let sorted = sort(&store, all(&store), ColumnKey::RevisitRate, SortDirection::Desc).unwrap();
        assert_eq!(ids(&sorted), vec![5, 1, 6, 3, 4, 2]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let store = sample_store();
        // patients 4 and 6 are both 45, distance 3.0
        let asc = sort(&store, all(&store), ColumnKey::Age, SortDirection::Asc).unwrap();
        assert_eq!(ids(&asc), vec![3, 1, 4, 6, 2, 5]);
        let desc = sort(&store, all(&store), ColumnKey::Age, SortDirection::Desc).unwrap();
        assert_eq!(ids(&desc), vec![5, 2, 4, 6, 1, 3]);
    }

    #[test]
    fn last_visit_sorts_chronologically() {
        let store = sample_store();
        let sorted = sort(&store, all(&store), ColumnKey::LastVisit, SortDirection::Asc).unwrap();
        assert_eq!(ids(&sorted), vec![4, 5, 2, 6, 1, 3]);
    }

    #[test]
    fn doctor_name_is_joined() {
        let store = sample_store();
        // Dr. Ito (even ids) before Dr. Sato (odd ids)
        let sorted = sort(&store, all(&store), ColumnKey::DoctorName, SortDirection::Asc).unwrap();
        assert_eq!(ids(&sorted), vec![2, 4, 6, 1, 3, 5]);
    }

    #[test]
    fn dangling_doctor_fails_joined_sort_only() {
        let store = RecordStore::new(Snapshot {
            doctors: vec![doctor(1, "Dr. Sato")],
            patients: vec![
                patient(1),
                Patient {
                    doctor_id: 9,
                    ..patient(2)
                },
            ],
        })
        .unwrap();
        let err = sort(&store, all(&store), ColumnKey::DoctorName, SortDirection::Asc).unwrap_err();
        assert!(matches!(err, EngineError::Reference { id: 9, .. }));
        assert!(sort(&store, all(&store), ColumnKey::Name, SortDirection::Asc).is_ok());
    }

    #[test]
    fn nan_numeric_key_is_data_error() {
        let store = RecordStore::new(Snapshot {
            doctors: vec![doctor(1, "Dr. Sato")],
            patients: vec![
                patient(1),
                Patient {
                    distance: f64::NAN,
                    ..patient(2)
                },
            ],
        })
        .unwrap();
        let err = sort(&store, all(&store), ColumnKey::Distance, SortDirection::Asc).unwrap_err();
        assert!(matches!(err, EngineError::Data { patient_id: 2, ref field, .. } if field == "distance"));
    }

    #[test]
    fn infinite_numeric_key_is_data_error() {
        let store = RecordStore::new(Snapshot {
            doctors: vec![doctor(1, "Dr. Sato")],
            patients: vec![
                Patient {
                    distance: f64::INFINITY,
                    ..patient(1)
                },
                Patient {
                    distance: f64::INFINITY,
                    ..patient(2)
                },
            ],
        })
        .unwrap();
        let err = sort(&store, all(&store), ColumnKey::Distance, SortDirection::Desc).unwrap_err();
        assert!(matches!(err, EngineError::Data { patient_id: 1, .. }));
    }

    #[test]
    fn kana_and_kanji_order_by_code_point() {
        // あ U+3042 < ア U+30A2 < 阿 U+963F
        assert_eq!(collate("あおき", "アオキ"), Ordering::Less);
        assert_eq!(collate("アオキ", "阿部"), Ordering::Less);
    }

    #[test]
    fn collation() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Zed", "alpha"), Ordering::Greater);
        assert_ne!(collate("a", "A"), Ordering::Equal);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    fn store_with_ages(ages: &[u32]) -> RecordStore {
        RecordStore::new(Snapshot {
            doctors: vec![doctor(1, "Dr. Sato")],
            patients: ages
                .iter()
                .enumerate()
                .map(|(i, &age)| Patient {
                    age,
                    ..patient(i as u32 + 1)
                })
                .collect(),
        })
        .unwrap()
    }

    proptest! {
        #[test]
        fn resorting_sorted_sequence_is_noop(ages in proptest::collection::vec(0u32..5, 0..30)) {
            let store = store_with_ages(&ages);
            let once = sort(&store, all(&store), ColumnKey::Age, SortDirection::Desc).unwrap();
            let twice = sort(&store, once.clone(), ColumnKey::Age, SortDirection::Desc).unwrap();
            prop_assert_eq!(ids(&once), ids(&twice));
        }

        #[test]
        fn toggling_direction_is_stable(ages in proptest::collection::vec(0u32..5, 0..30)) {
            let store = store_with_ages(&ages);
            let original = all(&store);
            let asc = sort(&store, original.clone(), ColumnKey::Age, SortDirection::Asc).unwrap();
            let desc = sort(&store, asc.clone(), ColumnKey::Age, SortDirection::Desc).unwrap();

            // ties keep the original relative order in both directions
            for sorted in [&asc, &desc] {
                for pair in sorted.windows(2) {
                    if pair[0].age == pair[1].age {
                        prop_assert!(pair[0].id < pair[1].id);
                    }
                }
            }
            // distinct keys come out exactly reversed
            let asc_ages: Vec<u32> = asc.iter().map(|p| p.age).collect();
            let mut desc_ages: Vec<u32> = desc.iter().map(|p| p.age).collect();
            desc_ages.reverse();
            prop_assert_eq!(asc_ages, desc_ages);
        }
    }
}
