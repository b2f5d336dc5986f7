use crate::models::{Patient, PatientCriteria};

impl PatientCriteria {
    /// True when the patient satisfies every set option.
    pub fn matches(&self, patient: &Patient) -> bool {
        self.max_distance.map_or(true, |max| patient.distance <= max)
            && self
                .min_revisit_rate
                .map_or(true, |min| patient.revisit_rate >= min)
            && self
                .max_revisit_rate
                .map_or(true, |max| patient.revisit_rate < max)
            && self.gender.map_or(true, |g| patient.gender == g)
            && self.doctor_id.map_or(true, |id| patient.doctor_id == id)
    }
}

/// Stable subset of `records` matching `criteria`. An empty result is valid.
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a Patient>,
    criteria: &PatientCriteria,
) -> Vec<&'a Patient> {
    let kept: Vec<&Patient> = records
        .into_iter()
        .filter(|p| criteria.matches(p))
        .collect();
    tracing::debug!(kept = kept.len(), ?criteria, "Filtered patients");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::test_support::{ids, sample_snapshot};
    use proptest::prelude::*;

    #[test]
    fn empty_criteria_keeps_everything_in_order() {
        let snapshot = sample_snapshot();
        let kept = filter(&snapshot.patients, &PatientCriteria::default());
        assert_eq!(ids(&kept), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn max_distance_is_inclusive() {
        let snapshot = sample_snapshot();
        let criteria = PatientCriteria {
            max_distance: Some(3.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&snapshot.patients, &criteria)), vec![1, 3, 4, 5, 6]);
    }

    #[test]
    fn revisit_bounds() {
        let snapshot = sample_snapshot();
        let min = PatientCriteria {
            min_revisit_rate: Some(0.3),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&snapshot.patients, &min)), vec![1, 5, 6]);

        // at-risk upper bound is exclusive: 0.30 is not at risk
        assert_eq!(
            ids(&filter(&snapshot.patients, &PatientCriteria::at_risk())),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn options_combine_with_and() {
        let snapshot = sample_snapshot();
        let criteria = PatientCriteria {
            gender: Some(Gender::Female),
            doctor_id: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&snapshot.patients, &criteria)), vec![4]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let snapshot = sample_snapshot();
        let criteria = PatientCriteria {
            doctor_id: Some(3),
            ..Default::default()
        };
        assert!(filter(&snapshot.patients, &criteria).is_empty());
    }

    fn arb_criteria() -> impl Strategy<Value = PatientCriteria> {
        (
            proptest::option::of(0.0f64..10.0),
            proptest::option::of(0.0f64..1.0),
            proptest::option::of(0.0f64..1.0),
            proptest::option::of(prop_oneof![Just(Gender::Male), Just(Gender::Female)]),
            proptest::option::of(1u32..4),
        )
            .prop_map(|(max_distance, min_rr, max_rr, gender, doctor_id)| PatientCriteria {
                max_distance,
                min_revisit_rate: min_rr,
                max_revisit_rate: max_rr,
                gender,
                doctor_id,
            })
    }

    /// Reference predicate written out clause by clause.
    fn passes(criteria: &PatientCriteria, p: &Patient) -> bool {
        if let Some(max) = criteria.max_distance {
            if p.distance > max {
                return false;
            }
        }
        if let Some(min) = criteria.min_revisit_rate {
            if p.revisit_rate < min {
                return false;
            }
        }
        if let Some(max) = criteria.max_revisit_rate {
            if p.revisit_rate >= max {
                return false;
            }
        }
        if let Some(gender) = criteria.gender {
            if p.gender != gender {
                return false;
            }
        }
        if let Some(doctor_id) = criteria.doctor_id {
            if p.doctor_id != doctor_id {
                return false;
            }
        }
        true
    }

    proptest! {
        #[test]
        fn output_is_exactly_the_matching_subsequence(criteria in arb_criteria()) {
            let snapshot = sample_snapshot();
            let kept = filter(&snapshot.patients, &criteria);
            let expected: Vec<u32> = snapshot
                .patients
                .iter()
                .filter(|p| passes(&criteria, p))
                .map(|p| p.id)
                .collect();
            prop_assert_eq!(ids(&kept), expected);
        }
    }
}
