use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{
    aggregate_visits, average_revisit_rate, bucket_ages, count_genders, visits_this_month,
    AgeHistogram, GenderCounts, MonthlyVisits,
};
use crate::config::DEFAULT_MONTHS_BACK;
use crate::store::RecordStore;

/// Statistics screen: single fetch for every chart and headline number.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_patients: usize,
    pub visits_this_month: u32,
    /// `None` when the snapshot has no patients.
    pub average_revisit_rate: Option<f64>,
    pub age_histogram: AgeHistogram,
    pub gender_counts: GenderCounts,
    pub monthly_visits: Vec<MonthlyVisits>,
}

pub fn get_statistics(store: &RecordStore, today: NaiveDate) -> StatisticsSummary {
    let patients = store.patients();
    let monthly_visits = aggregate_visits(patients, today, DEFAULT_MONTHS_BACK);

    StatisticsSummary {
        total_patients: patients.len(),
        visits_this_month: visits_this_month(&monthly_visits),
        average_revisit_rate: average_revisit_rate(patients),
        age_histogram: bucket_ages(patients),
        gender_counts: count_genders(patients),
        monthly_visits,
    }
}
