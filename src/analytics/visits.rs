//! Monthly visit counts over a trailing window of calendar months.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::models::Patient;

/// A calendar month, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1-based.
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shifts by whole months; negative goes back in time.
    pub fn offset(&self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyVisits {
    pub month: YearMonth,
    pub count: u32,
}

/// Exactly `months_back` buckets, oldest first, ending with the month of
/// `reference_date`. Every visit of every patient inside the window counts
/// once; visits outside are ignored and empty months stay at zero.
pub fn aggregate_visits<'a>(
    patients: impl IntoIterator<Item = &'a Patient>,
    reference_date: NaiveDate,
    months_back: u32,
) -> Vec<MonthlyVisits> {
    let current = YearMonth::of(reference_date);
    let first = current.offset(-(i64::from(months_back)) + 1);

    let mut buckets: Vec<MonthlyVisits> = (0..i64::from(months_back))
        .map(|i| MonthlyVisits {
            month: first.offset(i),
            count: 0,
        })
        .collect();

    for patient in patients {
        for visit in &patient.visit_history {
            let index = YearMonth::of(visit.visit_date).ordinal() - first.ordinal();
            if let Some(bucket) = usize::try_from(index).ok().and_then(|i| buckets.get_mut(i)) {
                bucket.count += 1;
            }
        }
    }

    tracing::debug!(
        from = %first,
        to = %current,
        buckets = buckets.len(),
        "Aggregated monthly visits"
    );

    buckets
}

/// Count of the newest bucket, i.e. visits in the reference month.
pub fn visits_this_month(series: &[MonthlyVisits]) -> u32 {
    series.last().map(|b| b.count).unwrap_or(0)
}
