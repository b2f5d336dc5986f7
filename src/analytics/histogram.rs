use serde::Serialize;

use crate::models::{Gender, Patient};

/// Fixed age buckets, upper bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeBucket {
    UpTo20,
    From21To40,
    From41To60,
    From61To80,
    Over80,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::UpTo20,
        AgeBucket::From21To40,
        AgeBucket::From41To60,
        AgeBucket::From61To80,
        AgeBucket::Over80,
    ];

    pub fn for_age(age: u32) -> Self {
        match age {
            0..=20 => AgeBucket::UpTo20,
            21..=40 => AgeBucket::From21To40,
            41..=60 => AgeBucket::From41To60,
            61..=80 => AgeBucket::From61To80,
            _ => AgeBucket::Over80,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::UpTo20 => "0-20",
            AgeBucket::From21To40 => "21-40",
            AgeBucket::From41To60 => "41-60",
            AgeBucket::From61To80 => "61-80",
            AgeBucket::Over80 => "81+",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub label: &'static str,
    pub count: u32,
}

/// Patient counts per age bucket, in bucket order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeHistogram {
    counts: [u32; 5],
}

impl AgeHistogram {
    pub fn get(&self, bucket: AgeBucket) -> u32 {
        self.counts[bucket.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn entries(&self) -> Vec<BucketCount> {
        AgeBucket::ALL
            .iter()
            .map(|&b| BucketCount {
                label: b.label(),
                count: self.get(b),
            })
            .collect()
    }
}

impl Serialize for AgeHistogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}

pub fn bucket_ages<'a>(patients: impl IntoIterator<Item = &'a Patient>) -> AgeHistogram {
    let mut histogram = AgeHistogram::default();
    for patient in patients {
        histogram.counts[AgeBucket::for_age(patient.age).index()] += 1;
    }
    histogram
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub male: u32,
    pub female: u32,
}

pub fn count_genders<'a>(patients: impl IntoIterator<Item = &'a Patient>) -> GenderCounts {
    patients
        .into_iter()
        .fold(GenderCounts::default(), |mut acc, p| {
            match p.gender {
                Gender::Male => acc.male += 1,
                Gender::Female => acc.female += 1,
            }
            acc
        })
}
