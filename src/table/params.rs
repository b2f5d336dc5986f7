use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{
    AT_RISK_SORT_COLUMN, DEFAULT_PAGE_SIZE, DEFAULT_SORT_COLUMN, DEFAULT_SORT_DIRECTION,
};
use crate::error::EngineError;
use crate::models::{ColumnKey, Gender, PatientCriteria, SortDirection};

/// Raw list query as it arrives from a caller. Every field is optional;
/// absent fields fall back to the list's defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub sort_column: Option<ColumnKey>,
    pub sort_direction: Option<SortDirection>,
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    pub max_distance: Option<f64>,
    pub min_revisit_rate: Option<f64>,
    pub max_revisit_rate: Option<f64>,
    pub gender: Option<Gender>,
    pub doctor_id: Option<u32>,
}

fn parse<T>(key: &str, value: &str) -> Result<T, EngineError>
where
    T: FromStr,
{
    value
        .parse()
        .map_err(|_| EngineError::InvalidQuery(format!("invalid value for {key}: {value:?}")))
}

impl QueryParams {
    /// Builds params from raw key/value pairs such as a decoded query string.
    /// Empty values count as absent and unknown keys are ignored.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, EngineError> {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "sortColumn" => params.sort_column = Some(value.parse()?),
                "sortDirection" => params.sort_direction = Some(value.parse()?),
                "pageIndex" => params.page_index = Some(parse(key, value)?),
                "pageSize" => params.page_size = Some(parse(key, value)?),
                "maxDistance" => params.max_distance = Some(parse(key, value)?),
                "minRevisitRate" => params.min_revisit_rate = Some(parse(key, value)?),
                "maxRevisitRate" => params.max_revisit_rate = Some(parse(key, value)?),
                "gender" => params.gender = Some(value.parse()?),
                "doctorId" => params.doctor_id = Some(parse(key, value)?),
                other => tracing::debug!(key = other, "Ignoring unknown query parameter"),
            }
        }
        Ok(params)
    }

    pub fn criteria(&self) -> PatientCriteria {
        PatientCriteria {
            max_distance: self.max_distance,
            min_revisit_rate: self.min_revisit_rate,
            max_revisit_rate: self.max_revisit_rate,
            gender: self.gender,
            doctor_id: self.doctor_id,
        }
    }
}

/// A fully resolved list query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    pub criteria: PatientCriteria,
    pub sort_column: ColumnKey,
    pub sort_direction: SortDirection,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::patients()
    }
}

impl TableQuery {
    /// General patient list: everyone, by name.
    pub fn patients() -> Self {
        Self {
            criteria: PatientCriteria::default(),
            sort_column: DEFAULT_SORT_COLUMN,
            sort_direction: DEFAULT_SORT_DIRECTION,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// At-risk list: revisit rate under the threshold, lowest first.
    pub fn at_risk() -> Self {
        Self {
            criteria: PatientCriteria::at_risk(),
            sort_column: AT_RISK_SORT_COLUMN,
            ..Self::patients()
        }
    }

    /// Overlays caller params on this preset. Criteria set in the preset
    /// stay unless the params override them.
    pub fn with_params(mut self, params: &QueryParams) -> Self {
        let overrides = params.criteria();
        let criteria = &mut self.criteria;
        criteria.max_distance = overrides.max_distance.or(criteria.max_distance);
        criteria.min_revisit_rate = overrides.min_revisit_rate.or(criteria.min_revisit_rate);
        criteria.max_revisit_rate = overrides.max_revisit_rate.or(criteria.max_revisit_rate);
        criteria.gender = overrides.gender.or(criteria.gender);
        criteria.doctor_id = overrides.doctor_id.or(criteria.doctor_id);

        self.sort_column = params.sort_column.unwrap_or(self.sort_column);
        self.sort_direction = params.sort_direction.unwrap_or(self.sort_direction);
        self.page_index = params.page_index.unwrap_or(self.page_index);
        self.page_size = params.page_size.unwrap_or(self.page_size);
        self
    }
}

impl From<&QueryParams> for TableQuery {
    fn from(params: &QueryParams) -> Self {
        Self::patients().with_params(params)
    }
}
