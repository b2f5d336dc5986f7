//! Patient table pipeline: filter, then sort, then paginate.
//!
//! `run_table_query` assembles everything a list screen needs in one
//! payload: the page of display rows plus pager state. Export reads the
//! same filtered and sorted selection without pagination.

mod cache;
mod export;
mod filter;
mod paginate;
mod params;
mod sort;

pub use cache::{QueryCache, DEFAULT_CAPACITY};
pub use export::{
    export_to_default_location, export_to_file, to_table, to_table_with, Escaping,
    ExportOptions, EXPORT_COLUMNS,
};
pub use filter::filter;
pub use paginate::{page_count, page_window, paginate, Page};
pub use params::{QueryParams, TableQuery};
pub use sort::{collate, sort};

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{classify, is_overdue, RevisitBand, RiskTier};
use crate::error::EngineError;
use crate::models::{ColumnKey, Gender, Patient, PatientCriteria, SortDirection};
use crate::store::RecordStore;

/// One displayed row of the patient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRow {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub last_visit: NaiveDate,
    pub revisit_rate: f64,
    pub disease: String,
    pub distance: f64,
    pub doctor_id: u32,
    /// `None` when the doctor reference dangles; the row renders a
    /// not-found placeholder.
    pub doctor_name: Option<String>,
    pub risk_tier: RiskTier,
    pub revisit_band: RevisitBand,
    pub overdue: bool,
}

impl PatientRow {
    pub fn build(store: &RecordStore, patient: &Patient, today: NaiveDate) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            age: patient.age,
            gender: patient.gender,
            last_visit: patient.last_visit,
            revisit_rate: patient.revisit_rate,
            disease: patient.disease.clone(),
            distance: patient.distance,
            doctor_id: patient.doctor_id,
            doctor_name: store.find_doctor(patient.doctor_id).map(|d| d.name.clone()),
            risk_tier: classify(patient),
            revisit_band: RevisitBand::of(patient.revisit_rate),
            overdue: is_overdue(patient, today),
        }
    }
}

/// A list screen's full state for one query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub page: Page<PatientRow>,
    /// Page numbers for the pager buttons.
    pub window: Vec<usize>,
    /// 1-based first and last row on this page.
    pub range: Option<(usize, usize)>,
    pub sort_column: ColumnKey,
    pub sort_direction: SortDirection,
}

/// Filtered then sorted patients, before pagination.
pub fn select<'s>(
    store: &'s RecordStore,
    criteria: &PatientCriteria,
    column: ColumnKey,
    direction: SortDirection,
) -> Result<Vec<&'s Patient>, EngineError> {
    let kept = filter(store.patients(), criteria);
    sort(store, kept, column, direction)
}

fn assemble(
    store: &RecordStore,
    selected: Vec<&Patient>,
    query: &TableQuery,
    today: NaiveDate,
) -> Result<TableView, EngineError> {
    let page = paginate(selected, query.page_index, query.page_size)?
        .map(|p| PatientRow::build(store, p, today));
    Ok(TableView {
        window: page.window(),
        range: page.range(),
        page,
        sort_column: query.sort_column,
        sort_direction: query.sort_direction,
    })
}

/// Runs the full pipeline for one list query.
pub fn run_table_query(
    store: &RecordStore,
    query: &TableQuery,
    today: NaiveDate,
) -> Result<TableView, EngineError> {
    let selected = select(
        store,
        &query.criteria,
        query.sort_column,
        query.sort_direction,
    )?;
    assemble(store, selected, query, today)
}

/// Same as [`run_table_query`], reusing a memoized selection when the
/// query was seen before on the current snapshot.
pub fn run_table_query_cached(
    store: &RecordStore,
    cache: &mut QueryCache,
    query: &TableQuery,
    today: NaiveDate,
) -> Result<TableView, EngineError> {
    let selected = cache.select(
        store,
        &query.criteria,
        query.sort_column,
        query.sort_direction,
    )?;
    assemble(store, selected, query, today)
}
