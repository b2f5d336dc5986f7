use std::path::PathBuf;

use crate::models::{ColumnKey, SortDirection};

/// Application-level constants
pub const APP_NAME: &str = "clinicview";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows per page when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page sizes offered by the list screens.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 30, 50];

/// Number of page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

pub const DEFAULT_SORT_COLUMN: ColumnKey = ColumnKey::Name;
pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Asc;

/// The at-risk list opens sorted by revisit rate, lowest first.
pub const AT_RISK_SORT_COLUMN: ColumnKey = ColumnKey::RevisitRate;

/// Revisit rate below which a patient is considered at risk of dropping out.
pub const AT_RISK_THRESHOLD: f64 = 0.3;

/// How many similar patients the detail screen lists per category.
pub const SIMILAR_PATIENT_LIMIT: usize = 5;

/// Window of the monthly visit chart.
pub const DEFAULT_MONTHS_BACK: u32 = 12;

pub const EXPORT_FILENAME: &str = "patients.csv";

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "clinicview_lib=info"
}

/// Get the application data directory
/// ~/clinicview/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the exports directory (CSV downloads)
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}
