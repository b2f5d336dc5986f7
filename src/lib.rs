pub mod analytics; // risk, similarity, histograms, visit series
pub mod config;
pub mod error;
pub mod models;
pub mod store; // snapshot + indexes
pub mod table; // filter / sort / paginate / export pipeline
pub mod views; // screen payloads

#[cfg(test)]
mod test_support;

pub use error::EngineError;
pub use models::{ColumnKey, Doctor, Gender, Patient, PatientCriteria, SortDirection, VisitRecord};
pub use store::{JsonFileSource, RecordStore, Snapshot, SnapshotSource};
pub use table::{run_table_query, run_table_query_cached, QueryCache, QueryParams, TableQuery, TableView};

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over the
/// built-in default filter. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("{} v{} logging ready", config::APP_NAME, config::APP_VERSION);
}
