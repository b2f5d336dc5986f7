//! clinicview CLI
//!
//! Runs the dashboard engine over a JSON snapshot and prints JSON.
//!
//! Usage:
//!   clinicview --data <snapshot.json> page [--at-risk] [--sort-column <col>] [--page-size <n>] ...
//!   clinicview --data <snapshot.json> export [--output <file>] [--quoted] [--delimiter <c>]
//!   clinicview --data <snapshot.json> [--today <YYYY-MM-DD>] stats
//!   clinicview --data <snapshot.json> patient <id>
//!   clinicview --data <snapshot.json> doctor <id>
//!   clinicview --data <snapshot.json> doctors

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use clinicview_lib::analytics::doctor_summaries;
use clinicview_lib::config::{APP_VERSION, PAGE_SIZE_OPTIONS};
use clinicview_lib::table::{self, Escaping, ExportOptions};
use clinicview_lib::views::{get_doctor_detail, get_patient_detail, get_statistics};
use clinicview_lib::{
    init_tracing, ColumnKey, EngineError, Gender, JsonFileSource, QueryParams, RecordStore,
    SortDirection, TableQuery,
};

#[derive(Parser)]
#[command(name = "clinicview")]
#[command(version = APP_VERSION)]
#[command(about = "Patient table and analytics over a clinic records snapshot", long_about = None)]
struct Cli {
    /// Snapshot file: JSON object with `doctors` and `patients` arrays
    #[arg(short, long)]
    data: PathBuf,

    /// Reference date for overdue flags and the visit chart (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// Start from the at-risk list (revisit rate below 0.3, lowest first)
    #[arg(long)]
    at_risk: bool,

    #[arg(long)]
    sort_column: Option<ColumnKey>,

    #[arg(long)]
    sort_direction: Option<SortDirection>,

    #[arg(long)]
    max_distance: Option<f64>,

    #[arg(long)]
    min_revisit_rate: Option<f64>,

    #[arg(long)]
    max_revisit_rate: Option<f64>,

    #[arg(long)]
    gender: Option<Gender>,

    #[arg(long)]
    doctor_id: Option<u32>,
}

impl ListArgs {
    fn query(&self, page_index: Option<usize>, page_size: Option<usize>) -> TableQuery {
        let params = QueryParams {
            sort_column: self.sort_column,
            sort_direction: self.sort_direction,
            page_index,
            page_size,
            max_distance: self.max_distance,
            min_revisit_rate: self.min_revisit_rate,
            max_revisit_rate: self.max_revisit_rate,
            gender: self.gender,
            doctor_id: self.doctor_id,
        };
        let preset = if self.at_risk {
            TableQuery::at_risk()
        } else {
            TableQuery::patients()
        };
        preset.with_params(&params)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of the patient table
    Page {
        #[command(flatten)]
        list: ListArgs,

        /// 1-based page number
        #[arg(long)]
        page_index: Option<usize>,

        /// Rows per page: 10, 20, 30 or 50
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Write the filtered, sorted table as delimited text
    Export {
        #[command(flatten)]
        list: ListArgs,

        /// Output file (defaults to patients.csv in the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quote fields containing the delimiter, quotes or newlines
        #[arg(long)]
        quoted: bool,

        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },

    /// Print the statistics summary
    Stats,

    /// Print one patient's detail
    Patient { id: u32 },

    /// Print one doctor's detail and panel
    Doctor { id: u32 },

    /// List every doctor with panel size, at-risk count and average revisit rate
    Doctors,
}

fn check_page_size(page_size: Option<usize>) -> Result<(), EngineError> {
    match page_size {
        Some(size) if !PAGE_SIZE_OPTIONS.contains(&size) => Err(EngineError::InvalidQuery(format!(
            "pageSize must be one of {PAGE_SIZE_OPTIONS:?}, got {size}"
        ))),
        _ => Ok(()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let store = RecordStore::load(&JsonFileSource::new(&cli.data))?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result: serde_json::Value = match cli.command {
        Commands::Page {
            list,
            page_index,
            page_size,
        } => {
            check_page_size(page_size)?;
            let query = list.query(page_index, page_size);
            serde_json::to_value(table::run_table_query(&store, &query, today)?)?
        }
        Commands::Export {
            list,
            output,
            quoted,
            delimiter,
        } => {
            let query = list.query(None, None);
            let selected = table::select(
                &store,
                &query.criteria,
                query.sort_column,
                query.sort_direction,
            )?;
            let rows = selected.len();
            let options = ExportOptions {
                delimiter,
                escaping: if quoted { Escaping::Quoted } else { Escaping::Legacy },
            };
            let path = match output {
                Some(path) => table::export_to_file(selected, &options, &path)?,
                None => table::export_to_default_location(selected, &options)?,
            };
            serde_json::json!({
                "status": "success",
                "rows": rows,
                "file": path.display().to_string(),
            })
        }
        Commands::Stats => serde_json::to_value(get_statistics(&store, today))?,
        Commands::Patient { id } => serde_json::to_value(get_patient_detail(&store, id, today)?)?,
        Commands::Doctor { id } => serde_json::to_value(get_doctor_detail(&store, id)?)?,
        Commands::Doctors => serde_json::to_value(doctor_summaries(&store)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
