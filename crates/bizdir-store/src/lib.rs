//! File persistence for business-directory records: JSON snapshots, stats
//! sidecars, and the phone CSV export.

pub mod error;
pub mod export;
pub mod snapshot;

pub use error::StoreError;
pub use export::{export_phone_csv, ExportSummary, CSV_COLUMNS, DEFAULT_EXPORT_PATH};
pub use snapshot::{
    first_existing_input, load_records, save_records, save_stats, stats_path_for,
    DEFAULT_INPUT_CANDIDATES,
};
