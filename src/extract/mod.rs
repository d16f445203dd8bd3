pub mod merge;
pub mod source;

use crate::error::Result;
use arrow::record_batch::RecordBatch;
use std::path::Path;
use tracing::info;

pub use merge::{left_join_on_index, JOIN_KEY};
pub use source::{read_csv_table, read_parquet_table};

/// Read the primary CSV and the secondary Parquet source and left-join them on `index`.
pub fn extract(primary_csv: &Path, secondary_parquet: &Path) -> Result<RecordBatch> {
    let primary = read_csv_table(primary_csv)?;
    let secondary = read_parquet_table(secondary_parquet)?;
    let merged = left_join_on_index(&primary, &secondary)?;
    info!(
        rows = merged.num_rows(),
        columns = merged.num_columns(),
        "merged sources"
    );
    Ok(merged)
}
