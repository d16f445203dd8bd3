pub mod date_parser;
pub mod project;
pub mod record;

use crate::error::Result;
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use tracing::{debug, info, instrument, warn};

pub use project::project_sales_columns;
pub use record::{CleanRecord, SalesRecord};

/// Rows with weekly sales below this are discarded.
pub const SALES_THRESHOLD: f64 = 10_000.0;
/// Historical average unemployment rate used for missing values.
pub const UNEMPLOYMENT_FILL: f64 = 8.106;
/// Historical average consumer price index used for missing values.
pub const CPI_FILL: f64 = 211.096358;

/// Clean the merged table: project, derive `Month`, filter on sales, impute.
#[instrument(level = "info", skip_all, fields(rows = merged.num_rows()))]
pub fn transform(merged: &RecordBatch) -> Result<Vec<CleanRecord>> {
    let records = project_sales_columns(merged)?;
    Ok(clean_records(records))
}

/// Filter and impute already projected rows, preserving input order.
///
/// A row without `Weekly_Sales` cannot meet the threshold and is dropped.
/// A row that meets the threshold but has no `Date` has no `Month` and is
/// dropped as well.
pub fn clean_records(records: Vec<SalesRecord>) -> Vec<CleanRecord> {
    let total = records.len();
    let mut below_threshold = 0usize;
    let mut missing_sales = 0usize;
    let mut missing_date = 0usize;

    let mut cleaned = Vec::with_capacity(total);
    for record in records {
        let month = record.date.map(|d| d.month());
        let Some(weekly_sales) = record.weekly_sales else {
            missing_sales += 1;
            continue;
        };
        if weekly_sales < SALES_THRESHOLD {
            below_threshold += 1;
            continue;
        }
        let Some(month) = month else {
            missing_date += 1;
            continue;
        };
        cleaned.push(CleanRecord {
            store_id: record.store_id,
            dept: record.dept,
            is_holiday: record.is_holiday,
            weekly_sales,
            cpi: record.cpi.unwrap_or(CPI_FILL),
            unemployment: record.unemployment.unwrap_or(UNEMPLOYMENT_FILL),
            month,
        });
    }

    if missing_sales > 0 {
        warn!(missing_sales, "dropped rows without Weekly_Sales");
    }
    if missing_date > 0 {
        warn!(missing_date, "dropped rows without Date");
    }
    debug!(below_threshold, "dropped rows under sales threshold");
    info!(kept = cleaned.len(), total, "cleaned sales rows");
    cleaned
}
