use crate::error::{PipelineError, Result};
use crate::transform::date_parser::parse_calendar_date;
use crate::transform::record::SalesRecord;
use arrow::array::{Array, ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use tracing::debug;

pub const STORE_ID: &str = "Store_ID";
pub const DEPT: &str = "Dept";
pub const IS_HOLIDAY: &str = "IsHoliday";
pub const WEEKLY_SALES: &str = "Weekly_Sales";
pub const CPI: &str = "CPI";
pub const UNEMPLOYMENT: &str = "Unemployment";
pub const DATE: &str = "Date";

/// Columns retained from the merged table, in output order.
pub const PROJECTED_COLUMNS: [&str; 7] = [
    STORE_ID,
    DEPT,
    IS_HOLIDAY,
    WEEKLY_SALES,
    CPI,
    UNEMPLOYMENT,
    DATE,
];

/// Select the seven sales columns from `merged` and decode them into typed rows.
///
/// Every column is checked for presence before any value is decoded, so a
/// missing column is always reported as a schema error.
pub fn project_sales_columns(merged: &RecordBatch) -> Result<Vec<SalesRecord>> {
    let columns = PROJECTED_COLUMNS
        .iter()
        .map(|name| {
            merged
                .column_by_name(name)
                .ok_or_else(|| PipelineError::schema("merged", name))
        })
        .collect::<Result<Vec<_>>>()?;

    let store_ids = int64_values(STORE_ID, columns[0])?;
    let depts = int64_values(DEPT, columns[1])?;
    let holidays = bool_values(IS_HOLIDAY, columns[2])?;
    let sales = float64_values(WEEKLY_SALES, columns[3])?;
    let cpis = float64_values(CPI, columns[4])?;
    let unemployment = float64_values(UNEMPLOYMENT, columns[5])?;
    let dates = date_values(columns[6])?;

    let records: Vec<SalesRecord> = (0..merged.num_rows())
        .map(|row| SalesRecord {
            store_id: store_ids[row],
            dept: depts[row],
            is_holiday: holidays[row],
            weekly_sales: sales[row],
            cpi: cpis[row],
            unemployment: unemployment[row],
            date: dates[row],
        })
        .collect();
    debug!(rows = records.len(), "projected sales columns");
    Ok(records)
}

/// Cast that fails instead of silently nulling values it cannot convert.
fn strict_cast(name: &str, array: &ArrayRef, to: &DataType) -> Result<ArrayRef> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array, to, &options).map_err(|e| PipelineError::parse(name, e.to_string()))
}

fn int64_values(name: &str, array: &ArrayRef) -> Result<Vec<Option<i64>>> {
    let cast = strict_cast(name, array, &DataType::Int64)?;
    let values = cast
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| PipelineError::parse(name, "expected Int64 after cast"))?;
    Ok(values.iter().collect())
}

fn bool_values(name: &str, array: &ArrayRef) -> Result<Vec<Option<bool>>> {
    let cast = strict_cast(name, array, &DataType::Boolean)?;
    let values = cast
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| PipelineError::parse(name, "expected Boolean after cast"))?;
    Ok(values.iter().collect())
}

/// NaN is folded into "missing" so that only `None` means absent downstream.
fn float64_values(name: &str, array: &ArrayRef) -> Result<Vec<Option<f64>>> {
    let cast = strict_cast(name, array, &DataType::Float64)?;
    let values = cast
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| PipelineError::parse(name, "expected Float64 after cast"))?;
    Ok(values.iter().map(|v| v.filter(|x| !x.is_nan())).collect())
}

/// Nulls stay `None`; a present value that is not a calendar date is an error.
fn date_values(array: &ArrayRef) -> Result<Vec<Option<NaiveDate>>> {
    match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let cast = strict_cast(DATE, array, &DataType::Utf8)?;
            let strings = cast
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| PipelineError::parse(DATE, "expected Utf8 after cast"))?;
            strings
                .iter()
                .enumerate()
                .map(|(row, raw)| match raw {
                    Some(raw) => parse_calendar_date(raw).map(Some).ok_or_else(|| {
                        PipelineError::parse(DATE, format!("row {row}: unrecognised date `{raw}`"))
                    }),
                    None => Ok(None),
                })
                .collect()
        }
        _ => {
            let cast = strict_cast(DATE, array, &DataType::Date32)?;
            let dates = cast
                .as_any()
                .downcast_ref::<Date32Array>()
                .ok_or_else(|| PipelineError::parse(DATE, "expected Date32 after cast"))?;
            (0..dates.len())
                .map(|row| {
                    if dates.is_null(row) {
                        return Ok(None);
                    }
                    dates.value_as_date(row).map(Some).ok_or_else(|| {
                        PipelineError::parse(DATE, format!("row {row}: date out of range"))
                    })
                })
                .collect()
        }
    }
}
