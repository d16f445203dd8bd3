use crate::aggregate::MonthlyAverage;
use crate::error::Result;
use crate::transform::project::{CPI, DEPT, IS_HOLIDAY, STORE_ID, UNEMPLOYMENT, WEEKLY_SALES};
use crate::transform::CleanRecord;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

pub const MONTH: &str = "Month";
pub const AVG_SALES: &str = "Avg_Sales";

/// A typed row that can be laid out as an Arrow batch for writing.
pub trait TableRow: Sized {
    /// Arrow schema for this row type
    fn schema() -> Schema;
    /// Column arrays for `rows`, matching the schema
    fn to_columns(rows: &[Self]) -> Vec<ArrayRef>;

    fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        RecordBatch::try_new(Arc::new(Self::schema()), Self::to_columns(rows)).map_err(Into::into)
    }
}

impl TableRow for CleanRecord {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new(STORE_ID, DataType::Int64, true),
            Field::new(DEPT, DataType::Int64, true),
            Field::new(IS_HOLIDAY, DataType::Boolean, true),
            Field::new(WEEKLY_SALES, DataType::Float64, false),
            Field::new(CPI, DataType::Float64, false),
            Field::new(UNEMPLOYMENT, DataType::Float64, false),
            Field::new(MONTH, DataType::Int32, false),
        ])
    }

    fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            Arc::new(rows.iter().map(|r| r.store_id).collect::<Int64Array>()),
            Arc::new(rows.iter().map(|r| r.dept).collect::<Int64Array>()),
            Arc::new(rows.iter().map(|r| r.is_holiday).collect::<BooleanArray>()),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.weekly_sales))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.cpi))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.unemployment))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month as i32))),
        ]
    }
}

impl TableRow for MonthlyAverage {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new(MONTH, DataType::Int32, false),
            Field::new(AVG_SALES, DataType::Float64, false),
        ])
    }

    fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month as i32))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.avg_sales))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn test_clean_record_batch_layout() {
        let rows = vec![CleanRecord {
            store_id: Some(4),
            dept: None,
            is_holiday: Some(true),
            weekly_sales: 15000.0,
            cpi: 211.096358,
            unemployment: 8.106,
            month: 1,
        }];
        let batch = CleanRecord::to_batch(&rows).unwrap();
        let names: Vec<_> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(
            names,
            vec![
                "Store_ID",
                "Dept",
                "IsHoliday",
                "Weekly_Sales",
                "CPI",
                "Unemployment",
                "Month"
            ]
        );
        assert_eq!(batch.num_rows(), 1);
        assert!(batch.column(1).is_null(0));
    }

    #[test]
    fn test_monthly_average_empty_batch_keeps_schema() {
        let batch = MonthlyAverage::to_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().field(0).name(), "Month");
        assert_eq!(batch.schema().field(1).name(), "Avg_Sales");
    }
}
