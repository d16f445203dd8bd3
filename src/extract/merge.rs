use crate::error::{PipelineError, Result};
use arrow::array::{Array, ArrayRef, StringArray, UInt32Array, UInt32Builder};
use arrow::compute::{cast, take};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Column both sources are joined on.
pub const JOIN_KEY: &str = "index";

const PRIMARY_SUFFIX: &str = "_x";
const SECONDARY_SUFFIX: &str = "_y";

/// Left outer join of `secondary` onto `primary` by [`JOIN_KEY`].
///
/// Every primary row is kept in input order. Secondary columns of unmatched
/// rows are null. A primary row matching several secondary rows is repeated
/// once per match. Non-key columns present in both tables are suffixed
/// `_x` / `_y`.
#[instrument(level = "info", skip_all, fields(primary = primary.num_rows(), secondary = secondary.num_rows()))]
pub fn left_join_on_index(primary: &RecordBatch, secondary: &RecordBatch) -> Result<RecordBatch> {
    let left_key = key_column(primary, "primary")?;
    let right_key = key_column(secondary, "secondary")?;
    let (left_keys, right_keys) = normalise_keys(left_key, right_key)?;

    let mut lookup: HashMap<&str, Vec<u32>> = HashMap::new();
    for (row, key) in right_keys.iter().enumerate() {
        if let Some(key) = key {
            lookup.entry(key).or_default().push(row_id(row)?);
        }
    }

    let mut left_rows = UInt32Builder::with_capacity(left_keys.len());
    let mut right_rows = UInt32Builder::with_capacity(left_keys.len());
    let mut unmatched = 0usize;
    for (row, key) in left_keys.iter().enumerate() {
        let row = row_id(row)?;
        match key.and_then(|k| lookup.get(k)) {
            Some(matches) => {
                for m in matches {
                    left_rows.append_value(row);
                    right_rows.append_value(*m);
                }
            }
            None => {
                unmatched += 1;
                left_rows.append_value(row);
                right_rows.append_null();
            }
        }
    }
    let left_rows: UInt32Array = left_rows.finish();
    let right_rows: UInt32Array = right_rows.finish();

    let primary_schema = primary.schema();
    let secondary_schema = secondary.schema();
    let left_names: HashSet<&str> = primary_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    let right_names: HashSet<&str> = secondary_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();

    let mut fields = Vec::with_capacity(primary.num_columns() + secondary.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(fields.capacity());

    for (field, col) in primary_schema.fields().iter().zip(primary.columns()) {
        let name = if field.name() != JOIN_KEY && right_names.contains(field.name().as_str()) {
            format!("{}{}", field.name(), PRIMARY_SUFFIX)
        } else {
            field.name().clone()
        };
        fields.push(Field::new(name, field.data_type().clone(), field.is_nullable()));
        columns.push(take(col.as_ref(), &left_rows, None)?);
    }

    for (field, col) in secondary_schema.fields().iter().zip(secondary.columns()) {
        if field.name() == JOIN_KEY {
            continue;
        }
        let name = if left_names.contains(field.name().as_str()) {
            format!("{}{}", field.name(), SECONDARY_SUFFIX)
        } else {
            field.name().clone()
        };
        fields.push(Field::new(name, field.data_type().clone(), true));
        columns.push(take(col.as_ref(), &right_rows, None)?);
    }

    debug!(rows = left_rows.len(), unmatched, "joined on {}", JOIN_KEY);
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Into::into)
}

/// Row position as a `take` index. Tables past `u32::MAX` rows are rejected.
fn row_id(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| {
        ArrowError::ComputeError(format!("row {row} exceeds the u32 join index range")).into()
    })
}

fn key_column<'a>(batch: &'a RecordBatch, table: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(JOIN_KEY)
        .ok_or_else(|| PipelineError::schema(table, JOIN_KEY))
}

/// Bring both key columns into one comparable domain, rendered as strings.
///
/// Integer keys compare as `Int64`, mixed numeric keys as `Float64`,
/// anything else by its string form.
fn normalise_keys(left: &ArrayRef, right: &ArrayRef) -> Result<(KeyColumn, KeyColumn)> {
    let (l, r) = (left.data_type(), right.data_type());
    let common = if l.is_integer() && r.is_integer() {
        DataType::Int64
    } else if l.is_numeric() && r.is_numeric() {
        DataType::Float64
    } else {
        DataType::Utf8
    };
    Ok((
        KeyColumn::new(left, &common)?,
        KeyColumn::new(right, &common)?,
    ))
}

struct KeyColumn(StringArray);

impl KeyColumn {
    fn new(keys: &ArrayRef, common: &DataType) -> Result<Self> {
        let widened = cast(keys, common)?;
        let rendered = cast(&widened, &DataType::Utf8)?;
        let strings = rendered
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| PipelineError::parse(JOIN_KEY, "key column did not render as utf8"))?
            .clone();
        Ok(Self(strings))
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.0.iter()
    }
}
