use crate::error::{PipelineError, Result};
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read a headered CSV file into a single batch.
///
/// Column types are inferred over the whole file; empty cells become nulls.
/// Columns inferred as dates or timestamps are kept as text; calendar
/// validation happens in the transform stage. Any failure to open or decode
/// the file is reported as [`PipelineError::SourceUnavailable`].
#[instrument(level = "info", skip(path), fields(path = %path.display()))]
pub fn read_csv_table(path: &Path) -> Result<RecordBatch> {
    let unavailable = |e: arrow::error::ArrowError| PipelineError::source_unavailable(path, e);

    let mut file = File::open(path).map_err(|e| PipelineError::source_unavailable(path, e))?;
    let format = Format::default().with_header(true);
    let (schema, records) = format.infer_schema(&mut file, None).map_err(unavailable)?;
    debug!(records, columns = schema.fields().len(), "inferred csv schema");

    file.rewind()
        .map_err(|e| PipelineError::source_unavailable(path, e))?;

    let schema = Arc::new(temporal_as_text(&schema));
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(file)
        .map_err(unavailable)?;
    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(unavailable)?;

    let batch = concat_batches(&schema, &batches)?;
    debug!(rows = batch.num_rows(), "read csv table");
    Ok(batch)
}

/// Replace inferred date/timestamp fields with `Utf8`.
fn temporal_as_text(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| match f.data_type() {
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
                Field::new(f.name(), DataType::Utf8, f.is_nullable())
            }
            _ => f.as_ref().clone(),
        })
        .collect();
    Schema::new(fields)
}

/// Read every row group of a Parquet file into a single batch.
#[instrument(level = "info", skip(path), fields(path = %path.display()))]
pub fn read_parquet_table(path: &Path) -> Result<RecordBatch> {
    let file = File::open(path).map_err(|e| PipelineError::source_unavailable(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| PipelineError::source_unavailable(path, e))?;
    let schema = builder.schema().clone();
    let reader = builder
        .build()
        .map_err(|e| PipelineError::source_unavailable(path, e))?;
    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PipelineError::source_unavailable(path, e))?;

    let batch = concat_batches(&schema, &batches)?;
    debug!(rows = batch.num_rows(), "read parquet table");
    Ok(batch)
}
