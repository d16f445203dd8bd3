use anyhow::{Context, Result};
use arrow::datatypes::Schema;
use clap::Parser;
use parquet::file::reader::{FileReader, SerializedFileReader};
use salesprep::config::PipelineConfig;
use salesprep::extract::{read_csv_table, JOIN_KEY};
use salesprep::transform::project::PROJECTED_COLUMNS;
use std::{fs::File, path::Path};

/// Print the shape of both pipeline inputs and which required columns each one offers.
fn main() -> Result<()> {
    let config = PipelineConfig::parse();

    let csv_schema = inspect_csv(&config.input_csv)?;
    let parquet_schema = inspect_parquet(&config.input_parquet)?;

    println!("=== Required columns ===");
    for name in std::iter::once(JOIN_KEY).chain(PROJECTED_COLUMNS) {
        let in_csv = csv_schema.field_with_name(name).is_ok();
        let in_parquet = parquet_schema.field_with_name(name).is_ok();
        let note = match (in_csv, in_parquet) {
            (false, false) => "MISSING",
            (true, true) if name != JOIN_KEY => "in both (will be suffixed _x/_y)",
            _ => "ok",
        };
        println!(
            "- {:<14} | csv: {:<5} | parquet: {:<5} | {}",
            name, in_csv, in_parquet, note
        );
    }
    Ok(())
}

fn inspect_csv(path: &Path) -> Result<Schema> {
    let batch = read_csv_table(path)
        .with_context(|| format!("reading primary source {}", path.display()))?;

    println!("=== CSV File: {} ===", path.display());
    println!("Total rows:           {}", batch.num_rows());
    println!("File-size on disk:    {} bytes", std::fs::metadata(path)?.len());
    print_schema(&batch.schema());
    println!();
    Ok(batch.schema().as_ref().clone())
}

fn inspect_parquet(path: &Path) -> Result<Schema> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = SerializedFileReader::new(file)
        .with_context(|| format!("reading parquet metadata of {}", path.display()))?;
    let parquet_meta = reader.metadata();
    let file_meta = parquet_meta.file_metadata();

    println!("=== Parquet File: {} ===", path.display());
    println!(
        "Created by:           {}",
        file_meta.created_by().unwrap_or("<unknown>")
    );
    println!("Total rows:           {}", file_meta.num_rows());
    println!("Number of row groups: {}", parquet_meta.num_row_groups());
    println!("File-size on disk:    {} bytes", std::fs::metadata(path)?.len());

    let schema = parquet::arrow::parquet_to_arrow_schema(
        file_meta.schema_descr(),
        file_meta.key_value_metadata(),
    )
    .context("converting parquet schema to arrow")?;
    print_schema(&schema);
    println!();
    Ok(schema)
}

fn print_schema(schema: &Schema) {
    println!("Columns:");
    for field in schema.fields() {
        println!(
            "- {:<30} | {:?}{}",
            field.name(),
            field.data_type(),
            if field.is_nullable() { ", nullable" } else { "" }
        );
    }
}
