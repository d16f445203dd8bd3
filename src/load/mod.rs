pub mod row;

use crate::aggregate::MonthlyAverage;
use crate::config::{AGG_FILE_NAME, CLEAN_FILE_NAME};
use crate::error::{PipelineError, Result};
use crate::transform::CleanRecord;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub use row::TableRow;

/// Where [`load`] put the two output tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub clean: PathBuf,
    pub aggregate: PathBuf,
}

/// Write the cleaned rows and the monthly aggregate as CSV under `output_dir`.
///
/// The directory is created if absent. Existing outputs are overwritten.
#[instrument(level = "info", skip(clean, aggregate, output_dir), fields(dir = %output_dir.display()))]
pub fn load(
    clean: &[CleanRecord],
    aggregate: &[MonthlyAverage],
    output_dir: &Path,
) -> Result<OutputPaths> {
    fs::create_dir_all(output_dir).map_err(|e| PipelineError::io(output_dir, e))?;

    let paths = OutputPaths {
        clean: output_dir.join(CLEAN_FILE_NAME),
        aggregate: output_dir.join(AGG_FILE_NAME),
    };
    write_csv(&CleanRecord::to_batch(clean)?, &paths.clean)?;
    write_csv(&MonthlyAverage::to_batch(aggregate)?, &paths.aggregate)?;

    info!(
        clean_rows = clean.len(),
        months = aggregate.len(),
        "wrote output tables"
    );
    Ok(paths)
}

/// Write `batch` as headered, comma separated UTF-8 text.
///
/// The file is written to a `.tmp` sibling first and renamed into place. A
/// failed write removes the `.tmp` file and leaves `path` untouched.
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("csv.tmp");
    let file = File::create(&temp_path).map_err(|e| PipelineError::io(&temp_path, e))?;

    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(file));
    let written = writer
        .write(batch)
        .map_err(io::Error::other)
        .and_then(|()| writer.into_inner().flush());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(PipelineError::io(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| PipelineError::io(path, e))?;
    debug!(path = %path.display(), rows = batch.num_rows(), "wrote csv");
    Ok(())
}

/// Print whether `path` exists and return the answer.
pub fn validation(path: &Path) -> bool {
    let exists = path.exists();
    println!("{} exists? {}", path.display(), exists);
    exists
}
