use arrow::error::ArrowError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed cause carried by [`PipelineError::SourceUnavailable`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors produced by the sales preparation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A table is missing a column the pipeline depends on.
    #[error("{table} table is missing required column `{column}`")]
    Schema { table: String, column: String },

    /// An input file could not be opened or decoded.
    #[error("source {path} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// A date or numeric value could not be interpreted.
    #[error("failed to parse column `{column}`: {reason}")]
    Parse { column: String, reason: String },

    /// The output directory or an output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Arrow kernel failure not covered by the variants above.
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

impl PipelineError {
    pub fn schema(table: &str, column: &str) -> Self {
        Self::Schema {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn source_unavailable(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::SourceUnavailable {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub fn parse(column: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
