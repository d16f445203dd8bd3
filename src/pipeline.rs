use crate::aggregate::avg_weekly_sales_per_month;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extract::extract;
use crate::load::{load, validation, OutputPaths};
use crate::transform::transform;
use std::time::Instant;
use tracing::{info, instrument};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub merged_rows: usize,
    pub clean_rows: usize,
    pub months: usize,
    pub outputs: OutputPaths,
    /// Both output files were found on disk after writing.
    pub outputs_present: bool,
}

/// Merge → transform → aggregate → persist, then check both outputs exist.
///
/// Any stage failure aborts the run; an output written before the failure is
/// left in place.
#[instrument(level = "info", skip(config), fields(output_dir = %config.output_dir.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let start = Instant::now();

    let merged = extract(&config.input_csv, &config.input_parquet)?;
    let clean = transform(&merged)?;
    let aggregate = avg_weekly_sales_per_month(&clean);
    let outputs = load(&clean, &aggregate, &config.output_dir)?;

    let clean_present = validation(&outputs.clean);
    let agg_present = validation(&outputs.aggregate);

    let summary = RunSummary {
        merged_rows: merged.num_rows(),
        clean_rows: clean.len(),
        months: aggregate.len(),
        outputs,
        outputs_present: clean_present && agg_present,
    };
    info!(
        merged = summary.merged_rows,
        clean = summary.clean_rows,
        months = summary.months,
        elapsed = ?start.elapsed(),
        "run finished"
    );
    Ok(summary)
}
