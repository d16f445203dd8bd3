use anyhow::{Context, Result};
use clap::Parser;
use salesprep::{config::PipelineConfig, pipeline};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configure paths ──────────────────────────────────────────
    let config = PipelineConfig::parse();
    info!(
        input_csv = %config.input_csv.display(),
        input_parquet = %config.input_parquet.display(),
        output_dir = %config.output_dir.display(),
        "startup"
    );

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = pipeline::run(&config).context("ETL run failed")?;
    if !summary.outputs_present {
        warn!("output files missing after write");
    }

    println!("ETL complete");
    Ok(())
}
