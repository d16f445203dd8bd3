use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INPUT_CSV: &str = "data/grocery_sales.csv";
pub const DEFAULT_INPUT_PARQUET: &str = "data/extra_data.parquet";
pub const DEFAULT_OUTPUT_DIR: &str = "data";

pub const CLEAN_FILE_NAME: &str = "clean_data.csv";
pub const AGG_FILE_NAME: &str = "agg_data.csv";

/// Merge, clean and aggregate weekly grocery sales
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "salesprep", version)]
pub struct PipelineConfig {
    /// Primary sales table (CSV with header, keyed by `index`)
    #[arg(long, default_value = DEFAULT_INPUT_CSV)]
    pub input_csv: PathBuf,

    /// Secondary table joined onto the sales rows (Parquet, keyed by `index`)
    #[arg(long, default_value = DEFAULT_INPUT_PARQUET)]
    pub input_parquet: PathBuf,

    /// Directory receiving clean_data.csv and agg_data.csv
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from(DEFAULT_INPUT_CSV),
            input_parquet: PathBuf::from(DEFAULT_INPUT_PARQUET),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl PipelineConfig {
    pub fn clean_path(&self) -> PathBuf {
        self.output_dir.join(CLEAN_FILE_NAME)
    }

    pub fn agg_path(&self) -> PathBuf {
        self.output_dir.join(AGG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_matches_default() {
        let parsed = PipelineConfig::parse_from(["salesprep"]);
        assert_eq!(parsed, PipelineConfig::default());
        assert_eq!(parsed.clean_path(), PathBuf::from("data/clean_data.csv"));
        assert_eq!(parsed.agg_path(), PathBuf::from("data/agg_data.csv"));
    }

    #[test]
    fn test_output_dir_override() {
        let parsed = PipelineConfig::parse_from(["salesprep", "--output-dir", "/tmp/out"]);
        assert_eq!(parsed.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(parsed.input_csv, PathBuf::from(DEFAULT_INPUT_CSV));
        assert_eq!(parsed.agg_path(), PathBuf::from("/tmp/out/agg_data.csv"));
    }
}
