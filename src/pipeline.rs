//! Load, reduce and store in one pass.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::PipelineError;
use crate::output::write_means;
use crate::stats::row_means;
use crate::table::{ReadOptions, load};

/// Where to read from, where to write to, and the field separator used for both.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input: PathBuf::from("test.csv"),
            output: PathBuf::from("output.csv"),
            delimiter: b',',
        }
    }
}

/// What a successful run did.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub feature_columns: usize,
}

/// Reads `config.input`, averages each row's feature columns and writes the
/// `Id,y` table to `config.output`.
///
/// The output file is only touched once the whole input has been validated.
#[tracing::instrument(skip(config), fields(input = %config.input.display(), output = %config.output.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let table = load(
        &config.input,
        ReadOptions {
            delimiter: config.delimiter,
        },
    )?;

    let means = row_means(&table);
    write_means(&config.output, &means, config.delimiter)?;

    let summary = RunSummary {
        timestamp: Utc::now(),
        input: config.input.clone(),
        output: config.output.clone(),
        rows: means.len(),
        feature_columns: table.feature_columns(),
    };

    info!(
        rows = summary.rows,
        feature_columns = summary.feature_columns,
        "Row means computed"
    );

    Ok(summary)
}
