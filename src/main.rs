//! CLI entry point for rowmean.
//!
//! Reads a numeric CSV, averages every row's feature columns and writes an
//! `Id,y` table. With no arguments it reads `test.csv` and writes `output.csv`
//! in the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use rowmean::output::{print_json, print_pretty};
use rowmean::{PipelineConfig, run};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "rowmean")]
#[command(about = "Average each CSV row's feature columns into an Id,y table", long_about = None)]
struct Cli {
    /// CSV file to read; the first row is a header, the first column an identifier
    #[arg(short, long, value_name = "FILE", default_value = "test.csv")]
    input: PathBuf,

    /// CSV file to write
    #[arg(short, long, value_name = "FILE", default_value = "output.csv")]
    output: PathBuf,

    /// Field separator for both files (a single ASCII character, or "\t")
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("expected a single ASCII character, got {s:?}")),
        },
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr, plus a JSON rolling log file when LOG_FILE_PATH is set
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let (json_layer, _file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("rowmean.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?),
                );
            (Some(layer), Some(file_guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = PipelineConfig {
        input: cli.input,
        output: cli.output,
        delimiter: cli.delimiter,
    };

    let summary = run(&config)
        .inspect_err(|e| error!(error = %e, "Averaging failed"))
        .with_context(|| {
            format!(
                "failed to average {} into {}",
                config.input.display(),
                config.output.display()
            )
        })?;

    print_pretty(&summary);
    if cli.json {
        print_json(&summary)?;
    }

    Ok(())
}
