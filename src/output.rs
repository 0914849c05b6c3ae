//! Output formatting and persistence for row means.
//!
//! Writes the `Id,y` table, and pretty-prints or JSON-serializes the run summary.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::pipeline::RunSummary;
use crate::stats::RowMean;

/// Header line of the output table.
pub const HEADER: [&str; 2] = ["Id", "y"];

/// Logs a run summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &RunSummary) {
    debug!("{:#?}", summary);
}

/// Prints a run summary as pretty JSON on stdout.
pub fn print_json(summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes `Id,y` followed by one `<id>,<mean>` record per row to `writer`.
pub fn write_means_to<W: Write>(
    writer: W,
    means: &[RowMean],
    delimiter: u8,
) -> Result<(), PipelineError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for row in means {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Writes the table to `path`, replacing any existing file.
///
/// The records go to a sibling `.tmp` file first, which is renamed over `path`
/// once complete, so `path` is never left half-written.
pub fn write_means(path: &Path, means: &[RowMean], delimiter: u8) -> Result<(), PipelineError> {
    let tmp = tmp_path(path);
    debug!(path = %path.display(), tmp = %tmp.display(), rows = means.len(), "Writing output");

    let result = fs::File::create(&tmp)
        .map_err(PipelineError::from)
        .and_then(|file| write_means_to(file, means, delimiter))
        .and_then(|()| fs::rename(&tmp, path).map_err(PipelineError::from));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            warn!(tmp = %tmp.display(), error = %e, "Failed to remove temporary output");
        }
    } else {
        info!(path = %path.display(), rows = means.len(), "Output written");
    }

    result
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
