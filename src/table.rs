//! Delimited-text reader for numeric tables.
//!
//! The first record is a header and is only used to fix the table width. Every
//! following record is a data row: an identifier cell followed by one or more
//! feature cells, all of which must parse as `f64`. Blank lines and lines
//! starting with `#` are skipped, and whitespace around cells is ignored.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::PipelineError;

/// Options for [`parse`] and [`load`].
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { delimiter: b',' }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    /// 1-based line in the source file.
    pub line: u64,
    /// Identifier cell exactly as it appeared (trimmed); validated as numeric.
    pub id: String,
    pub features: Vec<f64>,
}

/// A validated table: at least one row, and every row has the same number of
/// feature columns (at least one).
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    columns: usize,
    rows: Vec<DataRow>,
}

impl NumericTable {
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns averaged per row (everything but the identifier).
    pub fn feature_columns(&self) -> usize {
        self.columns - 1
    }
}

/// Opens `path` and parses it with [`parse`].
///
/// # Errors
///
/// Returns [`PipelineError::FileNotFound`] if `path` does not exist, and
/// whatever [`parse`] returns for malformed content.
#[tracing::instrument(skip(path, options), fields(path = %path.display()))]
pub fn load(path: &Path, options: ReadOptions) -> Result<NumericTable, PipelineError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PipelineError::Io(e),
    })?;

    let table = parse(file, options)?;
    debug!(
        rows = table.len(),
        feature_columns = table.feature_columns(),
        "Table loaded"
    );
    Ok(table)
}

/// Parses a header line plus numeric data rows from `reader`.
///
/// # Errors
///
/// - [`PipelineError::EmptyInput`] if there is no header or no data row.
/// - [`PipelineError::InputFormat`] if the header has fewer than two columns,
///   a row's width differs from the header's, or a cell is empty or
///   non-numeric.
pub fn parse<R: Read>(reader: R, options: ReadOptions) -> Result<NumericTable, PipelineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers()?.clone();
    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
    if header.is_empty() || records.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let columns = header.len();
    if columns < 2 {
        return Err(PipelineError::input_format(
            line_of(&header),
            format!("expected an identifier and at least one feature column, found {columns} column"),
        ));
    }

    let rows = records
        .iter()
        .map(|record| parse_row(record, columns))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NumericTable { columns, rows })
}

fn parse_row(record: &StringRecord, columns: usize) -> Result<DataRow, PipelineError> {
    let line = line_of(record);

    if record.len() != columns {
        return Err(PipelineError::input_format(
            line,
            format!("expected {} columns, found {}", columns, record.len()),
        ));
    }

    let mut cells = record.iter().enumerate();

    // `record.len() == columns >= 2`, so there is always a first cell.
    let (_, id) = cells
        .next()
        .ok_or_else(|| PipelineError::input_format(line, "missing identifier"))?;
    parse_cell(line, 0, id)?;

    let features = cells
        .map(|(column, text)| parse_cell(line, column, text))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DataRow {
        line,
        id: id.to_string(),
        features,
    })
}

fn parse_cell(line: u64, column: usize, text: &str) -> Result<f64, PipelineError> {
    if text.is_empty() {
        return Err(PipelineError::input_format(
            line,
            format!("column {}: empty cell", column + 1),
        ));
    }

    text.parse::<f64>().map_err(|_| {
        PipelineError::input_format(
            line,
            format!("column {}: {:?} is not a number", column + 1, text),
        )
    })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(1)
}
