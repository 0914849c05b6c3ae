//! Error types for the averaging pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, reducing or storing a table.
///
/// Every variant is fatal: the pipeline validates the whole input before it
/// writes anything, so none of these leave a partial output file behind.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input path does not exist.
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A cell is not numeric, or a row has the wrong number of columns.
    #[error("invalid input at line {line}: {message}")]
    InputFormat { line: u64, message: String },

    /// The input has a header but no data rows.
    #[error("input has no data rows")]
    EmptyInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub(crate) fn input_format(line: u64, message: impl Into<String>) -> Self {
        PipelineError::InputFormat {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_message_names_line() {
        let err = PipelineError::input_format(3, "column 2: \"abc\" is not a number");
        assert_eq!(
            err.to_string(),
            "invalid input at line 3: column 2: \"abc\" is not a number"
        );
    }

    #[test]
    fn test_file_not_found_message_names_path() {
        let err = PipelineError::FileNotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: missing.csv");
    }
}
