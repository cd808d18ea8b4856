//! CLI error types.

use solva_core::SolvaError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Unparseable number in an input file.
    #[error("{file}, line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        /// Input file.
        file: String,
        /// 1-based line number.
        line: usize,
        /// Column name.
        field: String,
        /// Raw cell content.
        value: String,
    },

    /// Required column absent from an input file.
    #[error("{file}: missing column '{column}'")]
    MissingColumn {
        /// Input file.
        file: String,
        /// Column name.
        column: String,
    },

    /// Input file without data rows.
    #[error("{0}: no data rows")]
    EmptyFile(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Input rejected by an engine.
    #[error(transparent)]
    Engine(#[from] SolvaError),

    /// CSV read or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
