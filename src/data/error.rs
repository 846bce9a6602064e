use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a benchmark table or looking up one of its columns.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("missing header row")]
    MissingHeader,

    #[error("column '{0}' appears more than once in the header")]
    DuplicateColumn(String),

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("no column named '{name}'")]
    MissingColumn { name: String },
}
