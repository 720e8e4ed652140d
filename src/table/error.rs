use crate::compounds::{CompoundCode, CompoundError};

/// Errors that can occur while building a concentration table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading the table
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column absent from the input
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Two headers resolve to the same compound (e.g. `Benzene` and `45201`)
    #[error("Duplicate compound column: '{header}' repeats AQS code {code}")]
    DuplicateColumn {
        /// Header text of the repeated column
        header: String,
        /// Code both headers resolve to
        code: CompoundCode,
    },

    /// Malformed row or cell
    #[error("Invalid table format at line {line}: {message}")]
    InvalidFormat {
        /// 1-based line number in the source
        line: u64,
        /// Description of the problem
        message: String,
    },

    /// Compound header that does not resolve to a known code
    #[error("Unrecognized compound column: {0}")]
    UnknownCompound(#[from] CompoundError),
}
