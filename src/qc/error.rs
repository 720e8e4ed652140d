use crate::compounds::CompoundError;
use crate::table::{SampleType, TableError};

/// Errors raised by QC screens and their input normalization
#[derive(Debug, thiserror::Error)]
pub enum QcError {
    /// Recovery screening requested for a sample type that is not a QC canister
    #[error("qc_type must be CVS, LCS or RTS (c, e or q), got {} ('{}')", .0, .0.code())]
    InvalidSampleType(SampleType),

    /// Threshold or exclusion keyed by an unrecognized compound
    #[error("{0}")]
    UnknownCompound(#[from] CompoundError),

    /// Input table violates its shape contract
    #[error("Missing data: {0}")]
    MissingData(String),

    /// I/O error reading inputs or writing outputs
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error reading inputs or writing outputs
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error loading the concentration table
    #[error("Table error: {0}")]
    TableError(#[from] TableError),
}
