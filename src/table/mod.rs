//! # Concentration Table
//!
//! The time-indexed measurement matrix handed to every QC screen: one
//! [`SampleRecord`] per chromatogram pair, one value per compound code, plus
//! the sample type and source filename.
//!
//! Tables are built once per site-month and never mutated afterwards. The
//! global time bounds used by interval merging always come from the full
//! table, not from a filtered subset.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::compounds::CompoundCode;

mod error;
mod reader;

#[cfg(test)]
mod tests;

pub use error::TableError;
pub use reader::{parse_timestamp, DATE_TIME_COLUMN, FILENAME_COLUMN, SAMPLE_TYPE_COLUMN};

/// Sample type codes from the AutoGC filename convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SampleType {
    /// Ambient air sample ('s')
    Ambient,
    /// Zero-air blank ('b')
    Blank,
    /// Calibration Verification Standard ('c')
    Cvs,
    /// Round Trip Standard ('q')
    Rts,
    /// Laboratory Control Standard ('e')
    Lcs,
    /// Method detection limit point ('d')
    MdlPoint,
    /// Calibration curve point ('m')
    CalibrationPoint,
    /// Experimental run ('x')
    Experimental,
}

impl SampleType {
    /// All sample types in filename-code order
    pub const ALL: [SampleType; 8] = [
        SampleType::Ambient,
        SampleType::Blank,
        SampleType::Cvs,
        SampleType::Rts,
        SampleType::Lcs,
        SampleType::MdlPoint,
        SampleType::CalibrationPoint,
        SampleType::Experimental,
    ];

    /// Single-character code used in filenames and the `sample_type` column
    pub fn code(&self) -> char {
        match self {
            SampleType::Ambient => 's',
            SampleType::Blank => 'b',
            SampleType::Cvs => 'c',
            SampleType::Rts => 'q',
            SampleType::Lcs => 'e',
            SampleType::MdlPoint => 'd',
            SampleType::CalibrationPoint => 'm',
            SampleType::Experimental => 'x',
        }
    }

    /// Parse a single-character sample type code
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SampleType::Ambient => "Ambient",
            SampleType::Blank => "Blank",
            SampleType::Cvs => "CVS",
            SampleType::Rts => "RTS",
            SampleType::Lcs => "LCS",
            SampleType::MdlPoint => "MDL point",
            SampleType::CalibrationPoint => "Calibration point",
            SampleType::Experimental => "Experimental",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One measured observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Injection timestamp (instrument local time)
    pub date_time: NaiveDateTime,
    /// Sample type parsed from the filename
    pub sample_type: SampleType,
    /// Source filename base
    pub filename: String,
    /// Measured concentrations in ppbC; absent codes were not detected
    pub values: BTreeMap<CompoundCode, f64>,
}

impl SampleRecord {
    /// Create an empty record
    pub fn new(date_time: NaiveDateTime, sample_type: SampleType, filename: impl Into<String>) -> Self {
        Self {
            date_time,
            sample_type,
            filename: filename.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper to set a concentration
    pub fn with_value(mut self, code: CompoundCode, value: f64) -> Self {
        self.values.insert(code, value);
        self
    }

    /// Measured value for a compound; NaN reads as missing
    pub fn value(&self, code: CompoundCode) -> Option<f64> {
        self.values.get(&code).copied().filter(|v| !v.is_nan())
    }

    /// Calendar date of the observation
    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }
}

/// Global min/max timestamps of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    /// Earliest timestamp in the table
    pub min: NaiveDateTime,
    /// Latest timestamp in the table
    pub max: NaiveDateTime,
}

/// Time-indexed concentration matrix for one site-month
#[derive(Debug, Clone, Default)]
pub struct ConcentrationTable {
    columns: Vec<CompoundCode>,
    records: Vec<SampleRecord>,
}

impl ConcentrationTable {
    /// Build a table from explicit compound columns and records
    ///
    /// Repeated codes in `columns` keep their first position. Codes present
    /// in records but not listed in `columns` are appended as extra columns
    /// so every measured value stays addressable.
    pub fn new(columns: Vec<CompoundCode>, records: Vec<SampleRecord>) -> Self {
        let mut seen = BTreeSet::new();
        let mut columns: Vec<CompoundCode> = columns.into_iter().filter(|code| seen.insert(*code)).collect();
        for record in &records {
            for code in record.values.keys() {
                if seen.insert(*code) {
                    columns.push(*code);
                }
            }
        }
        Self { columns, records }
    }

    /// Build a table whose columns are the union of codes in the records
    pub fn from_records(records: Vec<SampleRecord>) -> Self {
        Self::new(Vec::new(), records)
    }

    /// Compound columns in table order
    pub fn compound_columns(&self) -> &[CompoundCode] {
        &self.columns
    }

    /// All records in insertion order
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one sample type, sorted by time (stable for equal timestamps)
    pub fn rows_of_type(&self, sample_type: SampleType) -> Vec<&SampleRecord> {
        let mut rows: Vec<&SampleRecord> = self
            .records
            .iter()
            .filter(|r| r.sample_type == sample_type)
            .collect();
        rows.sort_by_key(|r| r.date_time);
        rows
    }

    /// Min/max timestamp over every record, regardless of sample type
    pub fn time_bounds(&self) -> Option<TimeBounds> {
        let min = self.records.iter().map(|r| r.date_time).min()?;
        let max = self.records.iter().map(|r| r.date_time).max()?;
        Some(TimeBounds { min, max })
    }

    /// Number of records per sample type
    pub fn sample_type_counts(&self) -> BTreeMap<SampleType, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.sample_type).or_insert(0) += 1;
        }
        counts
    }
}
