//! # QC Screening Engine
//!
//! Automated quality-control determinations for one site-month of AutoGC
//! data, feeding the Monthly Data Validation Report (MDVR).
//!
//! ## Screens
//!
//! 1. **Blank screen** ([`blanks`]): compounds above their MDL in blank samples
//! 2. **Recovery screen** ([`recovery`]): CVS/LCS/RTS recoveries outside 70-130%
//! 3. **Ambient screen** ([`screening`]): ratio plausibility battery, overrange
//!    values and daily maximum TNMHC
//!
//! Blank and recovery screens produce a long-form [`FailureTable`] that
//! converts to a compound-indexed [`WideFailureMatrix`]. Each wide column is
//! turned into merged failure intervals ([`intervals`]) and finally into
//! reportable qualifier lines ([`mdvr`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use autogc_qc::compounds::AqsCodeIndex;
//! use autogc_qc::qc::{blanks, mdvr};
//! use autogc_qc::table::ConcentrationTable;
//! use autogc_qc::thresholds::load_threshold_path;
//!
//! let index = AqsCodeIndex::global();
//! let table = ConcentrationTable::from_csv_path("site_2026_01.csv")?;
//! let mdls = load_threshold_path("mdls.csv", index)?;
//!
//! let wide = blanks::compounds_above_mdl(&table, &mdls, index).to_wide();
//! let lines = mdvr::build_blank_qualifier_lines(&table, &wide, index)?;
//! for line in &lines {
//!     println!("{} {} {}", line.parameters, line.start_date, line.start_hour);
//! }
//! # Ok::<(), autogc_qc::qc::QcError>(())
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::compounds::CompoundCode;

pub mod blanks;
pub mod export;
pub mod intervals;
pub mod mdvr;
pub mod recovery;
pub mod screening;

mod error;
mod report;

pub use error::QcError;
pub use intervals::{compute_failure_intervals, FailureInterval};
pub use mdvr::{QcType, QualifierKind, QualifierRecord};
pub use report::{CheckStatus, QcCheck, QcSummary};

/// Sentinel flag emitted for rows without any violation
pub const NONE_SENTINEL: &str = "__NONE__";

/// One screened sample in long form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRow {
    /// Sample timestamp
    pub date_time: NaiveDateTime,
    /// Source filename base
    pub filename: String,
    /// Codes violating the screen rule, empty when the row is clean
    pub compounds: Vec<CompoundCode>,
}

impl FailureRow {
    /// Whether the row has no violations
    pub fn is_clean(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Flag list as reported: the codes, or the `__NONE__` sentinel when clean
    pub fn flag_labels(&self) -> Vec<String> {
        if self.compounds.is_empty() {
            vec![NONE_SENTINEL.to_string()]
        } else {
            self.compounds.iter().map(|c| c.to_string()).collect()
        }
    }
}

/// Long-form screen output: one row per screened sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureTable {
    /// Name of the flag column (e.g. `compounds_above_mdl`, `failing_qc`)
    pub flag_column: &'static str,
    /// Rows sorted by time
    pub rows: Vec<FailureRow>,
}

impl FailureTable {
    /// Create an empty table with the given flag column name
    pub fn new(flag_column: &'static str) -> Self {
        Self {
            flag_column,
            rows: Vec::new(),
        }
    }

    /// Number of screened rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were screened
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with at least one violation
    pub fn failing_row_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_clean()).count()
    }

    /// Pivot into a timestamp x compound 0/1 matrix
    ///
    /// Only codes that failed in at least one row become columns; the
    /// sentinel never appears. Rows sharing a timestamp are merged.
    pub fn to_wide(&self) -> WideFailureMatrix {
        let mut by_time: BTreeMap<NaiveDateTime, BTreeSet<CompoundCode>> = BTreeMap::new();
        for row in &self.rows {
            by_time
                .entry(row.date_time)
                .or_default()
                .extend(row.compounds.iter().copied());
        }

        let columns: Vec<CompoundCode> = by_time
            .values()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut index = Vec::with_capacity(by_time.len());
        let mut values = Vec::with_capacity(by_time.len());
        for (date_time, failing) in by_time {
            index.push(date_time);
            values.push(columns.iter().map(|c| u8::from(failing.contains(c))).collect());
        }

        WideFailureMatrix {
            index,
            columns,
            values,
        }
    }
}

/// A single compound's pass/fail series, sorted by time
pub type FailureSeries = Vec<(NaiveDateTime, bool)>;

/// Wide-form failure matrix: rows are timestamps, columns compound codes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideFailureMatrix {
    index: Vec<NaiveDateTime>,
    columns: Vec<CompoundCode>,
    values: Vec<Vec<u8>>,
}

impl WideFailureMatrix {
    /// Row timestamps in ascending order
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Compound columns in ascending code order
    pub fn columns(&self) -> &[CompoundCode] {
        &self.columns
    }

    /// 0/1 cell value
    pub fn get(&self, date_time: NaiveDateTime, code: CompoundCode) -> Option<u8> {
        let row = self.index.binary_search(&date_time).ok()?;
        let col = self.columns.iter().position(|c| *c == code)?;
        Some(self.values[row][col])
    }

    /// Pass/fail series for one compound column
    pub fn column(&self, code: CompoundCode) -> Option<FailureSeries> {
        let col = self.columns.iter().position(|c| *c == code)?;
        Some(
            self.index
                .iter()
                .zip(&self.values)
                .map(|(t, row)| (*t, row[col] == 1))
                .collect(),
        )
    }

    /// Rows as (timestamp, 0/1 values in column order)
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDateTime, &[u8])> + '_ {
        self.index.iter().copied().zip(self.values.iter().map(|v| v.as_slice()))
    }

    /// Whether the matrix has no compound columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
