//! # autogc-qc - AutoGC VOC Quality Control Screening
//!
//! `autogc_qc` automates the quality-control determinations behind the
//! Monthly Data Validation Report (MDVR) for AutoGC volatile organic compound
//! data. One site-month of concentrations goes in; flagged samples, merged
//! failure intervals and reportable qualifier lines come out.
//!
//! ## Key Features
//!
//! - **Typed compound vocabulary**: AQS codes, names, categories, carbon
//!   counts and GC columns for the 60 target compounds, plus totals and
//!   unidentified-peak codes ([`compounds`]).
//!
//! - **Threshold normalization**: MDLs and canister concentrations keyed by
//!   name or code are resolved once into a code-keyed map ([`thresholds`]).
//!
//! - **QC screens**: blanks above MDL, CVS/LCS/RTS recovery, a table-driven
//!   ratio battery, overrange values and daily maximum TNMHC ([`qc`]).
//!
//! - **MDVR qualifiers**: failures are bounded by the nearest passing samples,
//!   merged, grouped and written with the exact report headers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autogc_qc::compounds::AqsCodeIndex;
//! use autogc_qc::qc::{mdvr, recovery, QcType};
//! use autogc_qc::table::{ConcentrationTable, SampleType};
//! use autogc_qc::thresholds::normalize_thresholds;
//!
//! let index = AqsCodeIndex::global();
//! let table = ConcentrationTable::from_csv_path("site_2026_01.csv")?;
//! let canister = normalize_thresholds(vec![("Benzene", 10.0), ("Toluene", 9.8)], index)?;
//!
//! let failures = recovery::check_qc_recovery(&table, SampleType::Cvs, &canister, 0.1, index)?;
//! let lines = mdvr::build_qc_qualifier_lines(&table, &failures.to_wide(), QcType::Cvs, index)?;
//! println!("{} qualifier lines", lines.len());
//! # Ok::<(), autogc_qc::qc::QcError>(())
//! ```
//!
//! ## Units
//!
//! All concentrations handled by the screens are in ppbC. Threshold files may
//! carry a unit column and are converted on load.

#![deny(rustdoc::missing_crate_level_docs)]

pub mod compounds;
pub mod qc;
pub mod table;
pub mod thresholds;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::compounds::{codes, AqsCodeIndex, CompoundCode, CompoundError, ConcentrationUnit, VocCategory};
    pub use crate::qc::{
        compute_failure_intervals, FailureInterval, FailureTable, QcError, QcSummary, QcType, QualifierKind,
        QualifierRecord, WideFailureMatrix,
    };
    pub use crate::table::{ConcentrationTable, SampleRecord, SampleType, TableError, TimeBounds};
    pub use crate::thresholds::{normalize_thresholds, CompoundKey, ThresholdMap};
}
