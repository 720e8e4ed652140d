//! MDVR (Monthly Data Validation Report) qualifier generation.
//!
//! Each compound column of a wide failure matrix is merged into failure
//! intervals. Intervals sharing the same bounds are combined into one
//! qualifier line, and the bounds are moved inward by one hour so the line
//! covers only the failing hours.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::compounds::{AqsCodeIndex, CompoundCode};
use crate::table::{ConcentrationTable, SampleType, TimeBounds};

use super::intervals::{compute_failure_intervals, FailureInterval};
use super::{QcError, WideFailureMatrix};

/// Date format of the MDVR start/end date columns
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Hour format of the MDVR start/end hour columns
pub const HOUR_FORMAT: &str = "%H:00";

/// MDVR column headers in report order
pub const MDVR_COLUMNS: [&str; 9] = [
    "Parameter(s)",
    "COMPOUND(S) or WHOLE HOUR(S) - REASON",
    "CODE",
    "startdate",
    "starthour",
    "-",
    "enddate",
    "endhour",
    "Justification",
];

const BLANK_REASON: &str = "Blank(s) above respective MDL(s)";

/// QC canister sample types subject to recovery screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QcType {
    /// Calibration Verification Standard
    Cvs,
    /// Laboratory Control Standard
    Lcs,
    /// Round Trip Standard
    Rts,
}

impl QcType {
    pub const ALL: [QcType; 3] = [QcType::Cvs, QcType::Lcs, QcType::Rts];

    /// Report name ("CVS", "LCS", "RTS")
    pub fn name(&self) -> &'static str {
        match self {
            QcType::Cvs => "CVS",
            QcType::Lcs => "LCS",
            QcType::Rts => "RTS",
        }
    }

    /// Corresponding sample type
    pub fn sample_type(&self) -> SampleType {
        match self {
            QcType::Cvs => SampleType::Cvs,
            QcType::Lcs => SampleType::Lcs,
            QcType::Rts => SampleType::Rts,
        }
    }
}

impl fmt::Display for QcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<SampleType> for QcType {
    type Error = QcError;

    fn try_from(sample_type: SampleType) -> Result<Self, Self::Error> {
        match sample_type {
            SampleType::Cvs => Ok(QcType::Cvs),
            SampleType::Lcs => Ok(QcType::Lcs),
            SampleType::Rts => Ok(QcType::Rts),
            other => Err(QcError::InvalidSampleType(other)),
        }
    }
}

/// Which screen a qualifier line reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualifierKind {
    /// Blank exceedance
    Blank,
    /// QC recovery failure
    QcRecovery(QcType),
}

impl QualifierKind {
    /// Regulatory qualifier code
    pub fn code(&self) -> &'static str {
        match self {
            QualifierKind::Blank => "LB",
            QualifierKind::QcRecovery(_) => "QX",
        }
    }

    /// Reason text
    pub fn reason(&self) -> String {
        match self {
            QualifierKind::Blank => BLANK_REASON.to_string(),
            QualifierKind::QcRecovery(qc_type) => format!("{} recovery outside acceptable bounds", qc_type),
        }
    }

    /// Justification text (same as the reason)
    pub fn justification(&self) -> String {
        self.reason()
    }
}

/// One MDVR qualifier line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifierRecord {
    /// Comma-separated compound names
    #[serde(rename = "Parameter(s)")]
    pub parameters: String,
    #[serde(rename = "COMPOUND(S) or WHOLE HOUR(S) - REASON")]
    pub reason: String,
    #[serde(rename = "CODE")]
    pub code: String,
    #[serde(rename = "startdate")]
    pub start_date: String,
    #[serde(rename = "starthour")]
    pub start_hour: String,
    #[serde(rename = "-")]
    pub separator: String,
    #[serde(rename = "enddate")]
    pub end_date: String,
    #[serde(rename = "endhour")]
    pub end_hour: String,
    #[serde(rename = "Justification")]
    pub justification: String,
}

fn truncate_to_hour(date_time: NaiveDateTime) -> NaiveDateTime {
    date_time
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(date_time)
}

fn merge_columns(
    wide: &WideFailureMatrix,
    bounds: TimeBounds,
    index: &AqsCodeIndex,
) -> Result<Vec<(&'static str, Vec<FailureInterval>)>, QcError> {
    let merge = |code: &CompoundCode| -> Result<(&'static str, Vec<FailureInterval>), QcError> {
        let name = index.aqs_to_name(*code)?;
        let series = wide.column(*code).unwrap_or_default();
        Ok((name, compute_failure_intervals(&series, bounds)))
    };

    #[cfg(feature = "parallel")]
    let merged = wide.columns().par_iter().map(merge).collect();

    #[cfg(not(feature = "parallel"))]
    let merged = wide.columns().iter().map(merge).collect();

    merged
}

/// Reported window for a merged interval
///
/// Bounds are truncated to the hour, then the start moves forward and the
/// end back by one hour so the passing samples themselves are not
/// qualified. When sub-hourly samples put both passes in the same or
/// adjacent hours the shifted window would invert; the truncated bounds are
/// reported instead.
fn report_window(interval: FailureInterval) -> (NaiveDateTime, NaiveDateTime) {
    let start = truncate_to_hour(interval.start);
    let end = truncate_to_hour(interval.end);
    let shifted_start = start.checked_add_signed(Duration::hours(1)).unwrap_or(start);
    let shifted_end = end.checked_sub_signed(Duration::hours(1)).unwrap_or(end);
    if shifted_start > shifted_end {
        (start, end)
    } else {
        (shifted_start, shifted_end)
    }
}

/// Build qualifier lines from a wide failure matrix
///
/// `table` supplies the global time bounds for interval merging. Lines are
/// grouped on their reported window and come out in chronological order;
/// compounds within a line keep column order and appear once.
pub fn build_qualifier_lines(
    table: &ConcentrationTable,
    wide: &WideFailureMatrix,
    kind: QualifierKind,
    index: &AqsCodeIndex,
) -> Result<Vec<QualifierRecord>, QcError> {
    let Some(bounds) = table.time_bounds() else {
        return Ok(Vec::new());
    };

    let mut groups: BTreeMap<(NaiveDateTime, NaiveDateTime), Vec<&'static str>> = BTreeMap::new();
    for (name, intervals) in merge_columns(wide, bounds, index)? {
        for interval in intervals {
            let names = groups.entry(report_window(interval)).or_default();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    let reason = kind.reason();
    let justification = kind.justification();
    let lines: Vec<QualifierRecord> = groups
        .into_iter()
        .map(|((start, end), names)| QualifierRecord {
            parameters: names.join(", "),
            reason: reason.clone(),
            code: kind.code().to_string(),
            start_date: start.format(DATE_FORMAT).to_string(),
            start_hour: start.format(HOUR_FORMAT).to_string(),
            separator: "-".to_string(),
            end_date: end.format(DATE_FORMAT).to_string(),
            end_hour: end.format(HOUR_FORMAT).to_string(),
            justification: justification.clone(),
        })
        .collect();

    log::debug!(
        "{} qualifier lines ({}) from {} compound columns",
        lines.len(),
        kind.code(),
        wide.columns().len()
    );
    Ok(lines)
}

/// Qualifier lines for blank exceedances (code "LB")
pub fn build_blank_qualifier_lines(
    table: &ConcentrationTable,
    wide: &WideFailureMatrix,
    index: &AqsCodeIndex,
) -> Result<Vec<QualifierRecord>, QcError> {
    build_qualifier_lines(table, wide, QualifierKind::Blank, index)
}

/// Qualifier lines for QC recovery failures (code "QX")
pub fn build_qc_qualifier_lines(
    table: &ConcentrationTable,
    wide: &WideFailureMatrix,
    qc_type: QcType,
    index: &AqsCodeIndex,
) -> Result<Vec<QualifierRecord>, QcError> {
    build_qualifier_lines(table, wide, QualifierKind::QcRecovery(qc_type), index)
}
