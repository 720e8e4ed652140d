//! QC recovery checks for CVS, RTS and LCS samples.
//!
//! Measured concentrations are compared against the expected value
//! (canister concentration times blend ratio). Recoveries outside
//! [`RECOVERY_LOWER_BOUND`]..=[`RECOVERY_UPPER_BOUND`] are flagged.

use crate::compounds::{AqsCodeIndex, CompoundCode};
use crate::table::{ConcentrationTable, SampleType};
use crate::thresholds::ThresholdMap;

use super::mdvr::QcType;
use super::{FailureRow, FailureTable, QcError, WideFailureMatrix};

/// Flag column name for recovery failures
pub const FLAG_COLUMN: &str = "failing_qc";

/// Lowest passing recovery (inclusive)
pub const RECOVERY_LOWER_BOUND: f64 = 0.70;

/// Highest passing recovery (inclusive)
pub const RECOVERY_UPPER_BOUND: f64 = 1.30;

/// Whether a recovery ratio lies outside the acceptable window
pub fn recovery_out_of_bounds(recovery: f64) -> bool {
    recovery > RECOVERY_UPPER_BOUND || recovery < RECOVERY_LOWER_BOUND
}

/// Check QC sample recovery against expected concentrations
///
/// `canister` holds certified concentrations before dilution. Compounds
/// without a canister value, or whose expected value is zero, are not
/// evaluated.
///
/// # Errors
///
/// Returns [`QcError::InvalidSampleType`] unless `qc_type` is CVS, LCS or RTS.
pub fn check_qc_recovery(
    table: &ConcentrationTable,
    qc_type: SampleType,
    canister: &ThresholdMap,
    blend_ratio: f64,
    index: &AqsCodeIndex,
) -> Result<FailureTable, QcError> {
    let qc_type = QcType::try_from(qc_type)?;

    let expected: Vec<(CompoundCode, f64)> = table
        .compound_columns()
        .iter()
        .filter(|code| index.is_screenable(**code))
        .filter_map(|code| {
            let value = canister.get(code)? * blend_ratio;
            (value != 0.0 && !value.is_nan()).then_some((*code, value))
        })
        .collect();

    let mut result = FailureTable::new(FLAG_COLUMN);
    for record in table.rows_of_type(qc_type.sample_type()) {
        let failing = expected
            .iter()
            .filter(|(code, expected)| {
                record
                    .value(*code)
                    .is_some_and(|measured| recovery_out_of_bounds(measured / expected))
            })
            .map(|(code, _)| *code)
            .collect();

        result.rows.push(FailureRow {
            date_time: record.date_time,
            filename: record.filename.clone(),
            compounds: failing,
        });
    }

    log::debug!(
        "{} recovery screen: {} samples, {} outside {:.0}-{:.0}%",
        qc_type,
        result.len(),
        result.failing_row_count(),
        RECOVERY_LOWER_BOUND * 100.0,
        RECOVERY_UPPER_BOUND * 100.0
    );
    Ok(result)
}

/// Wide-format recovery failure matrix (one column per compound, values 0/1)
pub fn check_qc_recovery_wide(
    table: &ConcentrationTable,
    qc_type: SampleType,
    canister: &ThresholdMap,
    blend_ratio: f64,
    index: &AqsCodeIndex,
) -> Result<WideFailureMatrix, QcError> {
    Ok(check_qc_recovery(table, qc_type, canister, blend_ratio, index)?.to_wide())
}
