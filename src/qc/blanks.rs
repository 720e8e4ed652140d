//! Blank QC checks.
//!
//! Identifies compounds in blank samples that exceed their respective MDLs.

use crate::compounds::AqsCodeIndex;
use crate::table::{ConcentrationTable, SampleType};
use crate::thresholds::ThresholdMap;

use super::{FailureRow, FailureTable, WideFailureMatrix};

/// Flag column name for blank exceedances
pub const FLAG_COLUMN: &str = "compounds_above_mdl";

/// Check which compounds exceed their MDL in each blank sample
///
/// A compound is flagged when its measured value is present and strictly
/// greater than its MDL. Compounds without an MDL, unidentified-peak
/// placeholders, and missing measurements are never flagged.
pub fn compounds_above_mdl(
    table: &ConcentrationTable,
    mdls: &ThresholdMap,
    index: &AqsCodeIndex,
) -> FailureTable {
    let columns: Vec<_> = table
        .compound_columns()
        .iter()
        .copied()
        .filter(|code| index.is_screenable(*code) && mdls.contains_key(code))
        .collect();

    let mut result = FailureTable::new(FLAG_COLUMN);
    for record in table.rows_of_type(SampleType::Blank) {
        let above = columns
            .iter()
            .copied()
            .filter(|code| match (record.value(*code), mdls.get(code)) {
                (Some(value), Some(mdl)) => value > *mdl,
                _ => false,
            })
            .collect();

        result.rows.push(FailureRow {
            date_time: record.date_time,
            filename: record.filename.clone(),
            compounds: above,
        });
    }

    log::debug!(
        "Blank screen: {} blanks, {} with MDL exceedances",
        result.len(),
        result.failing_row_count()
    );
    result
}

/// Wide-format blank exceedance matrix (one column per compound, values 0/1)
pub fn compounds_above_mdl_wide(
    table: &ConcentrationTable,
    mdls: &ThresholdMap,
    index: &AqsCodeIndex,
) -> WideFailureMatrix {
    compounds_above_mdl(table, mdls, index).to_wide()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounds::codes;
    use crate::qc::NONE_SENTINEL;
    use crate::table::{parse_timestamp, SampleRecord};

    fn blank(time: &str, values: &[(crate::compounds::CompoundCode, f64)]) -> SampleRecord {
        let mut record = SampleRecord::new(parse_timestamp(time).unwrap(), SampleType::Blank, format!("B {}", time));
        for (code, value) in values {
            record = record.with_value(*code, *value);
        }
        record
    }

    fn mdls() -> ThresholdMap {
        ThresholdMap::from([
            (codes::BENZENE, 0.05),
            (codes::TOLUENE, 0.05),
            (codes::ETHANE, 0.05),
        ])
    }

    #[test]
    fn test_single_exceedance() {
        let index = AqsCodeIndex::global();
        let table = ConcentrationTable::from_records(vec![
            blank("2026-01-15 07:00", &[(codes::BENZENE, 5.0), (codes::TOLUENE, 0.01), (codes::ETHANE, 0.01)]),
            blank("2026-01-16 07:00", &[(codes::BENZENE, 0.01), (codes::TOLUENE, 0.01), (codes::ETHANE, 0.01)]),
        ]);

        let result = compounds_above_mdl(&table, &mdls(), index);
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[0].compounds, vec![codes::BENZENE]);
        assert_eq!(result.rows[1].flag_labels(), vec![NONE_SENTINEL.to_string()]);

        let wide = result.to_wide();
        assert_eq!(wide.columns(), &[codes::BENZENE]);
        assert_eq!(wide.get(parse_timestamp("2026-01-15 07:00").unwrap(), codes::BENZENE), Some(1));
        assert_eq!(wide.get(parse_timestamp("2026-01-16 07:00").unwrap(), codes::BENZENE), Some(0));
    }

    #[test]
    fn test_equal_to_mdl_passes() {
        let index = AqsCodeIndex::global();
        let table = ConcentrationTable::from_records(vec![blank("2026-01-15 07:00", &[(codes::BENZENE, 0.05)])]);
        let result = compounds_above_mdl(&table, &mdls(), index);
        assert!(result.rows[0].is_clean());
    }

    #[test]
    fn test_missing_mdl_and_missing_value_skipped() {
        let index = AqsCodeIndex::global();
        let table = ConcentrationTable::from_records(vec![blank(
            "2026-01-15 07:00",
            &[(codes::PROPANE, 99.0), (codes::BENZENE, f64::NAN), (codes::PLOT_UNID, 99.0)],
        )]);
        let mut thresholds = mdls();
        thresholds.insert(codes::PLOT_UNID, 0.01);

        let result = compounds_above_mdl(&table, &thresholds, index);
        assert!(result.rows[0].is_clean());
        assert!(result.to_wide().is_empty());
    }

    #[test]
    fn test_totals_are_screened() {
        let index = AqsCodeIndex::global();
        let table = ConcentrationTable::from_records(vec![blank("2026-01-15 07:00", &[(codes::TNMHC, 12.0)])]);
        let thresholds = ThresholdMap::from([(codes::TNMHC, 10.0)]);
        let result = compounds_above_mdl(&table, &thresholds, index);
        assert_eq!(result.rows[0].compounds, vec![codes::TNMHC]);
    }

    #[test]
    fn test_no_blanks_gives_empty_table() {
        let index = AqsCodeIndex::global();
        let record = SampleRecord::new(parse_timestamp("2026-01-15 08:00").unwrap(), SampleType::Ambient, "S")
            .with_value(codes::BENZENE, 50.0);
        let table = ConcentrationTable::from_records(vec![record]);

        let result = compounds_above_mdl(&table, &mdls(), index);
        assert!(result.is_empty());
        assert_eq!(result.flag_column, FLAG_COLUMN);
        assert!(compounds_above_mdl_wide(&table, &mdls(), index).is_empty());
    }
}
