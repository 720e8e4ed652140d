//! CSV export of screen outputs.
//!
//! Qualifier lines are written with the exact MDVR headers so they can be
//! pasted into the report template. The other writers are for review.

use std::io::Write;

use super::mdvr::QualifierRecord;
use super::screening::{DailyMax, OverrangeFlag, RatioFlag};
use super::{FailureTable, QcError};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write qualifier lines with MDVR headers in report order
pub fn write_qualifier_csv<W: Write>(writer: W, lines: &[QualifierRecord]) -> Result<(), QcError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if lines.is_empty() {
        csv_writer.write_record(super::mdvr::MDVR_COLUMNS)?;
    }
    for line in lines {
        csv_writer.serialize(line)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a long-form failure table; clean rows carry the `__NONE__` sentinel
pub fn write_failure_csv<W: Write>(writer: W, failures: &FailureTable) -> Result<(), QcError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date_time", "filename", failures.flag_column])?;
    for row in &failures.rows {
        csv_writer.write_record([
            row.date_time.format(DATE_TIME_FORMAT).to_string(),
            row.filename.clone(),
            row.flag_labels().join(";"),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write ratio screen matches
pub fn write_ratio_csv<W: Write>(writer: W, flags: &[RatioFlag]) -> Result<(), QcError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date_time", "screen_reason", "compounds"])?;
    for flag in flags {
        csv_writer.write_record([
            flag.date_time.format(DATE_TIME_FORMAT).to_string(),
            flag.screen_reason.to_string(),
            flag.compounds.join(";"),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write overrange values
pub fn write_overrange_csv<W: Write>(writer: W, flags: &[OverrangeFlag]) -> Result<(), QcError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date_time", "compound", "value", "compound_name"])?;
    for flag in flags {
        csv_writer.write_record([
            flag.date_time.format(DATE_TIME_FORMAT).to_string(),
            flag.compound.to_string(),
            flag.value.to_string(),
            flag.compound_name.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write daily maximum TNMHC values
pub fn write_daily_max_csv<W: Write>(writer: W, daily: &[DailyMax]) -> Result<(), QcError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date_time", "tnmhc"])?;
    for entry in daily {
        csv_writer.write_record([
            entry.date_time.format(DATE_TIME_FORMAT).to_string(),
            entry.value.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounds::codes;
    use crate::qc::FailureRow;
    use crate::table::parse_timestamp;

    fn qualifier() -> QualifierRecord {
        QualifierRecord {
            parameters: "Benzene, Toluene".to_string(),
            reason: "Blank(s) above respective MDL(s)".to_string(),
            code: "LB".to_string(),
            start_date: "01/02/2026".to_string(),
            start_hour: "08:00".to_string(),
            separator: "-".to_string(),
            end_date: "01/04/2026".to_string(),
            end_hour: "06:00".to_string(),
            justification: "Blank(s) above respective MDL(s)".to_string(),
        }
    }

    #[test]
    fn test_qualifier_headers() {
        let mut out = Vec::new();
        write_qualifier_csv(&mut out, &[qualifier()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Parameter(s),COMPOUND(S) or WHOLE HOUR(S) - REASON,CODE,startdate,starthour,-,enddate,endhour,Justification"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Benzene, Toluene\",Blank(s) above respective MDL(s),LB,01/02/2026,08:00,-,01/04/2026,06:00,Blank(s) above respective MDL(s)"
        );
    }

    #[test]
    fn test_empty_qualifiers_keep_headers() {
        let mut out = Vec::new();
        write_qualifier_csv(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Parameter(s),"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_failure_csv_sentinel() {
        let mut failures = FailureTable::new("failing_qc");
        failures.rows.push(FailureRow {
            date_time: parse_timestamp("2026-01-05 12:00").unwrap(),
            filename: "SITE0105C12A".to_string(),
            compounds: vec![codes::BENZENE, codes::TOLUENE],
        });
        failures.rows.push(FailureRow {
            date_time: parse_timestamp("2026-01-06 12:00").unwrap(),
            filename: "SITE0106C12A".to_string(),
            compounds: vec![],
        });

        let mut out = Vec::new();
        write_failure_csv(&mut out, &failures).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date_time,filename,failing_qc");
        assert_eq!(lines[1], "2026-01-05 12:00:00,SITE0105C12A,45201;45202");
        assert_eq!(lines[2], "2026-01-06 12:00:00,SITE0106C12A,__NONE__");
    }
}
