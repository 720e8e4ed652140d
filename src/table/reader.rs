use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::compounds::{AqsCodeIndex, CompoundCode};

use super::{ConcentrationTable, SampleRecord, SampleType, TableError};

/// Column holding the sample timestamp
pub const DATE_TIME_COLUMN: &str = "date_time";
/// Column holding the single-character sample type code
pub const SAMPLE_TYPE_COLUMN: &str = "sample_type";
/// Column holding the source filename base
pub const FILENAME_COLUMN: &str = "filename";

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a timestamp in one of the accepted table formats
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Resolve a compound column header, given either as an AQS code or a name
fn resolve_header(header: &str, index: &AqsCodeIndex) -> Result<CompoundCode, TableError> {
    let header = header.trim();
    if let Ok(raw) = header.parse::<u32>() {
        let code = CompoundCode(raw);
        index.aqs_to_name(code)?;
        return Ok(code);
    }
    Ok(index.name_to_aqs(header)?)
}

fn parse_value(cell: &str) -> Result<Option<f64>, String> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|e| format!("invalid concentration '{}': {}", cell, e))
}

impl ConcentrationTable {
    /// Load a concentration table from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Parse a concentration table from CSV
    ///
    /// The header must contain `date_time`, `sample_type` and `filename`;
    /// every other column is a compound keyed by AQS code or name. Empty
    /// cells are treated as not detected.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let index = AqsCodeIndex::global();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.to_string()).collect();

        let find = |name: &str| -> Result<usize, TableError> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))
        };
        let date_idx = find(DATE_TIME_COLUMN)?;
        let type_idx = find(SAMPLE_TYPE_COLUMN)?;
        let file_idx = find(FILENAME_COLUMN)?;

        let mut compound_columns: Vec<(usize, CompoundCode)> = Vec::new();
        let mut seen = BTreeSet::new();
        for (i, header) in headers.iter().enumerate() {
            if i == date_idx || i == type_idx || i == file_idx {
                continue;
            }
            let code = resolve_header(header, index)?;
            if !seen.insert(code) {
                return Err(TableError::DuplicateColumn {
                    header: header.clone(),
                    code,
                });
            }
            compound_columns.push((i, code));
        }

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let invalid = |message: String| TableError::InvalidFormat { line, message };

            let raw_time = record.get(date_idx).unwrap_or_default();
            let date_time = parse_timestamp(raw_time)
                .ok_or_else(|| invalid(format!("invalid timestamp '{}'", raw_time)))?;

            let raw_type = record.get(type_idx).unwrap_or_default();
            let mut chars = raw_type.chars();
            let sample_type = match (chars.next(), chars.next()) {
                (Some(c), None) => SampleType::from_code(c),
                _ => None,
            }
            .ok_or_else(|| invalid(format!("invalid sample type '{}'", raw_type)))?;

            let filename = record.get(file_idx).unwrap_or_default().to_string();

            let mut values = BTreeMap::new();
            for (i, code) in &compound_columns {
                if let Some(value) = parse_value(record.get(*i).unwrap_or_default()).map_err(&invalid)? {
                    values.insert(*code, value);
                }
            }

            records.push(SampleRecord {
                date_time,
                sample_type,
                filename,
                values,
            });
        }

        log::debug!(
            "Loaded concentration table: {} rows, {} compound columns",
            records.len(),
            compound_columns.len()
        );

        Ok(Self::new(
            compound_columns.into_iter().map(|(_, code)| code).collect(),
            records,
        ))
    }
}
