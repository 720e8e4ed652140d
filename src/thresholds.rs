//! Threshold normalization at the API boundary.
//!
//! MDLs and canister concentrations arrive keyed by either compound name or
//! AQS code. Everything past this module works on a [`ThresholdMap`] keyed
//! strictly by [`CompoundCode`], fully resolved before any screen runs.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::compounds::{AqsCodeIndex, CompoundCode, CompoundError, ConcentrationUnit};
use crate::qc::QcError;

/// Per-compound threshold values in ppbC, keyed by AQS code
pub type ThresholdMap = BTreeMap<CompoundCode, f64>;

/// A compound identifier as supplied by callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompoundKey {
    /// AQS code
    Code(CompoundCode),
    /// Compound name, resolved through the vocabulary
    Name(String),
}

impl CompoundKey {
    /// Resolve to an AQS code known to the vocabulary
    pub fn resolve(&self, index: &AqsCodeIndex) -> Result<CompoundCode, CompoundError> {
        match self {
            CompoundKey::Code(code) => {
                index.aqs_to_name(*code)?;
                Ok(*code)
            }
            CompoundKey::Name(name) => index.name_to_aqs(name),
        }
    }
}

impl From<CompoundCode> for CompoundKey {
    fn from(code: CompoundCode) -> Self {
        CompoundKey::Code(code)
    }
}

impl From<u32> for CompoundKey {
    fn from(code: u32) -> Self {
        CompoundKey::Code(CompoundCode(code))
    }
}

impl From<&str> for CompoundKey {
    fn from(text: &str) -> Self {
        match text.trim().parse::<u32>() {
            Ok(code) => CompoundKey::Code(CompoundCode(code)),
            Err(_) => CompoundKey::Name(text.to_string()),
        }
    }
}

impl From<String> for CompoundKey {
    fn from(text: String) -> Self {
        CompoundKey::from(text.as_str())
    }
}

/// Normalize name- or code-keyed values into a [`ThresholdMap`]
///
/// NaN values are dropped so the compound is simply absent from screening.
/// Later entries for the same compound replace earlier ones.
pub fn normalize_thresholds<I, K>(entries: I, index: &AqsCodeIndex) -> Result<ThresholdMap, QcError>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<CompoundKey>,
{
    let mut map = ThresholdMap::new();
    for (key, value) in entries {
        let code = key.into().resolve(index)?;
        if value.is_nan() {
            continue;
        }
        map.insert(code, value);
    }
    Ok(map)
}

#[derive(Debug, Deserialize)]
struct ThresholdRow {
    compound: String,
    value: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
}

/// Load thresholds from CSV with columns `compound,value[,unit]`
///
/// When a unit is given the value is converted to ppbC with the compound's
/// carbon count. Rows with an empty value are skipped.
pub fn load_threshold_csv<R: Read>(reader: R, index: &AqsCodeIndex) -> Result<ThresholdMap, QcError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in csv_reader.deserialize::<ThresholdRow>() {
        let row = result?;
        let Some(value) = row.value else {
            continue;
        };
        let code = CompoundKey::from(row.compound.as_str()).resolve(index)?;
        let value = match row.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => {
                let unit: ConcentrationUnit = unit.parse()?;
                let carbon_count = match unit {
                    ConcentrationUnit::Ppbc | ConcentrationUnit::Ppmc => 0,
                    _ => index.carbon_count(code)?,
                };
                unit.to_ppbc(value, carbon_count)?
            }
            None => value,
        };
        entries.push((code, value));
    }

    let map = normalize_thresholds(entries, index)?;
    log::debug!("Loaded {} threshold values", map.len());
    Ok(map)
}

/// Load thresholds from a CSV file
pub fn load_threshold_path<P: AsRef<Path>>(path: P, index: &AqsCodeIndex) -> Result<ThresholdMap, QcError> {
    let file = File::open(path)?;
    load_threshold_csv(BufReader::new(file), index)
}
