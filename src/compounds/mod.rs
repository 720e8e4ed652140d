//! # Compound Vocabulary
//!
//! Type-safe access to the AutoGC compound reference vocabulary: EPA AQS
//! parameter codes, human-readable names, VOC categories and GC column
//! assignments.
//!
//! Codes partition into three disjoint sets:
//!
//! - **Target codes**: individually identified PAMS compounds
//! - **Total codes**: the TNMHC and TNMTC aggregates computed over all peaks
//! - **Unid codes**: per-column placeholders for unidentified peaks
//!
//! ## Usage
//!
//! ```rust
//! use autogc_qc::compounds::{codes, AqsCodeIndex};
//!
//! let index = AqsCodeIndex::global();
//! assert_eq!(index.name_to_aqs("Benzene").unwrap(), codes::BENZENE);
//! assert_eq!(index.aqs_to_name(codes::BENZENE).unwrap(), "Benzene");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

mod error;
mod units;
mod vocabulary;

#[cfg(test)]
mod tests;

pub use error::CompoundError;
pub use units::ConcentrationUnit;

/// EPA AQS parameter code identifying a compound or synthetic aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundCode(pub u32);

impl CompoundCode {
    /// Raw integer value of the code
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CompoundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CompoundCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// AQS codes referenced directly by the screening rules
pub mod codes {
    use super::CompoundCode;

    /// Total non-methane hydrocarbons
    pub const TNMHC: CompoundCode = CompoundCode(43000);
    /// Total non-methane (+oxygenate) total carbon
    pub const TNMTC: CompoundCode = CompoundCode(43102);
    /// Unidentified peaks on the PLOT column
    pub const PLOT_UNID: CompoundCode = CompoundCode(10000);
    /// Unidentified peaks on the BP column
    pub const BP_UNID: CompoundCode = CompoundCode(20000);

    pub const ETHANE: CompoundCode = CompoundCode(43202);
    pub const ETHYLENE: CompoundCode = CompoundCode(43203);
    pub const PROPANE: CompoundCode = CompoundCode(43204);
    pub const PROPYLENE: CompoundCode = CompoundCode(43205);
    pub const ISO_BUTANE: CompoundCode = CompoundCode(43214);
    pub const N_BUTANE: CompoundCode = CompoundCode(43212);
    pub const CYCLOPENTANE: CompoundCode = CompoundCode(43242);
    pub const ISO_PENTANE: CompoundCode = CompoundCode(43221);
    pub const N_PENTANE: CompoundCode = CompoundCode(43220);
    pub const METHYL_2_PENTANE: CompoundCode = CompoundCode(43285);
    pub const METHYL_3_PENTANE: CompoundCode = CompoundCode(43230);
    pub const METHYLCYCLOPENTANE: CompoundCode = CompoundCode(43262);
    pub const DIMETHYL_2_4_PENTANE: CompoundCode = CompoundCode(43247);
    pub const BENZENE: CompoundCode = CompoundCode(45201);
    pub const METHYL_2_HEXANE: CompoundCode = CompoundCode(43263);
    pub const DIMETHYL_2_3_PENTANE: CompoundCode = CompoundCode(43291);
    pub const TOLUENE: CompoundCode = CompoundCode(45202);
    pub const M_P_XYLENE: CompoundCode = CompoundCode(45109);
    pub const O_XYLENE: CompoundCode = CompoundCode(45204);
    pub const N_DECANE: CompoundCode = CompoundCode(43238);
    pub const N_UNDECANE: CompoundCode = CompoundCode(43954);
}

/// VOC compound categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocCategory {
    Alkane,
    Alkene,
    Alkyne,
    Aromatic,
    Terpene,
}

impl VocCategory {
    /// All categories in display order
    pub const ALL: [VocCategory; 5] = [
        VocCategory::Alkane,
        VocCategory::Alkene,
        VocCategory::Alkyne,
        VocCategory::Aromatic,
        VocCategory::Terpene,
    ];

    /// Category label as used in the reference database
    pub fn as_str(&self) -> &'static str {
        match self {
            VocCategory::Alkane => "Alkane",
            VocCategory::Alkene => "Alkene",
            VocCategory::Alkyne => "Alkyne",
            VocCategory::Aromatic => "Aromatic",
            VocCategory::Terpene => "Terpene",
        }
    }
}

impl fmt::Display for VocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VocCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown VOC category: {}", s))
    }
}

/// GC column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Porous layer open tubular column (light hydrocarbons, front channel)
    Plot,
    /// Boiling point column (heavier hydrocarbons, back channel)
    Bp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Plot => f.write_str("PLOT"),
            ColumnType::Bp => f.write_str("BP"),
        }
    }
}

/// Compound reporting priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    High,
}

/// Reference information for a target VOC compound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundInfo {
    /// EPA AQS parameter code
    pub code: CompoundCode,
    /// Compound name (e.g., "Benzene", "Ethane")
    pub name: &'static str,
    /// Compound category
    pub category: VocCategory,
    /// Number of carbon atoms in the molecule
    pub carbon_count: u8,
    /// Molecular weight in g/mol
    pub molecular_weight: f64,
    /// GC column used for analysis
    pub column: ColumnType,
    /// Order of elution from its column
    pub elution_order: u8,
    /// Analysis priority
    pub priority: Priority,
}

/// Bidirectional compound lookup over the reference vocabulary
///
/// Built once from the static compound list; all lookups are read-only.
#[derive(Debug)]
pub struct AqsCodeIndex {
    by_code: HashMap<CompoundCode, &'static str>,
    by_name: HashMap<&'static str, CompoundCode>,
    by_lower_name: HashMap<String, CompoundCode>,
    targets: HashMap<CompoundCode, &'static CompoundInfo>,
    target_codes: BTreeSet<CompoundCode>,
    total_codes: BTreeSet<CompoundCode>,
    unid_codes: BTreeSet<CompoundCode>,
}

static GLOBAL_INDEX: OnceLock<AqsCodeIndex> = OnceLock::new();

impl AqsCodeIndex {
    /// Shared index over the standard vocabulary
    pub fn global() -> &'static AqsCodeIndex {
        GLOBAL_INDEX.get_or_init(AqsCodeIndex::standard)
    }

    /// Build an index over the standard vocabulary
    pub fn standard() -> Self {
        let mut index = Self {
            by_code: HashMap::new(),
            by_name: HashMap::new(),
            by_lower_name: HashMap::new(),
            targets: HashMap::new(),
            target_codes: BTreeSet::new(),
            total_codes: BTreeSet::from([codes::TNMHC, codes::TNMTC]),
            unid_codes: BTreeSet::from([codes::PLOT_UNID, codes::BP_UNID]),
        };

        for info in vocabulary::TARGET_COMPOUNDS.iter() {
            index.insert_name(info.code, info.name);
            index.targets.insert(info.code, info);
            index.target_codes.insert(info.code);
        }
        for (code, name, _) in vocabulary::SYNTHETIC_COMPOUNDS.iter() {
            index.insert_name(*code, name);
        }

        index
    }

    fn insert_name(&mut self, code: CompoundCode, name: &'static str) {
        self.by_code.insert(code, name);
        self.by_name.insert(name, code);
        self.by_lower_name.insert(name.to_lowercase(), code);
    }

    /// Look up the AQS code for a compound name
    ///
    /// Exact matches win; otherwise the match is case-insensitive so that
    /// "BENZENE" and "benzene" both resolve.
    pub fn name_to_aqs(&self, name: &str) -> Result<CompoundCode, CompoundError> {
        let trimmed = name.trim();
        if let Some(code) = self.by_name.get(trimmed) {
            return Ok(*code);
        }
        self.by_lower_name
            .get(&trimmed.to_lowercase())
            .copied()
            .ok_or_else(|| CompoundError::UnknownName(name.to_string()))
    }

    /// Look up the display name for an AQS code
    pub fn aqs_to_name(&self, code: CompoundCode) -> Result<&'static str, CompoundError> {
        self.by_code
            .get(&code)
            .copied()
            .ok_or(CompoundError::UnknownCode(code))
    }

    /// Whether the code is part of the vocabulary (targets, totals or unids)
    pub fn contains(&self, code: CompoundCode) -> bool {
        self.by_code.contains_key(&code)
    }

    /// Reference information for a target compound
    pub fn info(&self, code: CompoundCode) -> Option<&'static CompoundInfo> {
        self.targets.get(&code).copied()
    }

    /// All target compounds in vocabulary order
    pub fn compounds(&self) -> impl Iterator<Item = &'static CompoundInfo> {
        vocabulary::TARGET_COMPOUNDS.iter()
    }

    /// Carbon count of a target compound
    pub fn carbon_count(&self, code: CompoundCode) -> Result<u8, CompoundError> {
        self.info(code)
            .map(|info| info.carbon_count)
            .ok_or(CompoundError::UnknownCode(code))
    }

    /// GC column a compound (or unid placeholder) is measured on
    pub fn column_type(&self, code: CompoundCode) -> Result<ColumnType, CompoundError> {
        if let Some(info) = self.info(code) {
            return Ok(info.column);
        }
        match vocabulary::SYNTHETIC_COMPOUNDS.iter().find(|(c, _, _)| *c == code) {
            Some((_, _, Some(column))) => Ok(*column),
            Some((_, _, None)) => Err(CompoundError::NoColumn(code)),
            None => Err(CompoundError::UnknownCode(code)),
        }
    }

    /// Target codes belonging to a category
    pub fn codes_by_category(&self, category: VocCategory) -> BTreeSet<CompoundCode> {
        self.compounds()
            .filter(|info| info.category == category)
            .map(|info| info.code)
            .collect()
    }

    /// Target codes measured on a column
    pub fn codes_by_column(&self, column: ColumnType) -> BTreeSet<CompoundCode> {
        self.compounds()
            .filter(|info| info.column == column)
            .map(|info| info.code)
            .collect()
    }

    /// Target codes measured on the PLOT column
    pub fn plot_codes(&self) -> BTreeSet<CompoundCode> {
        self.codes_by_column(ColumnType::Plot)
    }

    /// Target codes measured on the BP column
    pub fn bp_codes(&self) -> BTreeSet<CompoundCode> {
        self.codes_by_column(ColumnType::Bp)
    }

    /// Individually identified compounds
    pub fn target_codes(&self) -> &BTreeSet<CompoundCode> {
        &self.target_codes
    }

    /// Computed aggregates (TNMHC, TNMTC)
    pub fn total_codes(&self) -> &BTreeSet<CompoundCode> {
        &self.total_codes
    }

    /// Unidentified-peak placeholders
    pub fn unid_codes(&self) -> &BTreeSet<CompoundCode> {
        &self.unid_codes
    }

    /// Codes eligible for blank and recovery screening (targets and totals)
    pub fn is_screenable(&self, code: CompoundCode) -> bool {
        self.target_codes.contains(&code) || self.total_codes.contains(&code)
    }
}
