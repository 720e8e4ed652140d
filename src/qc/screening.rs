//! Ambient data screening.
//!
//! Three independent checks over ambient samples:
//!
//! - the compound ratio battery ([`check_ratios`]), a table of plausibility
//!   rules from EPA TAD Table 10-1
//! - overrange detection against the upper calibration point
//!   ([`check_overrange_values`])
//! - the daily maximum TNMHC value ([`check_daily_max_tnmhc`])
//!
//! Ratio rules are declared in [`RATIO_RULES`] and evaluated uniformly.
//! Values are in ppbC; rule divisors are carbon counts that bring a value
//! back to a ppb equivalent before comparison.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::compounds::{codes, AqsCodeIndex, CompoundCode, VocCategory};
use crate::table::{ConcentrationTable, SampleRecord, SampleType};
use crate::thresholds::ThresholdMap;

use super::QcError;

/// Default upper calibration point (ppbC)
pub const DEFAULT_UPPER_CAL_POINT: f64 = 30.0;

/// Compounds excluded from overrange detection unless overridden
pub const DEFAULT_OVERRANGE_EXCLUDE: [&str; 2] = ["TNMTC", "TNMHC"];

/// MDL multiple the battery's gated compounds must exceed
pub const MDL_GATE_MULTIPLIER: f64 = 3.0;

/// One side of a ratio comparison: `factor * value / divisor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// Compound the term reads
    pub code: CompoundCode,
    /// Scale applied before dividing
    pub factor: f64,
    /// Carbon count, or 1.0 for a raw ppbC comparison
    pub divisor: f64,
}

impl Term {
    /// A term normalized by a carbon-count divisor
    pub const fn per_carbon(code: CompoundCode, divisor: f64) -> Self {
        Self {
            code,
            factor: 1.0,
            divisor,
        }
    }

    /// A raw ppbC term
    pub const fn raw(code: CompoundCode) -> Self {
        Self::per_carbon(code, 1.0)
    }

    fn eval(&self, record: &SampleRecord) -> Option<f64> {
        record.value(self.code).map(|v| self.factor * v / self.divisor)
    }
}

/// How a ratio rule compares compounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// Flag when `primary > comparator`
    Greater { primary: Term, comparator: Term },
    /// Flag unless `a > b > c` holds
    NotDescending([CompoundCode; 3]),
    /// Flag when the category sum of `greater` exceeds that of `lesser`;
    /// missing values count as zero
    CategorySum {
        greater: VocCategory,
        lesser: VocCategory,
    },
}

/// A named ratio plausibility rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRule {
    /// Label reported as `screen_reason`
    pub label: &'static str,
    /// What is compared once the gate is open
    pub comparison: Comparison,
    /// Compounds that must exceed `gate_multiplier` times their MDL
    pub gated: &'static [CompoundCode],
    /// MDL multiple applied to every gated compound
    pub gate_multiplier: f64,
    /// Compounds reported with a match; empty for category rules
    pub involved: &'static [CompoundCode],
}

impl RatioRule {
    /// Names reported alongside a match
    pub fn involved_names(&self, index: &AqsCodeIndex) -> Result<Vec<String>, QcError> {
        if let Comparison::CategorySum { greater, lesser } = self.comparison {
            let mut labels = [category_label(greater), category_label(lesser)];
            labels.sort_unstable();
            return Ok(labels.iter().map(|s| s.to_string()).collect());
        }
        self.involved
            .iter()
            .map(|code| Ok(index.aqs_to_name(*code)?.to_string()))
            .collect()
    }
}

fn category_label(category: VocCategory) -> &'static str {
    match category {
        VocCategory::Alkane => "alkanes",
        VocCategory::Alkene => "alkenes",
        VocCategory::Alkyne => "alkynes",
        VocCategory::Aromatic => "aromatics",
        VocCategory::Terpene => "terpenes",
    }
}

const fn greater(primary: Term, comparator: Term) -> Comparison {
    Comparison::Greater { primary, comparator }
}

/// The ratio battery, evaluated in this order
pub const RATIO_RULES: [RatioRule; 12] = [
    RatioRule {
        label: "benzene_gt_toluene",
        comparison: greater(Term::per_carbon(codes::BENZENE, 6.0), Term::per_carbon(codes::TOLUENE, 7.0)),
        gated: &[codes::BENZENE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::BENZENE, codes::TOLUENE],
    },
    RatioRule {
        label: "benzene_gt_ethane",
        comparison: greater(Term::per_carbon(codes::BENZENE, 6.0), Term::per_carbon(codes::ETHANE, 2.0)),
        gated: &[codes::BENZENE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::BENZENE, codes::ETHANE],
    },
    RatioRule {
        label: "ethylene_gt_ethane",
        comparison: greater(Term::per_carbon(codes::ETHYLENE, 2.0), Term::per_carbon(codes::ETHANE, 2.0)),
        gated: &[codes::ETHYLENE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::ETHYLENE, codes::ETHANE],
    },
    RatioRule {
        label: "propylene_gt_propane",
        comparison: greater(Term::per_carbon(codes::PROPYLENE, 3.0), Term::per_carbon(codes::PROPANE, 3.0)),
        gated: &[codes::PROPYLENE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::PROPYLENE, codes::PROPANE],
    },
    RatioRule {
        label: "oxylene_gt_mpxylene",
        comparison: greater(Term::per_carbon(codes::O_XYLENE, 8.0), Term::per_carbon(codes::M_P_XYLENE, 8.0)),
        gated: &[codes::O_XYLENE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::O_XYLENE, codes::M_P_XYLENE],
    },
    RatioRule {
        label: "23dimethylpentane_gt_2methylhexane",
        comparison: greater(Term::raw(codes::DIMETHYL_2_3_PENTANE), Term::raw(codes::METHYL_2_HEXANE)),
        gated: &[codes::DIMETHYL_2_3_PENTANE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::METHYL_2_HEXANE, codes::DIMETHYL_2_3_PENTANE],
    },
    RatioRule {
        label: "24dimethylpentane_gt_methylcyclopentane",
        comparison: greater(Term::raw(codes::DIMETHYL_2_4_PENTANE), Term::raw(codes::METHYLCYCLOPENTANE)),
        gated: &[codes::DIMETHYL_2_4_PENTANE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::METHYLCYCLOPENTANE, codes::DIMETHYL_2_4_PENTANE],
    },
    RatioRule {
        label: "isobutane_gt_nbutane",
        comparison: greater(Term::raw(codes::ISO_BUTANE), Term::raw(codes::N_BUTANE)),
        gated: &[codes::ISO_BUTANE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::ISO_BUTANE, codes::N_BUTANE],
    },
    RatioRule {
        label: "3methylpentane_gt_2methylpentane",
        comparison: greater(
            Term::per_carbon(codes::METHYL_3_PENTANE, 6.0),
            Term {
                code: codes::METHYL_2_PENTANE,
                factor: 0.6,
                divisor: 6.0,
            },
        ),
        gated: &[codes::METHYL_3_PENTANE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::METHYL_3_PENTANE, codes::METHYL_2_PENTANE],
    },
    RatioRule {
        label: "nundecane_gt_ndecane",
        comparison: greater(Term::per_carbon(codes::N_UNDECANE, 11.0), Term::per_carbon(codes::N_DECANE, 10.0)),
        gated: &[codes::N_UNDECANE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::N_UNDECANE, codes::N_DECANE],
    },
    RatioRule {
        label: "not_isopentane_gt_npentane_gt_cyclopentane",
        comparison: Comparison::NotDescending([codes::ISO_PENTANE, codes::N_PENTANE, codes::CYCLOPENTANE]),
        gated: &[codes::ISO_PENTANE, codes::N_PENTANE, codes::CYCLOPENTANE],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[codes::ISO_PENTANE, codes::N_PENTANE, codes::CYCLOPENTANE],
    },
    RatioRule {
        label: "alkenes_gt_alkanes",
        comparison: Comparison::CategorySum {
            greater: VocCategory::Alkene,
            lesser: VocCategory::Alkane,
        },
        gated: &[],
        gate_multiplier: MDL_GATE_MULTIPLIER,
        involved: &[],
    },
];

/// One ambient sample matching one ratio rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioFlag {
    /// Timestamp of the ambient sample
    pub date_time: NaiveDateTime,
    /// Label of the matching rule
    pub screen_reason: &'static str,
    /// Human names of the compounds involved
    pub compounds: Vec<String>,
}

/// Evaluates a single rule against one record, gate included
struct RuleEvaluator<'a> {
    rule: &'a RatioRule,
    gates: Vec<(CompoundCode, f64)>,
    sums: Option<(BTreeSet<CompoundCode>, BTreeSet<CompoundCode>)>,
}

impl<'a> RuleEvaluator<'a> {
    /// Resolve gate thresholds; `None` when a gated compound lacks an MDL
    fn new(rule: &'a RatioRule, mdls: &ThresholdMap, index: &AqsCodeIndex) -> Option<Self> {
        let mut gates = Vec::with_capacity(rule.gated.len());
        for code in rule.gated {
            let mdl = mdls.get(code)?;
            gates.push((*code, rule.gate_multiplier * mdl));
        }
        let sums = match rule.comparison {
            Comparison::CategorySum { greater, lesser } => {
                Some((index.codes_by_category(greater), index.codes_by_category(lesser)))
            }
            _ => None,
        };
        Some(Self { rule, gates, sums })
    }

    fn matches(&self, record: &SampleRecord) -> bool {
        let gate_open = self
            .gates
            .iter()
            .all(|(code, threshold)| record.value(*code).is_some_and(|v| v > *threshold));
        gate_open && self.compare(record)
    }

    fn compare(&self, record: &SampleRecord) -> bool {
        match &self.rule.comparison {
            Comparison::Greater { primary, comparator } => match (primary.eval(record), comparator.eval(record)) {
                (Some(p), Some(c)) => p > c,
                _ => false,
            },
            Comparison::NotDescending([a, b, c]) => match (record.value(*a), record.value(*b), record.value(*c)) {
                (Some(a), Some(b), Some(c)) => !(a > b && b > c),
                _ => false,
            },
            Comparison::CategorySum { .. } => match &self.sums {
                Some((greater, lesser)) => category_sum(record, greater) > category_sum(record, lesser),
                None => false,
            },
        }
    }
}

fn category_sum(record: &SampleRecord, members: &BTreeSet<CompoundCode>) -> f64 {
    members.iter().filter_map(|code| record.value(*code)).sum()
}

/// Screen ambient samples against the ratio battery
///
/// Output follows rule order, with matches for each rule in time order. A
/// sample matching several rules appears once per rule. Missing values never
/// match. A rule whose gated compound has no MDL is skipped with a warning.
pub fn check_ratios(
    table: &ConcentrationTable,
    mdls: &ThresholdMap,
    index: &AqsCodeIndex,
) -> Result<Vec<RatioFlag>, QcError> {
    let ambient = table.rows_of_type(SampleType::Ambient);

    let mut flags = Vec::new();
    for rule in RATIO_RULES.iter() {
        let Some(evaluator) = RuleEvaluator::new(rule, mdls, index) else {
            log::warn!("Skipping ratio rule {}: gated compound has no MDL", rule.label);
            continue;
        };
        let names = rule.involved_names(index)?;
        flags.extend(
            ambient
                .iter()
                .filter(|record| evaluator.matches(record))
                .map(|record| RatioFlag {
                    date_time: record.date_time,
                    screen_reason: rule.label,
                    compounds: names.clone(),
                }),
        );
    }

    log::debug!(
        "Ratio screen: {} ambient samples, {} rule matches",
        ambient.len(),
        flags.len()
    );
    Ok(flags)
}

/// One ambient value above the upper calibration point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrangeFlag {
    /// Timestamp of the ambient sample
    pub date_time: NaiveDateTime,
    /// Compound above range
    pub compound: CompoundCode,
    /// Measured value (ppbC)
    pub value: f64,
    /// Display name of `compound`
    pub compound_name: String,
}

/// Flag ambient values strictly above `upper_cal_point`
///
/// `exclude` lists compound names to skip; `None` means
/// [`DEFAULT_OVERRANGE_EXCLUDE`]. Unknown exclusion names are logged and
/// ignored. Results are grouped by compound column, then ordered by time.
pub fn check_overrange_values(
    table: &ConcentrationTable,
    upper_cal_point: f64,
    exclude: Option<&[&str]>,
    index: &AqsCodeIndex,
) -> Result<Vec<OverrangeFlag>, QcError> {
    let exclude = exclude.unwrap_or(&DEFAULT_OVERRANGE_EXCLUDE);
    let excluded: BTreeSet<CompoundCode> = exclude
        .iter()
        .filter_map(|name| match index.name_to_aqs(name) {
            Ok(code) => Some(code),
            Err(_) => {
                log::warn!("Unknown compound name for exclusion: {}", name);
                None
            }
        })
        .collect();

    let ambient = table.rows_of_type(SampleType::Ambient);
    let mut flags = Vec::new();
    for code in table.compound_columns().iter().filter(|c| !excluded.contains(c)) {
        let compound_name = index.aqs_to_name(*code)?;
        for record in &ambient {
            let Some(value) = record.value(*code).filter(|v| *v > upper_cal_point) else {
                continue;
            };
            flags.push(OverrangeFlag {
                date_time: record.date_time,
                compound: *code,
                value,
                compound_name: compound_name.to_string(),
            });
        }
    }

    log::debug!(
        "Overrange screen: {} values above {} ppbC",
        flags.len(),
        upper_cal_point
    );
    Ok(flags)
}

/// Peak TNMHC observation for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyMax {
    pub date_time: NaiveDateTime,
    pub value: f64,
}

/// Daily maximum TNMHC over ambient samples
///
/// One entry per calendar date with at least one TNMHC value, in date
/// order. The earliest sample wins ties.
///
/// # Errors
///
/// Returns [`QcError::MissingData`] when the table has no TNMHC column.
pub fn check_daily_max_tnmhc(table: &ConcentrationTable) -> Result<Vec<DailyMax>, QcError> {
    if !table.compound_columns().contains(&codes::TNMHC) {
        return Err(QcError::MissingData(format!("no TNMHC column ({})", codes::TNMHC)));
    }

    let mut by_day: BTreeMap<NaiveDate, DailyMax> = BTreeMap::new();
    for record in table.rows_of_type(SampleType::Ambient) {
        let Some(value) = record.value(codes::TNMHC) else {
            continue;
        };
        by_day
            .entry(record.date())
            .and_modify(|best| {
                if value > best.value {
                    *best = DailyMax {
                        date_time: record.date_time,
                        value,
                    };
                }
            })
            .or_insert(DailyMax {
                date_time: record.date_time,
                value,
            });
    }

    Ok(by_day.into_values().collect())
}
