//! Standard PAMS target compound list for the AutoGC.
//!
//! Elution order is per column: PLOT compounds elute first on the front
//! channel, BP compounds on the back channel.

use super::{ColumnType, CompoundCode, CompoundInfo, Priority, VocCategory};

use ColumnType::{Bp, Plot};
use Priority::{High, Low};
use VocCategory::{Alkane, Alkene, Alkyne, Aromatic, Terpene};

#[allow(clippy::too_many_arguments)]
const fn voc(
    name: &'static str,
    code: u32,
    category: VocCategory,
    carbon_count: u8,
    molecular_weight: f64,
    column: ColumnType,
    elution_order: u8,
    priority: Priority,
) -> CompoundInfo {
    CompoundInfo {
        code: CompoundCode(code),
        name,
        category,
        carbon_count,
        molecular_weight,
        column,
        elution_order,
        priority,
    }
}

pub(super) static TARGET_COMPOUNDS: [CompoundInfo; 60] = [
    voc("Ethane", 43202, Alkane, 2, 30.07, Plot, 1, High),
    voc("Ethylene", 43203, Alkene, 2, 28.05, Plot, 2, High),
    voc("Propane", 43204, Alkane, 3, 44.097, Plot, 3, High),
    voc("Propylene", 43205, Alkene, 3, 42.081, Plot, 4, High),
    voc("Iso-butane", 43214, Alkane, 4, 58.12, Plot, 5, High),
    voc("N-butane", 43212, Alkane, 4, 58.12, Plot, 6, High),
    voc("Acetylene", 43206, Alkyne, 2, 26.038, Plot, 7, Low),
    voc("Trans-2-butene", 43216, Alkene, 4, 56.11, Plot, 8, High),
    voc("1-butene", 43280, Alkene, 4, 56.11, Plot, 9, High),
    voc("Cis-2-butene", 43217, Alkene, 4, 56.11, Plot, 10, High),
    voc("Cyclopentane", 43242, Alkane, 5, 70.13, Plot, 11, Low),
    voc("Iso-pentane", 43221, Alkane, 5, 72.15, Plot, 12, High),
    voc("N-pentane", 43220, Alkane, 5, 72.15, Plot, 13, High),
    voc("1,3-butadiene", 43218, Alkene, 4, 54.0916, Plot, 14, Low),
    voc("Trans-2-pentene", 43226, Alkene, 5, 70.13, Plot, 15, Low),
    voc("1-pentene", 43224, Alkene, 5, 70.134, Plot, 16, Low),
    voc("Cis-2-pentene", 43227, Alkene, 5, 70.134, Plot, 17, Low),
    voc("2,2-dimethylbutane", 43244, Alkane, 6, 86.17, Plot, 18, Low),
    voc("2,3-dimethylbutane", 43284, Alkane, 6, 86.17, Plot, 19, Low),
    voc("2-methylpentane", 43285, Alkane, 6, 86.18, Plot, 20, Low),
    voc("3-methylpentane", 43230, Alkane, 6, 86.18, Plot, 21, Low),
    voc("Isoprene", 43243, Terpene, 5, 68.12, Plot, 22, High),
    voc("2-methyl-1-pentene", 43246, Alkene, 6, 84.16, Plot, 23, Low),
    voc("1-hexene", 43245, Alkene, 6, 84.1608, Plot, 24, Low),
    voc("N-hexane", 43231, Alkane, 6, 86.17848, Bp, 1, High),
    voc("Methylcyclopentane", 43262, Alkane, 6, 84.16, Bp, 2, Low),
    voc("2,4-dimethylpentane", 43247, Alkane, 7, 100.2, Bp, 3, Low),
    voc("Benzene", 45201, Aromatic, 6, 78.11, Bp, 4, High),
    voc("Cyclohexane", 43248, Alkane, 6, 84.16, Bp, 5, Low),
    voc("2-methylhexane", 43263, Alkane, 7, 100.2, Bp, 6, Low),
    voc("2,3-dimethylpentane", 43291, Alkane, 7, 100.2, Bp, 7, Low),
    voc("3-methylhexane", 43249, Alkane, 7, 100.2, Bp, 8, Low),
    voc("2,2,4-trimethylpentane", 43250, Alkane, 8, 114.23, Bp, 9, High),
    voc("N-heptane", 43232, Alkane, 7, 100.21, Bp, 10, Low),
    voc("Methylcyclohexane", 43261, Alkane, 7, 98.186, Bp, 11, Low),
    voc("2,3,4-trimethylpentane", 43252, Alkane, 8, 114.23, Bp, 12, Low),
    voc("Toluene", 45202, Aromatic, 7, 92.14, Bp, 13, High),
    voc("2-methylheptane", 43960, Alkane, 8, 114.23, Bp, 14, Low),
    voc("3-methylheptane", 43253, Alkane, 8, 114.23, Bp, 15, Low),
    voc("N-octane", 43233, Alkane, 8, 114.23, Bp, 16, Low),
    voc("Ethylbenzene", 45203, Aromatic, 8, 106.167, Bp, 17, High),
    voc("M&p-xylene", 45109, Aromatic, 8, 106.16, Bp, 18, High),
    voc("Styrene", 45220, Aromatic, 8, 104.15, Bp, 19, High),
    voc("O-xylene", 45204, Aromatic, 8, 106.16, Bp, 20, High),
    voc("N-nonane", 43235, Alkane, 9, 128.2, Bp, 21, Low),
    voc("Iso-propylbenzene", 45210, Aromatic, 9, 120.19, Bp, 22, Low),
    voc("Alpha-pinene", 43256, Terpene, 10, 136.23, Bp, 23, Low),
    voc("N-propylbenzene", 45209, Aromatic, 9, 120.2, Bp, 24, Low),
    voc("M-ethyltoluene", 45212, Aromatic, 9, 120.19, Bp, 25, High),
    voc("P-ethyltoluene", 45213, Aromatic, 9, 120.19, Bp, 26, High),
    voc("1,3,5-tri-m-benzene", 45207, Aromatic, 9, 120.19, Bp, 27, Low),
    voc("O-ethyltoluene", 45211, Aromatic, 9, 120.19, Bp, 28, High),
    voc("Beta-pinene", 43257, Terpene, 10, 136.23, Bp, 29, Low),
    voc("1,2,4-tri-m-benzene", 45208, Aromatic, 9, 120.19, Bp, 30, High),
    voc("N-decane", 43238, Alkane, 10, 142.28, Bp, 31, Low),
    voc("1,2,3-tri-m-benzene", 45225, Aromatic, 9, 120.19, Bp, 32, High),
    voc("M-diethylbenzene", 45218, Aromatic, 10, 134.22, Bp, 33, Low),
    voc("P-diethylbenzene", 45219, Aromatic, 10, 134.22, Bp, 34, Low),
    voc("N-undecane", 43954, Alkane, 11, 156.31, Bp, 35, Low),
    voc("N-dodecane", 43141, Alkane, 12, 170.34, Bp, 36, Low),
];

/// Synthetic codes: (code, name, column). Totals have no column.
pub(super) static SYNTHETIC_COMPOUNDS: [(CompoundCode, &str, Option<ColumnType>); 4] = [
    (super::codes::TNMHC, "TNMHC", None),
    (super::codes::TNMTC, "TNMTC", None),
    (super::codes::PLOT_UNID, "Plot unid", Some(Plot)),
    (super::codes::BP_UNID, "Bp unid", Some(Bp)),
];
