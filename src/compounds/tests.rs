use super::*;
use proptest::prelude::*;

#[test]
fn test_name_to_aqs_benzene() {
    let index = AqsCodeIndex::global();
    assert_eq!(index.name_to_aqs("Benzene").unwrap(), CompoundCode(45201));
    assert_eq!(index.aqs_to_name(CompoundCode(45201)).unwrap(), "Benzene");
}

#[test]
fn test_name_lookup_case_insensitive() {
    let index = AqsCodeIndex::global();
    assert_eq!(index.name_to_aqs("benzene").unwrap(), codes::BENZENE);
    assert_eq!(index.name_to_aqs(" ETHANE ").unwrap(), codes::ETHANE);
    assert_eq!(index.name_to_aqs("tnmhc").unwrap(), codes::TNMHC);
}

#[test]
fn test_unknown_name_and_code() {
    let index = AqsCodeIndex::global();
    assert_eq!(
        index.name_to_aqs("NotACompound"),
        Err(CompoundError::UnknownName("NotACompound".to_string()))
    );
    assert_eq!(
        index.aqs_to_name(CompoundCode(99999)),
        Err(CompoundError::UnknownCode(CompoundCode(99999)))
    );
}

#[test]
fn test_code_sets_disjoint() {
    let index = AqsCodeIndex::global();
    let targets = index.target_codes();
    let totals = index.total_codes();
    let unids = index.unid_codes();

    assert_eq!(targets.len(), 60);
    assert!(targets.is_disjoint(totals));
    assert!(targets.is_disjoint(unids));
    assert!(totals.is_disjoint(unids));
    assert_eq!(*unids, BTreeSet::from([CompoundCode(10000), CompoundCode(20000)]));
    assert!(totals.contains(&codes::TNMHC));
    assert!(totals.contains(&codes::TNMTC));
}

#[test]
fn test_codes_by_category_only_targets() {
    let index = AqsCodeIndex::global();
    for category in VocCategory::ALL {
        let codes = index.codes_by_category(category);
        assert!(!codes.is_empty(), "{} should not be empty", category);
        assert!(codes.is_subset(index.target_codes()));
    }
    assert!(index.codes_by_category(VocCategory::Aromatic).contains(&codes::BENZENE));
    assert!(index.codes_by_category(VocCategory::Alkene).contains(&codes::ETHYLENE));
}

#[test]
fn test_column_type() {
    let index = AqsCodeIndex::global();
    assert_eq!(index.column_type(codes::ETHANE).unwrap(), ColumnType::Plot);
    assert_eq!(index.column_type(codes::BENZENE).unwrap(), ColumnType::Bp);
    assert_eq!(index.column_type(codes::PLOT_UNID).unwrap(), ColumnType::Plot);
    assert_eq!(index.column_type(codes::TNMHC), Err(CompoundError::NoColumn(codes::TNMHC)));
    assert!(index.column_type(CompoundCode(99999)).is_err());

    let plot = index.plot_codes();
    let bp = index.bp_codes();
    assert!(plot.is_disjoint(&bp));
    assert_eq!(plot.len() + bp.len(), index.target_codes().len());
}

#[test]
fn test_carbon_counts_for_ratio_compounds() {
    let index = AqsCodeIndex::global();
    assert_eq!(index.carbon_count(codes::BENZENE).unwrap(), 6);
    assert_eq!(index.carbon_count(codes::TOLUENE).unwrap(), 7);
    assert_eq!(index.carbon_count(codes::N_UNDECANE).unwrap(), 11);
    assert!(index.carbon_count(codes::TNMHC).is_err());
}

#[test]
fn test_unit_conversions() {
    assert_eq!(ConcentrationUnit::Ppbv.to_ppbc(2.0, 6).unwrap(), 12.0);
    assert_eq!(ConcentrationUnit::Ppmv.to_ppbv(1.5, 0).unwrap(), 1500.0);
    assert_eq!(ConcentrationUnit::Ppbc.to_ppbv(12.0, 6).unwrap(), 2.0);
    assert_eq!(ConcentrationUnit::Ppmc.to_ppbc(0.5, 0).unwrap(), 500.0);
    assert!(ConcentrationUnit::Ppbc.to_ppbv(12.0, 0).is_err());
    assert_eq!("ppbC".parse::<ConcentrationUnit>().unwrap(), ConcentrationUnit::Ppbc);
    assert!("mg/m3".parse::<ConcentrationUnit>().is_err());
}

proptest! {
    #[test]
    fn prop_name_code_roundtrip(idx in 0usize..60) {
        let index = AqsCodeIndex::global();
        let info = index.compounds().nth(idx).unwrap();
        let code = index.name_to_aqs(info.name).unwrap();
        prop_assert_eq!(code, info.code);
        prop_assert_eq!(index.aqs_to_name(code).unwrap(), info.name);
    }

    #[test]
    fn prop_unknown_codes_rejected(raw in 50000u32..1_000_000) {
        let index = AqsCodeIndex::global();
        prop_assert!(index.aqs_to_name(CompoundCode(raw)).is_err());
    }
}
