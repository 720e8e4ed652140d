//! Integration tests for the QC pipeline
//!
//! These tests run one small site-month from CSV input through every screen
//! and into the MDVR qualifier export.

use autogc_qc::compounds::{codes, AqsCodeIndex};
use autogc_qc::qc::{blanks, export, mdvr, recovery, screening, QcCheck, QcSummary, QcType};
use autogc_qc::table::{ConcentrationTable, SampleType};
use autogc_qc::thresholds::load_threshold_path;
use std::fs;
use tempfile::tempdir;

const DATA: &str = "date_time,sample_type,filename,Benzene,Toluene,Ethane,TNMHC
2026-01-01 00:00:00,s,SITE0101S00A,1.0,2.0,5.0,50.0
2026-01-01 01:00:00,b,SITE0101B01A,0.01,0.01,0.01,0.5
2026-01-01 02:00:00,c,SITE0101C02A,10.0,10.0,10.0,
2026-01-01 03:00:00,s,SITE0101S03A,60.0,7.0,100.0,200.0
2026-01-01 13:00:00,b,SITE0101B13A,0.5,0.01,0.01,0.5
2026-01-02 01:00:00,b,SITE0102B01A,0.01,0.01,0.01,0.5
2026-01-02 02:00:00,c,SITE0102C02A,15.0,10.0,10.0,
2026-01-02 05:00:00,s,SITE0102S05A,1.0,2.0,5.0,80.0
2026-01-03 02:00:00,c,SITE0103C02A,10.0,10.0,10.0,
2026-01-03 05:00:00,s,SITE0103S05A,1.0,2.0,5.0,40.0
";

const MDLS: &str = "compound,value,unit
Benzene,0.05,ppbC
Toluene,0.05,
Ethane,0.1,
TNMHC,1.0,
";

const CANISTER: &str = "compound,value
45201,100.0
45202,100.0
Ethane,100.0
";

struct Inputs {
    _dir: tempfile::TempDir,
    table: ConcentrationTable,
    mdls: autogc_qc::thresholds::ThresholdMap,
    canister: autogc_qc::thresholds::ThresholdMap,
    out_dir: std::path::PathBuf,
}

fn load_inputs() -> Inputs {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("site_2026_01.csv");
    let mdl_path = dir.path().join("mdls.csv");
    let canister_path = dir.path().join("cvs_canister.csv");
    fs::write(&data_path, DATA).unwrap();
    fs::write(&mdl_path, MDLS).unwrap();
    fs::write(&canister_path, CANISTER).unwrap();

    let index = AqsCodeIndex::global();
    let out_dir = dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    Inputs {
        table: ConcentrationTable::from_csv_path(&data_path).unwrap(),
        mdls: load_threshold_path(&mdl_path, index).unwrap(),
        canister: load_threshold_path(&canister_path, index).unwrap(),
        out_dir,
        _dir: dir,
    }
}

#[test]
fn test_blank_qualifiers_written() {
    let inputs = load_inputs();
    let index = AqsCodeIndex::global();

    let failures = blanks::compounds_above_mdl(&inputs.table, &inputs.mdls, index);
    assert_eq!(failures.len(), 3);
    assert_eq!(failures.failing_row_count(), 1);

    let lines = mdvr::build_blank_qualifier_lines(&inputs.table, &failures.to_wide(), index).unwrap();
    assert_eq!(lines.len(), 1);

    let path = inputs.out_dir.join("mdvr_qualifiers.csv");
    export::write_qualifier_csv(fs::File::create(&path).unwrap(), &lines).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        "Benzene,Blank(s) above respective MDL(s),LB,01/01/2026,02:00,-,01/02/2026,00:00,Blank(s) above respective MDL(s)"
    );
}

#[test]
fn test_cvs_recovery_qualifiers() {
    let inputs = load_inputs();
    let index = AqsCodeIndex::global();

    let failures = recovery::check_qc_recovery(&inputs.table, SampleType::Cvs, &inputs.canister, 0.1, index).unwrap();
    assert_eq!(failures.len(), 3);
    assert_eq!(failures.rows[1].compounds, vec![codes::BENZENE]);

    let lines = mdvr::build_qc_qualifier_lines(&inputs.table, &failures.to_wide(), QcType::Cvs, index).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].parameters, "Benzene");
    assert_eq!(lines[0].code, "QX");
    assert_eq!(lines[0].reason, "CVS recovery outside acceptable bounds");
    assert_eq!((lines[0].start_date.as_str(), lines[0].start_hour.as_str()), ("01/01/2026", "03:00"));
    assert_eq!((lines[0].end_date.as_str(), lines[0].end_hour.as_str()), ("01/03/2026", "01:00"));

    // No LCS samples in the month
    let lcs = recovery::check_qc_recovery(&inputs.table, SampleType::Lcs, &inputs.canister, 0.1, index).unwrap();
    assert!(lcs.is_empty());
}

#[test]
fn test_ambient_screens() {
    let inputs = load_inputs();
    let index = AqsCodeIndex::global();

    let ratios = screening::check_ratios(&inputs.table, &inputs.mdls, index).unwrap();
    assert_eq!(ratios.len(), 1);
    assert_eq!(ratios[0].screen_reason, "benzene_gt_toluene");

    let overrange =
        screening::check_overrange_values(&inputs.table, screening::DEFAULT_UPPER_CAL_POINT, None, index).unwrap();
    let flagged: Vec<(&str, f64)> = overrange.iter().map(|f| (f.compound_name.as_str(), f.value)).collect();
    assert_eq!(flagged, vec![("Benzene", 60.0), ("Ethane", 100.0)]);

    let daily = screening::check_daily_max_tnmhc(&inputs.table).unwrap();
    let values: Vec<f64> = daily.iter().map(|d| d.value).collect();
    assert_eq!(values, vec![200.0, 80.0, 40.0]);
}

#[test]
fn test_summary_and_review_exports() {
    let inputs = load_inputs();
    let index = AqsCodeIndex::global();

    let blank_failures = blanks::compounds_above_mdl(&inputs.table, &inputs.mdls, index);
    let ratios = screening::check_ratios(&inputs.table, &inputs.mdls, index).unwrap();

    let mut summary = QcSummary::new("site_2026_01.csv");
    summary.add_check(QcCheck::from_failures("Blanks above MDL", &blank_failures));
    summary.add_check(QcCheck::from_ratios(&ratios));
    assert!(summary.has_failures());
    assert_eq!(summary.warning_count(), 1);

    let failure_path = inputs.out_dir.join("blank_failures.csv");
    export::write_failure_csv(fs::File::create(&failure_path).unwrap(), &blank_failures).unwrap();
    let text = fs::read_to_string(&failure_path).unwrap();
    assert!(text.starts_with("date_time,filename,compounds_above_mdl\n"));
    assert!(text.contains("2026-01-01 13:00:00,SITE0101B13A,45201"));
    assert!(text.contains("2026-01-02 01:00:00,SITE0102B01A,__NONE__"));

    let ratio_path = inputs.out_dir.join("ratio_screen.csv");
    export::write_ratio_csv(fs::File::create(&ratio_path).unwrap(), &ratios).unwrap();
    let text = fs::read_to_string(&ratio_path).unwrap();
    assert!(text.contains("2026-01-01 03:00:00,benzene_gt_toluene,Benzene;Toluene"));
}
