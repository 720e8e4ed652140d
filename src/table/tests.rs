use super::*;
use crate::compounds::codes;

const SAMPLE_TABLE: &str = "date_time,sample_type,filename,45201,Toluene,TNMHC
2026-01-15 08:00:00,s,SITE0115S08A,1.5,2.0,120.0
2026-01-15 07:00:00,b,SITE0115B07A,0.01,,3.5
2026-01-15 09:00,c,SITE0115C09A,10.2,NaN,
";

#[test]
fn test_csv_parsing() {
    let table = ConcentrationTable::from_csv_reader(SAMPLE_TABLE.as_bytes()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.compound_columns(),
        &[codes::BENZENE, codes::TOLUENE, codes::TNMHC]
    );

    let blank = &table.records()[1];
    assert_eq!(blank.sample_type, SampleType::Blank);
    assert_eq!(blank.filename, "SITE0115B07A");
    assert_eq!(blank.value(codes::BENZENE), Some(0.01));
    assert_eq!(blank.value(codes::TOLUENE), None);

    let cvs = &table.records()[2];
    assert_eq!(cvs.sample_type, SampleType::Cvs);
    assert_eq!(cvs.value(codes::TOLUENE), None);
    assert_eq!(cvs.value(codes::TNMHC), None);
}

#[test]
fn test_time_bounds_cover_all_types() {
    let table = ConcentrationTable::from_csv_reader(SAMPLE_TABLE.as_bytes()).unwrap();
    let bounds = table.time_bounds().unwrap();

    assert_eq!(bounds.min, parse_timestamp("2026-01-15 07:00:00").unwrap());
    assert_eq!(bounds.max, parse_timestamp("2026-01-15 09:00:00").unwrap());
    assert!(ConcentrationTable::default().time_bounds().is_none());
}

#[test]
fn test_rows_of_type_sorted() {
    let t = |s: &str| parse_timestamp(s).unwrap();
    let table = ConcentrationTable::from_records(vec![
        SampleRecord::new(t("2026-01-15 10:00"), SampleType::Blank, "B10"),
        SampleRecord::new(t("2026-01-15 08:00"), SampleType::Ambient, "S08"),
        SampleRecord::new(t("2026-01-15 06:00"), SampleType::Blank, "B06"),
    ]);

    let blanks = table.rows_of_type(SampleType::Blank);
    let names: Vec<&str> = blanks.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["B06", "B10"]);
    assert!(table.rows_of_type(SampleType::Lcs).is_empty());

    let counts = table.sample_type_counts();
    assert_eq!(counts.get(&SampleType::Blank), Some(&2));
    assert_eq!(counts.get(&SampleType::Ambient), Some(&1));
}

#[test]
fn test_missing_required_column() {
    let csv = "date_time,filename,45201\n2026-01-15 08:00:00,X,1.0\n";
    let err = ConcentrationTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, TableError::MissingColumn(ref c) if c == "sample_type"));
}

#[test]
fn test_unknown_compound_header() {
    let csv = "date_time,sample_type,filename,Unobtainium\n";
    let err = ConcentrationTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, TableError::UnknownCompound(_)));
}

#[test]
fn test_duplicate_compound_header() {
    let csv = "date_time,sample_type,filename,Benzene,45201\n2026-01-15 07:00:00,b,B07,1.0,2.0\n";
    let err = ConcentrationTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        TableError::DuplicateColumn { ref header, code } if header == "45201" && code == codes::BENZENE
    ));

    let csv = "date_time,sample_type,filename,Toluene,toluene\n";
    assert!(ConcentrationTable::from_csv_reader(csv.as_bytes()).is_err());
}

#[test]
fn test_new_dedupes_columns() {
    let t = parse_timestamp("2026-01-15 07:00").unwrap();
    let record = SampleRecord::new(t, SampleType::Blank, "B07").with_value(codes::BENZENE, 1.0);
    let table = ConcentrationTable::new(vec![codes::BENZENE, codes::TOLUENE, codes::BENZENE], vec![record]);
    assert_eq!(table.compound_columns(), &[codes::BENZENE, codes::TOLUENE]);
}

#[test]
fn test_invalid_rows_report_line() {
    let csv = "date_time,sample_type,filename,45201\n2026-01-15 08:00:00,z,X,1.0\n";
    let err = ConcentrationTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, TableError::InvalidFormat { line: 2, .. }));

    let csv = "date_time,sample_type,filename,45201\n15/01/2026,s,X,1.0\n";
    let err = ConcentrationTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, TableError::InvalidFormat { .. }));

    let csv = "date_time,sample_type,filename,45201\n2026-01-15 08:00:00,s,X,abc\n";
    let err = ConcentrationTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("abc"));
}

#[test]
fn test_sample_type_codes() {
    for sample_type in SampleType::ALL {
        assert_eq!(SampleType::from_code(sample_type.code()), Some(sample_type));
    }
    assert_eq!(SampleType::from_code('S'), Some(SampleType::Ambient));
    assert_eq!(SampleType::from_code('z'), None);
}
