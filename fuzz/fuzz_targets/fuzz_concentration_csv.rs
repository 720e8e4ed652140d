#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use autogc_qc::compounds::AqsCodeIndex;
use autogc_qc::qc::{blanks, mdvr};
use autogc_qc::thresholds::ThresholdMap;

fuzz_target!(|data: &[u8]| {
    // Parsing must either succeed or return an error, never panic
    let Ok(table) = autogc_qc::table::ConcentrationTable::from_csv_reader(Cursor::new(data)) else {
        return;
    };

    // Whatever parses must survive the blank screen and qualifier building
    let index = AqsCodeIndex::global();
    let mdls: ThresholdMap = table.compound_columns().iter().map(|c| (*c, 0.05)).collect();
    let wide = blanks::compounds_above_mdl(&table, &mdls, index).to_wide();
    let _ = mdvr::build_blank_qualifier_lines(&table, &wide, index);
});
