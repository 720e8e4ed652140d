use anyhow::{Context, Result};
use std::path::PathBuf;

use autogc_qc::table::ConcentrationTable;

/// Display information about a concentration table
pub fn run(data: PathBuf) -> Result<()> {
    if !data.exists() {
        anyhow::bail!("File does not exist: {}", data.display());
    }

    let table = ConcentrationTable::from_csv_path(&data).context("Failed to read concentration table")?;

    println!("Concentration Table");
    println!("===================");
    println!("File: {}", data.display());
    println!();

    println!("Statistics:");
    println!("  Samples: {}", table.len());
    println!("  Compound columns: {}", table.compound_columns().len());
    match table.time_bounds() {
        Some(bounds) => {
            println!("  First sample: {}", bounds.min);
            println!("  Last sample: {}", bounds.max);
        }
        None => println!("  Time bounds: <empty table>"),
    }
    println!();

    println!("Sample Types:");
    for (sample_type, count) in table.sample_type_counts() {
        println!("  {} ({}): {}", sample_type.label(), sample_type.code(), count);
    }

    Ok(())
}
