use anyhow::{anyhow, Result};

use autogc_qc::compounds::{AqsCodeIndex, VocCategory};

/// List the reference vocabulary, optionally filtered by category
pub fn run(category: Option<String>) -> Result<()> {
    let category = category
        .map(|c| c.parse::<VocCategory>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let index = AqsCodeIndex::global();

    println!("{:>6}  {:<24} {:<9} {:>2}  {:<4}", "AQS", "Name", "Category", "C", "Col");
    for info in index
        .compounds()
        .filter(|info| category.map_or(true, |c| info.category == c))
    {
        println!(
            "{:>6}  {:<24} {:<9} {:>2}  {:<4}",
            info.code.value(),
            info.name,
            info.category.as_str(),
            info.carbon_count,
            info.column.to_string()
        );
    }

    if category.is_none() {
        for code in index.total_codes().iter().chain(index.unid_codes()) {
            println!("{:>6}  {:<24}", code.value(), index.aqs_to_name(*code)?);
        }
    }

    Ok(())
}
