//! # autogc-qc
//!
//! Command-line QC screening for AutoGC VOC data.
//!
//! ## Usage
//!
//! ```bash
//! # Screen one site-month and write MDVR qualifier lines
//! autogc-qc screen --data site_2026_01.csv --mdls mdls.csv --config autogc-qc.toml -o out/
//!
//! # Inspect a concentration table
//! autogc-qc info --data site_2026_01.csv
//!
//! # List aromatic target compounds
//! autogc-qc compounds --category aromatic
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
