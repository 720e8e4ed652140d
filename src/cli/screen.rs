use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use autogc_qc::compounds::AqsCodeIndex;
use autogc_qc::qc::{blanks, export, mdvr, recovery, screening, QcCheck, QcSummary, QualifierRecord};
use autogc_qc::table::ConcentrationTable;
use autogc_qc::thresholds::load_threshold_path;

use super::config::Config;

pub struct ScreenArgs {
    pub data: PathBuf,
    pub mdls: PathBuf,
    pub config: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub upper_cal_point: Option<f64>,
    pub json: bool,
    pub strict: bool,
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Run every screen over one site-month
pub fn run(args: ScreenArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let index = AqsCodeIndex::global();

    let table = ConcentrationTable::from_csv_path(&args.data)
        .with_context(|| format!("Failed to load concentration table: {}", args.data.display()))?;
    let mdls = load_threshold_path(&args.mdls, index)
        .with_context(|| format!("Failed to load MDLs: {}", args.mdls.display()))?;
    info!("Loaded {} samples and {} MDLs", table.len(), mdls.len());

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut summary = QcSummary::new(args.data.display().to_string());
    let mut qualifiers: Vec<QualifierRecord> = Vec::new();

    // Blanks
    let blank_failures = blanks::compounds_above_mdl(&table, &mdls, index);
    let lines = mdvr::build_blank_qualifier_lines(&table, &blank_failures.to_wide(), index)?;
    summary.add_check(QcCheck::from_failures("Blanks above MDL", &blank_failures).with_qualifier_lines(lines.len()));
    qualifiers.extend(lines);
    if let Some(dir) = &args.output_dir {
        export::write_failure_csv(create(dir, "blank_failures.csv")?, &blank_failures)?;
    }

    // QC recovery
    let canisters = config.recovery.canisters();
    if canisters.is_empty() {
        warn!("No recovery canisters configured; skipping CVS/LCS/RTS screens");
    }
    for (qc_type, canister) in canisters {
        let certified = load_threshold_path(&canister.canister, index)
            .with_context(|| format!("Failed to load {} canister: {}", qc_type, canister.canister.display()))?;
        let failures =
            recovery::check_qc_recovery(&table, qc_type.sample_type(), &certified, canister.blend_ratio, index)?;
        let lines = mdvr::build_qc_qualifier_lines(&table, &failures.to_wide(), qc_type, index)?;
        summary.add_check(
            QcCheck::from_failures(format!("{} recovery", qc_type), &failures).with_qualifier_lines(lines.len()),
        );
        qualifiers.extend(lines);
        if let Some(dir) = &args.output_dir {
            let name = format!("{}_failures.csv", qc_type.name().to_lowercase());
            export::write_failure_csv(create(dir, &name)?, &failures)?;
        }
    }

    // Ambient
    let ratios = screening::check_ratios(&table, &mdls, index)?;
    summary.add_check(QcCheck::from_ratios(&ratios));

    let upper_cal_point = args
        .upper_cal_point
        .or(config.screening.upper_cal_point)
        .unwrap_or(screening::DEFAULT_UPPER_CAL_POINT);
    let exclude: Option<Vec<&str>> = config
        .screening
        .overrange_exclude
        .as_ref()
        .map(|names| names.iter().map(String::as_str).collect());
    let overrange = screening::check_overrange_values(&table, upper_cal_point, exclude.as_deref(), index)?;
    summary.add_check(QcCheck::from_overrange(&overrange, upper_cal_point));

    let daily_max = match screening::check_daily_max_tnmhc(&table) {
        Ok(daily) => {
            summary.add_check(QcCheck::ok(format!("Daily max TNMHC ({} days)", daily.len())));
            daily
        }
        Err(e) => {
            summary.add_check(QcCheck::warning("Daily max TNMHC", e.to_string()));
            Vec::new()
        }
    };

    if let Some(dir) = &args.output_dir {
        export::write_qualifier_csv(create(dir, "mdvr_qualifiers.csv")?, &qualifiers)?;
        export::write_ratio_csv(create(dir, "ratio_screen.csv")?, &ratios)?;
        export::write_overrange_csv(create(dir, "overrange.csv")?, &overrange)?;
        export::write_daily_max_csv(create(dir, "daily_max_tnmhc.csv")?, &daily_max)?;
        info!("Wrote {} qualifier lines to {}", qualifiers.len(), dir.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        #[cfg(feature = "colorized_output")]
        {
            println!("{}", summary.format_colored());
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            println!("{}", summary);
        }
    }

    if args.strict && summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
