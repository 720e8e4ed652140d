use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod compounds;
mod info;
mod screen;

mod config;

pub use config::Config;

/// autogc-qc - AutoGC VOC QC screening for the Monthly Data Validation Report
#[derive(Parser)]
#[command(name = "autogc-qc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every QC screen over one site-month and build MDVR qualifier lines
    Screen {
        /// Concentration table CSV (date_time, sample_type, filename, compounds...)
        #[arg(short, long, value_name = "CSV")]
        data: PathBuf,

        /// MDL CSV (compound, value[, unit])
        #[arg(short, long, value_name = "CSV")]
        mdls: PathBuf,

        /// TOML configuration file
        #[arg(short, long, value_name = "TOML")]
        config: Option<PathBuf>,

        /// Directory for qualifier and review CSVs
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Upper calibration point in ppbC (overrides config)
        #[arg(long)]
        upper_cal_point: Option<f64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 1 when any screen flags samples
        #[arg(long)]
        strict: bool,
    },

    /// Display sample counts and time bounds of a concentration table
    Info {
        /// Concentration table CSV
        #[arg(short, long, value_name = "CSV")]
        data: PathBuf,
    },

    /// List the reference compound vocabulary
    Compounds {
        /// Restrict to one category (Alkane, Alkene, Alkyne, Aromatic, Terpene)
        #[arg(long)]
        category: Option<String>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Screen {
            data,
            mdls,
            config,
            output_dir,
            upper_cal_point,
            json,
            strict,
        } => screen::run(screen::ScreenArgs {
            data,
            mdls,
            config,
            output_dir,
            upper_cal_point,
            json,
            strict,
        }),
        Commands::Info { data } => info::run(data),
        Commands::Compounds { category } => compounds::run(category),
    }
}
