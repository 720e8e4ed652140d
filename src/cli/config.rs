//! TOML configuration file support.
//!
//! Canister certificates and blend ratios change rarely, so they live in a
//! config file rather than on the command line:
//!
//! ```toml
//! # autogc-qc.toml
//! [screening]
//! upper_cal_point = 30.0
//! overrange_exclude = ["TNMTC", "TNMHC"]
//!
//! [recovery.cvs]
//! canister = "cvs_canister.csv"
//! blend_ratio = 0.1
//! ```
//!
//! Relative canister paths resolve against the config file's directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use autogc_qc::qc::QcType;

/// Root configuration structure for autogc-qc.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Ambient screening settings.
    #[serde(default)]
    pub screening: ScreeningConfig,

    /// Recovery settings per QC canister type.
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

/// Configuration for the ambient screens.
#[derive(Debug, Default, Deserialize)]
pub struct ScreeningConfig {
    /// Upper calibration point (ppbC).
    pub upper_cal_point: Option<f64>,

    /// Compound names excluded from overrange detection.
    pub overrange_exclude: Option<Vec<String>>,
}

/// Recovery canisters keyed by QC type.
#[derive(Debug, Default, Deserialize)]
pub struct RecoveryConfig {
    /// Calibration verification standard canister
    pub cvs: Option<CanisterConfig>,
    /// Laboratory control standard canister
    pub lcs: Option<CanisterConfig>,
    /// Round trip standard canister
    pub rts: Option<CanisterConfig>,
}

/// One QC canister.
#[derive(Debug, Clone, Deserialize)]
pub struct CanisterConfig {
    /// Certified concentrations CSV (compound, value[, unit]).
    pub canister: PathBuf,

    /// Dilution factor applied to the certified concentrations.
    #[serde(default = "default_blend_ratio")]
    pub blend_ratio: f64,
}

fn default_blend_ratio() -> f64 {
    1.0
}

impl RecoveryConfig {
    /// Configured canisters in CVS, LCS, RTS order.
    pub fn canisters(&self) -> Vec<(QcType, &CanisterConfig)> {
        [
            (QcType::Cvs, self.cvs.as_ref()),
            (QcType::Lcs, self.lcs.as_ref()),
            (QcType::Rts, self.rts.as_ref()),
        ]
        .into_iter()
        .filter_map(|(qc_type, canister)| canister.map(|c| (qc_type, c)))
        .collect()
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    fn resolve_paths(&mut self, base: &Path) {
        for canister in [&mut self.recovery.cvs, &mut self.recovery.lcs, &mut self.recovery.rts]
            .into_iter()
            .flatten()
        {
            if canister.canister.is_relative() {
                canister.canister = base.join(&canister.canister);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [screening]
            upper_cal_point = 40.0
            overrange_exclude = ["TNMHC"]

            [recovery.cvs]
            canister = "cvs.csv"
            blend_ratio = 0.1

            [recovery.rts]
            canister = "rts.csv"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.screening.upper_cal_point, Some(40.0));
        assert_eq!(config.screening.overrange_exclude, Some(vec!["TNMHC".to_string()]));

        let canisters = config.recovery.canisters();
        assert_eq!(canisters.len(), 2);
        assert_eq!(canisters[0].0, QcType::Cvs);
        assert_eq!(canisters[0].1.blend_ratio, 0.1);
        assert_eq!(canisters[1].0, QcType::Rts);
        assert_eq!(canisters[1].1.blend_ratio, 1.0);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.screening.upper_cal_point, None);
        assert!(config.recovery.canisters().is_empty());
    }

    #[test]
    fn test_relative_paths_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autogc-qc.toml");
        std::fs::write(&path, "[recovery.lcs]\ncanister = \"lcs.csv\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        let lcs = config.recovery.lcs.unwrap();
        assert_eq!(lcs.canister, dir.path().join("lcs.csv"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/autogc-qc.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
