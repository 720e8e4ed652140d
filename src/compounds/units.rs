use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CompoundError;

/// Supported concentration units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    /// Parts per billion by volume
    Ppbv,
    /// Parts per million by volume
    Ppmv,
    /// Parts per billion by carbon
    Ppbc,
    /// Parts per million by carbon
    Ppmc,
}

impl ConcentrationUnit {
    /// Unit label in lowercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcentrationUnit::Ppbv => "ppbv",
            ConcentrationUnit::Ppmv => "ppmv",
            ConcentrationUnit::Ppbc => "ppbc",
            ConcentrationUnit::Ppmc => "ppmc",
        }
    }

    fn require_carbon(&self, carbon_count: u8) -> Result<f64, CompoundError> {
        if carbon_count == 0 {
            return Err(CompoundError::InvalidCarbonCount {
                unit: self.as_str(),
                carbon_count,
            });
        }
        Ok(f64::from(carbon_count))
    }

    /// Convert a value in this unit to ppbv
    pub fn to_ppbv(&self, value: f64, carbon_count: u8) -> Result<f64, CompoundError> {
        match self {
            ConcentrationUnit::Ppbv => Ok(value),
            ConcentrationUnit::Ppmv => Ok(value * 1000.0),
            ConcentrationUnit::Ppbc => Ok(value / self.require_carbon(carbon_count)?),
            ConcentrationUnit::Ppmc => Ok((value / self.require_carbon(carbon_count)?) * 1000.0),
        }
    }

    /// Convert a value in this unit to ppbC, the unit used by all screens
    pub fn to_ppbc(&self, value: f64, carbon_count: u8) -> Result<f64, CompoundError> {
        match self {
            ConcentrationUnit::Ppbc => Ok(value),
            ConcentrationUnit::Ppmc => Ok(value * 1000.0),
            ConcentrationUnit::Ppbv => Ok(value * self.require_carbon(carbon_count)?),
            ConcentrationUnit::Ppmv => Ok(value * 1000.0 * self.require_carbon(carbon_count)?),
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcentrationUnit {
    type Err = CompoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ppbv" | "ppb" => Ok(ConcentrationUnit::Ppbv),
            "ppmv" | "ppm" => Ok(ConcentrationUnit::Ppmv),
            "ppbc" => Ok(ConcentrationUnit::Ppbc),
            "ppmc" => Ok(ConcentrationUnit::Ppmc),
            other => Err(CompoundError::UnknownUnit(other.to_string())),
        }
    }
}
