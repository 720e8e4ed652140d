use super::CompoundCode;

/// Errors raised by compound vocabulary lookups
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompoundError {
    /// Name does not match any compound in the reference vocabulary
    #[error("Unknown compound name: '{0}'. Check spelling against the reference vocabulary (e.g., 'Benzene', 'Ethane')")]
    UnknownName(String),

    /// Code does not match any compound in the reference vocabulary
    #[error("Unknown AQS code: {0}")]
    UnknownCode(CompoundCode),

    /// Code exists but has no GC column assignment (aggregate totals)
    #[error("AQS code {0} has no column assignment")]
    NoColumn(CompoundCode),

    /// Unit conversion needs a carbon count that was not positive
    #[error("Carbon count required for {unit} conversion, got {carbon_count}")]
    InvalidCarbonCount {
        /// Unit being converted from
        unit: &'static str,
        /// Carbon count that was supplied
        carbon_count: u8,
    },

    /// Unit string not recognized
    #[error("Unknown concentration unit: {0}")]
    UnknownUnit(String),
}
