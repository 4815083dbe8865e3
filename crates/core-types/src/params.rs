use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading days per year used to scale daily statistics.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// The constants that turn daily statistics into yearly ones.
///
/// These are passed into the metrics computation explicitly so that alternate
/// conventions (e.g. a non-zero risk-free rate) can be evaluated side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsParams {
    /// Number of return periods per year (A).
    #[serde(default = "default_annualization_factor")]
    pub annualization_factor: u32,
    /// Annual risk-free rate in decimal form (0.02 == 2%).
    #[serde(default)]
    pub risk_free_rate: Decimal,
}

fn default_annualization_factor() -> u32 {
    TRADING_DAYS_PER_YEAR
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self {
            annualization_factor: TRADING_DAYS_PER_YEAR,
            risk_free_rate: Decimal::ZERO,
        }
    }
}
