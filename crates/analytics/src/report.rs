use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The performance of a single ticker over the evaluation window.
///
/// This struct is the output of the `AnalyticsEngine` and the unit that the
/// analyzer ranks and the report renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub ticker: String,
    pub name: String,

    /// (last - first) / first, in percent.
    pub total_return_pct: Decimal,
    pub sharpe_ratio: Option<Decimal>, // None when the return series has no dispersion
    /// Largest peak-to-trough decline in percent, always >= 0.
    pub max_drawdown_pct: Decimal,
    pub annualized_std_dev_pct: Option<Decimal>, // None on the same conditions as sharpe_ratio

    pub observations: usize,
    pub daily_returns: usize,
}
