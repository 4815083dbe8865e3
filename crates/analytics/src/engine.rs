use crate::error::AnalyticsError;
use crate::math::{daily_returns, max_drawdown, mean, overflow, sample_std_dev};
use crate::report::PerformanceRecord;
use core_types::{MetricsParams, PriceSeries};
use rust_decimal::{Decimal, MathematicalOps};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A stateless calculator for deriving performance metrics from a price series.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    params: MetricsParams,
}

impl AnalyticsEngine {
    pub fn new(params: MetricsParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MetricsParams {
        &self.params
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `series` - The validated closing prices of one ticker.
    /// * `name` - The human-readable company name carried into the record.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PerformanceRecord` or an `AnalyticsError`.
    /// A one-point series is not an error: its return and drawdown are zero and
    /// its Sharpe ratio and volatility are undefined.
    pub fn calculate(
        &self,
        series: &PriceSeries,
        name: &str,
    ) -> Result<PerformanceRecord, AnalyticsError> {
        if self.params.annualization_factor == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "annualization_factor".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let returns = daily_returns(series)?;
        let (sharpe_ratio, annualized_std_dev_pct) = self.calculate_risk(&returns)?;

        let record = PerformanceRecord {
            ticker: series.ticker().to_string(),
            name: name.to_string(),
            total_return_pct: total_return_pct(series)?,
            sharpe_ratio,
            max_drawdown_pct: max_drawdown(series) * HUNDRED,
            annualized_std_dev_pct,
            observations: series.len(),
            daily_returns: returns.len(),
        };

        tracing::debug!(
            ticker = %record.ticker,
            total_return_pct = %record.total_return_pct,
            sharpe_ratio = ?record.sharpe_ratio,
            "Calculated performance record."
        );

        Ok(record)
    }

    /// Annualized Sharpe ratio and volatility from one return series.
    ///
    /// Both are `None` when the sample standard deviation is undefined (fewer
    /// than two returns) or zero (constant prices).
    fn calculate_risk(
        &self,
        returns: &[Decimal],
    ) -> Result<(Option<Decimal>, Option<Decimal>), AnalyticsError> {
        let Some(std_dev) = sample_std_dev(returns)? else {
            return Ok((None, None));
        };
        if std_dev.is_zero() {
            return Ok((None, None));
        }
        let Some(mean_return) = mean(returns)? else {
            return Ok((None, None));
        };

        let periods = Decimal::from(self.params.annualization_factor);
        let sqrt_periods = periods.sqrt().ok_or_else(|| {
            AnalyticsError::Calculation(format!("square root of annualization factor {periods}"))
        })?;

        let annualized_vol = std_dev
            .checked_mul(sqrt_periods)
            .ok_or_else(|| overflow("annualized volatility"))?;
        let sharpe = mean_return
            .checked_mul(periods)
            .and_then(|annual| annual.checked_sub(self.params.risk_free_rate))
            .and_then(|excess| excess.checked_div(annualized_vol))
            .ok_or_else(|| overflow("Sharpe ratio"))?;
        let annualized_vol_pct = annualized_vol
            .checked_mul(HUNDRED)
            .ok_or_else(|| overflow("annualized volatility"))?;

        Ok((Some(sharpe), Some(annualized_vol_pct)))
    }
}

/// (last - first) / first in percent; zero for a single observation.
fn total_return_pct(series: &PriceSeries) -> Result<Decimal, AnalyticsError> {
    let first = series.first().close;
    let last = series.last().close;
    last.checked_sub(first)
        .and_then(|change| change.checked_div(first))
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| overflow("total return"))
}
