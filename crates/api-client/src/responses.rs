use crate::error::ApiError;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// The envelope of a `GET /v8/finance/chart/{symbol}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartErrorResponse>,
}

/// Represents an error response from the chart API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartErrorResponse {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    // Absent when the symbol exists but has no bars in the requested range.
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    pub symbol: String,
    /// Offset of the exchange's timezone from UTC, in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    pub quote: Vec<Quote>,
    pub adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// The provider's code for an unknown or delisted symbol.
const NOT_FOUND: &str = "Not Found";

impl ChartResponse {
    /// Converts the response into `(exchange-local date, close)` pairs.
    ///
    /// Returns `Ok(None)` when the provider has no bars for the symbol. Bars with
    /// a null close (halted days) are skipped.
    pub fn into_daily_closes(
        self,
        use_adjusted_close: bool,
    ) -> Result<Option<Vec<(NaiveDate, f64)>>, ApiError> {
        if let Some(error) = self.chart.error {
            if error.code == NOT_FOUND {
                return Ok(None);
            }
            return Err(ApiError::Provider(error.code, error.description));
        }

        let Some(result) = self.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(None);
        };
        let Some(timestamps) = result.timestamp else {
            return Ok(None);
        };

        let closes = if use_adjusted_close {
            result
                .indicators
                .adjclose
                .and_then(|a| a.into_iter().next())
                .map(|a| a.adjclose)
        } else {
            None
        };
        let closes = match closes {
            Some(closes) => closes,
            None => result
                .indicators
                .quote
                .into_iter()
                .next()
                .map(|q| q.close)
                .ok_or_else(|| ApiError::InvalidData(format!("No quote block for {}", result.meta.symbol)))?,
        };

        if closes.len() != timestamps.len() {
            return Err(ApiError::InvalidData(format!(
                "{} has {} timestamps but {} closes",
                result.meta.symbol,
                timestamps.len(),
                closes.len()
            )));
        }

        let offset = result.meta.gmtoffset;
        let observations = timestamps
            .into_iter()
            .zip(closes)
            .filter_map(|(ts, close)| close.map(|c| (ts, c)))
            .map(|(ts, close)| {
                let date = DateTime::from_timestamp(ts + offset, 0)
                    .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {ts}")))?
                    .date_naive();
                Ok((date, close))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        if observations.is_empty() {
            return Ok(None);
        }
        Ok(Some(observations))
    }
}
