use crate::error::ApiError;
use crate::responses::ChartResponse;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use configuration::DataSourceSettings;
use core_types::DateWindow;
use std::time::Duration;

pub mod error;
pub mod memory;
pub mod responses;
// --- Public API ---
pub use memory::InMemorySource;

/// A single `(date, close)` observation as delivered by a provider.
pub type DailyClose = (NaiveDate, f64);

/// The abstract interface for a market data provider.
/// The batch runner only sees this trait, allowing the underlying
/// implementation (live HTTP or in-memory) to be swapped out.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the daily closing prices of `ticker` for `window`.
    ///
    /// `Ok(None)` is the explicit "no data" signal. Implementations do not
    /// retry or cache.
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        window: DateWindow,
    ) -> Result<Option<Vec<DailyClose>>, ApiError>;
}

/// A concrete implementation of `MarketDataSource` over the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooChartClient {
    client: reqwest::Client,
    base_url: String,
    use_adjusted_close: bool,
}

impl YahooChartClient {
    pub fn new(settings: &DataSourceSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tickrank/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            use_adjusted_close: settings.use_adjusted_close,
        })
    }
}

/// Unix seconds at UTC midnight of `date`.
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

#[async_trait]
impl MarketDataSource for YahooChartClient {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        window: DateWindow,
    ) -> Result<Option<Vec<DailyClose>>, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        // period2 is exclusive on the provider side, so ask up to the day after `end`.
        let period2_date = window.end().checked_add_days(Days::new(1)).unwrap_or(window.end());

        tracing::debug!(ticker, %url, start = %window.start(), end = %window.end(), "Requesting daily chart.");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", unix_midnight(window.start()).to_string()),
                ("period2", unix_midnight(period2_date).to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        // Unknown symbols come back as 404 with a regular chart error body.
        match serde_json::from_str::<ChartResponse>(&text) {
            Ok(chart) => chart.into_daily_closes(self.use_adjusted_close),
            Err(_) if !status.is_success() => Err(ApiError::Http(status.as_u16(), text)),
            Err(e) => Err(ApiError::Deserialization(e.to_string())),
        }
    }
}
