use crate::error::ApiError;
use crate::{DailyClose, MarketDataSource};
use async_trait::async_trait;
use core_types::DateWindow;
use std::collections::HashMap;

/// A `MarketDataSource` backed by fixed observations.
///
/// It returns everything it holds for a ticker regardless of the requested
/// window; windowing is left to `PriceSeries` construction. Tickers with no
/// observations get the "no data" signal.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    closes: HashMap<String, Vec<DailyClose>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, ticker: impl Into<String>, closes: Vec<DailyClose>) -> Self {
        self.insert(ticker, closes);
        self
    }

    pub fn insert(&mut self, ticker: impl Into<String>, closes: Vec<DailyClose>) {
        self.closes.insert(ticker.into(), closes);
    }
}

#[async_trait]
impl MarketDataSource for InMemorySource {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        _window: DateWindow,
    ) -> Result<Option<Vec<DailyClose>>, ApiError> {
        Ok(self
            .closes
            .get(ticker)
            .filter(|closes| !closes.is_empty())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_known_ticker_returns_its_closes() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let source = InMemorySource::new().with_closes("SONY", vec![(day, 88.0)]);

        let closes = source.fetch_daily_closes("SONY", window()).await.unwrap();
        assert_eq!(closes, Some(vec![(day, 88.0)]));
    }

    #[tokio::test]
    async fn test_unknown_or_empty_ticker_is_no_data() {
        let source = InMemorySource::new().with_closes("JD", Vec::new());

        assert_eq!(source.fetch_daily_closes("JD", window()).await.unwrap(), None);
        assert_eq!(source.fetch_daily_closes("BIDU", window()).await.unwrap(), None);
    }
}
