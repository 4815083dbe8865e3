use crate::error::TickerError;
use analytics::{AnalyticsEngine, PerformanceRecord};
use api_client::MarketDataSource;
use configuration::UniverseEntry;
use core_types::{DateWindow, PriceSeries};
use futures::stream::{self, StreamExt};
use serde::Serialize;

/// A ticker that was left out of the summary, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: String,
}

/// The joined result of evaluating a whole universe.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Records of the evaluated tickers, in universe order.
    pub records: Vec<PerformanceRecord>,
    pub skipped: Vec<SkippedTicker>,
}

/// Fetches and evaluates every ticker of a universe.
///
/// Tickers are independent: each one owns its series for the duration of its
/// evaluation and a failure only ever skips that ticker.
pub struct BatchRunner<'a, S: MarketDataSource + ?Sized> {
    source: &'a S,
    engine: AnalyticsEngine,
    window: DateWindow,
    max_concurrency: usize,
}

impl<'a, S: MarketDataSource + ?Sized> BatchRunner<'a, S> {
    pub fn new(source: &'a S, engine: AnalyticsEngine, window: DateWindow) -> Self {
        Self {
            source,
            engine,
            window,
            max_concurrency: 1,
        }
    }

    /// How many tickers may be in flight at once. Values below one are treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Fetches, validates and measures a single ticker.
    pub async fn evaluate(&self, entry: &UniverseEntry) -> Result<PerformanceRecord, TickerError> {
        let closes = self
            .source
            .fetch_daily_closes(&entry.ticker, self.window)
            .await?
            .ok_or(TickerError::NoData)?;

        let series = PriceSeries::from_raw(entry.ticker.as_str(), closes, self.window)?;
        let record = self.engine.calculate(&series, entry.display_name())?;
        Ok(record)
    }

    /// Evaluates the whole universe and joins the outcomes.
    ///
    /// Up to `max_concurrency` tickers run at once; results are collected in
    /// universe order regardless of completion order. `on_done` is called once
    /// per ticker as soon as its outcome is known.
    pub async fn run<F>(&self, universe: &[UniverseEntry], on_done: F) -> BatchOutcome
    where
        F: Fn(&UniverseEntry, &Result<PerformanceRecord, TickerError>),
    {
        tracing::info!(
            tickers = universe.len(),
            start = %self.window.start(),
            end = %self.window.end(),
            max_concurrency = self.max_concurrency,
            "Evaluating universe."
        );

        let outcomes: Vec<_> = stream::iter(universe)
            .map(|entry| async move {
                let outcome = self.evaluate(entry).await;
                (entry, outcome)
            })
            .buffered(self.max_concurrency)
            .inspect(|(entry, outcome)| on_done(*entry, outcome))
            .collect()
            .await;

        let batch = outcomes
            .into_iter()
            .fold(BatchOutcome::default(), |mut batch, (entry, outcome)| {
                match outcome {
                    Ok(record) => batch.records.push(record),
                    Err(e) => {
                        tracing::warn!(ticker = %entry.ticker, reason = %e, "Skipping ticker.");
                        batch.skipped.push(SkippedTicker {
                            ticker: entry.ticker.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
                batch
            });

        tracing::info!(
            evaluated = batch.records.len(),
            skipped = batch.skipped.len(),
            "Universe evaluated."
        );

        batch
    }
}
