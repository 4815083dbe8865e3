use analytics::AnalyticsError;
use api_client::error::ApiError;
use core_types::SeriesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("No performance records to aggregate")]
    NoRecords,
}

/// Why a single ticker produced no performance record.
///
/// None of these abort a batch; the runner turns them into a `SkippedTicker`.
#[derive(Error, Debug)]
pub enum TickerError {
    #[error("the data source has no data for this ticker")]
    NoData,

    #[error("failed to fetch prices: {0}")]
    Fetch(#[from] ApiError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("failed to compute metrics: {0}")]
    Metrics(#[from] AnalyticsError),
}
