use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

/// Reasons a ticker's raw observations cannot become a `PriceSeries`.
///
/// All variants are per-ticker: the batch runner turns them into a skip
/// and carries on with the remaining tickers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("No observations for {ticker} between {start} and {end}")]
    EmptySeries {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid closing price for {ticker} on {date}: {price}")]
    InvalidPrice {
        ticker: String,
        date: NaiveDate,
        price: String,
    },

    #[error("Closing price for {ticker} on {date} is outside the decimal range: {price}")]
    PriceOutOfRange {
        ticker: String,
        date: NaiveDate,
        price: String,
    },
}
