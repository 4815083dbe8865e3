use crate::error::SeriesError;
use crate::window::DateWindow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// The validated daily closing prices of one ticker over an evaluation window.
///
/// A `PriceSeries` is never empty, its dates are strictly increasing, and every
/// close is positive. It can only be built through [`PriceSeries::new`] or
/// [`PriceSeries::from_raw`], and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    window: DateWindow,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from decimal observations.
    ///
    /// Points outside `window` are dropped, the rest are sorted by date, and
    /// when a date appears more than once the last value supplied for it wins.
    pub fn new(
        ticker: impl Into<String>,
        observations: impl IntoIterator<Item = PricePoint>,
        window: DateWindow,
    ) -> Result<Self, SeriesError> {
        let ticker = ticker.into();
        let retained = retain_in_window(
            window,
            observations.into_iter().map(|p| (p.date, p.close)),
        );

        let points = retained
            .into_iter()
            .map(|(date, close)| {
                if close <= Decimal::ZERO {
                    return Err(SeriesError::InvalidPrice {
                        ticker: ticker.clone(),
                        date,
                        price: close.to_string(),
                    });
                }
                Ok(PricePoint { date, close })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_points(ticker, window, points)
    }

    /// Builds a series from raw floating-point closes as delivered by a data provider.
    ///
    /// Non-finite closes inside the window fail with `InvalidPrice`, exactly like
    /// non-positive ones. Positive closes that `Decimal` cannot hold, above about
    /// 7.9e28 or so small they round to zero (below 1e-28), fail with
    /// `PriceOutOfRange`.
    pub fn from_raw(
        ticker: impl Into<String>,
        observations: impl IntoIterator<Item = (NaiveDate, f64)>,
        window: DateWindow,
    ) -> Result<Self, SeriesError> {
        let ticker = ticker.into();
        let retained = retain_in_window(window, observations);

        let points = retained
            .into_iter()
            .map(|(date, raw)| {
                if !raw.is_finite() || raw <= 0.0 {
                    return Err(SeriesError::InvalidPrice {
                        ticker: ticker.clone(),
                        date,
                        price: raw.to_string(),
                    });
                }
                match Decimal::from_f64(raw) {
                    Some(close) if close > Decimal::ZERO => Ok(PricePoint { date, close }),
                    _ => Err(SeriesError::PriceOutOfRange {
                        ticker: ticker.clone(),
                        date,
                        price: format!("{raw:e}"),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_points(ticker, window, points)
    }

    fn from_points(
        ticker: String,
        window: DateWindow,
        points: Vec<PricePoint>,
    ) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::EmptySeries {
                ticker,
                start: window.start(),
                end: window.end(),
            });
        }

        Ok(Self {
            ticker,
            window,
            points,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// The closing prices in date order.
    pub fn closes(&self) -> impl ExactSizeIterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.close)
    }
}

/// Keeps only in-window observations, ordered by date, with the last value per date.
fn retain_in_window<T>(
    window: DateWindow,
    observations: impl IntoIterator<Item = (NaiveDate, T)>,
) -> BTreeMap<NaiveDate, T> {
    let mut supplied = 0usize;
    let mut retained = BTreeMap::new();
    for (date, value) in observations {
        supplied += 1;
        if window.contains(date) {
            retained.insert(date, value);
        }
    }

    if retained.len() != supplied {
        tracing::debug!(
            supplied,
            retained = retained.len(),
            "Dropped out-of-window or duplicate observations."
        );
    }

    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn year_2024() -> DateWindow {
        DateWindow::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap()
    }

    fn point(date: NaiveDate, close: Decimal) -> PricePoint {
        PricePoint { date, close }
    }

    #[test]
    fn test_points_are_sorted_and_windowed() {
        let series = PriceSeries::new(
            "TSM",
            vec![
                point(d(2024, 1, 3), dec!(102)),
                point(d(2023, 12, 29), dec!(99)),
                point(d(2024, 1, 2), dec!(100)),
                point(d(2025, 1, 2), dec!(150)),
            ],
            year_2024(),
        )
        .unwrap();

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(series.first().close, dec!(100));
        assert_eq!(series.last().close, dec!(102));
        assert_eq!(series.ticker(), "TSM");
    }

    #[test]
    fn test_duplicate_dates_keep_last_value() {
        let series = PriceSeries::new(
            "JD",
            vec![
                point(d(2024, 3, 1), dec!(10)),
                point(d(2024, 3, 4), dec!(11)),
                point(d(2024, 3, 1), dec!(12)),
            ],
            year_2024(),
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.first(), &point(d(2024, 3, 1), dec!(12)));
    }

    #[test]
    fn test_no_points_in_window_is_empty_series() {
        let err = PriceSeries::new(
            "SONY",
            vec![point(d(2023, 6, 1), dec!(80))],
            year_2024(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            SeriesError::EmptySeries {
                ticker: "SONY".to_string(),
                start: d(2024, 1, 1),
                end: d(2024, 12, 31),
            }
        );
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let err = PriceSeries::new(
            "BIDU",
            vec![
                point(d(2024, 2, 1), dec!(90)),
                point(d(2024, 2, 2), dec!(0)),
            ],
            year_2024(),
        )
        .unwrap_err();

        assert!(matches!(err, SeriesError::InvalidPrice { date, .. } if date == d(2024, 2, 2)));
    }

    #[test]
    fn test_invalid_price_outside_window_is_ignored() {
        let series = PriceSeries::new(
            "NTES",
            vec![
                point(d(2023, 12, 29), dec!(-1)),
                point(d(2024, 1, 2), dec!(95)),
            ],
            year_2024(),
        );
        assert!(series.is_ok());
    }

    #[test]
    fn test_raw_non_finite_price_is_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -3.5] {
            let err = PriceSeries::from_raw(
                "CAJ",
                vec![(d(2024, 5, 1), 27.1), (d(2024, 5, 2), bad)],
                year_2024(),
            )
            .unwrap_err();
            assert!(matches!(err, SeriesError::InvalidPrice { .. }));
        }
    }

    #[test]
    fn test_raw_price_outside_decimal_range_is_reported_as_such() {
        for extreme in [1e-30, 1e30] {
            let err = PriceSeries::from_raw(
                "NTTYY",
                vec![(d(2024, 5, 1), 27.1), (d(2024, 5, 2), extreme)],
                year_2024(),
            )
            .unwrap_err();
            assert!(
                matches!(err, SeriesError::PriceOutOfRange { date, .. } if date == d(2024, 5, 2)),
                "unexpected error for {extreme}: {err}"
            );
        }
    }

    #[test]
    fn test_raw_prices_are_converted_to_decimal() {
        let series = PriceSeries::from_raw(
            "BABA",
            vec![(d(2024, 1, 2), 72.5), (d(2024, 1, 3), 71.25)],
            year_2024(),
        )
        .unwrap();

        let closes: Vec<_> = series.closes().collect();
        assert_eq!(closes, vec![dec!(72.5), dec!(71.25)]);
    }

    #[test]
    fn test_rebuilding_from_own_points_is_identity() {
        let original = PriceSeries::new(
            "TCEHY",
            vec![
                point(d(2024, 4, 3), dec!(39.2)),
                point(d(2024, 4, 1), dec!(38.0)),
                point(d(2024, 4, 2), dec!(38.7)),
                point(d(2024, 4, 2), dec!(38.9)),
            ],
            year_2024(),
        )
        .unwrap();

        let rebuilt = PriceSeries::new(
            original.ticker(),
            original.points().to_vec(),
            original.window(),
        )
        .unwrap();

        assert_eq!(rebuilt, original);
    }
}
