//! Statistical reductions over ordered price and return series.
//!
//! Every arithmetic step is checked: a valid but extreme series (tiny prices
//! followed by huge jumps) fails with `AnalyticsError::Calculation` instead of
//! overflowing the 96-bit decimal mantissa.

use crate::error::AnalyticsError;
use core_types::PriceSeries;
use rust_decimal::{Decimal, MathematicalOps};

pub(crate) fn overflow(step: &str) -> AnalyticsError {
    AnalyticsError::Calculation(format!("{step} is out of decimal range"))
}

/// Simple daily returns `(p[i] - p[i-1]) / p[i-1]`.
///
/// An n-point series yields exactly n-1 returns; the first day has no return
/// and is excluded rather than zero-filled.
pub fn daily_returns(series: &PriceSeries) -> Result<Vec<Decimal>, AnalyticsError> {
    series
        .points()
        .windows(2)
        .map(|w| {
            w[1].close
                .checked_sub(w[0].close)
                .and_then(|change| change.checked_div(w[0].close))
                .ok_or_else(|| overflow(&format!("daily return on {}", w[1].date)))
        })
        .collect()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    if values.is_empty() {
        return Ok(None);
    }
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .and_then(|sum| sum.checked_div(Decimal::from(values.len())))
        .map(Some)
        .ok_or_else(|| overflow("mean return"))
}

/// Sample standard deviation with a `(count - 1)` denominator.
///
/// Returns `Ok(None)` when fewer than two values are available.
pub fn sample_std_dev(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    if values.len() < 2 {
        return Ok(None);
    }

    let Some(avg) = mean(values)? else {
        return Ok(None);
    };
    let variance = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| {
            let deviation = v.checked_sub(avg)?;
            acc.checked_add(deviation.checked_mul(deviation)?)
        })
        .and_then(|sum| sum.checked_div(Decimal::from(values.len() - 1)))
        .ok_or_else(|| overflow("return variance"))?;

    variance
        .sqrt()
        .map(Some)
        .ok_or_else(|| AnalyticsError::Calculation(format!("square root of variance {variance}")))
}

/// Largest peak-to-trough decline as a non-negative fraction (0.1 == 10%).
///
/// One forward pass tracking the running peak; only the minimum drawdown is kept.
pub fn max_drawdown(series: &PriceSeries) -> Decimal {
    let mut closes = series.closes();
    let Some(mut peak) = closes.next() else {
        return Decimal::ZERO;
    };

    let mut worst = Decimal::ZERO;
    for close in closes {
        if close > peak {
            peak = close;
        }
        let drawdown = close / peak - Decimal::ONE;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    worst.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{DateWindow, PricePoint};
    use rust_decimal_macros::dec;

    fn series(closes: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = DateWindow::new(start, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()).unwrap();
        let points = closes.iter().enumerate().map(|(i, close)| PricePoint {
            date: start + chrono::Days::new(i as u64),
            close: *close,
        });
        PriceSeries::new("TEST", points, window).unwrap()
    }

    #[test]
    fn test_return_count_is_one_less_than_points() {
        let s = series(&[dec!(100), dec!(110), dec!(99), dec!(99)]);
        let returns = daily_returns(&s).unwrap();
        assert_eq!(returns.len(), 3);
        assert_eq!(returns, vec![dec!(0.1), dec!(-0.1), dec!(0)]);
    }

    #[test]
    fn test_single_point_has_no_returns() {
        assert!(daily_returns(&series(&[dec!(42)])).unwrap().is_empty());
    }

    #[test]
    fn test_sample_std_dev_uses_n_minus_one() {
        // mean 5, squared deviations sum to 32, sample variance 32/7.
        let values = [2, 4, 4, 4, 5, 5, 7, 9].map(Decimal::from);
        let std = sample_std_dev(&values).unwrap().unwrap();
        let expected = (dec!(32) / dec!(7)).sqrt().unwrap();
        assert_eq!(std, expected);
    }

    #[test]
    fn test_sample_std_dev_needs_two_values() {
        assert_eq!(sample_std_dev(&[]).unwrap(), None);
        assert_eq!(sample_std_dev(&[dec!(0.01)]).unwrap(), None);
    }

    #[test]
    fn test_huge_return_from_tiny_price_is_an_error() {
        let s = series(&[dec!(0.0000000000000000000000000001), dec!(79000000000)]);
        assert!(matches!(daily_returns(&s), Err(AnalyticsError::Calculation(_))));
    }

    #[test]
    fn test_mean_of_extreme_values_is_an_error() {
        assert!(mean(&[Decimal::MAX, Decimal::MAX]).is_err());
        assert_eq!(mean(&[]).unwrap(), None);
        assert_eq!(mean(&[dec!(1), dec!(2)]).unwrap(), Some(dec!(1.5)));
    }

    #[test]
    fn test_variance_overflow_is_an_error() {
        // Squared deviations of ~5e14 do not fit in a decimal.
        let values = [dec!(999999999999999), dec!(-1)];
        assert!(matches!(sample_std_dev(&values), Err(AnalyticsError::Calculation(_))));
    }

    #[test]
    fn test_max_drawdown_tracks_running_peak() {
        let s = series(&[dec!(100), dec!(120), dec!(90), dec!(130), dec!(117)]);
        // Worst is 90 against the 120 peak.
        assert_eq!(max_drawdown(&s), dec!(0.25));
    }

    #[test]
    fn test_max_drawdown_zero_for_non_decreasing() {
        let s = series(&[dec!(10), dec!(10), dec!(11), dec!(15), dec!(15)]);
        assert_eq!(max_drawdown(&s), Decimal::ZERO);
    }
}
