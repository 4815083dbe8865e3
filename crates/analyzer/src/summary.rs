use crate::error::AnalyzerError;
use analytics::PerformanceRecord;
use serde::Serialize;

/// All performance records of a run plus the selected best performer.
///
/// Records keep the universe order; use [`Summary::ranked`] for performance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    records: Vec<PerformanceRecord>,
    best_ticker: String,
    #[serde(skip)]
    best_index: usize,
}

impl Summary {
    /// Builds the summary, failing with `NoRecords` when `records` is empty.
    pub fn new(records: Vec<PerformanceRecord>) -> Result<Self, AnalyzerError> {
        let best_index = select_best(&records)?;
        let best_ticker = records[best_index].ticker.clone();

        Ok(Self {
            records,
            best_ticker,
            best_index,
        })
    }

    pub fn records(&self) -> &[PerformanceRecord] {
        &self.records
    }

    pub fn best_ticker(&self) -> &str {
        &self.best_ticker
    }

    pub fn best(&self) -> &PerformanceRecord {
        &self.records[self.best_index]
    }

    /// Records ordered by total return, highest first. Ties keep universe order.
    pub fn ranked(&self) -> Vec<&PerformanceRecord> {
        let mut ranked: Vec<_> = self.records.iter().collect();
        // `sort_by` is stable, which is what keeps ties in input order.
        ranked.sort_by(|a, b| b.total_return_pct.cmp(&a.total_return_pct));
        ranked
    }
}

/// Index of the record with the highest total return.
///
/// The first occurrence wins a tie, so the choice never depends on anything
/// but input order.
pub fn select_best(records: &[PerformanceRecord]) -> Result<usize, AnalyzerError> {
    let mut iter = records.iter().enumerate();
    let Some((mut best, first)) = iter.next() else {
        return Err(AnalyzerError::NoRecords);
    };

    let mut best_return = first.total_return_pct;
    for (i, record) in iter {
        if record.total_return_pct > best_return {
            best = i;
            best_return = record.total_return_pct;
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(ticker: &str, total_return_pct: Decimal) -> PerformanceRecord {
        PerformanceRecord {
            ticker: ticker.to_string(),
            name: format!("{ticker} Corp"),
            total_return_pct,
            sharpe_ratio: None,
            max_drawdown_pct: Decimal::ZERO,
            annualized_std_dev_pct: None,
            observations: 1,
            daily_returns: 0,
        }
    }

    #[test]
    fn test_selects_highest_return() {
        let records = vec![record("A", dec!(5)), record("B", dec!(12)), record("C", dec!(-3))];
        assert_eq!(select_best(&records).unwrap(), 1);

        let summary = Summary::new(records).unwrap();
        assert_eq!(summary.best_ticker(), "B");
        assert_eq!(summary.best().total_return_pct, dec!(12));
    }

    #[test]
    fn test_tie_goes_to_first_occurrence() {
        let summary = Summary::new(vec![record("A", dec!(5)), record("B", dec!(5.00))]).unwrap();
        assert_eq!(summary.best_ticker(), "A");
    }

    #[test]
    fn test_all_negative_returns_still_pick_a_best() {
        let summary = Summary::new(vec![record("A", dec!(-8)), record("B", dec!(-2))]).unwrap();
        assert_eq!(summary.best_ticker(), "B");
    }

    #[test]
    fn test_empty_collection_is_no_records() {
        assert!(matches!(select_best(&[]), Err(AnalyzerError::NoRecords)));
        assert!(matches!(Summary::new(Vec::new()), Err(AnalyzerError::NoRecords)));
    }

    #[test]
    fn test_records_keep_input_order_and_ranked_sorts() {
        let summary = Summary::new(vec![
            record("A", dec!(5)),
            record("B", dec!(12)),
            record("C", dec!(-3)),
            record("D", dec!(5)),
        ])
        .unwrap();

        let input: Vec<_> = summary.records().iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(input, vec!["A", "B", "C", "D"]);

        let ranked: Vec<_> = summary.ranked().iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(ranked, vec!["B", "A", "D", "C"]);
    }
}
