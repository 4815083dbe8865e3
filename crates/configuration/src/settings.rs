use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::{DateWindow, MetricsParams};
use serde::Deserialize;
use std::collections::HashSet;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub evaluation: Evaluation,
    #[serde(default)]
    pub metrics: MetricsParams,
    #[serde(default)]
    pub data_source: DataSourceSettings,
    #[serde(default)]
    pub output: OutputSettings,
    /// The tickers to evaluate, in presentation order.
    pub universe: Vec<UniverseEntry>,
}

/// The historical window every ticker is evaluated over.
#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    /// First date of the window (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the window (inclusive).
    pub end_date: NaiveDate,
}

impl Evaluation {
    pub fn window(&self) -> Result<DateWindow, ConfigError> {
        DateWindow::new(self.start_date, self.end_date)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Contains parameters for the market data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceSettings {
    /// Root URL of the chart API (e.g., "https://query1.finance.yahoo.com").
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// How many tickers are fetched and evaluated at the same time.
    pub max_concurrency: usize,
    /// Prefer split/dividend adjusted closes when the provider has them.
    pub use_adjusted_close: bool,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            max_concurrency: 8,
            use_adjusted_close: true,
        }
    }
}

/// How the summary is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

/// One ticker of the universe and the company name shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UniverseEntry {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
}

impl UniverseEntry {
    /// The company name, falling back to the ticker when none is configured.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.ticker
        } else {
            &self.name
        }
    }
}

impl Config {
    /// Checks the invariants that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evaluation.window()?;

        if self.metrics.annualization_factor == 0 {
            return Err(ConfigError::ValidationError(
                "metrics.annualization_factor must be greater than zero".to_string(),
            ));
        }
        if self.data_source.max_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "data_source.max_concurrency must be greater than zero".to_string(),
            ));
        }
        if self.universe.is_empty() {
            return Err(ConfigError::ValidationError(
                "universe must list at least one ticker".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.universe {
            if entry.ticker.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "universe contains an empty ticker".to_string(),
                ));
            }
            if !seen.insert(entry.ticker.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "ticker '{}' is listed more than once",
                    entry.ticker
                )));
            }
        }

        Ok(())
    }
}
