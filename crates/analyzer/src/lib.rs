//! # Tickrank Analyzer
//!
//! Evaluates a universe of tickers and aggregates the per-ticker
//! `PerformanceRecord`s into a `Summary` with a single best performer.
//!
//! The batch is an explicit map/filter/aggregate: every ticker maps to a record or
//! a `SkippedTicker`, the records are collected in universe order, and only then
//! is the best performer selected.

pub mod batch;
pub mod error;
pub mod summary;

pub use batch::{BatchOutcome, BatchRunner, SkippedTicker};
pub use error::{AnalyzerError, TickerError};
pub use summary::{Summary, select_best};
