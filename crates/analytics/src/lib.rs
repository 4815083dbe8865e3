//! # Tickrank Analytics Engine
//!
//! This crate turns one ticker's validated `PriceSeries` into a `PerformanceRecord`:
//! total return, annualized Sharpe ratio, maximum drawdown and annualized volatility.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` holds only its `MetricsParams`. Every
//!   metric is derived from the same daily return series, so Sharpe ratio and volatility
//!   always agree with each other.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The struct that contains the calculation logic.
//! - `PerformanceRecord`: The per-ticker result.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod math;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::PerformanceRecord;
