pub mod error;
pub mod params;
pub mod series;
pub mod window;

// Re-export the core types to provide a clean public API.
pub use error::{CoreError, SeriesError};
pub use params::MetricsParams;
pub use series::{PricePoint, PriceSeries};
pub use window::DateWindow;
