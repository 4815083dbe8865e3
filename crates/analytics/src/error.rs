use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid metrics parameter '{0}': {1}")]
    InvalidParameter(String, String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
