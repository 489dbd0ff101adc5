use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid price sweep: {0}")]
    InvalidSweep(String),
}
