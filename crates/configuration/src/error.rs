use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load leverage settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid leverage settings: {0}")]
    ValidationError(String),
}
