use thiserror::Error;

use crate::drivers::DriverError;

/// Errors that abort a query run.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Missing or invalid configuration, detected before any scraping
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid regex in a cleaner configuration
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A config file or saved page could not be read, or chromedriver could not bind
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// Page automation failed in a way that is not a missing element
    #[error("page driver error: {0}")]
    Driver(#[from] DriverError),

    /// Mail could not be built or delivered
    #[error("mail error: {0}")]
    Mail(String),
}

impl From<lettre::address::AddressError> for ScoutError {
    fn from(e: lettre::address::AddressError) -> Self {
        ScoutError::Mail(format!("invalid address: {e}"))
    }
}

impl From<lettre::error::Error> for ScoutError {
    fn from(e: lettre::error::Error) -> Self {
        ScoutError::Mail(format!("failed to build message: {e}"))
    }
}

impl From<lettre::transport::smtp::Error> for ScoutError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        ScoutError::Mail(format!("SMTP transport failed: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
