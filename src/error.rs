//! Error types for the crypto list client

use thiserror::Error;

/// Errors that can occur when loading raw price data from a data source
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Fixture file does not exist
    #[error("Missing file: '{0}'")]
    MissingFile(String),

    /// Payload could not be decoded
    #[error("Invalid data format: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// Reading the fixture failed for another reason
    #[error("Internal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the repository and price use case
#[derive(Debug, Error)]
pub enum PriceError {
    /// Underlying data source failed
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

/// A consumer could not obtain a service it cannot work without
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// The service resolved to nothing
    #[error("{service} is not registered in dependency container")]
    Missing { service: String },
}

impl DependencyError {
    /// Creates a Missing error
    pub fn missing(service: &str) -> Self {
        Self::Missing {
            service: service.to_string(),
        }
    }
}

/// Errors that can occur when reading configuration from the environment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value {value:?} for {name}")]
    InvalidValue { name: String, value: String },
}

impl ConfigError {
    /// Creates an InvalidValue error
    pub fn invalid_value(name: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            value: value.into(),
        }
    }
}
