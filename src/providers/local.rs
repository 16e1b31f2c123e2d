//! Local fixture data source provider

use crate::{
    config::AppConfig,
    constants::{ALL_PRICES_FIXTURE, DEFAULT_NETWORK_DELAY_MS, USD_PRICES_FIXTURE},
    error::DataSourceError,
    provider::DataSourceProvider,
    types::DataSourceResource,
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

/// Where fixture files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureLocation {
    /// Fixtures compiled into the binary
    Bundled,
    /// `<resource>.json` files inside a directory
    Directory(PathBuf),
}

/// Serves price data from JSON fixtures, optionally simulating network latency
pub struct LocalDataSourceProvider {
    location: FixtureLocation,
    network_delay: Duration,
}

impl LocalDataSourceProvider {
    /// Creates a provider for the given location and simulated delay
    pub fn new(location: FixtureLocation, network_delay: Duration) -> Self {
        Self {
            location,
            network_delay,
        }
    }

    /// Creates a provider over the bundled fixtures with no delay
    pub fn bundled() -> Self {
        Self::new(FixtureLocation::Bundled, Duration::ZERO)
    }

    /// Creates a provider from application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let location = match &config.fixtures_dir {
            Some(dir) => FixtureLocation::Directory(dir.clone()),
            None => FixtureLocation::Bundled,
        };
        Self::new(location, config.network_delay)
    }

    /// Returns where fixtures are read from
    pub fn location(&self) -> &FixtureLocation {
        &self.location
    }

    async fn load(&self, resource: DataSourceResource) -> Result<String, DataSourceError> {
        match &self.location {
            FixtureLocation::Bundled => Ok(match resource {
                DataSourceResource::UsdPrices => USD_PRICES_FIXTURE,
                DataSourceResource::AllPrices => ALL_PRICES_FIXTURE,
            }
            .to_string()),
            FixtureLocation::Directory(dir) => {
                let path = dir.join(resource.file_name());
                tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
                    ErrorKind::NotFound => DataSourceError::MissingFile(resource.file_name()),
                    _ => DataSourceError::Io(e),
                })
            }
        }
    }
}

impl Default for LocalDataSourceProvider {
    fn default() -> Self {
        Self::new(
            FixtureLocation::Bundled,
            Duration::from_millis(DEFAULT_NETWORK_DELAY_MS),
        )
    }
}

#[async_trait]
impl DataSourceProvider for LocalDataSourceProvider {
    async fn fetch_payload(&self, resource: DataSourceResource) -> Result<String, DataSourceError> {
        tracing::debug!(resource = %resource, "Starting to fetch data");

        if !self.network_delay.is_zero() {
            sleep(self.network_delay).await;
            tracing::debug!(
                delay_ms = self.network_delay.as_millis() as u64,
                "Simulated network delay"
            );
        }

        match self.load(resource).await {
            Ok(payload) => {
                tracing::debug!(
                    resource = resource.name(),
                    bytes = payload.len(),
                    "Loaded fixture"
                );
                Ok(payload)
            }
            Err(e) => {
                tracing::warn!(resource = resource.name(), error = %e, "Data fetch failed");
                Err(e)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}
