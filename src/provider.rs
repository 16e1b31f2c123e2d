//! Data source abstraction for loading raw price payloads

use crate::{error::DataSourceError, types::DataSourceResource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Trait for price data sources
///
/// Implementations return the raw JSON payload for a resource; decoding is
/// shared by [`fetch_data`].
#[async_trait]
pub trait DataSourceProvider: Send + Sync {
    /// Fetches the raw payload for a resource
    ///
    /// # Arguments
    /// * `resource` - The resource to load
    ///
    /// # Returns
    /// The JSON document or an error if it cannot be read
    async fn fetch_payload(&self, resource: DataSourceResource) -> Result<String, DataSourceError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}

/// Fetches a resource and decodes it into `T`
pub async fn fetch_data<T: DeserializeOwned>(
    provider: &dyn DataSourceProvider,
    resource: DataSourceResource,
) -> Result<T, DataSourceError> {
    let payload = provider.fetch_payload(resource).await?;

    serde_json::from_str(&payload).map_err(|e| {
        tracing::warn!(
            provider = provider.provider_name(),
            resource = resource.name(),
            error = %e,
            "Decoding failed"
        );
        DataSourceError::InvalidData(e)
    })
}
