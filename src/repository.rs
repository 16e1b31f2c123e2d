//! Markets repository: typed access to price lists over a data source

use crate::{
    error::PriceError,
    provider::{fetch_data, DataSourceProvider},
    types::{AllPrice, DataSourceResource, PriceEnvelope, UsdPrice},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Market price data access
#[async_trait]
pub trait MarketsRepository: Send + Sync {
    /// Fetches the USD price list
    async fn fetch_usd_prices(&self) -> Result<Vec<UsdPrice>, PriceError>;

    /// Fetches the USD + EUR price list
    async fn fetch_all_prices(&self) -> Result<Vec<AllPrice>, PriceError>;
}

/// Repository that unwraps the fixture envelope returned by a data source
pub struct FixtureMarketsRepository {
    data_source: Arc<dyn DataSourceProvider>,
}

impl FixtureMarketsRepository {
    pub fn new(data_source: Arc<dyn DataSourceProvider>) -> Self {
        Self { data_source }
    }
}

#[async_trait]
impl MarketsRepository for FixtureMarketsRepository {
    async fn fetch_usd_prices(&self) -> Result<Vec<UsdPrice>, PriceError> {
        let envelope: PriceEnvelope<UsdPrice> =
            fetch_data(self.data_source.as_ref(), DataSourceResource::UsdPrices).await?;
        Ok(envelope.data)
    }

    async fn fetch_all_prices(&self) -> Result<Vec<AllPrice>, PriceError> {
        let envelope: PriceEnvelope<AllPrice> =
            fetch_data(self.data_source.as_ref(), DataSourceResource::AllPrices).await?;
        Ok(envelope.data)
    }
}
