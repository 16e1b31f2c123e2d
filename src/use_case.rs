//! Price use case consumed by the view-models

use crate::{
    error::PriceError,
    repository::MarketsRepository,
    types::{AllPrice, UsdPrice},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Price operations for cryptocurrency market data
#[async_trait]
pub trait MarketsPriceUseCase: Send + Sync {
    /// Fetches USD prices
    async fn fetch_usd_prices(&self) -> Result<Vec<UsdPrice>, PriceError>;

    /// Fetches USD + EUR prices
    async fn fetch_all_prices(&self) -> Result<Vec<AllPrice>, PriceError>;
}

/// Use case delegating to a [`MarketsRepository`]
pub struct PriceUseCase {
    repository: Arc<dyn MarketsRepository>,
}

impl PriceUseCase {
    pub fn new(repository: Arc<dyn MarketsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl MarketsPriceUseCase for PriceUseCase {
    async fn fetch_usd_prices(&self) -> Result<Vec<UsdPrice>, PriceError> {
        let prices = self.repository.fetch_usd_prices().await?;
        tracing::debug!(count = prices.len(), "Fetched USD prices");
        Ok(prices)
    }

    async fn fetch_all_prices(&self) -> Result<Vec<AllPrice>, PriceError> {
        let prices = self.repository.fetch_all_prices().await?;
        tracing::debug!(count = prices.len(), "Fetched all prices");
        Ok(prices)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockPriceUseCase;
    use super::*;
    use crate::container::{Container, ServiceKey};
    use crate::providers::LocalDataSourceProvider;
    use crate::repository::FixtureMarketsRepository;
    use crate::types::Tag;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PRICE_USE_CASE: ServiceKey<Arc<dyn MarketsPriceUseCase>> =
        ServiceKey::new("test_price_use_case");

    #[tokio::test]
    async fn test_use_case_reads_bundled_fixtures() {
        let repository = FixtureMarketsRepository::new(Arc::new(LocalDataSourceProvider::bundled()));
        let use_case = PriceUseCase::new(Arc::new(repository));

        let usd = use_case.fetch_usd_prices().await.unwrap();
        let all = use_case.fetch_all_prices().await.unwrap();
        assert_eq!(usd.len(), all.len());
        assert_eq!(usd[0].id, all[0].id);
    }

    #[tokio::test]
    async fn test_resolved_use_case_is_built_once() {
        let container = Container::new();
        let factory_calls = Arc::new(AtomicUsize::new(0));
        let counter = factory_calls.clone();
        container.register(PRICE_USE_CASE, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            let stub = MockPriceUseCase::new();
            stub.add_price(1, "Bitcoin", 45000.50, 0.0, vec![Tag::Deposit]);
            Arc::new(stub) as Arc<dyn MarketsPriceUseCase>
        });

        let first = container.resolve(PRICE_USE_CASE).unwrap();
        let second = container.resolve(PRICE_USE_CASE).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory_calls.load(Ordering::SeqCst), 1);

        let prices = second.fetch_usd_prices().await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].id, 1);
        assert_eq!(prices[0].name, "Bitcoin");
        assert_eq!(prices[0].usd, 45000.50);
    }
}
