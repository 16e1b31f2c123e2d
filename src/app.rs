//! Composition root
//!
//! Service identifiers shared by the whole client and the default wiring of
//! the fixture-backed price pipeline.

use crate::{
    config::AppConfig,
    container::{Container, ServiceKey},
    flags::{FeatureFlagProvider, FeatureFlagStore},
    provider::DataSourceProvider,
    providers::LocalDataSourceProvider,
    repository::{FixtureMarketsRepository, MarketsRepository},
    use_case::{MarketsPriceUseCase, PriceUseCase},
};
use std::sync::Arc;

/// Raw price data source
pub const DATA_SOURCE: ServiceKey<Arc<dyn DataSourceProvider>> =
    ServiceKey::new("DataSourceProvider");

/// Typed market data access
pub const MARKETS_REPOSITORY: ServiceKey<Arc<dyn MarketsRepository>> =
    ServiceKey::new("MarketsRepository");

/// Price use case consumed by the list view-model
pub const PRICE_USE_CASE: ServiceKey<Arc<dyn MarketsPriceUseCase>> =
    ServiceKey::new("MarketsPriceUseCase");

/// Feature flag store shared by every view-model
pub const FEATURE_FLAGS: ServiceKey<Arc<dyn FeatureFlagProvider>> =
    ServiceKey::new("FeatureFlagProvider");

/// Registers the default services for `config`
///
/// Nothing is constructed here; each service is built on first resolution.
pub fn register_defaults(container: &Container, config: &AppConfig) {
    let source_config = config.clone();
    container.register(DATA_SOURCE, move |_| {
        Arc::new(LocalDataSourceProvider::from_config(&source_config)) as Arc<dyn DataSourceProvider>
    });

    container.register(MARKETS_REPOSITORY, |c| {
        let source = c
            .resolve(DATA_SOURCE)
            .expect("DataSourceProvider must be registered before MarketsRepository is resolved");
        Arc::new(FixtureMarketsRepository::new(source)) as Arc<dyn MarketsRepository>
    });

    container.register(PRICE_USE_CASE, |c| {
        let repository = c
            .resolve(MARKETS_REPOSITORY)
            .expect("MarketsRepository must be registered before MarketsPriceUseCase is resolved");
        Arc::new(PriceUseCase::new(repository)) as Arc<dyn MarketsPriceUseCase>
    });

    let initial_flags = config.initial_flags();
    container.register(FEATURE_FLAGS, move |_| {
        Arc::new(FeatureFlagStore::with_values(initial_flags.clone())) as Arc<dyn FeatureFlagProvider>
    });

    tracing::info!(
        services = container.len(),
        fixtures = ?config.fixtures_dir,
        network_delay_ms = config.network_delay.as_millis() as u64,
        "Registered default services"
    );
}

/// Creates a container with the default services registered
pub fn build_container(config: &AppConfig) -> Container {
    let container = Container::new();
    register_defaults(&container, config);
    container
}
