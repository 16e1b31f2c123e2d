//! Headless view-models for the price list, detail and settings screens
//!
//! Each view-model resolves what it needs from a [`crate::container::Container`]
//! at construction time and fails with a [`crate::error::DependencyError`] when
//! a required service is missing.

pub mod detail;
pub mod list;
pub mod settings;

pub use detail::DetailViewModel;
pub use list::{CryptoListViewModel, DisplayItem, LoadingState};
pub use settings::SettingsViewModel;

use crate::{
    app::{FEATURE_FLAGS, PRICE_USE_CASE},
    container::Container,
    error::DependencyError,
    flags::FeatureFlagProvider,
    use_case::MarketsPriceUseCase,
};
use std::sync::Arc;

fn require_flags(container: &Container) -> Result<Arc<dyn FeatureFlagProvider>, DependencyError> {
    container
        .resolve(FEATURE_FLAGS)
        .ok_or_else(|| DependencyError::missing(FEATURE_FLAGS.name()))
}

fn require_use_case(
    container: &Container,
) -> Result<Arc<dyn MarketsPriceUseCase>, DependencyError> {
    container
        .resolve(PRICE_USE_CASE)
        .ok_or_else(|| DependencyError::missing(PRICE_USE_CASE.name()))
}
