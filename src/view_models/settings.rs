//! Settings view-model

use super::require_flags;
use crate::{
    container::Container,
    error::DependencyError,
    flags::{FeatureFlag, FeatureFlagProvider},
};
use std::sync::Arc;

/// Exposes the EUR display toggle and writes it through to the flag store
pub struct SettingsViewModel {
    flags: Arc<dyn FeatureFlagProvider>,
    support_eur: bool,
}

impl SettingsViewModel {
    pub fn new(container: &Container) -> Result<Self, DependencyError> {
        let flags = require_flags(container)?;
        let support_eur = flags.get_value(FeatureFlag::SupportEur);
        Ok(Self { flags, support_eur })
    }

    pub fn support_eur(&self) -> bool {
        self.support_eur
    }

    pub fn set_support_eur(&mut self, value: bool) {
        self.support_eur = value;
        self.flags.update(FeatureFlag::SupportEur, value);
        tracing::info!(support_eur = value, "EUR display setting changed");
    }

    /// Flips the EUR display setting and returns the new value
    pub fn toggle_support_eur(&mut self) -> bool {
        let value = !self.support_eur;
        self.set_support_eur(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FeatureFlagStore;
    use crate::use_case::mock::MockPriceUseCase;
    use crate::view_models::test_support::container_with;

    fn setup() -> (Arc<FeatureFlagStore>, Container) {
        let flags = Arc::new(FeatureFlagStore::new());
        let container = container_with(Arc::new(MockPriceUseCase::new()), flags.clone());
        (flags, container)
    }

    #[test]
    fn test_initial_value_comes_from_store() {
        let (flags, container) = setup();
        flags.update(FeatureFlag::SupportEur, true);

        let vm = SettingsViewModel::new(&container).unwrap();
        assert!(vm.support_eur());
    }

    #[test]
    fn test_setting_writes_through() {
        let (flags, container) = setup();
        let mut vm = SettingsViewModel::new(&container).unwrap();

        vm.set_support_eur(true);
        assert!(flags.get_value(FeatureFlag::SupportEur));

        assert!(!vm.toggle_support_eur());
        assert!(!flags.get_value(FeatureFlag::SupportEur));
    }

    #[test]
    fn test_missing_flag_provider_fails_fast() {
        assert!(matches!(
            SettingsViewModel::new(&Container::new()),
            Err(DependencyError::Missing { .. })
        ));
    }
}
