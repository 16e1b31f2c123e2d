//! Detail view-model for a single price row

use super::{list::DisplayItem, require_flags};
use crate::{
    container::Container,
    error::DependencyError,
    flags::{latest_ready, FeatureFlag, FlagStream},
};
use futures::StreamExt;

pub struct DetailViewModel {
    item: DisplayItem,
    flag_updates: FlagStream,
    show_eur: bool,
    formatted_prices: String,
}

impl DetailViewModel {
    /// Resolves the flag provider from `container` and renders `item`
    pub fn new(item: DisplayItem, container: &Container) -> Result<Self, DependencyError> {
        let flags = require_flags(container)?;
        let mut flag_updates = flags.observe_flag_value(FeatureFlag::SupportEur);
        let show_eur = latest_ready(&mut flag_updates)
            .unwrap_or_else(|| flags.get_value(FeatureFlag::SupportEur));

        let mut vm = Self {
            item,
            flag_updates,
            show_eur,
            formatted_prices: String::new(),
        };
        vm.update_formatted_prices();
        Ok(vm)
    }

    pub fn token_name(&self) -> &str {
        &self.item.name
    }

    pub fn show_eur_price(&self) -> bool {
        self.show_eur
    }

    /// `USD: ...`, plus an `EUR: ...` line when EUR display is on and known
    pub fn formatted_prices(&self) -> &str {
        &self.formatted_prices
    }

    /// Applies pending flag changes; returns true if the text changed
    pub fn apply_flag_changes(&mut self) -> bool {
        match latest_ready(&mut self.flag_updates) {
            Some(show_eur) if show_eur != self.show_eur => self.set_show_eur(show_eur),
            _ => false,
        }
    }

    /// Waits for the next flag change; false once the store is gone
    pub async fn wait_for_flag_change(&mut self) -> bool {
        while let Some(show_eur) = self.flag_updates.next().await {
            if show_eur != self.show_eur {
                self.set_show_eur(show_eur);
                return true;
            }
        }
        false
    }

    fn set_show_eur(&mut self, show_eur: bool) -> bool {
        self.show_eur = show_eur;
        let previous = std::mem::take(&mut self.formatted_prices);
        self.update_formatted_prices();
        previous != self.formatted_prices
    }

    fn update_formatted_prices(&mut self) {
        self.formatted_prices = match (&self.item.eur_price, self.show_eur) {
            (Some(eur), true) => format!("USD: {}\nEUR: {}", self.item.usd_price, eur),
            _ => format!("USD: {}", self.item.usd_price),
        };
    }
}
