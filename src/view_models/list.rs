//! Price list view-model

use super::{require_flags, require_use_case};
use crate::{
    constants::SYMBOL_LENGTH,
    container::Container,
    error::{DependencyError, PriceError},
    flags::{latest_ready, FeatureFlag, FlagStream},
    formatter::{format_eur, format_usd},
    types::{AllPrice, CryptoPriceItem, UsdPrice},
    use_case::MarketsPriceUseCase,
};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::sync::Arc;

/// One row of the price list, already formatted for display
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub usd_price: String,
    pub eur_price: Option<String>,
    pub tags: Vec<String>,
    pub show_eur: bool,
}

impl PartialEq for DisplayItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DisplayItem {}

impl DisplayItem {
    /// Builds a USD-only row
    pub fn from_usd(price: &UsdPrice) -> Self {
        Self::build(price, price.usd, None)
    }

    /// Builds a row carrying both USD and EUR prices
    pub fn from_all(price: &AllPrice) -> Self {
        Self::build(price, price.usd(), Some(price.eur()))
    }

    fn build(item: &impl CryptoPriceItem, usd: f64, eur: Option<f64>) -> Self {
        let mut tags = item.tag_strings();
        tags.sort_by_key(|t| t.to_lowercase());

        Self {
            id: item.id(),
            name: item.name().to_string(),
            symbol: symbol_for(item.name()),
            usd_price: format_usd(usd),
            eur_price: eur.map(format_eur),
            tags,
            show_eur: eur.is_some(),
        }
    }

    /// Case-insensitive match on name, symbol or any tag
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.symbol.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

fn symbol_for(name: &str) -> String {
    name.chars().take(SYMBOL_LENGTH).collect::<String>().to_uppercase()
}

/// Load status of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingState {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Items reflect the last successful fetch
    Loaded,
    /// The last fetch failed with this message
    Failed(String),
}

/// Price list that follows the EUR display flag
///
/// USD prices are listed while the flag is off; switching it on reloads the
/// list with USD and EUR prices.
pub struct CryptoListViewModel {
    use_case: Arc<dyn MarketsPriceUseCase>,
    flag_updates: FlagStream,
    show_eur: bool,
    state: LoadingState,
    all_items: Vec<DisplayItem>,
    items: Vec<DisplayItem>,
    search_text: String,
    last_updated: Option<DateTime<Utc>>,
}

impl CryptoListViewModel {
    /// Resolves the price use case and flag provider from `container`
    pub fn new(container: &Container) -> Result<Self, DependencyError> {
        let use_case = require_use_case(container)?;
        let flags = require_flags(container)?;

        let mut flag_updates = flags.observe_flag_value(FeatureFlag::SupportEur);
        let show_eur = latest_ready(&mut flag_updates)
            .unwrap_or_else(|| flags.get_value(FeatureFlag::SupportEur));

        Ok(Self {
            use_case,
            flag_updates,
            show_eur,
            state: LoadingState::Idle,
            all_items: Vec::new(),
            items: Vec::new(),
            search_text: String::new(),
            last_updated: None,
        })
    }

    /// Items matching the current search text
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadingState::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LoadingState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn show_eur_price(&self) -> bool {
        self.show_eur
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Time of the last successful load
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Reloads prices for the current EUR setting
    ///
    /// On failure the previous items are kept and the state carries the
    /// error message.
    pub async fn refresh(&mut self) {
        self.state = LoadingState::Loading;

        match self.fetch_items().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), show_eur = self.show_eur, "Loaded price list");
                self.all_items = items;
                self.apply_filter();
                self.last_updated = Some(Utc::now());
                self.state = LoadingState::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, show_eur = self.show_eur, "Failed to load price list");
                self.state = LoadingState::Failed(e.to_string());
            }
        }
    }

    async fn fetch_items(&self) -> Result<Vec<DisplayItem>, PriceError> {
        if self.show_eur {
            let prices = self.use_case.fetch_all_prices().await?;
            Ok(prices.iter().map(DisplayItem::from_all).collect())
        } else {
            let prices = self.use_case.fetch_usd_prices().await?;
            Ok(prices.iter().map(DisplayItem::from_usd).collect())
        }
    }

    /// Filters the loaded items; an empty text shows everything
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let needle = self.search_text.trim().to_lowercase();
        self.items = if needle.is_empty() {
            self.all_items.clone()
        } else {
            self.all_items
                .iter()
                .filter(|item| item.matches(&needle))
                .cloned()
                .collect()
        };
    }

    /// Applies flag changes that are already pending, without waiting
    ///
    /// # Returns
    /// True if the EUR setting changed and the list was reloaded
    pub async fn apply_flag_changes(&mut self) -> bool {
        match latest_ready(&mut self.flag_updates) {
            Some(show_eur) if show_eur != self.show_eur => {
                self.show_eur = show_eur;
                self.refresh().await;
                true
            }
            _ => false,
        }
    }

    /// Waits for the next EUR setting change and reloads the list
    ///
    /// # Returns
    /// False once the flag store has gone away
    pub async fn wait_for_flag_change(&mut self) -> bool {
        while let Some(show_eur) = self.flag_updates.next().await {
            if show_eur != self.show_eur {
                self.show_eur = show_eur;
                self.refresh().await;
                return true;
            }
        }
        false
    }
}
