//! # Crypto List SDK
//!
//! Headless core of a crypto price list client: prices come from bundled JSON
//! fixtures, a feature flag switches EUR display on and off, and a small
//! dependency container wires the pieces together.
//!
//! ## Usage
//!
//! The container is built once at the entry point and passed to whatever
//! needs services from it:
//!
//! ```no_run
//! use crypto_list_sdk::{app, AppConfig, CryptoListViewModel, SettingsViewModel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let container = app::build_container(&AppConfig::from_env()?);
//!
//! let mut list = CryptoListViewModel::new(&container)?;
//! list.refresh().await;
//! for item in list.items() {
//!     println!("{}: {}", item.name, item.usd_price);
//! }
//!
//! // Turning EUR display on reloads the list with EUR prices
//! SettingsViewModel::new(&container)?.set_support_eur(true);
//! list.apply_flag_changes().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Container ── resolves ──► view-models
//!     │                        │
//!     ├─ MarketsPriceUseCase ◄─┤ (fetch on load / on flag change)
//!     │     └─ MarketsRepository
//!     │           └─ DataSourceProvider (local fixtures)
//!     └─ FeatureFlagProvider ◄─┘ (observe SupportEur)
//! ```

pub mod app;
pub mod config;
pub mod constants;
pub mod container;
pub mod error;
pub mod flags;
pub mod formatter;
pub mod provider;
pub mod providers;
pub mod repository;
pub mod types;
pub mod use_case;
pub mod view_models;

// Re-export commonly used types
pub use config::AppConfig;
pub use container::{Container, ServiceKey};
pub use error::{ConfigError, DataSourceError, DependencyError, PriceError};
pub use flags::{FeatureFlag, FeatureFlagProvider, FeatureFlagStore, FlagStream};
pub use types::{AllPrice, DataSourceResource, PriceRecord, Tag, UsdPrice};
pub use use_case::MarketsPriceUseCase;
pub use view_models::{CryptoListViewModel, DetailViewModel, DisplayItem, SettingsViewModel};
