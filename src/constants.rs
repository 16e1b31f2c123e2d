//! Constants for the crypto list client
//!
//! Compile-time defaults live here. The few knobs that can change at runtime
//! are read from the environment by [`crate::config::AppConfig`].

/// Simulated network delay for local fixtures (in milliseconds)
pub const DEFAULT_NETWORK_DELAY_MS: u64 = 1000;

/// Bundled USD price fixture
pub const USD_PRICES_FIXTURE: &str = include_str!("../fixtures/usdPrices.json");

/// Bundled USD + EUR price fixture
pub const ALL_PRICES_FIXTURE: &str = include_str!("../fixtures/allPrices.json");

/// Extension used by every fixture resource
pub const FIXTURE_EXTENSION: &str = "json";

/// Environment variable pointing at a directory of fixture files
pub const ENV_FIXTURES_DIR: &str = "CRYPTO_LIST_FIXTURES_DIR";

/// Environment variable overriding the simulated network delay
pub const ENV_NETWORK_DELAY_MS: &str = "CRYPTO_LIST_NETWORK_DELAY_MS";

/// Environment variable seeding the EUR display flag
pub const ENV_SUPPORT_EUR: &str = "CRYPTO_LIST_SUPPORT_EUR";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,crypto_list_sdk=debug";

/// Number of characters of the name used as a display symbol
pub const SYMBOL_LENGTH: usize = 3;
