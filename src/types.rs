//! Types for the crypto price list

use crate::constants::FIXTURE_EXTENSION;
use serde::{Deserialize, Serialize};

/// Transfer capabilities attached to a listed asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Asset can be deposited
    Deposit,
    /// Asset can be withdrawn
    Withdrawal,
}

impl Tag {
    /// Get the tag as it appears in fixtures
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Deposit => "deposit",
            Tag::Withdrawal => "withdrawal",
        }
    }
}

/// Common view over the USD-only and multi-currency price entries
pub trait CryptoPriceItem {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn tags(&self) -> &[Tag];

    /// Tags as strings for display purposes
    fn tag_strings(&self) -> Vec<String> {
        self.tags().iter().map(|t| t.as_str().to_string()).collect()
    }
}

/// A listed asset priced in USD only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsdPrice {
    pub id: i64,
    pub name: String,
    pub usd: f64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl CryptoPriceItem for UsdPrice {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// USD and EUR quote for one asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub usd: f64,
    pub eur: f64,
}

/// A listed asset priced in every supported currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllPrice {
    pub id: i64,
    pub name: String,
    pub price: PriceRecord,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl AllPrice {
    pub fn usd(&self) -> f64 {
        self.price.usd
    }

    pub fn eur(&self) -> f64 {
        self.price.eur
    }
}

impl CryptoPriceItem for AllPrice {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// `{ "data": [...] }` wrapper every fixture uses
#[derive(Debug, Clone, Deserialize)]
pub struct PriceEnvelope<T> {
    pub data: Vec<T>,
}

/// Price resources a data source can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSourceResource {
    /// USD price list
    UsdPrices,
    /// USD + EUR price list
    AllPrices,
}

impl DataSourceResource {
    /// Identifier used for the fixture file stem
    pub fn name(&self) -> &'static str {
        match self {
            DataSourceResource::UsdPrices => "usdPrices",
            DataSourceResource::AllPrices => "allPrices",
        }
    }

    /// Human-readable description of the resource
    pub fn description(&self) -> &'static str {
        match self {
            DataSourceResource::UsdPrices => "USD Price Data",
            DataSourceResource::AllPrices => "All Price Data (USD + EUR)",
        }
    }

    /// Full file name with extension
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name(), FIXTURE_EXTENSION)
    }
}

impl std::fmt::Display for DataSourceResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
