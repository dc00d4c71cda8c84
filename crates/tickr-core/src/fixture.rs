//! Offline market data from a JSON fixture file.
//!
//! Fixture files look like:
//!
//! ```json
//! {
//!   "quotes":   { "AAPL": { "price": 189.984, "currency": "USD" } },
//!   "profiles": { "AAPL": { "name": "Apple Inc.", "sector": "Technology" } }
//! }
//! ```
//!
//! Symbols not present in the file report [`Error::NoData`].

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::market::{CompanyProfile, MarketData, PriceQuote, ProfileFields};
use crate::symbol::Symbol;

/// A fixture quote entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixtureQuote {
    /// Closing price (rounded on read).
    pub price: f64,
    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    quotes: HashMap<Symbol, FixtureQuote>,
    #[serde(default)]
    profiles: HashMap<Symbol, ProfileFields>,
}

/// In-memory [`MarketData`] provider.
#[derive(Clone, Debug, Default)]
pub struct FixtureMarketData {
    quotes: HashMap<Symbol, FixtureQuote>,
    profiles: HashMap<Symbol, ProfileFields>,
}

impl FixtureMarketData {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let provider = Self::from_json(&content)?;
        log::debug!(
            "Loaded {} quotes and {} profiles from {}",
            provider.quotes.len(),
            provider.profiles.len(),
            path.display()
        );
        Ok(provider)
    }

    /// Parse fixtures from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: FixtureFile = serde_json::from_str(json)?;
        Ok(Self {
            quotes: file.quotes,
            profiles: file.profiles,
        })
    }

    /// Add or replace a quote.
    pub fn with_quote(mut self, symbol: Symbol, price: f64, currency: Option<&str>) -> Self {
        self.quotes.insert(
            symbol,
            FixtureQuote {
                price,
                currency: currency.map(str::to_string),
            },
        );
        self
    }

    /// Add or replace a profile.
    pub fn with_profile(mut self, symbol: Symbol, fields: ProfileFields) -> Self {
        self.profiles.insert(symbol, fields);
        self
    }
}

#[async_trait]
impl MarketData for FixtureMarketData {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn current_price(&self, symbol: &Symbol) -> Result<PriceQuote> {
        let quote = self
            .quotes
            .get(symbol)
            .ok_or_else(|| Error::no_data(symbol.as_str()))?;
        Ok(PriceQuote::now(
            symbol.clone(),
            quote.price,
            quote.currency.clone(),
        ))
    }

    async fn company_profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        let fields = self
            .profiles
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::no_data(symbol.as_str()))?;
        Ok(CompanyProfile::from_fields(symbol.clone(), fields))
    }
}
