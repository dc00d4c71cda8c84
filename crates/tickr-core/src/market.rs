//! Market data types and the provider trait.
//!
//! [`MarketData`] is the seam between the MCP tools and wherever quotes
//! actually come from (Yahoo Finance over HTTP, a fixture file, a test
//! double).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::symbol::Symbol;

/// Placeholder for missing text fields in a company profile.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a missing business description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Currency reported when the provider does not say.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Round a price to cents.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// PriceQuote
// ============================================================================

/// Latest closing price of a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Last close, rounded to two decimals.
    pub price: f64,
    /// ISO currency code.
    pub currency: String,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
}

impl PriceQuote {
    /// Build a quote stamped with the current time.
    ///
    /// The price is rounded to cents; a missing currency falls back to USD.
    pub fn now(symbol: Symbol, close: f64, currency: Option<String>) -> Self {
        Self {
            symbol,
            price: round_price(close),
            currency: currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// CompanyProfile
// ============================================================================

/// Company fields as a provider reports them; any may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    /// Short display name.
    pub name: Option<String>,
    /// Full legal name.
    pub long_name: Option<String>,
    /// Sector.
    pub sector: Option<String>,
    /// Industry.
    pub industry: Option<String>,
    /// Company website.
    pub website: Option<String>,
    /// Market capitalisation.
    pub market_cap: Option<f64>,
    /// Forward price/earnings.
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    /// Dividend yield.
    pub dividend_yield: Option<f64>,
    /// Trailing earnings per share.
    pub trailing_eps: Option<f64>,
    /// Business summary.
    pub description: Option<String>,
}

/// Company profile returned to agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Short display name.
    pub name: String,
    /// Full legal name.
    #[serde(rename = "longName")]
    pub long_name: String,
    /// Sector.
    pub sector: String,
    /// Industry.
    pub industry: String,
    /// Company website.
    pub website: String,
    /// Market capitalisation.
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
    /// Forward price/earnings.
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    /// Dividend yield.
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<f64>,
    /// Trailing earnings per share.
    #[serde(rename = "trailingEps")]
    pub trailing_eps: Option<f64>,
    /// Business summary.
    pub description: String,
}

impl CompanyProfile {
    /// Fill missing text fields with placeholders.
    pub fn from_fields(symbol: Symbol, fields: ProfileFields) -> Self {
        let text = |v: Option<String>| {
            v.filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };
        Self {
            symbol,
            name: text(fields.name),
            long_name: text(fields.long_name),
            sector: text(fields.sector),
            industry: text(fields.industry),
            website: text(fields.website),
            market_cap: fields.market_cap,
            forward_pe: fields.forward_pe,
            dividend_yield: fields.dividend_yield,
            trailing_eps: fields.trailing_eps,
            description: fields
                .description
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

// ============================================================================
// MarketData
// ============================================================================

/// Source of quotes and company profiles.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Short provider name (e.g. "yahoo", "fixture").
    fn name(&self) -> &str;

    /// Latest closing price.
    ///
    /// Returns [`Error::NoData`](crate::Error::NoData) when the provider
    /// has no recent history for the symbol.
    async fn current_price(&self, symbol: &Symbol) -> Result<PriceQuote>;

    /// Company profile.
    async fn company_profile(&self, symbol: &Symbol) -> Result<CompanyProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(189.98765), 189.99);
        assert_eq!(round_price(0.004), 0.0);
        assert_eq!(round_price(42.0), 42.0);
    }

    #[test]
    fn test_quote_currency_fallback() {
        let q = PriceQuote::now(sym("AAPL"), 190.123, None);
        assert_eq!(q.currency, "USD");
        assert_eq!(q.price, 190.12);

        let q = PriceQuote::now(sym("SAP.DE"), 120.0, Some("EUR".to_string()));
        assert_eq!(q.currency, "EUR");

        let q = PriceQuote::now(sym("AAPL"), 1.0, Some(" ".to_string()));
        assert_eq!(q.currency, "USD");
    }

    #[test]
    fn test_quote_serializes_timestamp_as_string() {
        let q = PriceQuote::now(sym("AAPL"), 1.0, None);
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["symbol"], "AAPL");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_profile_defaults() {
        let profile = CompanyProfile::from_fields(sym("XYZ"), ProfileFields::default());
        assert_eq!(profile.name, UNKNOWN);
        assert_eq!(profile.long_name, UNKNOWN);
        assert_eq!(profile.website, UNKNOWN);
        assert_eq!(profile.description, NO_DESCRIPTION);
        assert!(profile.market_cap.is_none());
    }

    #[test]
    fn test_profile_wire_names() {
        let fields = ProfileFields {
            name: Some("Apple Inc.".to_string()),
            forward_pe: Some(28.5),
            market_cap: Some(3.0e12),
            ..Default::default()
        };
        let profile = CompanyProfile::from_fields(sym("AAPL"), fields);
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["name"], "Apple Inc.");
        assert_eq!(value["longName"], "Unknown");
        assert_eq!(value["forwardPE"], 28.5);
        assert_eq!(value["marketCap"], 3.0e12);
        assert!(value["dividendYield"].is_null());
        assert!(value.get("long_name").is_none());
    }

    #[test]
    fn test_profile_fields_deserialize_camel_case() {
        let fields: ProfileFields = serde_json::from_str(
            r#"{"longName": "Microsoft Corporation", "forwardPE": 30.1, "trailingEps": 11.8}"#,
        )
        .unwrap();
        assert_eq!(fields.long_name.as_deref(), Some("Microsoft Corporation"));
        assert_eq!(fields.forward_pe, Some(30.1));
        assert_eq!(fields.trailing_eps, Some(11.8));
    }
}
