//! tickr core: shared types, traits, errors, and configuration.
//!
//! This crate has no internal tickr dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`symbol`]: Validated ticker symbols
//! - [`catalog`]: Popular tickers grouped by sector
//! - [`market`]: Quote/profile types and the [`MarketData`] trait
//! - [`fixture`]: Offline [`MarketData`] backed by a JSON file
//! - [`config`]: TOML configuration and the [`ConfigManager`] trait

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixture;
pub mod market;
pub mod symbol;

// Re-export key types at crate root for convenience
pub use catalog::{Catalog, Sector, TickerListing, TickerRef};
pub use config::{ConfigManager, ProviderConfig, ProviderKind, TickrConfig};
pub use error::{Error, Result};
pub use fixture::FixtureMarketData;
pub use market::{CompanyProfile, MarketData, PriceQuote, ProfileFields};
pub use symbol::Symbol;
