//! Yahoo Finance provider for tickr.
//!
//! [`YahooClient`] implements [`tickr_core::MarketData`] on top of Yahoo's
//! public chart and quoteSummary endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use tickr_core::{MarketData, ProviderConfig, Symbol};
//! use tickr_yahoo::YahooClient;
//!
//! # async fn demo() -> tickr_core::Result<()> {
//! let client = YahooClient::new(&ProviderConfig::default())?;
//! let quote = client.current_price(&Symbol::parse("AAPL")?).await?;
//! println!("{} {} {}", quote.symbol, quote.price, quote.currency);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
mod wire;

pub use client::{SUMMARY_MODULES, YahooClient};
