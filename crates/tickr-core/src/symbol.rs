//! Ticker symbols.
//!
//! A [`Symbol`] is a validated, upper-cased ticker such as `AAPL`,
//! `BRK-B`, `^GSPC` or `EURUSD=X`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Longest accepted symbol, in characters.
pub const MAX_SYMBOL_LEN: usize = 12;

/// A validated ticker symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker symbol.
    ///
    /// Surrounding whitespace is trimmed and letters are upper-cased.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "symbol is empty"));
        }
        if trimmed.chars().count() > MAX_SYMBOL_LEN {
            return Err(invalid(
                input,
                format!("longer than {MAX_SYMBOL_LEN} characters"),
            ));
        }
        if let Some(bad) = trimmed.chars().find(|c| !is_symbol_char(*c)) {
            return Err(invalid(input, format!("unexpected character '{bad}'")));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource-style URI for this symbol, e.g. `/tickers/AAPL`.
    pub fn uri(&self) -> String {
        format!("/tickers/{}", self.0)
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')
}

fn invalid(input: &str, reason: impl Into<String>) -> Error {
    Error::InvalidSymbol {
        symbol: input.to_string(),
        reason: reason.into(),
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Symbol::parse(&raw).map_err(serde::de::Error::custom)
    }
}
