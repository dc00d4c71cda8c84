//! Popular ticker catalog.
//!
//! A fixed table of well-known symbols grouped by sector. Agents use it to
//! discover valid tickers before asking for prices or profiles.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::symbol::Symbol;

// ============================================================================
// Sector
// ============================================================================

/// Market sector used to group popular tickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Technology.
    Technology,
    /// Consumer goods and retail.
    Consumer,
    /// Banks, payments, insurance.
    Financial,
    /// Pharma and health insurers.
    Healthcare,
    /// Oil, gas and services.
    Energy,
}

impl Sector {
    /// All sectors, in catalog order.
    pub const ALL: [Sector; 5] = [
        Sector::Technology,
        Sector::Consumer,
        Sector::Financial,
        Sector::Healthcare,
        Sector::Energy,
    ];

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Consumer => "Consumer",
            Sector::Financial => "Financial",
            Sector::Healthcare => "Healthcare",
            Sector::Energy => "Energy",
        }
    }

    /// Canonical names of every sector, in catalog order.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.name().to_string()).collect()
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sector {
    type Err = Error;

    /// Case-insensitive match against the canonical names.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sector| sector.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownSector {
                sector: s.to_string(),
                available: Self::names(),
            })
    }
}

// ============================================================================
// Listing types
// ============================================================================

/// A ticker entry in a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRef {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Resource-style URI (`/tickers/{symbol}`).
    pub uri: String,
}

impl From<&Symbol> for TickerRef {
    fn from(symbol: &Symbol) -> Self {
        Self {
            uri: symbol.uri(),
            symbol: symbol.clone(),
        }
    }
}

/// Result of [`Catalog::list`].
#[derive(Clone, Debug, PartialEq)]
pub enum TickerListing {
    /// Tickers for one sector.
    Sector {
        /// The matched sector.
        sector: Sector,
        /// Its tickers.
        tickers: Vec<TickerRef>,
    },
    /// Every sector, in catalog order.
    All(Vec<(Sector, Vec<TickerRef>)>),
}

impl TickerListing {
    /// Total number of tickers in this listing.
    pub fn len(&self) -> usize {
        match self {
            TickerListing::Sector { tickers, .. } => tickers.len(),
            TickerListing::All(groups) => groups.iter().map(|(_, t)| t.len()).sum(),
        }
    }

    /// Returns `true` if the listing holds no tickers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for TickerListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TickerListing::Sector { sector, tickers } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("sector", sector.name())?;
                map.serialize_entry("tickers", tickers)?;
                map.end()
            }
            TickerListing::All(groups) => {
                let mut map = serializer.serialize_map(Some(groups.len()))?;
                for (sector, tickers) in groups {
                    map.serialize_entry(sector.name(), tickers)?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

const POPULAR: [(Sector, [&str; 5]); 5] = [
    (Sector::Technology, ["AAPL", "MSFT", "GOOGL", "META", "NVDA"]),
    (Sector::Consumer, ["AMZN", "WMT", "COST", "MCD", "NKE"]),
    (Sector::Financial, ["JPM", "BAC", "V", "MA", "BRK-B"]),
    (Sector::Healthcare, ["JNJ", "PFE", "UNH", "ABBV", "MRK"]),
    (Sector::Energy, ["XOM", "CVX", "COP", "SLB", "EOG"]),
];

/// Sector → ticker table.
#[derive(Clone, Debug)]
pub struct Catalog {
    groups: Vec<(Sector, Vec<Symbol>)>,
}

impl Catalog {
    /// The built-in catalog of popular tickers.
    pub fn popular() -> Self {
        let groups = POPULAR
            .iter()
            .map(|(sector, symbols)| {
                let symbols = symbols
                    .iter()
                    .filter_map(|s| Symbol::parse(s).ok())
                    .collect();
                (*sector, symbols)
            })
            .collect();
        Self { groups }
    }

    /// Symbols for a sector.
    pub fn symbols(&self, sector: Sector) -> &[Symbol] {
        self.groups
            .iter()
            .find(|(s, _)| *s == sector)
            .map(|(_, symbols)| symbols.as_slice())
            .unwrap_or(&[])
    }

    /// List tickers, optionally restricted to one sector.
    ///
    /// A blank filter means "no filter". An unrecognized sector yields
    /// [`Error::UnknownSector`] listing the valid names.
    pub fn list(&self, sector: Option<&str>) -> Result<TickerListing> {
        match sector.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => {
                let sector: Sector = name.parse()?;
                let tickers = self.symbols(sector).iter().map(TickerRef::from).collect();
                Ok(TickerListing::Sector { sector, tickers })
            }
            None => Ok(TickerListing::All(
                self.groups
                    .iter()
                    .map(|(sector, symbols)| {
                        (*sector, symbols.iter().map(TickerRef::from).collect())
                    })
                    .collect(),
            )),
        }
    }

    /// Sector a symbol belongs to, if it is in the catalog.
    pub fn sector_of(&self, symbol: &Symbol) -> Option<Sector> {
        self.groups
            .iter()
            .find(|(_, symbols)| symbols.contains(symbol))
            .map(|(sector, _)| *sector)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::popular()
    }
}
