//! Yahoo Finance response payloads.
//!
//! Only the fields tickr reads are modelled; everything else is ignored.

use serde::Deserialize;
use tickr_core::ProfileFields;

/// Error object Yahoo embeds in chart and quoteSummary envelopes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Short code, e.g. "Not Found" or "Unauthorized".
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl ApiError {
    /// Yahoo's way of saying the symbol is unknown or delisted.
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("Not Found")
    }
}

// ----------------------------------------------------------------------------
// /v8/finance/chart
// ----------------------------------------------------------------------------

/// `GET /v8/finance/chart/{symbol}` body.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResult {
    /// Last non-missing close in the series.
    pub fn last_close(&self) -> Option<f64> {
        self.indicators
            .quote
            .first()?
            .close
            .iter()
            .rev()
            .find_map(|c| (*c).filter(|v| v.is_finite()))
    }
}

// ----------------------------------------------------------------------------
// /v10/finance/quoteSummary
// ----------------------------------------------------------------------------

/// `GET /v10/finance/quoteSummary/{symbol}` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEnvelope {
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Body Yahoo returns for rejected crumbs and other gateway errors.
#[derive(Debug, Deserialize)]
pub struct FinanceEnvelope {
    pub finance: FinanceError,
}

#[derive(Debug, Deserialize)]
pub struct FinanceError {
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// A numeric field formatted as `{ "raw": 1.0, "fmt": "1.00" }` (or `{}`).
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub raw: Option<f64>,
}

fn raw(v: Option<RawValue>) -> Option<f64> {
    v.and_then(|r| r.raw)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    #[serde(default)]
    pub asset_profile: Option<AssetProfile>,
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    pub default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    pub market_cap: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<RawValue>,
    pub dividend_yield: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatistics {
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<RawValue>,
    pub trailing_eps: Option<RawValue>,
}

impl From<SummaryResult> for ProfileFields {
    fn from(summary: SummaryResult) -> Self {
        let profile = summary.asset_profile.unwrap_or_default();
        let price = summary.price.unwrap_or_default();
        let detail = summary.summary_detail.unwrap_or_default();
        let stats = summary.default_key_statistics.unwrap_or_default();

        ProfileFields {
            name: price.short_name,
            long_name: price.long_name,
            sector: profile.sector,
            industry: profile.industry,
            website: profile.website,
            market_cap: raw(price.market_cap).or(raw(detail.market_cap)),
            forward_pe: raw(detail.forward_pe).or(raw(stats.forward_pe)),
            dividend_yield: raw(detail.dividend_yield),
            trailing_eps: raw(stats.trailing_eps),
            description: profile.long_business_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_close_skips_nulls() {
        let body = r#"{"chart":{"result":[{"meta":{"currency":"USD"},
            "indicators":{"quote":[{"close":[187.1, 189.456, null]}]}}],"error":null}}"#;
        let env: ChartEnvelope = serde_json::from_str(body).unwrap();
        let result = &env.chart.result.unwrap()[0];
        assert_eq!(result.last_close(), Some(189.456));
        assert_eq!(result.meta.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_last_close_empty() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let env: ChartEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.chart.result.unwrap()[0].last_close(), None);

        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[]}}]}}"#;
        let env: ChartEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.chart.result.unwrap()[0].last_close(), None);
    }

    #[test]
    fn test_chart_not_found() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found",
            "description":"No data found, symbol may be delisted"}}}"#;
        let env: ChartEnvelope = serde_json::from_str(body).unwrap();
        assert!(env.chart.result.is_none());
        assert!(env.chart.error.unwrap().is_not_found());
    }

    #[test]
    fn test_summary_into_fields() {
        let body = r#"{"quoteSummary":{"result":[{
            "assetProfile":{"sector":"Technology","industry":"Consumer Electronics",
                "website":"https://www.apple.com","longBusinessSummary":"Apple designs..."},
            "price":{"shortName":"Apple Inc.","longName":"Apple Inc.","marketCap":{"raw":2.9e12,"fmt":"2.9T"}},
            "summaryDetail":{"forwardPE":{"raw":28.4},"dividendYield":{}},
            "defaultKeyStatistics":{"trailingEps":{"raw":6.43},"forwardPE":{"raw":99.0}}
        }],"error":null}}"#;
        let env: SummaryEnvelope = serde_json::from_str(body).unwrap();
        let fields: ProfileFields = env.quote_summary.result.unwrap().remove(0).into();
        assert_eq!(fields.name.as_deref(), Some("Apple Inc."));
        assert_eq!(fields.sector.as_deref(), Some("Technology"));
        assert_eq!(fields.market_cap, Some(2.9e12));
        assert_eq!(fields.forward_pe, Some(28.4));
        assert_eq!(fields.dividend_yield, None);
        assert_eq!(fields.trailing_eps, Some(6.43));
        assert_eq!(fields.description.as_deref(), Some("Apple designs..."));
    }

    #[test]
    fn test_summary_missing_modules() {
        let body = r#"{"quoteSummary":{"result":[{}],"error":null}}"#;
        let env: SummaryEnvelope = serde_json::from_str(body).unwrap();
        let fields: ProfileFields = env.quote_summary.result.unwrap().remove(0).into();
        assert_eq!(fields, ProfileFields::default());
    }

    #[test]
    fn test_invalid_crumb_body() {
        let body = r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        let env: FinanceEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.finance.error.unwrap().description, "Invalid Crumb");
    }
}
