//! Yahoo Finance HTTP client.
//!
//! Prices come from the public chart endpoint. Company profiles come from
//! `quoteSummary`, which needs a session cookie plus a "crumb" token; the
//! crumb is fetched lazily, cached, and refreshed once when Yahoo rejects it.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use tickr_core::{
    CompanyProfile, Error, MarketData, PriceQuote, ProviderConfig, Result, Symbol,
};

use crate::wire::{ApiError, ChartEnvelope, FinanceEnvelope, SummaryEnvelope};

/// quoteSummary modules needed to build a [`CompanyProfile`].
pub const SUMMARY_MODULES: &str = "assetProfile,price,summaryDetail,defaultKeyStatistics";

/// [`MarketData`] backed by Yahoo Finance.
pub struct YahooClient {
    http: reqwest::Client,
    base_url: String,
    cookie_url: String,
    backoff: ExponentialBuilder,
    crumb: Mutex<Option<String>>,
}

impl YahooClient {
    /// Build a client from provider settings.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::provider_with_source("failed to build HTTP client", e))?;

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(config.retry_delay_ms))
            .with_max_times(config.max_retries)
            .with_jitter();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookie_url: config.cookie_url.clone(),
            backoff,
            crumb: Mutex::new(None),
        })
    }

    // ------------------------------------------------------------------------
    // Prices
    // ------------------------------------------------------------------------

    async fn fetch_price(&self, symbol: &Symbol) -> Result<PriceQuote> {
        let url = self.url(
            &format!("/v8/finance/chart/{symbol}"),
            &[("range", "1d"), ("interval", "1d")],
        )?;
        let (status, envelope) = self.get_json::<ChartEnvelope>(url.clone()).await?;

        // Unknown symbols arrive as 404s; every other failing status stays an
        // HTTP error so 429 and 5xx remain retryable.
        if envelope.chart.error.as_ref().is_some_and(ApiError::is_not_found) {
            return Err(Error::no_data(symbol.as_str()));
        }
        if !status.is_success() {
            return Err(http_error(status, &url));
        }
        if let Some(err) = envelope.chart.error {
            return Err(Error::provider(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        let result = envelope
            .chart
            .result
            .and_then(|mut r| (!r.is_empty()).then(|| r.remove(0)))
            .ok_or_else(|| Error::no_data(symbol.as_str()))?;
        let close = result
            .last_close()
            .ok_or_else(|| Error::no_data(symbol.as_str()))?;

        Ok(PriceQuote::now(symbol.clone(), close, result.meta.currency))
    }

    // ------------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------------

    async fn fetch_profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        match self.fetch_profile_with_crumb(symbol).await {
            Err(Error::Http { status: 401, .. }) => {
                log::debug!("Crumb rejected for {symbol}, refreshing");
                self.crumb.lock().await.take();
                self.fetch_profile_with_crumb(symbol).await
            }
            other => other,
        }
    }

    async fn fetch_profile_with_crumb(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        let crumb = self.crumb().await?;
        let url = self.url(
            &format!("/v10/finance/quoteSummary/{symbol}"),
            &[("modules", SUMMARY_MODULES), ("crumb", crumb.as_str())],
        )?;

        let response = self.send(url.clone()).await?;
        let status = response.status();
        let body = read_body(response).await?;

        if status == StatusCode::UNAUTHORIZED {
            if let Ok(env) = serde_json::from_slice::<FinanceEnvelope>(&body)
                && let Some(err) = env.finance.error
            {
                log::debug!("quoteSummary unauthorized: {}", err.description);
            }
            return Err(http_error(status, &url));
        }

        let envelope: SummaryEnvelope = match serde_json::from_slice(&body) {
            Ok(env) => env,
            Err(_) if !status.is_success() => return Err(http_error(status, &url)),
            Err(e) => return Err(e.into()),
        };

        if envelope
            .quote_summary
            .error
            .as_ref()
            .is_some_and(ApiError::is_not_found)
        {
            return Err(Error::no_data(symbol.as_str()));
        }
        if !status.is_success() {
            return Err(http_error(status, &url));
        }
        if let Some(err) = envelope.quote_summary.error {
            return Err(Error::provider(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        let summary = envelope
            .quote_summary
            .result
            .and_then(|mut r| (!r.is_empty()).then(|| r.remove(0)))
            .ok_or_else(|| Error::no_data(symbol.as_str()))?;

        Ok(CompanyProfile::from_fields(symbol.clone(), summary.into()))
    }

    /// Cached crumb, fetching one if needed.
    ///
    /// The lock is held across the fetch so concurrent callers share it.
    async fn crumb(&self) -> Result<String> {
        let mut guard = self.crumb.lock().await;
        if let Some(crumb) = guard.as_ref() {
            return Ok(crumb.clone());
        }

        // Only the Set-Cookie header matters here; the status is usually 404.
        if let Err(e) = self.http.get(&self.cookie_url).send().await {
            log::debug!("Cookie request to {} failed: {e}", self.cookie_url);
        }

        let url = self.url("/v1/test/getcrumb", &[])?;
        let response = self.send(url.clone()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status, &url));
        }
        let body = read_body(response).await?;
        let crumb = String::from_utf8_lossy(&body).trim().to_string();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
            return Err(Error::provider("Yahoo returned an unusable crumb"));
        }

        log::debug!("Obtained Yahoo crumb");
        *guard = Some(crumb.clone());
        Ok(crumb)
    }

    // ------------------------------------------------------------------------
    // HTTP helpers
    // ------------------------------------------------------------------------

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{path}", self.base_url);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| Error::config(format!("invalid provider URL {raw}: {e}")))
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response> {
        let endpoint = format!("{}{}", self.base_url, url.path());
        log::debug!("GET {endpoint}");
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::provider_with_source(format!("request to {endpoint} failed"), e))
    }

    /// GET and decode JSON, returning the status alongside.
    ///
    /// Bodies of error statuses are decoded too, since Yahoo reports unknown
    /// symbols as a 404 with a JSON envelope.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<(StatusCode, T)> {
        let response = self.send(url.clone()).await?;
        let status = response.status();
        let body = read_body(response).await?;
        match serde_json::from_slice(&body) {
            Ok(value) => Ok((status, value)),
            Err(_) if !status.is_success() => Err(http_error(status, &url)),
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
    let url = response.url().to_string();
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| Error::provider_with_source(format!("reading body from {url} failed"), e))
}

fn http_error(status: StatusCode, url: &Url) -> Error {
    let mut url = url.clone();
    // Keep crumbs out of error messages and logs.
    url.set_query(None);
    Error::Http {
        status: status.as_u16(),
        url: url.to_string(),
    }
}

#[async_trait]
impl MarketData for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn current_price(&self, symbol: &Symbol) -> Result<PriceQuote> {
        (|| async move { self.fetch_price(symbol).await })
            .retry(self.backoff.clone())
            .when(Error::is_retryable)
            .notify(|err: &Error, dur: Duration| {
                log::warn!("Price lookup for {symbol} failed ({err}), retrying in {dur:?}");
            })
            .await
    }

    async fn company_profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        (|| async move { self.fetch_profile(symbol).await })
            .retry(self.backoff.clone())
            .when(Error::is_retryable)
            .notify(|err: &Error, dur: Duration| {
                log::warn!("Profile lookup for {symbol} failed ({err}), retrying in {dur:?}");
            })
            .await
    }
}
