use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can resolve the current spot price of a symbol on a chain.
///
/// The polling engine and the `price` command only depend on this trait,
/// so tests swap in a scripted source instead of the live API.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current USD price. Fails with `PriceUnavailable` on any transport
    /// error or unexpected response shape; callers skip and retry on the
    /// next cycle, never here.
    async fn price(&self, symbol: &str, chain: &str) -> Result<f64>;
}

/// Client for the Moralis token price API
#[derive(Clone)]
pub struct MoralisClient {
    client: Client,
    /// URL template; `{}` marks the symbol position. The endpoint puts the
    /// symbol mid-path: `.../erc20/{}/price`. A template without a
    /// placeholder gets the symbol appended as a path segment.
    url_template: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
    usd_price: serde_json::Value,
}

impl PriceResponse {
    /// Moralis returns `usdPrice` sometimes as a number, sometimes as a
    /// string; anything else is a malformed response.
    fn usd_price(&self) -> Option<f64> {
        match &self.usd_price {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl MoralisClient {
    pub fn new(url_template: String, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BotError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url_template,
            api_key,
        })
    }

    fn price_url(&self, symbol: &str) -> String {
        if self.url_template.contains("{}") {
            self.url_template.replace("{}", symbol)
        } else {
            format!("{}/{}", self.url_template.trim_end_matches('/'), symbol)
        }
    }

    fn unavailable(symbol: &str, reason: impl ToString) -> BotError {
        BotError::PriceUnavailable {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl PriceSource for MoralisClient {
    /// Endpoint: GET {url_template with symbol substituted}?chain={chain}
    async fn price(&self, symbol: &str, chain: &str) -> Result<f64> {
        let url = self.price_url(symbol);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .query(&[("chain", chain)])
            .send()
            .await
            .map_err(|e| Self::unavailable(symbol, e))?;

        if !response.status().is_success() {
            return Err(Self::unavailable(
                symbol,
                format!("API status {}", response.status()),
            ));
        }

        let body: PriceResponse = response
            .json()
            .await
            .map_err(|e| Self::unavailable(symbol, e))?;

        body.usd_price()
            .ok_or_else(|| Self::unavailable(symbol, "usdPrice missing or non-numeric"))
    }
}
