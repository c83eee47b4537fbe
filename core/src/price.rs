use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use reqwest::Client;

use crate::error::{WalletError, WalletResult};

pub const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

const COIN_ID: &str = "solana";
const QUOTE_CURRENCY: &str = "usd";

/// `{"solana": {"usd": 142.17}}`
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Client for the public price-quote API.
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: &str, timeout: Duration) -> WalletResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::gateway("Failed to create HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current SOL price in US dollars.
    pub async fn sol_usd(&self) -> WalletResult<f64> {
        let url = format!("{}/simple/price", self.base_url);
        debug!("Fetching SOL price from {url}");

        let response = self
            .http
            .get(&url)
            .query(&[("ids", COIN_ID), ("vs_currencies", QUOTE_CURRENCY)])
            .send()
            .await
            .map_err(|e| WalletError::gateway("Price request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::gateway(
                "Price request failed",
                format!("HTTP {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WalletError::gateway("Failed to read price response", e))?;
        parse_sol_usd(&body)
    }
}

/// Extract the SOL/USD quote from a `simple/price` response body.
pub fn parse_sol_usd(body: &str) -> WalletResult<f64> {
    let quotes: SimplePriceResponse = serde_json::from_str(body)
        .map_err(|e| WalletError::gateway("Unexpected price response", e))?;

    quotes
        .get(COIN_ID)
        .and_then(|currencies| currencies.get(QUOTE_CURRENCY))
        .copied()
        .ok_or_else(|| WalletError::gateway("Unexpected price response", "no SOL/USD quote"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote() {
        let price = parse_sol_usd(r#"{"solana":{"usd":142.17}}"#).unwrap();
        assert!((price - 142.17).abs() < f64::EPSILON);
    }

    #[test]
    fn integer_quote_is_accepted() {
        assert_eq!(parse_sol_usd(r#"{"solana":{"usd":150}}"#).unwrap(), 150.0);
    }

    #[test]
    fn missing_quote_is_gateway_error() {
        for body in [r#"{}"#, r#"{"solana":{}}"#, r#"{"solana":{"eur":1.0}}"#] {
            let err = parse_sol_usd(body).unwrap_err();
            assert!(matches!(err, WalletError::Gateway { .. }), "{body}");
        }
    }

    #[test]
    fn garbage_is_gateway_error() {
        let err = parse_sol_usd("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, WalletError::Gateway { .. }));
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = PriceClient::new("https://example.test/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "https://example.test/api");
    }
}
