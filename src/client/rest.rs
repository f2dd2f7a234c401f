//! HTTP client for Kalshi's public market-data endpoints.
//!
//! Only unauthenticated endpoints are used: markets are read for display
//! and bets are simulated locally, so no request is ever signed.
//!
//! # Example
//!
//! ```rust,no_run
//! use zest_markets::client::RestClient;
//! use zest_markets::Config;
//!
//! # async fn example() -> zest_markets::Result<()> {
//! let rest = RestClient::new(&Config::new())?;
//! let markets = rest.get_open_markets().await?;
//! for market in &markets {
//!     println!("{} ({}%)", market.title, market.percent_for(zest_markets::types::Outcome::Yes));
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Error};
use crate::types::market::{GetEventResponse, GetMarketResponse, GetMarketsResponse};
use crate::types::{KalshiMarket, Market};

/// HTTP client for the Kalshi market-data API
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    page_limit: u32,
}

impl RestClient {
    /// Create a new REST client
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is malformed or the HTTP
    /// client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base_url = config.rest_base_url().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {}: {}", base_url, e)))?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            page_limit: config.page_limit(),
        })
    }

    /// Build the full URL for an API path and query
    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::Config(format!("invalid endpoint {}: {}", path, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T>(&self, url: Url) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| if e.is_timeout() { Error::Timeout } else { Error::Http(e) })?;

        self.handle_response(response).await
    }

    /// List markets
    ///
    /// # Arguments
    ///
    /// * `status` - Filter such as `"open"`, `"closed"` or `"settled"`
    /// * `limit` - Page size, defaults to the configured page limit
    /// * `cursor` - Pagination cursor from a previous response
    pub async fn get_markets(
        &self,
        status: Option<&str>,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<GetMarketsResponse, Error> {
        let mut query = vec![("limit", limit.unwrap_or(self.page_limit).to_string())];
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("cursor", cursor.to_string()));
        }

        let url = self.endpoint("/markets", &query)?;
        self.get(url).await
    }

    /// Get a single market by ticker
    pub async fn get_market(&self, ticker: &str) -> Result<KalshiMarket, Error> {
        let ticker = validate_ticker(ticker)?;
        let url = self.endpoint(&format!("/markets/{}", ticker), &[])?;
        let response: GetMarketResponse = self.get(url).await?;
        Ok(response.market)
    }

    /// Get an event with its markets
    pub async fn get_event(&self, event_ticker: &str) -> Result<GetEventResponse, Error> {
        let event_ticker = validate_ticker(event_ticker)?;
        let url = self.endpoint(
            &format!("/events/{}", event_ticker),
            &[("with_nested_markets", "false".to_string())],
        )?;
        self.get(url).await
    }

    /// First page of open markets, converted for display
    ///
    /// Markets without a usable price are skipped.
    pub async fn get_open_markets(&self) -> Result<Vec<Market>, Error> {
        let response = self.get_markets(Some("open"), None, None).await?;
        Ok(to_markets(&response.markets))
    }

    /// Handle the HTTP response, checking for errors
    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        // Check for rate limiting
        if status.as_u16() == 429 {
            let retry_after_ms = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(|secs| secs * 1000);

            warn!(?retry_after_ms, "rate limited");
            return Err(Error::RateLimited { retry_after_ms });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "API request failed");
            return Err(Error::Api(parse_api_error(status.as_u16(), &body)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Error::from)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Convert wire markets, skipping the ones that cannot be priced
pub fn to_markets(raw: &[KalshiMarket]) -> Vec<Market> {
    raw.iter()
        .filter_map(|m| match Market::try_from(m) {
            Ok(market) => Some(market),
            Err(e) => {
                debug!(ticker = %m.ticker, error = %e, "skipping market");
                None
            }
        })
        .collect()
}

/// Reject tickers that are empty or could escape their path segment
fn validate_ticker(ticker: &str) -> Result<&str, Error> {
    let ticker = ticker.trim();
    let valid = !ticker.is_empty()
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && ticker != "."
        && ticker != "..";
    if valid {
        Ok(ticker)
    } else {
        Err(Error::InvalidTicker(ticker.to_string()))
    }
}

/// Build an [`ApiError`] from an error body, which may or may not be JSON
fn parse_api_error(status: u16, body: &str) -> ApiError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiError::new(status, body);
    };
    // Kalshi nests the details under "error" on some endpoints
    let details = value.get("error").filter(|e| e.is_object()).unwrap_or(&value);

    let message = details
        .get("message")
        .or_else(|| details.get("error"))
        .and_then(|v| v.as_str())
        .unwrap_or(body)
        .to_string();

    match details.get("code").and_then(|v| v.as_str()) {
        Some(code) => ApiError::with_code(status, code, message),
        None => ApiError::new(status, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::types::MarketStatus;

    fn client() -> RestClient {
        RestClient::new(&Config::new().with_page_limit(25)).unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let rest = client();
        let url = rest
            .endpoint(
                "/markets",
                &[("limit", "25".to_string()), ("cursor", "a b&c".to_string())],
            )
            .unwrap();
        assert_eq!(url.path(), "/trade-api/v2/markets");
        assert_eq!(url.query(), Some("limit=25&cursor=a+b%26c"));
    }

    #[test]
    fn test_demo_base_url() {
        let rest = RestClient::new(&Config::new().with_environment(Environment::Demo)).unwrap();
        assert!(rest.base_url().contains("demo"));
    }

    #[test]
    fn test_validate_ticker() {
        assert_eq!(validate_ticker(" KXBTC-25JAN ").unwrap(), "KXBTC-25JAN");
        assert!(validate_ticker("KXHIGHNY-24DEC31-B45.5").is_ok());
        for bad in ["", "   ", "..", "a/b", "a?b", "ação"] {
            assert!(matches!(validate_ticker(bad), Err(Error::InvalidTicker(_))), "{bad}");
        }
    }

    #[test]
    fn test_parse_api_error() {
        let err = parse_api_error(
            404,
            r#"{"error":{"code":"not_found","message":"market not found"}}"#,
        );
        assert_eq!(err.status, 404);
        assert_eq!(err.code.as_deref(), Some("not_found"));
        assert_eq!(err.message, "market not found");

        let err = parse_api_error(500, "<html>oops</html>");
        assert_eq!(err.message, "<html>oops</html>");
        assert!(err.is_server_error());

        let err = parse_api_error(400, r#"{"error":"bad cursor"}"#);
        assert_eq!(err.message, "bad cursor");
    }

    #[test]
    fn test_to_markets_skips_unpriced() {
        let json = r#"{
            "markets": [
                {"ticker": "A", "event_ticker": "E", "title": "priced", "status": "active",
                 "yes_bid": 30, "yes_ask": 32, "last_price": 31},
                {"ticker": "B", "event_ticker": "E", "title": "unpriced", "status": "active",
                 "yes_bid": 0, "yes_ask": 0, "last_price": 0}
            ],
            "cursor": ""
        }"#;
        let response: GetMarketsResponse = serde_json::from_str(json).unwrap();
        let markets = to_markets(&response.markets);
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].ticker, "A");
        assert_eq!(markets[0].status, MarketStatus::Active);
        assert_eq!(markets[0].no_price, 0.70);
    }
}
