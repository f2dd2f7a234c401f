//! Market types.
//!
//! [`KalshiMarket`] mirrors the JSON returned by Kalshi's public market
//! endpoints. [`Market`] is the record the rest of the crate works with:
//! decimal prices for both sides, optional outcome labels and a Portuguese
//! display category.

use serde::{Deserialize, Serialize};

use crate::bet::math::decimal_to_percent;
use crate::error::Error;
use crate::types::{Outcome, Price};

/// Market status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    /// Market has been created but not yet opened
    Initialized,
    /// Market has not yet opened for trading
    Unopened,
    /// Market is open for trading
    Open,
    /// Market is active (alias for open)
    Active,
    /// Market is closed (no more trading)
    Closed,
    /// Result has been determined but not paid
    Determined,
    /// Market has been settled
    Settled,
    /// Market is finalized
    Finalized,
}

impl MarketStatus {
    /// Whether bets can be placed
    pub fn is_tradeable(self) -> bool {
        matches!(self, MarketStatus::Open | MarketStatus::Active)
    }
}

/// A market as returned by the Kalshi API
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiMarket {
    /// Unique market ticker (e.g., "KXBTC-25JAN-T50000")
    pub ticker: String,

    /// Event ticker this market belongs to
    pub event_ticker: String,

    /// Market title/question
    pub title: String,

    /// Subtitle (short description)
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Market status
    pub status: MarketStatus,

    /// Yes bid price in cents
    pub yes_bid: Option<i64>,

    /// Yes ask price in cents
    pub yes_ask: Option<i64>,

    /// Last trade price in cents
    pub last_price: Option<i64>,

    /// Volume (number of contracts traded)
    #[serde(default)]
    pub volume: i64,

    /// When trading closes (ISO 8601)
    pub close_time: Option<String>,

    /// Label for the YES side
    pub yes_sub_title: Option<String>,

    /// Label for the NO side
    pub no_sub_title: Option<String>,

    /// Category
    pub category: Option<String>,
}

/// A Kalshi event (container for multiple markets)
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiEvent {
    /// Unique event ticker
    pub event_ticker: String,

    /// Series ticker this event belongs to
    pub series_ticker: String,

    /// Event title
    pub title: String,

    /// Category (e.g., "Crypto", "Economics")
    pub category: Option<String>,

    /// Mutually exclusive flag
    #[serde(default)]
    pub mutually_exclusive: bool,
}

/// Response from GetMarkets endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GetMarketsResponse {
    /// List of markets
    pub markets: Vec<KalshiMarket>,

    /// Cursor for pagination
    pub cursor: Option<String>,
}

/// Response from GetMarket endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GetMarketResponse {
    /// The market
    pub market: KalshiMarket,
}

/// Response from GetEvent endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GetEventResponse {
    /// The event
    pub event: KalshiEvent,

    /// Markets in this event
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
}

/// Display category, with Portuguese labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Politics and elections
    Politica,
    /// Economics, financials and companies
    Economia,
    /// Crypto assets
    Cripto,
    /// Sports
    Esportes,
    /// Climate and weather
    Clima,
    /// Entertainment and culture
    Cultura,
    /// Science and technology
    Tecnologia,
    /// Anything unmapped
    #[default]
    Outros,
}

impl Category {
    /// Map a Kalshi category name onto a display category
    pub fn from_kalshi(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "politics" | "elections" | "world" => Category::Politica,
            "economics" | "financials" | "companies" => Category::Economia,
            "crypto" => Category::Cripto,
            "sports" => Category::Esportes,
            "climate and weather" | "climate" | "weather" => Category::Clima,
            "entertainment" | "culture" | "social" => Category::Cultura,
            "science and technology" | "science" | "technology" | "tech" => {
                Category::Tecnologia
            }
            _ => Category::Outros,
        }
    }

    /// Portuguese label
    pub fn label(self) -> &'static str {
        match self {
            Category::Politica => "Política",
            Category::Economia => "Economia",
            Category::Cripto => "Cripto",
            Category::Esportes => "Esportes",
            Category::Clima => "Clima",
            Category::Cultura => "Cultura",
            Category::Tecnologia => "Tecnologia",
            Category::Outros => "Outros",
        }
    }
}

/// A bettable binary market
///
/// Prices are decimals in `(0, 1]`: the cost of one contract as a fraction
/// of its payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market ticker
    pub ticker: String,

    /// Market question
    pub title: String,

    /// Display category
    pub category: Category,

    /// Market status
    pub status: MarketStatus,

    /// Price of one YES contract
    pub yes_price: f64,

    /// Price of one NO contract
    pub no_price: f64,

    /// Custom label for the YES button
    pub yes_label: Option<String>,

    /// Custom label for the NO button
    pub no_label: Option<String>,

    /// Contracts traded
    pub volume: i64,

    /// When trading closes (ISO 8601)
    pub close_time: Option<String>,
}

impl Market {
    /// Create an open market with the given prices
    pub fn new(
        ticker: impl Into<String>,
        title: impl Into<String>,
        yes_price: f64,
        no_price: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            title: title.into(),
            category: Category::default(),
            status: MarketStatus::Open,
            yes_price,
            no_price,
            yes_label: None,
            no_label: None,
            volume: 0,
            close_time: None,
        }
    }

    /// Set custom outcome labels
    #[must_use]
    pub fn with_labels(mut self, yes: Option<String>, no: Option<String>) -> Self {
        self.yes_label = yes;
        self.no_label = no;
        self
    }

    /// Set the display category
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the market status
    #[must_use]
    pub fn with_status(mut self, status: MarketStatus) -> Self {
        self.status = status;
        self
    }

    /// Price of one contract for the given outcome
    pub fn price_for(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Yes => self.yes_price,
            Outcome::No => self.no_price,
        }
    }

    /// Button label for the given outcome, falling back to "Sim"/"Não"
    pub fn label_for(&self, outcome: Outcome) -> &str {
        let custom = match outcome {
            Outcome::Yes => self.yes_label.as_deref(),
            Outcome::No => self.no_label.as_deref(),
        };
        custom
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| outcome.label())
    }

    /// Implied probability for the given outcome, as a whole percentage
    pub fn percent_for(&self, outcome: Outcome) -> u8 {
        decimal_to_percent(self.price_for(outcome))
    }

    /// Check if the market accepts bets
    pub fn is_tradeable(&self) -> bool {
        self.status.is_tradeable()
    }
}

fn valid_cents(cents: Option<i64>) -> Option<Price> {
    cents
        .filter(|c| (1..=100).contains(c))
        .map(|c| c as Price)
}

impl TryFrom<&KalshiMarket> for Market {
    type Error = Error;

    /// YES costs the best ask (or the last trade); NO costs the complement
    /// of the best YES bid (or of the YES price).
    fn try_from(raw: &KalshiMarket) -> Result<Self, Self::Error> {
        let yes_cents = valid_cents(raw.yes_ask)
            .or_else(|| valid_cents(raw.last_price))
            .ok_or_else(|| Error::Unpriced(raw.ticker.clone()))?;

        let no_cents = raw
            .yes_bid
            .filter(|bid| (1..=99).contains(bid))
            .map(|bid| 100 - bid)
            .or(Some(100 - i64::from(yes_cents)));
        let no_cents = valid_cents(no_cents).ok_or_else(|| Error::Unpriced(raw.ticker.clone()))?;

        Ok(Self {
            ticker: raw.ticker.clone(),
            title: raw.title.clone(),
            category: raw
                .category
                .as_deref()
                .map(Category::from_kalshi)
                .unwrap_or_default(),
            status: raw.status,
            yes_price: f64::from(yes_cents) / 100.0,
            no_price: f64::from(no_cents) / 100.0,
            yes_label: raw.yes_sub_title.clone().filter(|s| !s.is_empty()),
            no_label: raw.no_sub_title.clone().filter(|s| !s.is_empty()),
            volume: raw.volume,
            close_time: raw.close_time.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_market(yes_bid: Option<i64>, yes_ask: Option<i64>, last: Option<i64>) -> KalshiMarket {
        KalshiMarket {
            ticker: "KXSELIC-25DEC".to_string(),
            event_ticker: "KXSELIC".to_string(),
            title: "Selic acima de 15%?".to_string(),
            subtitle: None,
            status: MarketStatus::Active,
            yes_bid,
            yes_ask,
            last_price: last,
            volume: 1000,
            close_time: None,
            yes_sub_title: Some("Acima".to_string()),
            no_sub_title: Some(String::new()),
            category: Some("Economics".to_string()),
        }
    }

    #[test]
    fn test_market_from_kalshi() {
        let market = Market::try_from(&raw_market(Some(63), Some(65), Some(64))).unwrap();
        assert_eq!(market.yes_price, 0.65);
        assert_eq!(market.no_price, 0.37);
        assert_eq!(market.category, Category::Economia);
        assert_eq!(market.label_for(Outcome::Yes), "Acima");
        assert_eq!(market.label_for(Outcome::No), "Não");
        assert!(market.is_tradeable());
    }

    #[test]
    fn test_market_price_fallbacks() {
        let market = Market::try_from(&raw_market(None, Some(0), Some(40))).unwrap();
        assert_eq!(market.yes_price, 0.40);
        assert_eq!(market.no_price, 0.60);
    }

    #[test]
    fn test_unpriced_market() {
        let err = Market::try_from(&raw_market(None, None, None)).unwrap_err();
        assert!(matches!(err, Error::Unpriced(ticker) if ticker == "KXSELIC-25DEC"));

        // YES at 100 leaves nothing to pay for NO
        let err = Market::try_from(&raw_market(None, Some(100), None)).unwrap_err();
        assert!(matches!(err, Error::Unpriced(_)));
    }

    #[test]
    fn test_market_deserialize() {
        let json = r#"{
            "ticker": "KXBTC-25JAN",
            "event_ticker": "KXBTC",
            "title": "Bitcoin above 100k?",
            "status": "active",
            "yes_bid": 44,
            "yes_ask": 46,
            "last_price": 45,
            "volume": 12,
            "close_time": "2025-01-31T00:00:00Z",
            "yes_sub_title": null,
            "no_sub_title": null,
            "category": "Crypto"
        }"#;
        let raw: KalshiMarket = serde_json::from_str(json).unwrap();
        let market = Market::try_from(&raw).unwrap();
        assert_eq!(market.category, Category::Cripto);
        assert_eq!(market.percent_for(Outcome::Yes), 46);
        assert_eq!(market.percent_for(Outcome::No), 56);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(Category::from_kalshi("Politics"), Category::Politica);
        assert_eq!(Category::from_kalshi(" climate and weather "), Category::Clima);
        assert_eq!(Category::from_kalshi("Mentions"), Category::Outros);
        assert_eq!(Category::Politica.label(), "Política");
    }

    #[test]
    fn test_closed_market_not_tradeable() {
        let market = Market::new("T", "Q", 0.5, 0.5).with_status(MarketStatus::Closed);
        assert!(!market.is_tradeable());
        assert_eq!(market.price_for(Outcome::No), 0.5);
    }
}
