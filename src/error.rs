//! Error types for the zest-markets crate.
//!
//! The bet math and the bet flow never fail: invalid input collapses to a
//! neutral value and invalid transitions are no-ops. The errors here belong
//! to the fallible edges of the crate, namely fetching markets from Kalshi
//! and moving simulated money through a [`Portfolio`](crate::portfolio::Portfolio).

use thiserror::Error;

use crate::types::Cents;

/// The main error type for this crate
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration (bad base URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({}): {}", .0.status, .0.message)]
    Api(ApiError),

    /// Rate limit exceeded
    #[error("Rate limited{}", retry_hint(.retry_after_ms))]
    RateLimited {
        /// Retry after this many milliseconds
        retry_after_ms: Option<u64>,
    },

    /// Invalid market ticker
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Operation timed out
    #[error("Operation timed out")]
    Timeout,

    /// Market has no usable yes/no price
    #[error("Market {0} has no usable price")]
    Unpriced(String),

    /// Market is not open for betting
    #[error("Market {0} is not open for betting")]
    MarketNotTradeable(String),

    /// Amount is zero, negative, non-finite or buys nothing
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Wallet balance does not cover the requested movement
    #[error("Insufficient balance: need {required_cents} cents, have {available_cents}")]
    InsufficientBalance {
        /// Cents the operation needs
        required_cents: Cents,
        /// Cents available in the wallet
        available_cents: Cents,
    },
}

fn retry_hint(retry_after_ms: &Option<u64>) -> String {
    match retry_after_ms {
        Some(ms) => format!(", retry after {}ms", ms),
        None => String::new(),
    }
}

/// Error returned by the Kalshi API
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Error code from API (if provided)
    pub code: Option<String>,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// Create an API error with an error code
    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl Error {
    /// Whether the caller should route the user to the deposit flow
    pub fn needs_deposit(&self) -> bool {
        matches!(self, Error::InsufficientBalance { .. })
    }
}
