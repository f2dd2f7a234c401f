//! # zest-markets
//!
//! Bet engine for the ZEST Markets prediction-market front-end: markets are
//! read from [Kalshi](https://kalshi.com), bets are simulated locally.
//!
//! ## Features
//!
//! - **Bet math** - Stake and price to contracts, payout and profit, on integer cents
//! - **Bet flow** - A strict state machine for expand → side → amount → confirm
//! - **Portfolio** - Simulated wallet, positions and activity history
//! - **Market data** - Public Kalshi market endpoints, converted for display
//!
//! ## Quick Start
//!
//! ```rust
//! use zest_markets::bet::{calculate_bet_returns, BetFlowController};
//! use zest_markets::types::{Market, Outcome};
//!
//! let market = Market::new("KXSELIC-25DEC", "Selic acima de 15%?", 0.65, 0.37);
//!
//! let mut flow = BetFlowController::new();
//! flow.expand(Outcome::Yes);
//! flow.select(Outcome::Yes);
//! flow.set_amount("100");
//!
//! // Show the potential return before the user commits
//! let quote = flow.state().quote(market.price_for(Outcome::Yes)).unwrap();
//! assert_eq!(quote, calculate_bet_returns(100.0, 0.65));
//! assert_eq!(quote.profit_display(), "53,85");
//! ```
//!
//! ## Money Representation
//!
//! Stakes enter as decimal reais and are converted to integer **cents** at
//! once; text only appears at the display boundary, in Brazilian format:
//! - 1.234,56 = 123456 cents
//!
//! Prices are decimals in `(0, 1]`: the cost of one contract as a fraction
//! of its payout. 0.65 means 65 cents per contract.
//!
//! ## Architecture
//!
//! - [`bet`] - Bet math and the bet-placement state machine
//! - [`portfolio`] - Simulated wallet and positions
//! - [`client`] - REST client for Kalshi market data
//! - [`types`] - Outcome, market and activity types
//! - [`config`] - Client and display configuration
//! - [`error`] - Error types for the crate
//!
//! The bet math and the flow never return errors: invalid numbers collapse
//! to neutral values and out-of-order events are no-ops.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod bet;
pub mod client;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod types;

// Re-export main types at crate root for convenience
pub use config::Config;
pub use error::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = Config::default();
        assert_eq!(config.environment(), config::Environment::Production);
    }
}
