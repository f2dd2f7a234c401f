//! Open positions built from simulated bets.

use serde::Serialize;

use crate::bet::math::BetCalculation;
use crate::error::Error;
use crate::types::{Cents, Outcome};
use crate::Result;

/// Contracts held on one side of one market
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    /// Market ticker
    pub ticker: String,
    /// Market question at the time of the first bet
    pub title: String,
    /// Side held
    pub outcome: Outcome,
    /// Contracts held (fractional)
    pub contracts: f64,
    /// Total stake paid, in cents
    pub cost_cents: Cents,
    /// Payout if the side wins, in cents
    pub payout_cents: Cents,
    /// Number of bets merged into this position
    pub bet_count: u32,
}

impl Position {
    pub(crate) fn open(
        ticker: impl Into<String>,
        title: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            title: title.into(),
            outcome,
            contracts: 0.0,
            cost_cents: 0,
            payout_cents: 0,
            bet_count: 0,
        }
    }

    /// Add a placed quote to the position
    ///
    /// The position is left unchanged if any total would overflow.
    pub(crate) fn merge(&mut self, quote: &BetCalculation) -> Result<()> {
        let (Some(cost_cents), Some(payout_cents), Some(bet_count)) = (
            self.cost_cents.checked_add(quote.stake_cents),
            self.payout_cents.checked_add(quote.payout_cents),
            self.bet_count.checked_add(1),
        ) else {
            return Err(Error::InvalidAmount(format!(
                "position {} {} cannot grow any further",
                self.ticker, self.outcome
            )));
        };
        self.contracts += quote.contracts;
        self.cost_cents = cost_cents;
        self.payout_cents = payout_cents;
        self.bet_count = bet_count;
        Ok(())
    }

    /// Average price paid per contract, in cents
    pub fn average_price_cents(&self) -> f64 {
        if self.contracts > 0.0 {
            self.cost_cents as f64 / self.contracts
        } else {
            0.0
        }
    }

    /// Profit if the side wins, in cents
    pub fn potential_profit_cents(&self) -> Cents {
        self.payout_cents - self.cost_cents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::math::calculate_bet_returns;

    #[test]
    fn test_merge_accumulates() {
        let mut position = Position::open("KXBTC-25JAN", "Bitcoin acima de 100k?", Outcome::Yes);
        assert_eq!(position.average_price_cents(), 0.0);

        position.merge(&calculate_bet_returns(10.0, 0.50)).unwrap();
        position.merge(&calculate_bet_returns(10.0, 0.25)).unwrap();

        assert_eq!(position.bet_count, 2);
        assert_eq!(position.cost_cents, 2_000);
        assert_eq!(position.contracts, 60.0);
        assert_eq!(position.payout_cents, 6_000);
        assert_eq!(position.potential_profit_cents(), 4_000);
        assert!((position.average_price_cents() - 33.333).abs() < 0.001);
    }

    #[test]
    fn test_merge_overflow_leaves_position_unchanged() {
        let mut position = Position::open("KXBTC-25JAN", "Bitcoin acima de 100k?", Outcome::No);
        position.merge(&calculate_bet_returns(10.0, 0.50)).unwrap();
        position.payout_cents = Cents::MAX - 1;
        let before = position.clone();

        let err = position.merge(&calculate_bet_returns(10.0, 0.50)).unwrap_err();

        assert!(matches!(err, Error::InvalidAmount(_)));
        assert_eq!(position, before);
    }
}
