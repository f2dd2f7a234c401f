//! Activity history entries.

use serde::{Deserialize, Serialize};

use crate::types::{Cents, Outcome, Price, TimestampMs};

/// What happened in an activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    /// Funds added to the wallet
    Deposit,
    /// Funds taken out of the wallet
    Withdrawal,
    /// A simulated bet
    Bet {
        /// Market ticker
        ticker: String,
        /// Outcome bought
        outcome: Outcome,
        /// Price paid per contract, in cents
        price_cents: Price,
        /// Contracts bought
        contracts: f64,
        /// Payout if the outcome wins, in cents
        payout_cents: Cents,
    },
}

/// One line of a user's activity history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Sequence number within the portfolio, starting at 1
    pub id: u64,

    /// What happened
    #[serde(flatten)]
    pub kind: ActivityKind,

    /// Money moved, in cents (always positive)
    pub amount_cents: Cents,

    /// Wallet balance after the movement, in cents
    pub balance_after_cents: Cents,

    /// When it happened
    pub timestamp_ms: TimestampMs,
}

impl Activity {
    /// Signed effect on the wallet: deposits add, withdrawals and bets subtract
    pub fn signed_amount_cents(&self) -> Cents {
        match self.kind {
            ActivityKind::Deposit => self.amount_cents,
            ActivityKind::Withdrawal | ActivityKind::Bet { .. } => -self.amount_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_serde_shape() {
        let activity = Activity {
            id: 3,
            kind: ActivityKind::Bet {
                ticker: "KXBTC-25JAN".to_string(),
                outcome: Outcome::No,
                price_cents: 40,
                contracts: 125.0,
                payout_cents: 12500,
            },
            amount_cents: 5000,
            balance_after_cents: 15000,
            timestamp_ms: 1_700_000_000_000,
        };

        let json: serde_json::Value = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "bet");
        assert_eq!(json["outcome"], "NO");
        assert_eq!(json["amount_cents"], 5000);

        let back: Activity = serde_json::from_value(json).unwrap();
        assert_eq!(back, activity);
        assert_eq!(back.signed_amount_cents(), -5000);
    }
}
