//! Simulated wallet, positions and activity history for one user.

use rustc_hash::FxHashMap;
use tracing::info;

use crate::bet::flow::ConfirmedBet;
use crate::bet::math::{
    calculate_bet_returns, format_cents_to_reais, format_currency, reais_to_cents,
    safe_parse_float, BetCalculation, NumericInput,
};
use crate::config::Locale;
use crate::error::Error;
use crate::types::{now_ms, Activity, ActivityKind, Cents, Market, Outcome};
use crate::Result;

use super::Position;

/// Receipt for a placed bet
#[derive(Debug, Clone, PartialEq)]
pub struct BetReceipt {
    /// Activity entry recording the bet
    pub activity_id: u64,
    /// Market ticker
    pub ticker: String,
    /// Outcome bought
    pub outcome: Outcome,
    /// Quote the bet was placed at
    pub quote: BetCalculation,
    /// Wallet balance after the stake was debited
    pub balance_after_cents: Cents,
}

/// A signed-in user's simulated account
///
/// The portfolio is owned by the caller's session and passed explicitly to
/// whatever needs it. Every money movement is recorded in an append-only
/// activity log.
///
/// # Example
///
/// ```rust
/// use zest_markets::bet::BetFlowController;
/// use zest_markets::portfolio::Portfolio;
/// use zest_markets::types::{Market, Outcome};
///
/// let market = Market::new("KXSELIC-25DEC", "Selic acima de 15%?", 0.65, 0.37);
/// let mut portfolio = Portfolio::new("user-1");
/// portfolio.deposit("200,00").unwrap();
///
/// let mut flow = BetFlowController::new();
/// flow.expand(Outcome::Yes);
/// flow.select(Outcome::Yes);
/// flow.set_amount("100");
/// let bet = flow.confirm().unwrap();
///
/// let receipt = portfolio.place_bet(&market, &bet).unwrap();
/// flow.complete();
///
/// assert_eq!(receipt.quote.payout_cents, 15_385);
/// assert_eq!(portfolio.balance_cents(), 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct Portfolio {
    owner: String,
    balance_cents: Cents,
    positions: FxHashMap<(String, Outcome), Position>,
    activity: Vec<Activity>,
}

impl Portfolio {
    /// Create an empty portfolio
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            balance_cents: 0,
            positions: FxHashMap::default(),
            activity: Vec::new(),
        }
    }

    /// Owner identifier
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Available balance in cents
    pub fn balance_cents(&self) -> Cents {
        self.balance_cents
    }

    /// Available balance with currency symbol, e.g. `"R$ 1.234,56"`
    pub fn balance_display(&self, locale: Locale) -> String {
        format_currency(self.balance_cents, locale)
    }

    /// Add funds to the wallet
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] unless the amount is at least one
    /// cent, or if the balance would overflow.
    pub fn deposit(&mut self, amount: impl Into<NumericInput>) -> Result<&Activity> {
        let cents = positive_cents(amount)?;
        self.balance_cents = self.balance_cents.checked_add(cents).ok_or_else(|| {
            Error::InvalidAmount(format!(
                "deposit of R$ {} would overflow the balance",
                format_cents_to_reais(cents, true)
            ))
        })?;
        info!(owner = %self.owner, cents, balance = self.balance_cents, "deposit");
        Ok(self.record(ActivityKind::Deposit, cents))
    }

    /// Take funds out of the wallet
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] unless the amount is at least one
    /// cent, and [`Error::InsufficientBalance`] if it exceeds the balance.
    pub fn withdraw(&mut self, amount: impl Into<NumericInput>) -> Result<&Activity> {
        let cents = positive_cents(amount)?;
        self.ensure_funds(cents)?;
        self.balance_cents -= cents;
        info!(owner = %self.owner, cents, balance = self.balance_cents, "withdrawal");
        Ok(self.record(ActivityKind::Withdrawal, cents))
    }

    /// Place a confirmed bet against the market's current price
    ///
    /// # Errors
    ///
    /// - [`Error::MarketNotTradeable`] if the market is not open
    /// - [`Error::InvalidAmount`] if the quote buys nothing or the position
    ///   totals would overflow
    /// - [`Error::InsufficientBalance`] if the stake exceeds the balance;
    ///   the caller should offer a deposit
    pub fn place_bet(&mut self, market: &Market, bet: &ConfirmedBet) -> Result<BetReceipt> {
        if !market.is_tradeable() {
            return Err(Error::MarketNotTradeable(market.ticker.clone()));
        }

        let quote = calculate_bet_returns(bet.amount_reais, market.price_for(bet.outcome));
        if quote.is_zero() || !quote.is_viable() {
            return Err(Error::InvalidAmount(format!(
                "R$ {} at {} buys no contracts",
                format_cents_to_reais(reais_to_cents(bet.amount_reais), true),
                market.price_for(bet.outcome)
            )));
        }
        self.ensure_funds(quote.stake_cents)?;

        let key = (market.ticker.clone(), bet.outcome);
        match self.positions.get_mut(&key) {
            Some(position) => position.merge(&quote)?,
            None => {
                let mut position = Position::open(&market.ticker, &market.title, bet.outcome);
                position.merge(&quote)?;
                self.positions.insert(key, position);
            }
        }
        self.balance_cents -= quote.stake_cents;

        info!(
            owner = %self.owner,
            ticker = %market.ticker,
            outcome = %bet.outcome,
            stake = quote.stake_cents,
            payout = quote.payout_cents,
            balance = self.balance_cents,
            "bet placed"
        );

        let kind = ActivityKind::Bet {
            ticker: market.ticker.clone(),
            outcome: bet.outcome,
            price_cents: quote.price_cents,
            contracts: quote.contracts,
            payout_cents: quote.payout_cents,
        };
        let activity_id = self.record(kind, quote.stake_cents).id;

        Ok(BetReceipt {
            activity_id,
            ticker: market.ticker.clone(),
            outcome: bet.outcome,
            quote,
            balance_after_cents: self.balance_cents,
        })
    }

    /// Position on one side of a market, if any
    pub fn position(&self, ticker: &str, outcome: Outcome) -> Option<&Position> {
        self.positions.get(&(ticker.to_string(), outcome))
    }

    /// All positions, ordered by ticker with YES before NO
    pub fn positions(&self) -> Vec<&Position> {
        let mut positions: Vec<&Position> = self.positions.values().collect();
        positions.sort_by(|a, b| {
            a.ticker
                .cmp(&b.ticker)
                .then((a.outcome == Outcome::No).cmp(&(b.outcome == Outcome::No)))
        });
        positions
    }

    /// Total payout if every held side wins, in cents
    pub fn potential_value_cents(&self) -> Cents {
        self.positions
            .values()
            .fold(0, |total: Cents, p| total.saturating_add(p.payout_cents))
    }

    /// Activity history, oldest first
    pub fn activity(&self) -> &[Activity] {
        &self.activity
    }

    /// Activity history as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn history_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.activity)?)
    }

    fn ensure_funds(&self, required_cents: Cents) -> Result<()> {
        if required_cents > self.balance_cents {
            return Err(Error::InsufficientBalance {
                required_cents,
                available_cents: self.balance_cents,
            });
        }
        Ok(())
    }

    fn record(&mut self, kind: ActivityKind, amount_cents: Cents) -> &Activity {
        let id = self.activity.len() as u64 + 1;
        self.activity.push(Activity {
            id,
            kind,
            amount_cents,
            balance_after_cents: self.balance_cents,
            timestamp_ms: now_ms(),
        });
        &self.activity[self.activity.len() - 1]
    }
}

fn positive_cents(amount: impl Into<NumericInput>) -> Result<Cents> {
    let reais = safe_parse_float(amount);
    let cents = reais_to_cents(reais);
    if cents <= 0 {
        return Err(Error::InvalidAmount(format!(
            "amount must be at least R$ 0,01, got {}",
            format_cents_to_reais(cents, true)
        )));
    }
    Ok(cents)
}
