//! Simulated wallet and portfolio.
//!
//! Bets, deposits and withdrawals are simulated client-side: no money moves
//! and no order reaches an exchange. A [`Portfolio`] keeps the balance in
//! integer cents, merges bets into [`Position`]s keyed by market and side,
//! and records every movement as an [`Activity`](crate::types::Activity).

pub mod account;
pub mod position;

pub use account::{BetReceipt, Portfolio};
pub use position::Position;
