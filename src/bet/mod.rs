//! Bet calculation and bet-placement flow.
//!
//! - [`math`] - Stake/price arithmetic plus currency and percentage helpers
//! - [`flow`] - The expand → choose side → amount → confirm state machine
//!
//! Neither module knows about markets, sessions or rendering: they take
//! plain numbers and [`Outcome`](crate::types::Outcome) tags.

pub mod flow;
pub mod math;

pub use flow::{BetEvent, BetFlowController, BetFlowState, BetStep, ConfirmedBet, Transition};
pub use math::{calculate_bet_returns, BetCalculation, NumericInput};
