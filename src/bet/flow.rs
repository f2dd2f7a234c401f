//! State machine for the bet-placement interaction.
//!
//! One [`BetFlowController`] belongs to one market card. The user walks it
//! through four steps:
//!
//! ```text
//! Collapsed --expand--> ChooseSide --select--> Amount --amount > 0--> Confirm
//!     ^                                          ^                      |
//!     |                                          +------amount = 0------+
//!     +------------------ collapse / reset (from anywhere) -------------+
//! ```
//!
//! Events that arrive out of order are no-ops: the state comes back
//! unchanged. The UI fires events from whatever it rendered last, so a
//! stale click must be harmless.
//!
//! # Example
//!
//! ```rust
//! use zest_markets::bet::{BetEvent, BetFlowController, BetStep};
//! use zest_markets::types::Outcome;
//!
//! let mut flow = BetFlowController::new();
//! flow.dispatch(BetEvent::ExpandOutcome(Outcome::Yes));
//! flow.dispatch(BetEvent::SelectOutcome(Outcome::No));
//! flow.dispatch(BetEvent::SetAmount("50".into()));
//! assert_eq!(flow.state().step(), BetStep::Confirm);
//!
//! let confirmed = flow.dispatch(BetEvent::Confirm).confirmed.unwrap();
//! assert_eq!(confirmed.outcome, Outcome::No);
//! assert_eq!(confirmed.amount_reais, 50.0);
//! ```

use serde::Serialize;
use tracing::{debug, trace};

use crate::bet::math::{calculate_bet_returns, BetCalculation, NumericInput};
use crate::types::Outcome;

/// Visible step of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BetStep {
    /// Nothing expanded
    Collapsed,
    /// Outcome expanded, waiting for a side
    ChooseSide,
    /// Side chosen, waiting for a positive amount
    Amount,
    /// Ready to confirm
    Confirm,
}

/// Internal phase. Each variant carries exactly the data valid in it, so
/// e.g. a selected side without an expanded outcome cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Collapsed,
    ChooseSide {
        expanded: Outcome,
    },
    Amount {
        expanded: Outcome,
        selected: Outcome,
    },
    Confirm {
        expanded: Outcome,
        selected: Outcome,
        amount_reais: f64,
    },
}

/// Snapshot of one bet-placement interaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BetFlowState {
    phase: Phase,
}

/// Events the UI sends to the flow
#[derive(Debug, Clone, PartialEq)]
pub enum BetEvent {
    /// Open an outcome's bet panel; always restarts the flow
    ExpandOutcome(Outcome),
    /// Pick the side to buy
    SelectOutcome(Outcome),
    /// Amount field changed
    SetAmount(NumericInput),
    /// Close the panel
    Collapse,
    /// Commit the bet
    Confirm,
    /// Return to the initial state
    Reset,
}

/// The frozen bet emitted by a successful [`BetEvent::Confirm`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfirmedBet {
    /// Outcome to buy
    pub outcome: Outcome,
    /// Stake in reais
    pub amount_reais: f64,
}

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State after the event (unchanged when rejected)
    pub state: BetFlowState,
    /// Whether the event's precondition held
    pub applied: bool,
    /// Set only by an accepted confirm
    pub confirmed: Option<ConfirmedBet>,
}

impl Transition {
    fn accepted(state: BetFlowState) -> Self {
        Self {
            state,
            applied: true,
            confirmed: None,
        }
    }

    fn rejected(state: BetFlowState) -> Self {
        Self {
            state,
            applied: false,
            confirmed: None,
        }
    }
}

impl BetFlowState {
    /// The collapsed initial state
    pub const fn new() -> Self {
        Self {
            phase: Phase::Collapsed,
        }
    }

    /// Current step
    pub fn step(&self) -> BetStep {
        match self.phase {
            Phase::Collapsed => BetStep::Collapsed,
            Phase::ChooseSide { .. } => BetStep::ChooseSide,
            Phase::Amount { .. } => BetStep::Amount,
            Phase::Confirm { .. } => BetStep::Confirm,
        }
    }

    /// Outcome whose panel is open; `Some` whenever not collapsed
    pub fn expanded_outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Collapsed => None,
            Phase::ChooseSide { expanded }
            | Phase::Amount { expanded, .. }
            | Phase::Confirm { expanded, .. } => Some(expanded),
        }
    }

    /// Side chosen; `Some` only in the amount and confirm steps
    pub fn selected_outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Amount { selected, .. } | Phase::Confirm { selected, .. } => Some(selected),
            _ => None,
        }
    }

    /// Entered amount in reais; positive only in the confirm step
    pub fn amount_reais(&self) -> f64 {
        match self.phase {
            Phase::Confirm { amount_reais, .. } => amount_reais,
            _ => 0.0,
        }
    }

    /// The bet a confirm would emit right now
    pub fn confirmed_bet(&self) -> Option<ConfirmedBet> {
        match self.phase {
            Phase::Confirm {
                selected,
                amount_reais,
                ..
            } if amount_reais > 0.0 => Some(ConfirmedBet {
                outcome: selected,
                amount_reais,
            }),
            _ => None,
        }
    }

    /// Potential return at `price_decimal`, available once confirmable.
    ///
    /// `price_decimal` is the market price of [`selected_outcome`](Self::selected_outcome).
    pub fn quote(&self, price_decimal: f64) -> Option<BetCalculation> {
        self.confirmed_bet()
            .map(|bet| calculate_bet_returns(bet.amount_reais, price_decimal))
    }

    /// Apply an event without mutating `self`
    pub fn apply(&self, event: &BetEvent) -> Transition {
        match (event, self.phase) {
            (BetEvent::ExpandOutcome(outcome), _) => Transition::accepted(Self {
                phase: Phase::ChooseSide { expanded: *outcome },
            }),

            (BetEvent::SelectOutcome(outcome), Phase::ChooseSide { expanded }) => {
                Transition::accepted(Self {
                    phase: Phase::Amount {
                        expanded,
                        selected: *outcome,
                    },
                })
            }

            (
                BetEvent::SetAmount(input),
                Phase::Amount { expanded, selected } | Phase::Confirm { expanded, selected, .. },
            ) => {
                let amount_reais = input.value().max(0.0);
                let phase = if amount_reais > 0.0 {
                    Phase::Confirm {
                        expanded,
                        selected,
                        amount_reais,
                    }
                } else {
                    Phase::Amount { expanded, selected }
                };
                Transition::accepted(Self { phase })
            }

            (BetEvent::Confirm, Phase::Confirm { .. }) => match self.confirmed_bet() {
                Some(bet) => Transition {
                    state: *self,
                    applied: true,
                    confirmed: Some(bet),
                },
                None => Transition::rejected(*self),
            },

            (BetEvent::Collapse | BetEvent::Reset, _) => Transition::accepted(Self::new()),

            _ => Transition::rejected(*self),
        }
    }

    /// Apply an event, returning only the next state
    #[must_use]
    pub fn next(&self, event: &BetEvent) -> Self {
        self.apply(event).state
    }
}

/// Owner of one [`BetFlowState`]
///
/// The controller never performs I/O. When [`BetEvent::Confirm`] is
/// accepted it hands back a [`ConfirmedBet`]; placing it is up to the
/// caller, who then calls [`complete`](Self::complete).
#[derive(Debug, Clone, Default)]
pub struct BetFlowController {
    state: BetFlowState,
}

impl BetFlowController {
    /// Create a controller in the collapsed state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &BetFlowState {
        &self.state
    }

    /// Apply an event and return the resulting transition
    pub fn dispatch(&mut self, event: BetEvent) -> Transition {
        let transition = self.state.apply(&event);

        if !transition.applied {
            trace!(
                ?event,
                step = ?self.state.step(),
                "bet flow event ignored"
            );
        } else if let Some(bet) = transition.confirmed {
            debug!(outcome = %bet.outcome, amount_reais = bet.amount_reais, "bet confirmed");
        }

        self.state = transition.state;
        transition
    }

    /// Expand an outcome
    pub fn expand(&mut self, outcome: Outcome) -> &BetFlowState {
        self.dispatch(BetEvent::ExpandOutcome(outcome));
        &self.state
    }

    /// Choose a side
    pub fn select(&mut self, outcome: Outcome) -> &BetFlowState {
        self.dispatch(BetEvent::SelectOutcome(outcome));
        &self.state
    }

    /// Update the amount field
    pub fn set_amount(&mut self, amount: impl Into<NumericInput>) -> &BetFlowState {
        self.dispatch(BetEvent::SetAmount(amount.into()));
        &self.state
    }

    /// Confirm, returning the bet to place if the flow was ready
    pub fn confirm(&mut self) -> Option<ConfirmedBet> {
        self.dispatch(BetEvent::Confirm).confirmed
    }

    /// Close the panel
    pub fn collapse(&mut self) -> &BetFlowState {
        self.dispatch(BetEvent::Collapse);
        &self.state
    }

    /// Return to the initial state
    pub fn reset(&mut self) -> &BetFlowState {
        self.dispatch(BetEvent::Reset);
        &self.state
    }

    /// Finish after the confirmed bet was placed
    pub fn complete(&mut self) {
        self.state = BetFlowState::new();
    }
}
