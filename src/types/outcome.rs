//! The outcome tag a bet is placed on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a binary market (YES or NO contract)
///
/// Every market is a binary contract: buying YES pays out if the event
/// happens, buying NO pays out if it doesn't. The two prices sum to roughly
/// one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// Pays out if the event happens
    Yes,
    /// Pays out if the event doesn't happen
    No,
}

impl Outcome {
    /// Get the opposite outcome
    pub fn opposite(self) -> Self {
        match self {
            Outcome::Yes => Outcome::No,
            Outcome::No => Outcome::Yes,
        }
    }

    /// Default Portuguese label shown on the outcome button
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Yes => "Sim",
            Outcome::No => "Não",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Yes => f.write_str("YES"),
            Outcome::No => f.write_str("NO"),
        }
    }
}
