//! Session status and terminal outcomes.

use serde::{Deserialize, Serialize};

/// Why a constrained session ended without the puzzle solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum FailureReason {
    /// The time-attack clock reached zero.
    #[display("time expired")]
    TimeExpired,
    /// The challenge move budget was used up.
    #[display("moves exhausted")]
    MovesExhausted,
}

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every piece was placed.
    Completed,
    /// The mode budget ran out first.
    Failed(FailureReason),
}

impl Outcome {
    /// Returns the failure reason if the session failed.
    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Outcome::Completed => None,
            Outcome::Failed(reason) => Some(*reason),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Completed => write!(f, "Puzzle complete"),
            Outcome::Failed(reason) => write!(f, "Failed: {}", reason),
        }
    }
}

/// Where a session is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Accepting input.
    #[default]
    InProgress,
    /// Terminal; input is ignored until restart.
    Finished(Outcome),
}

impl SessionStatus {
    /// Returns true once the session has ended either way.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Finished(_))
    }

    /// Returns true if the puzzle was solved.
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Finished(Outcome::Completed))
    }

    /// Returns true if a budget ran out.
    pub fn is_failed(&self) -> bool {
        matches!(self, SessionStatus::Finished(Outcome::Failed(_)))
    }

    /// Returns the outcome of a finished session.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            SessionStatus::InProgress => None,
            SessionStatus::Finished(outcome) => Some(*outcome),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::InProgress => write!(f, "In progress"),
            SessionStatus::Finished(outcome) => write!(f, "{}", outcome),
        }
    }
}
