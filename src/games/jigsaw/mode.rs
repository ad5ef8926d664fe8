//! Game modes and their budgets.

use super::phases::FailureReason;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Rule set chosen at session start.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameMode {
    /// No limits; time and moves are shown only.
    #[default]
    Free,
    /// Solve before the clock runs out.
    TimeAttack,
    /// Solve within a fixed number of drops.
    Challenge,
}

/// Remaining allowance of a constrained mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    /// Time left on the clock.
    Time(Duration),
    /// Drops left.
    Moves(u32),
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Budget::Time(left) => write!(f, "{} left", format_clock(*left)),
            Budget::Moves(left) => write!(f, "{} moves left", left),
        }
    }
}

/// Formats a duration as `mm:ss`, truncating fractional seconds.
pub fn format_clock(duration: Duration) -> String {
    let seconds = duration.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Per-session mode rules with their running counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeState {
    /// Unconstrained play.
    Free,
    /// Time budget in effect.
    TimeAttack {
        /// Total allowance.
        limit: Duration,
        /// Time consumed so far.
        elapsed: Duration,
    },
    /// Move budget in effect.
    Challenge {
        /// Total allowance.
        limit: u32,
        /// Drops made so far.
        used: u32,
    },
}

impl ModeState {
    /// Builds the rules for `mode` on a puzzle of `piece_count` pieces.
    ///
    /// Time attack allows `seconds_per_piece` per piece; challenge allows
    /// `moves_per_piece` drops per piece.
    #[instrument]
    pub fn new(
        mode: GameMode,
        piece_count: usize,
        seconds_per_piece: u32,
        moves_per_piece: u32,
    ) -> Self {
        let pieces = u32::try_from(piece_count).unwrap_or(u32::MAX);
        let state = match mode {
            GameMode::Free => ModeState::Free,
            GameMode::TimeAttack => ModeState::TimeAttack {
                limit: Duration::from_secs(u64::from(seconds_per_piece) * u64::from(pieces)),
                elapsed: Duration::ZERO,
            },
            GameMode::Challenge => ModeState::Challenge {
                limit: moves_per_piece.saturating_mul(pieces),
                used: 0,
            },
        };
        debug!(?state, "Mode rules built");
        state
    }

    /// Which mode these rules belong to.
    pub fn mode(&self) -> GameMode {
        match self {
            ModeState::Free => GameMode::Free,
            ModeState::TimeAttack { .. } => GameMode::TimeAttack,
            ModeState::Challenge { .. } => GameMode::Challenge,
        }
    }

    /// Counts one drop against the budget.
    pub fn on_move_event(&mut self) {
        if let ModeState::Challenge { used, .. } = self {
            *used = used.saturating_add(1);
        }
    }

    /// Advances the clock.
    pub fn on_tick(&mut self, dt: Duration) {
        if let ModeState::TimeAttack { elapsed, .. } = self {
            *elapsed = elapsed.saturating_add(dt);
        }
    }

    /// Why the budget is exhausted, if it is.
    pub fn failure(&self) -> Option<FailureReason> {
        match *self {
            ModeState::Free => None,
            ModeState::TimeAttack { limit, elapsed } => {
                (elapsed >= limit).then_some(FailureReason::TimeExpired)
            }
            ModeState::Challenge { limit, used } => {
                (used >= limit).then_some(FailureReason::MovesExhausted)
            }
        }
    }

    /// True once the budget is exhausted.
    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }

    /// True while the budget still allows play.
    pub fn is_active(&self) -> bool {
        !self.is_failed()
    }

    /// What is left of the budget; `None` in free mode.
    pub fn remaining_budget(&self) -> Option<Budget> {
        match *self {
            ModeState::Free => None,
            ModeState::TimeAttack { limit, elapsed } => {
                Some(Budget::Time(limit.saturating_sub(elapsed)))
            }
            ModeState::Challenge { limit, used } => Some(Budget::Moves(limit.saturating_sub(used))),
        }
    }

    /// Restores the full budget.
    pub fn reset(&mut self) {
        match self {
            ModeState::Free => {}
            ModeState::TimeAttack { elapsed, .. } => *elapsed = Duration::ZERO,
            ModeState::Challenge { used, .. } => *used = 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in GameMode::iter() {
            assert_eq!(GameMode::from_str(&mode.to_string()), Ok(mode));
        }
        assert_eq!(GameMode::from_str("Time_Attack"), Ok(GameMode::TimeAttack));
        assert!(GameMode::from_str("zen").is_err());
    }

    #[test]
    fn test_free_never_fails() {
        let mut state = ModeState::new(GameMode::Free, 9, 30, 3);
        for _ in 0..1000 {
            state.on_move_event();
        }
        state.on_tick(Duration::from_secs(100_000));
        assert!(state.is_active());
        assert_eq!(state.remaining_budget(), None);
    }

    #[test]
    fn test_challenge_budget() {
        let mut state = ModeState::new(GameMode::Challenge, 9, 30, 3);
        assert_eq!(state.remaining_budget(), Some(Budget::Moves(27)));
        for _ in 0..26 {
            state.on_move_event();
        }
        assert!(state.is_active());
        state.on_move_event();
        assert_eq!(state.failure(), Some(FailureReason::MovesExhausted));
        assert_eq!(state.remaining_budget(), Some(Budget::Moves(0)));
    }

    #[test]
    fn test_time_attack_budget() {
        let mut state = ModeState::new(GameMode::TimeAttack, 9, 30, 3);
        assert_eq!(state.remaining_budget(), Some(Budget::Time(Duration::from_secs(270))));
        state.on_tick(Duration::from_millis(269_999));
        assert!(state.is_active());
        state.on_tick(Duration::from_millis(1));
        assert_eq!(state.failure(), Some(FailureReason::TimeExpired));

        state.reset();
        assert!(state.is_active());
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(format_clock(Duration::from_millis(125_900)), "02:05");
        assert_eq!(Budget::Moves(4).to_string(), "4 moves left");
    }
}
