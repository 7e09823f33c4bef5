//! Computer opponents.
//!
//! Every strategy reads the full `GameState` and returns one of its legal
//! actions. None of them ever choose Rematch: restarting is left to the
//! session.
//!
//! - `RandomAi`: uniform over the legal actions
//! - `HeuristicAi`: plays its cheapest card, saving trumps while the deck is deep
//! - `EndgameAi`: exhaustive search once the position is small enough
//! - `arena`: AI-vs-AI games and tallies

pub mod arena;
mod endgame;
mod heuristic;
mod random;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Action, DurakError, SpecialAction};
use crate::rules::GameState;

pub use endgame::EndgameAi;
pub use heuristic::HeuristicAi;
pub use random::RandomAi;

/// Errors a strategy can report instead of an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// The game is decided; only Rematch is available.
    #[error("game is over")]
    GameOver,

    /// Nothing a computer player may choose.
    #[error("no legal action available")]
    NoLegalAction,

    /// The rules engine rejected a move while searching or playing out.
    #[error(transparent)]
    Rules(#[from] DurakError),
}

/// A computer player.
pub trait Strategy: Send {
    /// Short stable name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Choose an action for the active player of `state`.
    fn select_action(&mut self, state: &GameState) -> Result<Action, AiError>;
}

/// Check that the game is still running and return the special actions a
/// computer may take.
pub(crate) fn playable_specials(state: &GameState) -> Result<Vec<SpecialAction>, AiError> {
    if state.is_over() {
        return Err(AiError::GameOver);
    }
    Ok(state
        .special_actions()
        .iter()
        .copied()
        .filter(|&special| special != SpecialAction::Rematch)
        .collect())
}

/// Named computer strategies, for configuration and the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Random,
    #[default]
    Heuristic,
    Endgame,
}

impl Opponent {
    pub const ALL: [Opponent; 3] = [Opponent::Random, Opponent::Heuristic, Opponent::Endgame];

    pub const fn as_str(self) -> &'static str {
        match self {
            Opponent::Random => "random",
            Opponent::Heuristic => "heuristic",
            Opponent::Endgame => "endgame",
        }
    }

    /// Build a boxed strategy. `seed` only affects `Random`.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            Opponent::Random => Box::new(RandomAi::new(seed)),
            Opponent::Heuristic => Box::new(HeuristicAi::default()),
            Opponent::Endgame => Box::new(EndgameAi::default()),
        }
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Opponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opponent::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown strategy {s:?} (expected random, heuristic or endgame)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    #[test]
    fn test_opponent_parse() {
        assert_eq!("random".parse::<Opponent>(), Ok(Opponent::Random));
        assert_eq!("Heuristic".parse::<Opponent>(), Ok(Opponent::Heuristic));
        assert_eq!(" endgame ".parse::<Opponent>(), Ok(Opponent::Endgame));
        assert!("human".parse::<Opponent>().is_err());
    }

    #[test]
    fn test_built_names() {
        for opponent in Opponent::ALL {
            assert_eq!(opponent.build(Some(1)).name(), opponent.as_str());
        }
    }

    #[test]
    fn test_every_strategy_picks_legal_action() {
        let state = GameState::new(GameConfig::default().with_seed(11)).unwrap();
        for opponent in Opponent::ALL {
            let mut ai = opponent.build(Some(3));
            let action = ai.select_action(&state).unwrap();
            assert!(state.is_legal(action), "{opponent} chose {action}");
        }
    }

    #[test]
    fn test_finished_game_is_reported() {
        // Two-card deck: trump plus one card, so one hand is empty at once
        let state = GameState::new(GameConfig::default().with_deck_size(2).with_seed(5)).unwrap();
        assert!(state.is_over());
        for opponent in Opponent::ALL {
            let mut ai = opponent.build(None);
            assert_eq!(ai.select_action(&state), Err(AiError::GameOver));
        }
    }
}
