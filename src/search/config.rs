//! Endgame search activation guard.

use serde::{Deserialize, Serialize};

use crate::rules::GameState;

/// When the endgame search may be used instead of a cheaper strategy.
///
/// Exhaustive search is exponential in the number of cards left, so it is
/// only attempted on small residual positions.
///
/// Strategies receive the full `GameState`. The search therefore plays
/// fair only while the deck is empty: both hands are then known to each
/// player by elimination. Turning off `require_empty_deck` (or using
/// `unbounded`) lets the search read the deck order and the opponent's
/// hand, which is meant for analysis and tests, not for opponents of a
/// human player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Only search once the deck is empty (default: true).
    /// With an empty deck no information is hidden from the searcher.
    pub require_empty_deck: bool,

    /// Maximum cards in both hands plus both fields (default: 12).
    pub max_remaining_cards: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            require_empty_deck: true,
            max_remaining_cards: 12,
        }
    }
}

impl SearchConfig {
    /// No guard at all: always search.
    ///
    /// Only practical on very small games, and sees hidden cards.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            require_empty_deck: false,
            max_remaining_cards: usize::MAX,
        }
    }

    /// Set the remaining-card cutoff.
    pub fn with_max_remaining_cards(mut self, cards: usize) -> Self {
        self.max_remaining_cards = cards;
        self
    }

    /// Set whether the deck must be empty.
    pub fn with_require_empty_deck(mut self, require: bool) -> Self {
        self.require_empty_deck = require;
        self
    }

    /// Whether `state` is small enough to search.
    #[must_use]
    pub fn allows(&self, state: &GameState) -> bool {
        if self.require_empty_deck && state.deck_len() > 0 {
            return false;
        }
        state.cards_in_play() <= self.max_remaining_cards
    }
}
