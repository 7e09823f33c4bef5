//! Cheapest-card heuristic.
//!
//! Each legal card is scored `100 + rank`, or `300 + rank` for a trump,
//! and the lowest score is played. The first special action is taken
//! instead when:
//! - there is no card to play, or
//! - the cheapest card is a trump and the deck still holds more than
//!   `deck_cutoff` cards

use tracing::trace;

use super::{playable_specials, AiError, Strategy};
use crate::core::{Action, Card, Suit};
use crate::rules::GameState;

const PLAIN_BASE: u32 = 100;
const TRUMP_BASE: u32 = 300;

/// Plays low cards first and holds trumps back while the deck is deep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeuristicAi {
    /// Above this many cards in the deck, trumps are not spent.
    pub deck_cutoff: usize,
}

impl Default for HeuristicAi {
    fn default() -> Self {
        Self { deck_cutoff: 10 }
    }
}

impl HeuristicAi {
    pub const NAME: &'static str = "heuristic";

    pub fn new(deck_cutoff: usize) -> Self {
        Self { deck_cutoff }
    }

    /// Cost of giving up `card`.
    #[must_use]
    pub fn score(card: Card, trump: Suit) -> u32 {
        let base = if card.suit == trump {
            TRUMP_BASE
        } else {
            PLAIN_BASE
        };
        base + u32::from(card.value())
    }
}

impl Strategy for HeuristicAi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_action(&mut self, state: &GameState) -> Result<Action, AiError> {
        let specials = playable_specials(state)?;
        let trump = state.trump_suit();

        // Ties keep the earliest card
        let cheapest = state
            .card_actions()
            .iter()
            .copied()
            .min_by_key(|&card| Self::score(card, trump));

        let hold_back = match cheapest {
            None => true,
            Some(card) => card.suit == trump && state.deck_len() > self.deck_cutoff,
        };

        if hold_back {
            if let Some(&special) = specials.first() {
                trace!(%special, "heuristic takes special action");
                return Ok(Action::Special(special));
            }
        }
        // Opening attack with nothing but trumps has no special fallback
        cheapest.map(Action::Play).ok_or(AiError::NoLegalAction)
    }
}
